//! Request and response types for the HTTP API

pub mod analysis;
pub mod breed;
pub mod error;
pub mod json;
pub mod session;

pub use analysis::{AnalysisResponse, PredictionResponse};
pub use breed::{AskRequest, AskResponse, BreedListResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use session::{MessageResponse, SendMessageRequest, SessionResponse, TurnResponse};

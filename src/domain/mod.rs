//! Domain layer - Core breed identification and knowledge logic

pub mod breed;
pub mod error;
pub mod knowledge;
pub mod responder;
pub mod session;

pub use breed::{
    canonicalize_label, interpret, rank, BreedModel, ConfidencePolicy, InputTensor, LabelCatalog,
    Prediction, RankedBreed, RawLabel, TensorLayout, Verdict, DEFAULT_CONFIDENCE_THRESHOLD,
};
pub use error::DomainError;
pub use knowledge::{BreedFactSheet, BreedKnowledge, FactLookup, MatchTier};
pub use responder::{greeting_for, respond, Intent, Question, Responder};
pub use session::{ConversationTurn, Role, Session, SessionId, SessionRepository};

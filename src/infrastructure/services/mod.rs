//! Application services composed from the domain and infrastructure pieces

mod analysis_service;
mod chat_service;
mod knowledge_service;

pub use analysis_service::{Analysis, AnalysisService};
pub use chat_service::{ChatReply, ChatService, MAX_QUESTION_CHARS, validate_question};
pub use knowledge_service::{BreedProfile, KnowledgeService};

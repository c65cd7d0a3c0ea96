//! Chat session domain - one identified breed and its conversation

mod entity;
pub mod repository;

pub use entity::{validate_session_id, ConversationTurn, Role, Session, SessionId, MAX_ID_LENGTH};
pub use repository::SessionRepository;

#[cfg(test)]
pub use repository::MockSessionRepository;

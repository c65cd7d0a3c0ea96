//! Session entities

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Regex pattern for valid session IDs: sess-{uuid}
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^sess-[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$")
        .expect("session id pattern is valid")
});

/// Maximum length for session IDs
pub const MAX_ID_LENGTH: usize = 41; // "sess-" + 36 char UUID

/// Validated session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_session_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a new session ID with UUID
    pub fn generate() -> Self {
        Self(format!("sess-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a session ID string
pub fn validate_session_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation("Session ID cannot be empty"));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(DomainError::validation(format!(
            "Session ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(DomainError::validation(format!(
            "Invalid session ID '{}': must be in format sess-{{uuid}}",
            id
        )));
    }

    Ok(())
}

/// Who wrote a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a session's conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Chat session scoped to one identified breed.
///
/// The conversation is append-only; restarting an analysis discards the
/// whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    breed: String,
    confidence: f32,
    turns: Vec<ConversationTurn>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(breed: impl Into<String>, confidence: f32) -> Self {
        let now = Utc::now();

        Self {
            id: SessionId::generate(),
            breed: breed.into(),
            confidence,
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.updated_at = turn.created_at;
        self.turns.push(turn);
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_valid() {
        let id = SessionId::generate();

        assert!(validate_session_id(id.as_str()).is_ok());
        assert_eq!(id.as_str().len(), MAX_ID_LENGTH);
    }

    #[test]
    fn test_invalid_ids() {
        assert!(SessionId::new("").is_err());
        assert!(SessionId::new("op-123").is_err());
        assert!(SessionId::new("sess-not-a-uuid").is_err());
        assert!(SessionId::new(format!("sess-{}x", uuid::Uuid::new_v4())).is_err());
    }

    #[test]
    fn test_session_id_serde() {
        let id = SessionId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<SessionId>("\"bogus\"").is_err());
    }

    #[test]
    fn test_session_appends_in_order() {
        let mut session = Session::new("Pug", 72.3);
        session.push(ConversationTurn::assistant("hi"));
        session.push(ConversationTurn::user("what do they eat?"));

        let roles: Vec<Role> = session.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User]);
        assert_eq!(session.last_turn().unwrap().text, "what do they eat?");
        assert!(session.updated_at() >= session.created_at());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}

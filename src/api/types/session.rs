//! Session and message payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::session::{ConversationTurn, Role, Session};
use crate::domain::Intent;
use crate::infrastructure::services::ChatReply;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ConversationTurn> for TurnResponse {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            role: turn.role,
            content: turn.text.clone(),
            created_at: turn.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub object: String,
    pub breed: String,
    pub confidence: f32,
    pub turns: Vec<TurnResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn from_domain(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            object: "session".to_string(),
            breed: session.breed().to_string(),
            confidence: session.confidence(),
            turns: session.turns().iter().map(TurnResponse::from).collect(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Body of `POST /v1/sessions/{session_id}/messages`
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub reply: String,
    pub intent: Intent,
    pub session: SessionResponse,
}

impl MessageResponse {
    pub fn from_domain(reply: &ChatReply) -> Self {
        Self {
            reply: reply.reply.clone(),
            intent: reply.intent,
            session: SessionResponse::from_domain(&reply.session),
        }
    }
}

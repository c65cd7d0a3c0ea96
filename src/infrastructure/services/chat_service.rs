//! Chat service - per-session question and answer turns

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::domain::session::{ConversationTurn, Session, SessionId, SessionRepository};
use crate::domain::{greeting_for, BreedKnowledge, DomainError, Intent, Prediction, Responder};

/// Longest accepted question, in characters
pub const MAX_QUESTION_CHARS: usize = 1000;

const TURN_LOCK_CAPACITY: u64 = 10_000;
const TURN_LOCK_IDLE: Duration = Duration::from_secs(600);

/// Serialises read-modify-write of one session's turns
type TurnLock = Arc<Mutex<()>>;

/// Assistant reply together with the updated session
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub intent: Intent,
    pub reply: String,
    pub session: Session,
}

/// Owns conversation state for identified breeds.
///
/// Turns on one session are applied one at a time, and a reset waits for an
/// in-flight question so the deleted session is never written back.
pub struct ChatService {
    sessions: Arc<dyn SessionRepository>,
    knowledge: &'static BreedKnowledge,
    locks: Cache<SessionId, TurnLock>,
}

impl ChatService {
    pub fn new(sessions: Arc<dyn SessionRepository>, knowledge: &'static BreedKnowledge) -> Self {
        let locks = Cache::builder()
            .max_capacity(TURN_LOCK_CAPACITY)
            .time_to_idle(TURN_LOCK_IDLE)
            .build();

        Self {
            sessions,
            knowledge,
            locks,
        }
    }

    async fn turn_lock(&self, id: &SessionId) -> TurnLock {
        self.locks
            .get_with(id.clone(), async { Arc::new(Mutex::new(())) })
            .await
    }

    /// Open a session for an accepted prediction, seeded with a greeting
    #[instrument(skip(self, prediction), fields(breed = %prediction.breed()))]
    pub async fn start(&self, prediction: &Prediction) -> Result<Session, DomainError> {
        let mut session = Session::new(prediction.breed(), prediction.confidence());
        session.push(ConversationTurn::assistant(greeting_for(prediction.breed())));

        let session = self.sessions.save(session).await?;
        info!(session_id = %session.id(), "Chat session started");

        Ok(session)
    }

    pub async fn get(&self, id: &str) -> Result<Session, DomainError> {
        let session_id = SessionId::new(id)?;

        self.sessions
            .get(&session_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Session '{}' not found", id)))
    }

    /// Append a user question and the assistant's answer
    #[instrument(skip(self, question))]
    pub async fn ask(&self, id: &str, question: &str) -> Result<ChatReply, DomainError> {
        let question = validate_question(question)?;
        let session_id = SessionId::new(id)?;

        let lock = self.turn_lock(&session_id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .sessions
            .get(&session_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Session '{}' not found", id)))?;

        let responder = Responder::new(self.knowledge);
        let intent = responder.intent_of(question);
        let reply = responder.respond(session.breed(), question);

        session.push(ConversationTurn::user(question));
        session.push(ConversationTurn::assistant(reply.clone()));

        let session = self.sessions.save(session).await?;
        debug!(intent = ?intent, turns = session.turns().len(), "Answered question");

        Ok(ChatReply {
            intent,
            reply,
            session,
        })
    }

    /// Discard a session so the user can start a new analysis
    pub async fn reset(&self, id: &str) -> Result<(), DomainError> {
        let session_id = SessionId::new(id)?;

        let lock = self.turn_lock(&session_id).await;
        let guard = lock.lock().await;

        let existed = self.sessions.delete(&session_id).await?;
        self.locks.invalidate(&session_id).await;
        drop(guard);

        if !existed {
            return Err(DomainError::not_found(format!("Session '{}' not found", id)));
        }

        info!(session_id = %session_id, "Chat session reset");
        Ok(())
    }

    pub async fn active_sessions(&self) -> Result<u64, DomainError> {
        self.sessions.count().await
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("breeds", &self.knowledge.len())
            .field("turn_locks", &self.locks.entry_count())
            .finish()
    }
}

/// Trim a question and enforce the length rules
pub fn validate_question(question: &str) -> Result<&str, DomainError> {
    let question = question.trim();

    if question.is_empty() {
        return Err(DomainError::validation("Question cannot be empty"));
    }

    let length = question.chars().count();
    if length > MAX_QUESTION_CHARS {
        return Err(DomainError::validation(format!(
            "Question too long: {} characters (max {})",
            length, MAX_QUESTION_CHARS
        )));
    }

    Ok(question)
}

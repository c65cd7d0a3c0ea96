//! Session repository trait

use async_trait::async_trait;

use super::{Session, SessionId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Storage for chat sessions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Get a session by ID
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Insert or replace a session
    async fn save(&self, session: Session) -> Result<Session, DomainError>;

    /// Delete a session, returning whether it existed
    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Number of live sessions
    async fn count(&self) -> Result<u64, DomainError>;
}

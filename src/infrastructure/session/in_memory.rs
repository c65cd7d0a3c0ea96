//! In-memory session repository using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::config::SessionConfig;
use crate::domain::session::{Session, SessionId, SessionRepository};
use crate::domain::DomainError;

/// Configuration for the in-memory session store
#[derive(Debug, Clone)]
pub struct InMemorySessionConfig {
    /// Maximum number of live sessions
    pub max_capacity: u64,
    /// Sessions not accessed for this duration are evicted
    pub time_to_idle: Duration,
}

impl Default for InMemorySessionConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_idle: Duration::from_secs(3600),
        }
    }
}

impl From<&SessionConfig> for InMemorySessionConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            max_capacity: config.max_capacity,
            time_to_idle: config.idle_timeout(),
        }
    }
}

/// Thread-safe session store with capacity and idle eviction
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    sessions: MokaCache<String, Session>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_config(InMemorySessionConfig::default())
    }

    pub fn with_config(config: InMemorySessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_idle(config.time_to_idle)
            .build();

        Self { sessions }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.get(id.as_str()).await)
    }

    async fn save(&self, session: Session) -> Result<Session, DomainError> {
        self.sessions
            .insert(session.id().as_str().to_string(), session.clone())
            .await;
        Ok(session)
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.remove(id.as_str()).await.is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.sessions.run_pending_tasks().await;
        Ok(self.sessions.entry_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::ConversationTurn;

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemorySessionRepository::new();
        let mut session = Session::new("Pug", 72.3);
        session.push(ConversationTurn::assistant("hello"));
        let id = session.id().clone();

        repo.save(session.clone()).await.unwrap();

        let fetched = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched, session);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces() {
        let repo = InMemorySessionRepository::new();
        let mut session = repo.save(Session::new("Pug", 90.0)).await.unwrap();

        session.push(ConversationTurn::user("hi"));
        repo.save(session.clone()).await.unwrap();

        let fetched = repo.get(session.id()).await.unwrap().unwrap();
        assert_eq!(fetched.turns().len(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemorySessionRepository::new();
        let session = repo.save(Session::new("Beagle", 66.0)).await.unwrap();

        assert!(repo.delete(session.id()).await.unwrap());
        assert!(!repo.delete(session.id()).await.unwrap());
        assert!(repo.get(session.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.get(&SessionId::generate()).await.unwrap().is_none());
    }
}

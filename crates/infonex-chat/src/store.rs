//! Session persistence port.
//!
//! The orchestrator writes through this seam after a turn completes.
//! Persistence failures are reported as `StoreError` but callers treat
//! them as non-fatal: a turn that produced an answer is not discarded
//! because the write behind it failed.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::Message;
use infonex_common::SessionId;

#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

/// Where conversation history lives between turns.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn append_message(
        &self,
        session: &SessionId,
        message: &Message,
    ) -> Result<(), StoreError>;

    async fn load_history(&self, session: &SessionId) -> Result<Vec<Message>, StoreError>;
}

/// In-memory store; the CLI default.
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Vec<Message>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn append_message(
        &self,
        session: &SessionId,
        message: &Message,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn load_history(&self, session: &SessionId) -> Result<Vec<Message>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_in_order() {
        let store = MemoryStore::new();
        let session = SessionId::new();
        store
            .append_message(&session, &Message::user("first"))
            .await
            .unwrap();
        store
            .append_message(&session, &Message::assistant("second"))
            .await
            .unwrap();

        let history = store.load_history(&session).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content.joined_text(), "first");
        assert_eq!(history[1].content.joined_text(), "second");
    }

    #[tokio::test]
    async fn unknown_session_is_empty() {
        let store = MemoryStore::new();
        let history = store.load_history(&SessionId::new()).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = MemoryStore::new();
        let a = SessionId::new();
        let b = SessionId::new();
        store
            .append_message(&a, &Message::user("for a"))
            .await
            .unwrap();

        assert_eq!(store.load_history(&a).await.unwrap().len(), 1);
        assert!(store.load_history(&b).await.unwrap().is_empty());
    }
}

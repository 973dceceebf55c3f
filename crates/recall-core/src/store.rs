//! Storage collaborator boundary.
//!
//! The engine consumes durable records through [`MemoryStore`] and never
//! writes through it — persisting results back is the surrounding
//! application's responsibility. Implementations live outside this
//! workspace; tests use in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::fact::Fact;
use crate::ids::ConversationId;
use crate::message::Message;
use crate::summary::{ConversationMeta, SummaryEntry};

/// Errors surfaced by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be read.
    #[error("storage read failed: {0}")]
    Read(String),
    /// A stored record could not be decoded.
    #[error("storage decode failed: {0}")]
    Decode(String),
}

/// Read-only access to durable conversation and fact records.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Load the metadata for one conversation.
    ///
    /// Returns `Ok(None)` when the conversation no longer exists (it may
    /// have been deleted since the caller captured the ID).
    async fn load_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationMeta>, StoreError>;

    /// Load the ordered message history of one conversation.
    async fn load_messages(&self, id: &ConversationId) -> Result<Vec<Message>, StoreError>;

    /// Load all durable facts.
    async fn load_facts(&self) -> Result<Vec<Fact>, StoreError>;

    /// Load all stored conversation summaries.
    async fn load_summaries(&self) -> Result<Vec<SummaryEntry>, StoreError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct EmptyStore;

    #[async_trait]
    impl MemoryStore for EmptyStore {
        async fn load_conversation(
            &self,
            _id: &ConversationId,
        ) -> Result<Option<ConversationMeta>, StoreError> {
            Ok(None)
        }

        async fn load_messages(&self, _id: &ConversationId) -> Result<Vec<Message>, StoreError> {
            Ok(Vec::new())
        }

        async fn load_facts(&self) -> Result<Vec<Fact>, StoreError> {
            Ok(Vec::new())
        }

        async fn load_summaries(&self) -> Result<Vec<SummaryEntry>, StoreError> {
            Err(StoreError::Read("disk unavailable".into()))
        }
    }

    #[tokio::test]
    async fn trait_is_object_safe() {
        let store: Box<dyn MemoryStore> = Box::new(EmptyStore);
        let conv = ConversationId::from("conv-1");
        assert!(store.load_conversation(&conv).await.unwrap().is_none());
        assert!(store.load_messages(&conv).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn errors_carry_context() {
        let store = EmptyStore;
        let err = store.load_summaries().await.unwrap_err();
        assert_matches!(err, StoreError::Read(msg) if msg.contains("disk"));
    }

    #[test]
    fn error_display() {
        let err = StoreError::Decode("bad json".into());
        assert_eq!(err.to_string(), "storage decode failed: bad json");
    }
}

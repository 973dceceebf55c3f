//! Context service over the storage collaborator.
//!
//! [`ContextService`] pulls a conversation's inputs through [`MemoryStore`]
//! and hands them to the assembler. A conversation that vanished between
//! capture and load (user deletion) degrades to placeholder metadata
//! rather than erroring.

use tracing::debug;

use recall_core::{ConversationId, ConversationMeta, MemoryStore, StoreError};

use crate::assembler::{AssembledContext, ContextAssembler};

/// Loads context inputs from storage and assembles the prompt.
pub struct ContextService<S: MemoryStore> {
    store: S,
    assembler: ContextAssembler,
}

impl<S: MemoryStore> ContextService<S> {
    /// Create a service over the given store and assembler.
    pub fn new(store: S, assembler: ContextAssembler) -> Self {
        Self { store, assembler }
    }

    /// Assemble the prompt for one conversation.
    ///
    /// Storage failures propagate; a missing conversation does not — it
    /// assembles against placeholder metadata and whatever records remain.
    pub async fn assemble_for(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<AssembledContext, StoreError> {
        let meta = self
            .store
            .load_conversation(conversation_id)
            .await?
            .unwrap_or_else(|| {
                debug!(%conversation_id, "conversation missing, assembling with placeholder meta");
                ConversationMeta::untitled(conversation_id.clone())
            });

        let facts = self.store.load_facts().await?;
        let summaries = self.store.load_summaries().await?;
        let messages = self.store.load_messages(conversation_id).await?;

        Ok(self.assembler.assemble(&meta, &facts, &summaries, &messages))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

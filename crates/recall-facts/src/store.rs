//! Serialized in-memory fact store.
//!
//! The whole fact list lives behind one `tokio::sync::RwLock`. Every
//! read-modify-write (append + duplicate-check, edit, verify, remove)
//! takes the write lock for its full duration, which gives the ordering
//! guarantee background extraction relies on: a task that resolves late
//! dedupes against the fact list *as it is then*, not against the snapshot
//! it captured when it started.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use recall_core::{Fact, FactCategory, FactId};

use crate::dedupe::is_duplicate;

/// Shared, serialized fact list.
///
/// Clones share the same underlying list. Facts are never removed except
/// through [`FactStore::remove`] — a user action.
#[derive(Clone, Default)]
pub struct FactStore {
    facts: Arc<RwLock<Vec<Fact>>>,
}

impl FactStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing facts (loaded by the host app).
    #[must_use]
    pub fn with_facts(initial: Vec<Fact>) -> Self {
        Self {
            facts: Arc::new(RwLock::new(initial)),
        }
    }

    /// Snapshot of all facts.
    pub async fn snapshot(&self) -> Vec<Fact> {
        self.facts.read().await.clone()
    }

    /// Number of stored facts.
    pub async fn len(&self) -> usize {
        self.facts.read().await.len()
    }

    /// Whether the store holds no facts.
    pub async fn is_empty(&self) -> bool {
        self.facts.read().await.is_empty()
    }

    /// Append a fact unless it duplicates an existing one.
    ///
    /// The duplicate check and the append happen under one write lock, so
    /// the check always sees the latest list.
    pub async fn insert_if_new(&self, fact: Fact) -> bool {
        let mut facts = self.facts.write().await;
        if is_duplicate(&fact.content, &facts) {
            debug!(content = %fact.content, "fact skipped as duplicate");
            return false;
        }
        facts.push(fact);
        true
    }

    /// Add a user-entered fact. Manual entry bypasses deduplication — the
    /// user decides what their own list contains.
    pub async fn add_manual(&self, category: FactCategory, content: impl Into<String>) -> Fact {
        let fact = Fact::manual(category, content);
        self.facts.write().await.push(fact.clone());
        fact
    }

    /// Replace a fact's content, marking it user-edited.
    ///
    /// Returns `false` when no fact has the given ID.
    pub async fn edit(&self, id: &FactId, content: impl Into<String>) -> bool {
        let mut facts = self.facts.write().await;
        match facts.iter_mut().find(|f| &f.id == id) {
            Some(fact) => {
                fact.edit(content);
                true
            }
            None => false,
        }
    }

    /// Set a fact's verified flag.
    pub async fn set_verified(&self, id: &FactId, verified: bool) -> bool {
        let mut facts = self.facts.write().await;
        match facts.iter_mut().find(|f| &f.id == id) {
            Some(fact) => {
                fact.set_verified(verified);
                true
            }
            None => false,
        }
    }

    /// Remove a fact (user deletion — the only way a fact leaves the
    /// store).
    pub async fn remove(&self, id: &FactId) -> bool {
        let mut facts = self.facts.write().await;
        let before = facts.len();
        facts.retain(|f| &f.id != id);
        facts.len() < before
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

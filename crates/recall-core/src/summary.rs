//! Conversation summary records.
//!
//! - [`ConversationSummary`]: the distilled description of one conversation
//! - [`SummaryEntry`]: a stored summary keyed by conversation, with the
//!   conversation's last-activity time for recency ordering
//! - [`ConversationMeta`]: the lightweight identity of a conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ConversationId;

/// A distilled description of one conversation.
///
/// Created once when the user leaves a conversation (or lazily on load) and
/// immutable afterwards unless explicitly regenerated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    /// Generated title.
    pub title: String,
    /// One/two-sentence summary body.
    pub summary: String,
    /// Deduplicated topic strings.
    pub topics: Vec<String>,
    /// Short verbatim snippets from the user's own messages.
    pub snippets: Vec<String>,
    /// Participant names observed in the conversation.
    pub participants: Vec<String>,
    /// Number of messages in the source conversation.
    pub message_count: u32,
    /// Intermediate per-chunk summaries, present only when the chunked
    /// strategy ran. Ordered by chunk number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_summaries: Option<Vec<String>>,
    /// Generation time (UTC).
    pub generated_at: DateTime<Utc>,
}

impl ConversationSummary {
    /// The fixed placeholder summary for an empty conversation.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            title: "Empty chat".to_owned(),
            summary: "No messages were exchanged.".to_owned(),
            topics: Vec::new(),
            snippets: Vec::new(),
            participants: Vec::new(),
            message_count: 0,
            chunk_summaries: None,
            generated_at: Utc::now(),
        }
    }

    /// Whether the chunked (map-reduce) strategy produced this summary.
    #[must_use]
    pub fn was_chunked(&self) -> bool {
        self.chunk_summaries.is_some()
    }
}

/// A stored summary keyed by conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    /// Conversation this summary describes.
    pub conversation_id: ConversationId,
    /// Last-activity time of the conversation (UTC), used for recency
    /// ordering when selecting prior summaries for context.
    pub updated_at: DateTime<Utc>,
    /// The summary itself.
    pub summary: ConversationSummary,
}

/// Lightweight conversation identity used by context assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMeta {
    /// Conversation ID.
    pub id: ConversationId,
    /// User-visible title; `None` for a brand-new conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ConversationMeta {
    /// Create metadata for a brand-new, untitled conversation.
    #[must_use]
    pub fn untitled(id: ConversationId) -> Self {
        Self { id, title: None }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

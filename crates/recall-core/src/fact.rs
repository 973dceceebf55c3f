//! Durable fact types.
//!
//! A fact is a lasting statement about the user, retained across
//! conversations. Facts are created by background extraction or directly by
//! the user, mutated on edit/verify, and only ever deleted by the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ConversationId, FactId};

/// Closed set of fact categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactCategory {
    /// Identity and personal information (name, location, family).
    Identity,
    /// Likes, dislikes, and tastes.
    Preference,
    /// Goals and aspirations.
    Goal,
    /// Background and life context (work, history, circumstances).
    Background,
    /// Standing instructions for how the agent should behave.
    Instruction,
}

impl FactCategory {
    /// Parse a collaborator-produced label, case-insensitively.
    ///
    /// Returns `None` for unknown labels — the caller skips that single
    /// candidate rather than failing the batch.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "identity" | "personal" | "personal info" => Some(Self::Identity),
            "preference" | "preferences" => Some(Self::Preference),
            "goal" | "goals" => Some(Self::Goal),
            "background" | "context" => Some(Self::Background),
            "instruction" | "instructions" | "behavior" => Some(Self::Instruction),
            _ => None,
        }
    }

    /// Display label used in context bullets.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Preference => "preference",
            Self::Goal => "goal",
            Self::Background => "background",
            Self::Instruction => "instruction",
        }
    }
}

/// Where a fact came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum FactProvenance {
    /// Auto-extracted from a specific conversation.
    ///
    /// The conversation may no longer exist; a dangling ID here is
    /// acceptable and must not be treated as an error.
    Extracted {
        /// Source conversation.
        conversation_id: ConversationId,
    },
    /// Created directly by the user.
    Manual,
    /// Edited by the user after creation.
    Edited,
}

/// A durable statement about the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    /// Unique fact ID.
    pub id: FactId,
    /// Category from the closed set.
    pub category: FactCategory,
    /// Free-text content.
    pub content: String,
    /// Confidence score in `[0, 1]`.
    pub confidence: f64,
    /// Provenance tag.
    pub provenance: FactProvenance,
    /// Whether the user has confirmed this fact.
    pub verified: bool,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last mutation time (UTC).
    pub updated_at: DateTime<Utc>,
}

impl Fact {
    /// Create a fact auto-extracted from a conversation.
    #[must_use]
    pub fn extracted(
        category: FactCategory,
        content: impl Into<String>,
        confidence: f64,
        conversation_id: &ConversationId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: FactId::new(),
            category,
            content: content.into(),
            confidence: confidence.clamp(0.0, 1.0),
            provenance: FactProvenance::Extracted {
                conversation_id: conversation_id.clone(),
            },
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a manually-entered fact.
    ///
    /// Manual facts carry full confidence and start verified — the user
    /// typed them in themselves.
    #[must_use]
    pub fn manual(category: FactCategory, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: FactId::new(),
            category,
            content: content.into(),
            confidence: 1.0,
            provenance: FactProvenance::Manual,
            verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content, marking the fact as user-edited.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.provenance = FactProvenance::Edited;
        self.updated_at = Utc::now();
    }

    /// Set the verified flag.
    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
        self.updated_at = Utc::now();
    }

    /// Render this fact as a `- category: content` context bullet.
    #[must_use]
    pub fn bullet(&self) -> String {
        format!("- {}: {}", self.category.label(), self.content)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

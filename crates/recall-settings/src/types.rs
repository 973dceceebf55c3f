//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON
//! wire format. Each type implements [`Default`] with production default
//! values. Types marked with `#[serde(default)]` allow partial JSON —
//! missing fields get their default value during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the Recall engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecallSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Token budget allocations for context assembly.
    pub budget: BudgetSettings,
    /// Summarization (distillation) tunables.
    pub distill: DistillSettings,
    /// Fact-gate tunables.
    pub facts: FactGateSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for RecallSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "recall".to_string(),
            budget: BudgetSettings::default(),
            distill: DistillSettings::default(),
            facts: FactGateSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Token budget allocations for one generation request.
///
/// Facts/summaries/window are soft ceilings for their layers; the output
/// reservation is held back for the model's own response. The invariant
/// `metadata + facts + summaries + window + outputReservation ≤ totalTokens`
/// is validated by the context crate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetSettings {
    /// Total token ceiling for one request.
    pub total_tokens: u32,
    /// Tokens reserved for the model's own output.
    pub output_reservation: u32,
    /// Bookkeeping share for session metadata (Layer 1 renders in full).
    pub metadata_allocation: u32,
    /// Soft ceiling for durable facts (Layer 2).
    pub facts_allocation: u32,
    /// Soft ceiling for prior-conversation summaries (Layer 3).
    pub summaries_allocation: u32,
    /// Floor for the current-conversation window (Layer 4).
    pub window_allocation: u32,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            total_tokens: 2048,
            output_reservation: 512,
            metadata_allocation: 96,
            facts_allocation: 448,
            summaries_allocation: 448,
            window_allocation: 544,
        }
    }
}

/// Summarization tunables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistillSettings {
    /// Messages per chunk in the map-reduce strategy.
    pub chunk_size: u32,
    /// Maximum chunks per conversation (bounds distillation cost).
    pub max_chunks: u32,
    /// Maximum user-message snippets kept on a summary.
    pub max_snippets: u32,
    /// Word cap per snippet.
    pub snippet_max_words: u32,
    /// Minimum message count before a conversation is worth summarizing.
    pub min_messages_for_summary: u32,
}

impl Default for DistillSettings {
    fn default() -> Self {
        Self {
            chunk_size: 20,
            max_chunks: 10,
            max_snippets: 3,
            snippet_max_words: 12,
            min_messages_for_summary: 4,
        }
    }
}

/// Fact-gate tunables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactGateSettings {
    /// Minimum character length an utterance needs to carry a durable fact.
    pub min_fact_chars: u32,
    /// Length under which the brevity-gated rejection rules apply.
    pub short_utterance_chars: u32,
}

impl Default for FactGateSettings {
    fn default() -> Self {
        Self {
            min_fact_chars: 10,
            short_utterance_chars: 40,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum log level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

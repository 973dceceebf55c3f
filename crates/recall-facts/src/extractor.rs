//! Background fact extraction.
//!
//! Pipeline: gate → one structured classification call → parse/clamp →
//! dedupe/store. The gate runs first so rejected utterances never cost a
//! model call.
//!
//! Extraction is fire-and-forget relative to the message-send flow:
//! [`FactExtractor::spawn`] returns immediately and the task logs-and-
//! swallows its own failures. A task that resolves after the user deleted
//! the source conversation still stores its facts — their provenance
//! simply references a conversation ID that no longer resolves.

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use std::sync::Arc;

use recall_core::{ConversationId, Fact, FactCategory};
use recall_llm::{CompletionRequest, GenerationError, GenerationProvider};

use crate::gate::FactGate;
use crate::store::FactStore;

// =============================================================================
// Errors
// =============================================================================

/// Errors from the extraction path.
///
/// Only the generation collaborator can fail; malformed collaborator
/// output degrades to zero candidates locally.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The classification call failed.
    #[error("fact classification call failed: {0}")]
    Generation(#[from] GenerationError),
}

// =============================================================================
// Prompts
// =============================================================================

/// System instructions for the classification call.
const EXTRACTION_SYSTEM_PROMPT: &str = "You decide whether a user's message states durable \
personal facts worth remembering across conversations. Respond with a JSON array; for each \
fact found include: \"worthRemembering\" (boolean), \"fact\" (a short third-person statement), \
\"category\" (one of: identity, preference, goal, background, instruction), and \"confidence\" \
(0 to 1). Respond with an empty array when nothing is worth remembering. JSON only.";

/// JSON Schema for the classification result.
fn extraction_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "worthRemembering": { "type": "boolean" },
                "fact": { "type": "string" },
                "category": { "type": "string" },
                "confidence": { "type": "number" }
            },
            "required": ["worthRemembering", "fact"]
        }
    })
}

fn build_extraction_prompt(utterance: &str) -> String {
    format!("The user said:\n\n{utterance}")
}

// =============================================================================
// Candidate parsing
// =============================================================================

/// One parsed classification candidate.
struct Candidate {
    category: FactCategory,
    content: String,
    confidence: f64,
}

/// Parse classification candidates from raw collaborator text.
///
/// Malformed output degrades locally: confidence is clamped into
/// `[0.5, 1.0]`, an unknown category label skips that single candidate
/// (never the batch), and non-JSON output yields zero candidates.
fn parse_candidates(response: &str) -> Vec<Candidate> {
    let Ok(parsed) = serde_json::from_str::<Value>(response.trim()) else {
        debug!("classification output was not JSON, no candidates");
        return Vec::new();
    };

    // Accept a bare object as a single-candidate array.
    let items: Vec<Value> = match parsed {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| {
            if item.get("worthRemembering").and_then(Value::as_bool) != Some(true) {
                return None;
            }
            let content = item.get("fact").and_then(Value::as_str)?.trim();
            if content.is_empty() {
                return None;
            }
            let label = item.get("category").and_then(Value::as_str).unwrap_or("");
            let Some(category) = FactCategory::parse_label(label) else {
                debug!(label, "skipping candidate with unknown category");
                return None;
            };
            let confidence = item
                .get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(0.5)
                .clamp(0.5, 1.0);
            Some(Candidate {
                category,
                content: content.to_owned(),
                confidence,
            })
        })
        .collect()
}

// =============================================================================
// FactExtractor
// =============================================================================

/// Gate → classify → dedupe/store.
#[derive(Clone)]
pub struct FactExtractor {
    gate: Arc<FactGate>,
    provider: Arc<dyn GenerationProvider>,
    store: FactStore,
}

impl FactExtractor {
    /// Create an extractor with the default gate.
    #[must_use]
    pub fn new(provider: Arc<dyn GenerationProvider>, store: FactStore) -> Self {
        Self::with_gate(FactGate::new(), provider, store)
    }

    /// Create an extractor with a specific gate.
    #[must_use]
    pub fn with_gate(
        gate: FactGate,
        provider: Arc<dyn GenerationProvider>,
        store: FactStore,
    ) -> Self {
        Self {
            gate: Arc::new(gate),
            provider,
            store,
        }
    }

    /// The store this extractor writes into.
    #[must_use]
    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Extract facts from one utterance and store the new ones.
    ///
    /// Returns the facts actually stored (gated-out utterances and
    /// duplicates yield an empty list).
    pub async fn extract(
        &self,
        conversation_id: &ConversationId,
        utterance: &str,
    ) -> Result<Vec<Fact>, ExtractError> {
        if let Some(label) = self.gate.rejection(utterance) {
            debug!(label, "utterance gated out before classification");
            return Ok(Vec::new());
        }

        let request = CompletionRequest::structured(
            EXTRACTION_SYSTEM_PROMPT,
            build_extraction_prompt(utterance),
            extraction_schema(),
        );
        let completion = self.provider.complete(&request).await?;
        let candidates = parse_candidates(&completion.text);

        let mut stored = Vec::new();
        for candidate in candidates {
            let fact = Fact::extracted(
                candidate.category,
                candidate.content,
                candidate.confidence,
                conversation_id,
            );
            // Dedupe runs against the fact list as it is *now*, under the
            // store's write lock — not against a pre-call snapshot.
            if self.store.insert_if_new(fact.clone()).await {
                stored.push(fact);
            }
        }

        Ok(stored)
    }

    /// Run extraction in the background, off the message-send path.
    ///
    /// Fail-silent: errors are logged and swallowed. The handle resolves
    /// to the number of facts stored, for a transient "N memories saved"
    /// notification.
    pub fn spawn(
        &self,
        conversation_id: ConversationId,
        utterance: String,
    ) -> tokio::task::JoinHandle<usize> {
        let extractor = self.clone();
        tokio::spawn(async move {
            match extractor.extract(&conversation_id, &utterance).await {
                Ok(facts) => {
                    if !facts.is_empty() {
                        info!(count = facts.len(), "memories saved");
                    }
                    facts.len()
                }
                Err(error) => {
                    warn!(%error, "background fact extraction failed");
                    0
                }
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Provider trait for the generation collaborator.
//!
//! Implementors wrap whatever model backend the host runtime provides
//! (on-device or remote). Implementations must be `Send + Sync` so
//! background summarization and extraction tasks can hold them across
//! await points.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single completion request.
///
/// `schema` is a JSON Schema describing the expected structured output;
/// when present, providers should constrain generation to it. Providers
/// that cannot enforce schemas return best-effort JSON text and the engine
/// parses leniently.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// System instructions for the call.
    pub system: String,
    /// The user prompt.
    pub prompt: String,
    /// Optional JSON Schema for structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    /// Build a free-text request.
    #[must_use]
    pub fn text(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Build a structured request with an output schema.
    #[must_use]
    pub fn structured(
        system: impl Into<String>,
        prompt: impl Into<String>,
        schema: Value,
    ) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            schema: Some(schema),
            ..Self::default()
        }
    }
}

/// The collaborator's response: raw generated text.
///
/// Structured calls return JSON text that the caller parses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Generated text.
    pub text: String,
}

impl Completion {
    /// Wrap generated text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Closed set of generation failure kinds.
///
/// Backends mapping their own error vocabulary onto this enum should use
/// [`GenerationError::Failed`] for anything without a specific kind.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The call did not complete in time.
    #[error("generation timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The model refused the request (guardrail violation).
    #[error("generation refused: {message}")]
    Refused {
        /// Refusal description.
        message: String,
    },

    /// The prompt exceeded the model's context window.
    #[error("prompt exceeded the model context window")]
    ContextWindowExceeded,

    /// The model produced more output than the caller allowed.
    #[error("generated output exceeded the allowed size")]
    OutputTooLarge,

    /// Any other failure.
    #[error("generation failed: {message}")]
    Failed {
        /// Error description.
        message: String,
    },
}

impl GenerationError {
    /// Whether retrying the same call later could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Error category string for log fields.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Refused { .. } => "refused",
            Self::ContextWindowExceeded => "context_window",
            Self::OutputTooLarge => "output_too_large",
            Self::Failed { .. } => "failed",
        }
    }
}

/// The generation collaborator.
///
/// One operation serves every engine call site: chat replies (free text),
/// chunk/merge summarization (structured), and fact classification
/// (structured).
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    struct EchoProvider;

    #[async_trait]
    impl GenerationProvider for EchoProvider {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Completion, GenerationError> {
            if request.prompt.is_empty() {
                return Err(GenerationError::Failed {
                    message: "empty prompt".into(),
                });
            }
            Ok(Completion::new(request.prompt.clone()))
        }
    }

    // -- Request builders --

    #[test]
    fn text_request_has_no_schema() {
        let req = CompletionRequest::text("system", "prompt");
        assert!(req.schema.is_none());
        assert_eq!(req.system, "system");
        assert_eq!(req.prompt, "prompt");
    }

    #[test]
    fn structured_request_carries_schema() {
        let req = CompletionRequest::structured("s", "p", json!({"type": "object"}));
        assert!(req.schema.is_some());
    }

    #[test]
    fn request_serde_skips_absent_options() {
        let req = CompletionRequest::text("s", "p");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("schema"));
        assert!(!json.contains("maxTokens"));
        assert!(!json.contains("temperature"));
    }

    // -- Error helpers --

    #[test]
    fn timeout_is_retryable() {
        let err = GenerationError::Timeout { timeout_ms: 30_000 };
        assert!(err.is_retryable());
        assert_eq!(err.category(), "timeout");
    }

    #[test]
    fn refusal_is_not_retryable() {
        let err = GenerationError::Refused {
            message: "policy".into(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.category(), "refused");
    }

    #[test]
    fn categories_are_distinct() {
        let errors = [
            GenerationError::Timeout { timeout_ms: 1 },
            GenerationError::Refused {
                message: String::new(),
            },
            GenerationError::ContextWindowExceeded,
            GenerationError::OutputTooLarge,
            GenerationError::Failed {
                message: String::new(),
            },
        ];
        let categories: std::collections::HashSet<_> =
            errors.iter().map(|e| e.category()).collect();
        assert_eq!(categories.len(), errors.len());
    }

    #[test]
    fn error_display() {
        let err = GenerationError::Timeout { timeout_ms: 5_000 };
        assert_eq!(err.to_string(), "generation timed out after 5000ms");
    }

    // -- Trait --

    #[tokio::test]
    async fn provider_roundtrip() {
        let provider: Box<dyn GenerationProvider> = Box::new(EchoProvider);
        let completion = provider
            .complete(&CompletionRequest::text("s", "hello"))
            .await
            .unwrap();
        assert_eq!(completion.text, "hello");
    }

    #[tokio::test]
    async fn provider_failure_surfaces() {
        let provider = EchoProvider;
        let err = provider
            .complete(&CompletionRequest::text("s", ""))
            .await
            .unwrap_err();
        assert_matches!(err, GenerationError::Failed { .. });
    }
}

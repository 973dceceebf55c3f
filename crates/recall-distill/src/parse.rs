//! Collaborator output parsing.
//!
//! Structured calls return JSON text. Parsing is deliberately lenient:
//! malformed output is defaulted locally (missing title → placeholder,
//! missing summary → the cleaned raw text, unusable lists → empty), never
//! propagated as an error. Only the collaborator *call* itself can fail.

use serde_json::Value;

use crate::constants::FALLBACK_TITLE;

/// One structured summary result, as parsed from collaborator output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuredSummary {
    /// Generated title.
    pub title: String,
    /// Summary body.
    pub summary: String,
    /// Topic strings (already split and trimmed).
    pub topics: Vec<String>,
    /// Participant names (already split and trimmed).
    pub participants: Vec<String>,
}

/// Parse a structured summary from raw collaborator text.
///
/// Strips markdown code fences, then reads `title`, `summary`, `topics`,
/// and `participants`. List fields accept either a comma-separated string
/// or a JSON array of strings.
#[must_use]
pub fn parse_structured_summary(response: &str) -> StructuredSummary {
    let cleaned = strip_code_fences(response);

    let Ok(parsed) = serde_json::from_str::<Value>(&cleaned) else {
        // Not JSON at all — treat the whole response as the summary body.
        return StructuredSummary {
            title: FALLBACK_TITLE.to_owned(),
            summary: cleaned.trim().to_owned(),
            topics: Vec::new(),
            participants: Vec::new(),
        };
    };

    let title = parsed
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_owned();

    let summary = parsed
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| cleaned.trim().to_owned(), str::to_owned);

    StructuredSummary {
        title,
        summary,
        topics: parse_list_field(&parsed, "topics"),
        participants: parse_list_field(&parsed, "participants"),
    }
}

/// Read a list field that may be a comma-separated string or a JSON array.
fn parse_list_field(parsed: &Value, key: &str) -> Vec<String> {
    match parsed.get(key) {
        Some(Value::String(s)) => split_comma_list(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

/// Split a comma-separated string, trimming segments and dropping empties.
#[must_use]
pub fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Strip markdown code fences from a response string.
fn strip_code_fences(s: &str) -> String {
    let trimmed = s.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        rest.strip_suffix("```").unwrap_or(rest).trim().to_string()
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest.strip_suffix("```").unwrap_or(rest).trim().to_string()
    } else {
        trimmed.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Prompt builders for the summarization collaborator calls.
//!
//! All three call shapes (single-pass, per-chunk, merge) share one system
//! prompt and one output schema: a JSON object with `title`, `summary`,
//! and comma-separated `topics` and `participants` strings.

use serde_json::{Value, json};

/// System instructions for every summarization call.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You distill conversations into compact records. \
Respond with a single JSON object containing: \
\"title\" (a short descriptive title), \
\"summary\" (one or two sentences covering what was discussed and decided), \
\"topics\" (comma-separated topic keywords), and \
\"participants\" (comma-separated names of who spoke). \
Respond with JSON only, no surrounding prose.";

/// JSON Schema for the structured summary result.
#[must_use]
pub fn summary_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "summary": { "type": "string" },
            "topics": { "type": "string" },
            "participants": { "type": "string" }
        },
        "required": ["title", "summary"]
    })
}

/// User prompt for the single-pass strategy.
#[must_use]
pub fn build_single_pass_prompt(transcript: &str) -> String {
    format!("Summarize this conversation:\n\n{transcript}")
}

/// User prompt for one chunk in the map phase.
#[must_use]
pub fn build_chunk_prompt(chunk_number: usize, transcript: &str) -> String {
    format!("Summarize part {chunk_number} of a longer conversation:\n\n{transcript}")
}

/// User prompt for the merge (reduce) phase.
///
/// Chunk summaries are labeled `Part N` in their original order — the
/// numbering tells the model how the pieces fit together chronologically.
#[must_use]
pub fn build_merge_prompt(chunk_summaries: &[String]) -> String {
    let parts = chunk_summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| format!("Part {}:\n{summary}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "These are sequential summaries of parts of one conversation. \
Produce a single combined record for the whole conversation:\n\n{parts}"
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pass_embeds_transcript() {
        let prompt = build_single_pass_prompt("You: hi\nAssistant: hello");
        assert!(prompt.contains("You: hi"));
    }

    #[test]
    fn chunk_prompt_numbers_from_caller() {
        let prompt = build_chunk_prompt(3, "transcript");
        assert!(prompt.contains("part 3"));
    }

    #[test]
    fn merge_prompt_labels_parts_in_order() {
        let prompt = build_merge_prompt(&[
            "first chunk".to_owned(),
            "second chunk".to_owned(),
            "third chunk".to_owned(),
        ]);
        let p1 = prompt.find("Part 1:\nfirst chunk").unwrap();
        let p2 = prompt.find("Part 2:\nsecond chunk").unwrap();
        let p3 = prompt.find("Part 3:\nthird chunk").unwrap();
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn schema_requires_title_and_summary() {
        let schema = summary_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["title", "summary"]);
    }
}

//! Distillation constants.

// =============================================================================
// Chunking
// =============================================================================

/// Messages per chunk in the map-reduce strategy. Histories at or under
/// this size use the single-pass strategy instead.
pub const CHUNK_SIZE: usize = 20;

/// Maximum chunks summarized per conversation. Histories longer than
/// `CHUNK_SIZE * MAX_CHUNKS` messages are summarized from their first
/// `CHUNK_SIZE * MAX_CHUNKS` messages only — a bounded-cost guarantee,
/// not an error.
pub const MAX_CHUNKS: usize = 10;

// =============================================================================
// Snippets
// =============================================================================

/// Maximum user-message snippets kept on a summary.
pub const MAX_SNIPPETS: usize = 3;

/// Word cap per snippet; longer messages are cut and get an ellipsis.
pub const SNIPPET_MAX_WORDS: usize = 12;

/// Marker appended to a snippet that was cut at the word cap.
pub const SNIPPET_ELLIPSIS: &str = "...";

// =============================================================================
// Summaries
// =============================================================================

/// Minimum message count before a conversation is worth summarizing.
pub const MIN_MESSAGES_FOR_SUMMARY: usize = 4;

/// Fallback title when the collaborator's structured output lacks one.
pub const FALLBACK_TITLE: &str = "Untitled conversation";

/// Per-line text cap in the transcript handed to the collaborator.
pub const TRANSCRIPT_TEXT_LIMIT: usize = 300;

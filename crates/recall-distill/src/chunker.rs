//! Message history chunking.

use recall_core::Message;

/// Split a message history into contiguous fixed-size chunks in original
/// order, capped at `max_chunks`.
///
/// Every chunk has exactly `chunk_size` messages except possibly the last.
/// The chunks cover the first `min(len, chunk_size * max_chunks)` messages;
/// anything beyond the cap is not summarized.
#[must_use]
pub fn split_into_chunks(
    messages: &[Message],
    chunk_size: usize,
    max_chunks: usize,
) -> Vec<&[Message]> {
    if messages.is_empty() || chunk_size == 0 || max_chunks == 0 {
        return Vec::new();
    }

    let covered = messages.len().min(chunk_size * max_chunks);
    messages[..covered].chunks(chunk_size).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

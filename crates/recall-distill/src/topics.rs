//! Topic deduplication.
//!
//! Collapses containment chains in a topic list: a bare fragment like
//! `"SwiftUI"` is dropped when a more specific sibling like
//! `"SwiftUI Navigation"` is present, but a topic that is itself a
//! specific term (it contains some shorter sibling) is kept even when a
//! longer sibling contains it.

/// Remove topics subsumed by a more specific sibling.
///
/// A topic is dropped when some strictly longer topic contains it
/// (case-insensitively), unless the topic itself contains some strictly
/// shorter topic — the dominant member of a containment chain stays.
/// Output preserves input order. Pairwise O(n²); topic lists are
/// single-digit sized.
#[must_use]
pub fn dedupe_topics(topics: &[String]) -> Vec<String> {
    let lowered: Vec<String> = topics.iter().map(|t| t.to_lowercase()).collect();

    (0..topics.len())
        .filter(|&i| {
            let contained_by_longer = lowered.iter().enumerate().any(|(j, other)| {
                j != i && other.len() > lowered[i].len() && other.contains(&lowered[i])
            });
            let contains_shorter = lowered.iter().enumerate().any(|(j, other)| {
                j != i && other.len() < lowered[i].len() && lowered[i].contains(other)
            });
            !contained_by_longer || contains_shorter
        })
        .map(|i| topics[i].clone())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

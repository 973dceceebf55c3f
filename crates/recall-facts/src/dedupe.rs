//! Fact similarity deduplication.
//!
//! An existence check against the current fact set — the first match wins,
//! nothing is reported back. Three tiers, cheapest first: case-insensitive
//! equality, either-direction containment, then word-set overlap.

use std::collections::HashSet;

use recall_core::Fact;

/// Overlap ratio above which two facts count as the same statement.
const WORD_OVERLAP_THRESHOLD: f64 = 0.7;

/// Minimum size of the smaller word set for the overlap tier to apply,
/// so one-word facts cannot collide coincidentally.
const MIN_OVERLAP_WORDS: usize = 2;

/// Whether a candidate fact duplicates any existing fact.
#[must_use]
pub fn is_duplicate(candidate: &str, existing: &[Fact]) -> bool {
    existing
        .iter()
        .any(|fact| is_near_match(candidate, &fact.content))
}

/// Whether two fact texts are near-matches.
///
/// True when they are case-insensitively equal, when one contains the
/// other, or when their space-tokenized word sets overlap by more than
/// 70% of the smaller set (which must have at least two words).
#[must_use]
pub fn is_near_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return true;
    }
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    let a_words: HashSet<&str> = a.split_whitespace().collect();
    let b_words: HashSet<&str> = b.split_whitespace().collect();
    let smaller = a_words.len().min(b_words.len());
    if smaller < MIN_OVERLAP_WORDS {
        return false;
    }

    let shared = a_words.intersection(&b_words).count();
    #[allow(clippy::cast_precision_loss)]
    let overlap = shared as f64 / smaller as f64;
    overlap > WORD_OVERLAP_THRESHOLD
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Context subsystem constants.

// =============================================================================
// Token Estimation
// =============================================================================

/// Approximate characters per token.
pub const CHARS_PER_TOKEN: u32 = 4;

// =============================================================================
// Layer 2 — durable facts
// =============================================================================

/// Hard ceiling on fact candidates considered for Layer 2, independent of
/// the token budget.
pub const MAX_FACT_CANDIDATES: usize = 15;

// =============================================================================
// Layer 3 — prior summaries
// =============================================================================

/// Number of most-recently-updated prior conversations whose summaries are
/// considered for Layer 3.
pub const MAX_PRIOR_SUMMARIES: usize = 5;

// =============================================================================
// Rendering
// =============================================================================

/// Title placeholder for a brand-new conversation.
pub const UNTITLED_PLACEHOLDER: &str = "New conversation";

/// Layer 4 placeholder when the conversation has no messages yet, so the
/// model always receives some framing for the active turn.
pub const EMPTY_WINDOW_PLACEHOLDER: &str = "(no messages yet)";

/// Separator between non-empty layers in the joined prompt.
pub const LAYER_SEPARATOR: &str = "\n\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_per_token_is_four() {
        assert_eq!(CHARS_PER_TOKEN, 4);
    }

    #[test]
    fn candidate_caps_are_small() {
        assert!(MAX_FACT_CANDIDATES <= 20);
        assert!(MAX_PRIOR_SUMMARIES <= 10);
    }
}

//! Token estimation utilities.
//!
//! Pure functions for estimating token counts from text. Uses a chars/4
//! approximation — deliberately crude, but applied identically at every
//! call site so budgeting decisions are self-consistent.
//!
//! Rounding direction is load-bearing: every estimate rounds **up**, so a
//! fits-check errs toward under-filling the true model limit rather than
//! overflowing it.

use recall_core::Message;

use crate::constants::CHARS_PER_TOKEN;

/// Estimate tokens for a piece of text.
///
/// Returns `0` only for empty text; any non-empty text estimates to at
/// least `1`, so short strings can never starve a budget check into
/// treating them as free.
#[must_use]
pub fn estimate(text: &str) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        text.len().div_ceil(CHARS_PER_TOKEN as usize) as u32
    }
}

/// Estimate tokens for a message's rendered transcript line.
///
/// Budgets the exact `sender: text` string Layer 4 renders (plus the
/// joining newline), so window accounting and rendering cannot disagree.
#[must_use]
pub fn estimate_message(message: &Message) -> u32 {
    estimate_line(&message.transcript_line())
}

/// Estimate tokens for one rendered line, including its joining newline.
#[must_use]
pub fn estimate_line(line: &str) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (line.len() + 1).div_ceil(CHARS_PER_TOKEN as usize) as u32
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Context budget type.
//!
//! One [`ContextBudget`] governs one generation request: a total token
//! ceiling split into named sub-allocations plus a reservation for the
//! model's own output.
//!
//! Facts and summaries allocations are *soft* ceilings — their layers stop
//! early when full. The window allocation is a *floor*: Layer 4 never gets
//! less than its nominal share, and absorbs whatever Layers 1–3 left
//! unused.

use serde::{Deserialize, Serialize};

use recall_settings::BudgetSettings;

/// Token budget for one generation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextBudget {
    /// Total token ceiling.
    pub total_tokens: u32,
    /// Tokens held back for the model's own output.
    pub output_reservation: u32,
    /// Bookkeeping share for session metadata (Layer 1 renders in full).
    pub metadata_allocation: u32,
    /// Soft ceiling for durable facts (Layer 2).
    pub facts_allocation: u32,
    /// Soft ceiling for prior-conversation summaries (Layer 3).
    pub summaries_allocation: u32,
    /// Floor for the current-conversation window (Layer 4).
    pub window_allocation: u32,
}

impl ContextBudget {
    /// Build a budget from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &BudgetSettings) -> Self {
        Self {
            total_tokens: settings.total_tokens,
            output_reservation: settings.output_reservation,
            metadata_allocation: settings.metadata_allocation,
            facts_allocation: settings.facts_allocation,
            summaries_allocation: settings.summaries_allocation,
            window_allocation: settings.window_allocation,
        }
    }

    /// Sum of all sub-allocations plus the output reservation.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.metadata_allocation
            + self.facts_allocation
            + self.summaries_allocation
            + self.window_allocation
            + self.output_reservation
    }

    /// Whether the sub-allocations fit inside the total ceiling.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.allocated() <= self.total_tokens
    }

    /// Hard ceiling for Layer 4 given the tokens Layers 1–3 actually used.
    ///
    /// `total − output reservation − used`, floored at the window's nominal
    /// allocation: the window never shrinks below its share when earlier
    /// layers ran long, and grows when they ran short.
    #[must_use]
    pub fn remaining_for_window(&self, used_by_earlier_layers: u32) -> u32 {
        self.total_tokens
            .saturating_sub(self.output_reservation)
            .saturating_sub(used_by_earlier_layers)
            .max(self.window_allocation)
    }
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self::from_settings(&BudgetSettings::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_balanced() {
        let budget = ContextBudget::default();
        assert!(budget.is_balanced());
        assert_eq!(budget.allocated(), 2048);
    }

    #[test]
    fn unbalanced_detected() {
        let budget = ContextBudget {
            total_tokens: 100,
            output_reservation: 50,
            metadata_allocation: 20,
            facts_allocation: 20,
            summaries_allocation: 20,
            window_allocation: 20,
        };
        assert!(!budget.is_balanced());
    }

    #[test]
    fn window_gets_surplus_when_earlier_layers_underuse() {
        let budget = ContextBudget::default();
        // Layers 1-3 used only 100 of their 992 combined share
        let remaining = budget.remaining_for_window(100);
        assert_eq!(remaining, 2048 - 512 - 100);
        assert!(remaining > budget.window_allocation);
    }

    #[test]
    fn window_floored_at_nominal_share() {
        let budget = ContextBudget::default();
        // Layers 1-3 somehow used almost everything
        let remaining = budget.remaining_for_window(1500);
        assert_eq!(remaining, budget.window_allocation);
    }

    #[test]
    fn window_floor_survives_underflow() {
        let budget = ContextBudget::default();
        let remaining = budget.remaining_for_window(u32::MAX);
        assert_eq!(remaining, budget.window_allocation);
    }

    #[test]
    fn from_settings_copies_fields() {
        let settings = recall_settings::BudgetSettings {
            total_tokens: 4096,
            output_reservation: 1024,
            metadata_allocation: 128,
            facts_allocation: 512,
            summaries_allocation: 512,
            window_allocation: 1024,
        };
        let budget = ContextBudget::from_settings(&settings);
        assert_eq!(budget.total_tokens, 4096);
        assert_eq!(budget.window_allocation, 1024);
        assert!(budget.is_balanced());
    }
}

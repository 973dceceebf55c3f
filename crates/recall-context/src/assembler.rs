//! Four-layer context assembler.
//!
//! [`ContextAssembler`] turns a conversation's metadata, the durable fact
//! set, prior-conversation summaries, and the current message history into
//! a bounded prompt:
//!
//! 1. **Session metadata** — current date/time + conversation title,
//!    always rendered in full
//! 2. **Durable facts** — verified-first, confidence-descending bullets
//!    against a soft allocation
//! 3. **Prior summaries** — most recently updated conversations first,
//!    against a soft allocation
//! 4. **Current conversation** — sliding window keeping the newest
//!    messages that fit the remaining budget
//!
//! Assembly never fails: it degrades by omitting content. Bullets and
//! messages are atomic — nothing is partially truncated; whatever does not
//! fit is dropped whole.

use std::collections::VecDeque;

use chrono::Utc;
use tracing::trace;

use recall_core::{ConversationMeta, Fact, Message, SummaryEntry};

use crate::budget::ContextBudget;
use crate::constants::{
    EMPTY_WINDOW_PLACEHOLDER, LAYER_SEPARATOR, MAX_FACT_CANDIDATES, MAX_PRIOR_SUMMARIES,
    UNTITLED_PLACEHOLDER,
};
use crate::token_estimator::{estimate, estimate_line};

// =============================================================================
// AssembledContext
// =============================================================================

/// The assembler's output: four layer strings plus token accounting.
///
/// Ephemeral — recomputed per request, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledContext {
    /// Layer 1: session metadata.
    pub metadata_layer: String,
    /// Layer 2: durable facts (empty when no fact fit).
    pub facts_layer: String,
    /// Layer 3: prior-conversation summaries (empty when none fit).
    pub summaries_layer: String,
    /// Layer 4: current-conversation window (placeholder when empty).
    pub window_layer: String,
    /// Sum of the four layers' actual rendered costs.
    pub total_tokens: u32,
}

impl AssembledContext {
    /// Join the non-empty layers with a blank line.
    ///
    /// This string is the `userPrompt` handed to the generation
    /// collaborator for the chat reply.
    #[must_use]
    pub fn full_prompt(&self) -> String {
        [
            &self.metadata_layer,
            &self.facts_layer,
            &self.summaries_layer,
            &self.window_layer,
        ]
        .iter()
        .filter(|layer| !layer.is_empty())
        .map(|layer| layer.as_str())
        .collect::<Vec<_>>()
        .join(LAYER_SEPARATOR)
    }
}

// =============================================================================
// ContextAssembler
// =============================================================================

/// Assembles the four-layer prompt under a token budget.
#[derive(Clone, Debug, Default)]
pub struct ContextAssembler {
    budget: ContextBudget,
}

impl ContextAssembler {
    /// Create an assembler with the given budget.
    #[must_use]
    pub fn new(budget: ContextBudget) -> Self {
        Self { budget }
    }

    /// The budget this assembler works under.
    #[must_use]
    pub fn budget(&self) -> &ContextBudget {
        &self.budget
    }

    /// Assemble the prompt for one generation request.
    ///
    /// Pure, synchronous, infallible — any input state (including
    /// all-empty) produces a valid prompt.
    #[must_use]
    pub fn assemble(
        &self,
        meta: &ConversationMeta,
        facts: &[Fact],
        summaries: &[SummaryEntry],
        messages: &[Message],
    ) -> AssembledContext {
        let metadata_layer = render_metadata(meta);
        let facts_layer = render_facts(facts, self.budget.facts_allocation);
        let summaries_layer = render_summaries(meta, summaries, self.budget.summaries_allocation);

        let used_by_earlier =
            estimate(&metadata_layer) + estimate(&facts_layer) + estimate(&summaries_layer);
        let window_budget = self.budget.remaining_for_window(used_by_earlier);
        let window_layer = render_window(messages, window_budget);

        let total_tokens = used_by_earlier + estimate(&window_layer);

        trace!(
            used_by_earlier,
            window_budget,
            total_tokens,
            message_count = messages.len(),
            "context assembled"
        );

        AssembledContext {
            metadata_layer,
            facts_layer,
            summaries_layer,
            window_layer,
            total_tokens,
        }
    }
}

// =============================================================================
// Layer rendering
// =============================================================================

/// Layer 1: current date/time and conversation title. Always rendered in
/// full; no soft cap applies.
fn render_metadata(meta: &ConversationMeta) -> String {
    let title = meta.title.as_deref().unwrap_or(UNTITLED_PLACEHOLDER);
    format!(
        "Current time: {}\nConversation: {title}",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    )
}

/// Layer 2: durable fact bullets under a soft token allocation.
///
/// At most [`MAX_FACT_CANDIDATES`] facts are considered regardless of
/// budget. Candidates are ordered verified-first, then by descending
/// confidence. A bullet is atomic: the first one that would overflow the
/// allocation ends the layer.
fn render_facts(facts: &[Fact], allocation: u32) -> String {
    let mut candidates: Vec<&Fact> = facts.iter().take(MAX_FACT_CANDIDATES).collect();
    candidates.sort_by(|a, b| {
        b.verified
            .cmp(&a.verified)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });

    accumulate_bullets(candidates.iter().map(|fact| fact.bullet()), allocation)
}

/// Layer 3: prior-conversation summary bullets under a soft allocation.
///
/// The current conversation is excluded; the rest are ordered by
/// last-activity time descending and capped at [`MAX_PRIOR_SUMMARIES`].
fn render_summaries(meta: &ConversationMeta, summaries: &[SummaryEntry], allocation: u32) -> String {
    let mut prior: Vec<&SummaryEntry> = summaries
        .iter()
        .filter(|entry| entry.conversation_id != meta.id)
        .collect();
    prior.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    prior.truncate(MAX_PRIOR_SUMMARIES);

    accumulate_bullets(
        prior
            .iter()
            .map(|entry| format!("- \"{}\": {}", entry.summary.title, entry.summary.summary)),
        allocation,
    )
}

/// Accumulate whole bullet lines until the next would exceed the
/// allocation.
fn accumulate_bullets(bullets: impl Iterator<Item = String>, allocation: u32) -> String {
    let mut lines = Vec::new();
    let mut used: u32 = 0;
    for bullet in bullets {
        let cost = estimate_line(&bullet);
        if used + cost > allocation {
            break;
        }
        used += cost;
        lines.push(bullet);
    }
    lines.join("\n")
}

/// Layer 4: the sliding window over the current conversation.
///
/// Walks from the most recent message backwards, front-inserting each line
/// so included messages stay in original chronological order. The first
/// message that would overflow the budget is dropped along with everything
/// older. Message text is never partially truncated.
fn render_window(messages: &[Message], budget: u32) -> String {
    if messages.is_empty() {
        return EMPTY_WINDOW_PLACEHOLDER.to_owned();
    }

    let mut lines: VecDeque<String> = VecDeque::new();
    let mut used: u32 = 0;
    for message in messages.iter().rev() {
        let line = message.transcript_line();
        let cost = estimate_line(&line);
        if used + cost > budget {
            break;
        }
        used += cost;
        lines.push_front(line);
    }

    if lines.is_empty() {
        // Nothing fit — even so, the model gets framing for the turn.
        return EMPTY_WINDOW_PLACEHOLDER.to_owned();
    }

    Vec::from(lines).join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use recall_core::{ConversationId, ConversationSummary, FactCategory};

    fn meta(id: &str, title: Option<&str>) -> ConversationMeta {
        ConversationMeta {
            id: ConversationId::from(id),
            title: title.map(str::to_owned),
        }
    }

    fn fact(content: &str, confidence: f64, verified: bool) -> Fact {
        let mut fact = Fact::extracted(
            FactCategory::Preference,
            content,
            confidence,
            &ConversationId::from("conv-src"),
        );
        fact.verified = verified;
        fact
    }

    fn summary_entry(conv: &str, title: &str, body: &str, age_minutes: i64) -> SummaryEntry {
        let mut summary = ConversationSummary::empty();
        summary.title = title.to_owned();
        summary.summary = body.to_owned();
        SummaryEntry {
            conversation_id: ConversationId::from(conv),
            updated_at: Utc::now() - Duration::minutes(age_minutes),
            summary,
        }
    }

    fn messages(conv: &ConversationId, texts: &[&str]) -> Vec<Message> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if i % 2 == 0 {
                    Message::user(conv, *text)
                } else {
                    Message::agent(conv, *text)
                }
            })
            .collect()
    }

    /// A budget small enough to force eviction in window tests.
    fn tight_budget() -> ContextBudget {
        ContextBudget {
            total_tokens: 200,
            output_reservation: 50,
            metadata_allocation: 20,
            facts_allocation: 40,
            summaries_allocation: 40,
            window_allocation: 30,
        }
    }

    // -- Layer 1 --

    #[test]
    fn metadata_includes_title() {
        let layer = render_metadata(&meta("conv-1", Some("Trip planning")));
        assert!(layer.contains("Conversation: Trip planning"));
        assert!(layer.contains("Current time:"));
    }

    #[test]
    fn metadata_placeholder_for_untitled() {
        let layer = render_metadata(&meta("conv-1", None));
        assert!(layer.contains("Conversation: New conversation"));
    }

    // -- Layer 2 --

    #[test]
    fn facts_verified_sort_first() {
        let facts = vec![
            fact("unverified but confident", 0.99, false),
            fact("verified but less confident", 0.60, true),
        ];
        let layer = render_facts(&facts, 1000);
        let verified_pos = layer.find("verified but less confident").unwrap();
        let unverified_pos = layer.find("unverified but confident").unwrap();
        assert!(verified_pos < unverified_pos);
    }

    #[test]
    fn facts_confidence_descending_within_tier() {
        let facts = vec![
            fact("low", 0.5, false),
            fact("high", 0.9, false),
            fact("mid", 0.7, false),
        ];
        let layer = render_facts(&facts, 1000);
        let high = layer.find("high").unwrap();
        let mid = layer.find("mid").unwrap();
        let low = layer.find("low").unwrap();
        assert!(high < mid && mid < low);
    }

    #[test]
    fn facts_capped_at_fifteen_candidates() {
        let facts: Vec<Fact> = (0..25).map(|i| fact(&format!("fact number {i}"), 0.9, false)).collect();
        let layer = render_facts(&facts, 100_000);
        assert_eq!(layer.lines().count(), MAX_FACT_CANDIDATES);
    }

    #[test]
    fn facts_stop_at_soft_allocation() {
        // Each bullet ≈ "- preference: fact number N" = 27 chars + nl → 7 tokens
        let facts: Vec<Fact> = (0..10).map(|i| fact(&format!("fact number {i}"), 0.9, false)).collect();
        let layer = render_facts(&facts, 15);
        let rendered = layer.lines().count();
        assert!(rendered >= 1);
        assert!(rendered < 10);
    }

    #[test]
    fn facts_bullets_are_atomic() {
        let facts = vec![
            fact("short", 0.9, false),
            fact(&"very long fact text ".repeat(20), 0.8, false),
        ];
        // Allocation fits the first bullet but not the second
        let layer = render_facts(&facts, 8);
        assert!(layer.contains("short"));
        assert!(!layer.contains("very long fact text"));
    }

    #[test]
    fn facts_empty_input_gives_empty_layer() {
        assert_eq!(render_facts(&[], 1000), "");
    }

    // -- Layer 3 --

    #[test]
    fn summaries_exclude_current_conversation() {
        let current = meta("conv-1", Some("t"));
        let entries = vec![
            summary_entry("conv-1", "Current", "should not appear", 0),
            summary_entry("conv-2", "Other", "should appear", 5),
        ];
        let layer = render_summaries(&current, &entries, 1000);
        assert!(!layer.contains("Current"));
        assert!(layer.contains("Other"));
    }

    #[test]
    fn summaries_take_five_most_recent() {
        let current = meta("conv-0", None);
        let entries: Vec<SummaryEntry> = (1..=8)
            .map(|i| summary_entry(&format!("conv-{i}"), &format!("Title {i}"), "body", i))
            .collect();
        let layer = render_summaries(&current, &entries, 100_000);
        assert_eq!(layer.lines().count(), MAX_PRIOR_SUMMARIES);
        // Most recent (smallest age) survive
        assert!(layer.contains("Title 1"));
        assert!(layer.contains("Title 5"));
        assert!(!layer.contains("Title 6"));
    }

    #[test]
    fn summaries_bullet_format() {
        let current = meta("conv-0", None);
        let entries = vec![summary_entry("conv-2", "Budget travel", "Planned a trip.", 1)];
        let layer = render_summaries(&current, &entries, 1000);
        assert_eq!(layer, "- \"Budget travel\": Planned a trip.");
    }

    // -- Layer 4 --

    #[test]
    fn window_keeps_chronological_order() {
        let conv = ConversationId::from("conv-1");
        let msgs = messages(&conv, &["first", "second", "third"]);
        let layer = render_window(&msgs, 1000);
        let first = layer.find("first").unwrap();
        let second = layer.find("second").unwrap();
        let third = layer.find("third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn window_drops_oldest_first() {
        let conv = ConversationId::from("conv-1");
        // Each line ≈ "You: message number N" → 6 tokens
        let msgs = messages(
            &conv,
            &[
                "message number 0",
                "message number 1",
                "message number 2",
                "message number 3",
            ],
        );
        let layer = render_window(&msgs, 13);
        assert!(layer.contains("message number 3"));
        assert!(layer.contains("message number 2"));
        assert!(!layer.contains("message number 1"));
        assert!(!layer.contains("message number 0"));
    }

    #[test]
    fn window_newest_present_when_it_alone_fits() {
        let conv = ConversationId::from("conv-1");
        let msgs = messages(&conv, &["older message that is quite long", "new"]);
        // "Assistant: new" costs 4 tokens; the older line costs 10
        let layer = render_window(&msgs, 5);
        assert!(layer.contains("new"));
        assert!(!layer.contains("older"));
    }

    #[test]
    fn window_empty_messages_get_placeholder() {
        assert_eq!(render_window(&[], 1000), EMPTY_WINDOW_PLACEHOLDER);
    }

    #[test]
    fn window_placeholder_when_nothing_fits() {
        let conv = ConversationId::from("conv-1");
        let msgs = messages(&conv, &[&"x".repeat(500)]);
        assert_eq!(render_window(&msgs, 2), EMPTY_WINDOW_PLACEHOLDER);
    }

    #[test]
    fn window_preserves_text_verbatim() {
        let conv = ConversationId::from("conv-1");
        let text = "exact   spacing  and punctuation?! preserved";
        let msgs = vec![Message::user(&conv, text)];
        let layer = render_window(&msgs, 1000);
        assert!(layer.contains(text));
    }

    // -- assemble --

    #[test]
    fn assemble_empty_layers_skipped_in_join() {
        let assembler = ContextAssembler::new(ContextBudget::default());
        let conv = ConversationId::from("conv-1");
        let msgs = messages(&conv, &["one", "two", "three"]);
        let assembled = assembler.assemble(&meta("conv-1", None), &[], &[], &msgs);

        assert!(assembled.facts_layer.is_empty());
        assert!(assembled.summaries_layer.is_empty());

        let prompt = assembled.full_prompt();
        // Exactly two layers joined by one blank-line separator
        assert_eq!(prompt.matches("\n\n").count(), 1);
        assert!(prompt.contains("You: one"));
        assert!(prompt.contains("Assistant: two"));
        assert!(prompt.contains("You: three"));
    }

    #[test]
    fn assemble_all_empty_inputs_still_valid() {
        let assembler = ContextAssembler::new(ContextBudget::default());
        let assembled = assembler.assemble(&meta("conv-1", None), &[], &[], &[]);
        let prompt = assembled.full_prompt();
        assert!(prompt.contains("New conversation"));
        assert!(prompt.contains(EMPTY_WINDOW_PLACEHOLDER));
        assert!(assembled.total_tokens > 0);
    }

    #[test]
    fn assemble_total_counts_rendered_layers() {
        let assembler = ContextAssembler::new(ContextBudget::default());
        let conv = ConversationId::from("conv-1");
        let msgs = messages(&conv, &["hello there"]);
        let assembled = assembler.assemble(&meta("conv-1", Some("T")), &[], &[], &msgs);
        let expected = estimate(&assembled.metadata_layer) + estimate(&assembled.window_layer);
        assert_eq!(assembled.total_tokens, expected);
    }

    #[test]
    fn assemble_window_absorbs_unused_allocations() {
        // Layers 2-3 empty → window budget grows beyond its nominal share.
        let budget = tight_budget();
        let assembler = ContextAssembler::new(budget);
        let conv = ConversationId::from("conv-1");

        // 20 messages at ~6 tokens each = 120 tokens; nominal window share
        // is 30 tokens (≈5 messages), but with empty layers 2-3 the window
        // gets total(200) - output(50) - metadata(~11) ≈ 139 tokens.
        let texts: Vec<String> = (0..20).map(|i| format!("message number {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let msgs = messages(&conv, &refs);

        let assembled = assembler.assemble(&meta("conv-1", None), &[], &[], &msgs);
        let included = assembled.window_layer.lines().count();
        assert!(included > 5, "window should absorb surplus, got {included} lines");
    }

    #[test]
    fn assemble_window_floor_when_facts_fill_their_share() {
        let budget = tight_budget();
        let assembler = ContextAssembler::new(budget);
        let conv = ConversationId::from("conv-1");
        let facts: Vec<Fact> = (0..10).map(|i| fact(&format!("durable fact number {i}"), 0.9, true)).collect();
        let msgs = messages(&conv, &["recent message"]);

        let assembled = assembler.assemble(&meta("conv-1", None), &facts, &[], &msgs);
        // The newest message always fits the window floor
        assert!(assembled.window_layer.contains("recent message"));
    }

    #[test]
    fn assemble_is_deterministic_for_same_inputs() {
        let assembler = ContextAssembler::new(ContextBudget::default());
        let conv = ConversationId::from("conv-1");
        let msgs = messages(&conv, &["alpha", "beta"]);
        let facts = vec![fact("stable fact", 0.8, true)];

        let a = assembler.assemble(&meta("conv-1", Some("T")), &facts, &[], &msgs);
        let b = assembler.assemble(&meta("conv-1", Some("T")), &facts, &[], &msgs);
        assert_eq!(a.facts_layer, b.facts_layer);
        assert_eq!(a.window_layer, b.window_layer);
    }
}

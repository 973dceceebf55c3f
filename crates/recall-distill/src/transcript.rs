//! Transcript serialization for collaborator prompts.

use recall_core::Message;
use recall_core::text::truncate_with_suffix;

use crate::constants::TRANSCRIPT_TEXT_LIMIT;

/// Serialize messages into a line-based transcript for summarization.
///
/// Each line is `sender: text` with the text capped at
/// [`TRANSCRIPT_TEXT_LIMIT`] chars. Empty messages are skipped.
#[must_use]
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .filter(|msg| !msg.text.trim().is_empty())
        .map(|msg| {
            format!(
                "{}: {}",
                msg.sender.display_name(),
                truncate_with_suffix(&msg.text, TRANSCRIPT_TEXT_LIMIT, "...")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::{ConversationId, Sender};

    #[test]
    fn formats_sender_and_text() {
        let conv = ConversationId::from("conv-1");
        let msgs = vec![
            Message::user(&conv, "Hello"),
            Message::agent(&conv, "Hi there"),
        ];
        assert_eq!(format_transcript(&msgs), "You: Hello\nAssistant: Hi there");
    }

    #[test]
    fn skips_empty_messages() {
        let conv = ConversationId::from("conv-1");
        let msgs = vec![
            Message::user(&conv, "Hello"),
            Message::agent(&conv, "   "),
            Message::user(&conv, "Still there?"),
        ];
        assert_eq!(
            format_transcript(&msgs),
            "You: Hello\nYou: Still there?"
        );
    }

    #[test]
    fn truncates_long_text() {
        let conv = ConversationId::from("conv-1");
        let msgs = vec![Message::user(&conv, "a".repeat(500))];
        let transcript = format_transcript(&msgs);
        assert!(transcript.len() < 500);
        assert!(transcript.ends_with("..."));
    }

    #[test]
    fn named_sender_renders_name() {
        let conv = ConversationId::from("conv-1");
        let msgs = vec![Message::new(&conv, Sender::Named("Priya".into()), "Here")];
        assert_eq!(format_transcript(&msgs), "Priya: Here");
    }

    #[test]
    fn empty_history_is_empty_string() {
        assert_eq!(format_transcript(&[]), "");
    }
}

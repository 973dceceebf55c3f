//! Quick-reference snippet extraction.
//!
//! Snippets are short verbatim fragments of the user's own messages, used
//! as previews alongside a summary. Word-count capping is a best-effort
//! heuristic — scripts without whitespace word boundaries pass through
//! whole.

use recall_core::Message;
use recall_core::text::truncate_words;

use crate::constants::SNIPPET_ELLIPSIS;

/// Extract up to `max_snippets` snippets from the user's messages.
///
/// Takes the first non-empty user messages in order; each is capped to
/// `max_words` words with an ellipsis marker when cut.
#[must_use]
pub fn extract_snippets(messages: &[Message], max_snippets: usize, max_words: usize) -> Vec<String> {
    messages
        .iter()
        .filter(|msg| msg.sender.is_user() && !msg.text.trim().is_empty())
        .take(max_snippets)
        .map(|msg| {
            let (capped, truncated) = truncate_words(msg.text.trim(), max_words);
            if truncated {
                format!("{capped}{SNIPPET_ELLIPSIS}")
            } else {
                capped
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::ConversationId;

    use crate::constants::{MAX_SNIPPETS, SNIPPET_MAX_WORDS};

    fn conv() -> ConversationId {
        ConversationId::from("conv-1")
    }

    #[test]
    fn takes_only_user_messages() {
        let conv = conv();
        let msgs = vec![
            Message::agent(&conv, "Agent line"),
            Message::user(&conv, "User line"),
        ];
        let snippets = extract_snippets(&msgs, MAX_SNIPPETS, SNIPPET_MAX_WORDS);
        assert_eq!(snippets, vec!["User line"]);
    }

    #[test]
    fn caps_snippet_count() {
        let conv = conv();
        let msgs: Vec<Message> = (0..6).map(|i| Message::user(&conv, format!("snippet {i}"))).collect();
        let snippets = extract_snippets(&msgs, MAX_SNIPPETS, SNIPPET_MAX_WORDS);
        assert_eq!(snippets.len(), MAX_SNIPPETS);
        assert_eq!(snippets[0], "snippet 0");
    }

    #[test]
    fn long_message_cut_with_ellipsis() {
        let conv = conv();
        let text = (0..20).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let msgs = vec![Message::user(&conv, text)];
        let snippets = extract_snippets(&msgs, MAX_SNIPPETS, SNIPPET_MAX_WORDS);
        assert!(snippets[0].ends_with("..."));
        // Approximately the word cap — whitespace-delimited scripts only
        assert_eq!(
            snippets[0].trim_end_matches("...").split_whitespace().count(),
            SNIPPET_MAX_WORDS
        );
    }

    #[test]
    fn short_message_kept_verbatim() {
        let conv = conv();
        let msgs = vec![Message::user(&conv, "Just five words right here")];
        let snippets = extract_snippets(&msgs, MAX_SNIPPETS, SNIPPET_MAX_WORDS);
        assert_eq!(snippets, vec!["Just five words right here"]);
    }

    #[test]
    fn skips_blank_user_messages() {
        let conv = conv();
        let msgs = vec![
            Message::user(&conv, "   "),
            Message::user(&conv, "Real content"),
        ];
        let snippets = extract_snippets(&msgs, MAX_SNIPPETS, SNIPPET_MAX_WORDS);
        assert_eq!(snippets, vec!["Real content"]);
    }

    #[test]
    fn unspaced_script_passes_through_whole() {
        let conv = conv();
        let msgs = vec![Message::user(&conv, "今天天气很好我们去公园散步吧")];
        let snippets = extract_snippets(&msgs, MAX_SNIPPETS, SNIPPET_MAX_WORDS);
        // No whitespace word boundaries — no cut, no panic
        assert_eq!(snippets, vec!["今天天气很好我们去公园散步吧"]);
    }

    #[test]
    fn empty_history_no_snippets() {
        assert!(extract_snippets(&[], MAX_SNIPPETS, SNIPPET_MAX_WORDS).is_empty());
    }
}

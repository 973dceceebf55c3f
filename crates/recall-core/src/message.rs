//! Message types for the conversation model.
//!
//! Messages are ordered, timestamped, and attributed to a sender. They are
//! immutable once persisted — history rewrites (edit, delete-and-truncate)
//! happen upstream and simply hand the engine a different list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{ConversationId, MessageId};

/// Who produced a message.
///
/// Multi-party conversations attribute messages to a named participant
/// instead of the generic user/agent pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum Sender {
    /// The device owner.
    User,
    /// The conversational agent.
    Agent,
    /// A named participant in a multi-party conversation.
    Named(String),
}

impl Sender {
    /// Display name used in transcript lines and participant lists.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::User => "You",
            Self::Agent => "Assistant",
            Self::Named(name) => name,
        }
    }

    /// Whether this sender is the user themselves.
    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single conversation message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID.
    pub id: MessageId,
    /// Conversation this message belongs to.
    pub conversation_id: ConversationId,
    /// Who sent it.
    pub sender: Sender,
    /// Full message text, preserved verbatim.
    pub text: String,
    /// When the message was sent (UTC).
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Create a user message in the given conversation.
    #[must_use]
    pub fn user(conversation_id: &ConversationId, text: impl Into<String>) -> Self {
        Self::new(conversation_id, Sender::User, text)
    }

    /// Create an agent message in the given conversation.
    #[must_use]
    pub fn agent(conversation_id: &ConversationId, text: impl Into<String>) -> Self {
        Self::new(conversation_id, Sender::Agent, text)
    }

    /// Create a message from an arbitrary sender.
    #[must_use]
    pub fn new(conversation_id: &ConversationId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id: conversation_id.clone(),
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    /// Render this message as a `sender: text` transcript line.
    ///
    /// This is the exact string the context window and the summarizer
    /// transcript use, so token accounting and rendering cannot disagree.
    #[must_use]
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.sender.display_name(), self.text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_fields() {
        let conv = ConversationId::from("conv-1");
        let msg = Message::user(&conv, "Hello");
        assert_eq!(msg.conversation_id, conv);
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Hello");
        assert!(msg.sender.is_user());
    }

    #[test]
    fn agent_message_is_not_user() {
        let conv = ConversationId::from("conv-1");
        let msg = Message::agent(&conv, "Hi there");
        assert!(!msg.sender.is_user());
    }

    #[test]
    fn transcript_line_format() {
        let conv = ConversationId::from("conv-1");
        assert_eq!(
            Message::user(&conv, "How's it going?").transcript_line(),
            "You: How's it going?"
        );
        assert_eq!(
            Message::agent(&conv, "Well!").transcript_line(),
            "Assistant: Well!"
        );
    }

    #[test]
    fn named_sender_uses_name() {
        let conv = ConversationId::from("conv-1");
        let msg = Message::new(&conv, Sender::Named("Dana".into()), "Present");
        assert_eq!(msg.transcript_line(), "Dana: Present");
        assert_eq!(msg.sender.display_name(), "Dana");
    }

    #[test]
    fn serde_roundtrip() {
        let conv = ConversationId::from("conv-1");
        let msg = Message::user(&conv, "Persist me");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn serde_uses_camel_case() {
        let conv = ConversationId::from("conv-1");
        let msg = Message::user(&conv, "x");
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("conversationId").is_some());
        assert!(json.get("sentAt").is_some());
    }
}

//! Conversation models for the Freshdesk API.
//!
//! Conversations are the replies and notes attached to a ticket.

use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// A reply or note on a ticket.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Conversation {
    /// Unique conversation ID.
    pub id: u64,

    /// HTML body.
    #[serde(default)]
    pub body: Option<String>,

    /// Plain-text body.
    #[serde(default)]
    pub body_text: Option<String>,

    /// True if the message came from the requester.
    #[serde(default)]
    pub incoming: Option<bool>,

    /// True for private (agent-only) notes.
    #[serde(default)]
    pub private: Option<bool>,

    /// Author of the conversation.
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Ticket the conversation belongs to.
    #[serde(default)]
    pub ticket_id: Option<u64>,

    /// Sender address for email replies.
    #[serde(default)]
    pub from_email: Option<String>,

    /// Recipient addresses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_emails: Vec<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Conversation {
    /// Returns the plain-text body, falling back to HTML, then a placeholder.
    pub fn display_content(&self) -> &str {
        self.body_text
            .as_deref()
            .or(self.body.as_deref())
            .unwrap_or("(No content)")
    }

    /// Returns the direction indicator.
    pub fn direction(&self) -> &str {
        match (self.private, self.incoming) {
            (Some(true), _) => "Private note",
            (_, Some(true)) => "Incoming",
            (_, Some(false)) => "Outgoing",
            _ => "Unknown",
        }
    }
}

/// Request body for replies, notes and conversation updates.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationBody {
    /// HTML content.
    pub body: String,

    /// Whether a note is private; omitted for replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

impl ConversationBody {
    /// Creates a body with the given content.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            private: None,
        }
    }

    /// Marks the note as private or public.
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = Some(private);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_display_content_prefers_text() {
        let json = r#"{"id": 1, "body": "<p>Hi</p>", "body_text": "Hi"}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.display_content(), "Hi");
    }

    #[test]
    fn test_conversation_display_content_empty() {
        let conv: Conversation = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(conv.display_content(), "(No content)");
        assert_eq!(conv.direction(), "Unknown");
    }

    #[test]
    fn test_conversation_direction() {
        let private: Conversation =
            serde_json::from_str(r#"{"id": 1, "private": true, "incoming": false}"#).unwrap();
        assert_eq!(private.direction(), "Private note");

        let incoming: Conversation =
            serde_json::from_str(r#"{"id": 2, "private": false, "incoming": true}"#).unwrap();
        assert_eq!(incoming.direction(), "Incoming");
    }

    #[test]
    fn test_conversation_body_serialization() {
        let reply = serde_json::to_value(ConversationBody::new("Thanks")).unwrap();
        assert_eq!(reply["body"], "Thanks");
        assert!(reply.get("private").is_none());

        let note = serde_json::to_value(ConversationBody::new("FYI").with_private(true)).unwrap();
        assert_eq!(note["private"], true);
    }
}

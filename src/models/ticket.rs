//! Ticket models for the Freshdesk API.
//!
//! Freshdesk encodes status, priority and source as small integers; the
//! enums here give them names for validation and display.

use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// Ticket status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// 2
    Open,
    /// 3
    Pending,
    /// 4
    Resolved,
    /// 5
    Closed,
}

impl TicketStatus {
    /// Looks up a status by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Self::Open),
            3 => Some(Self::Pending),
            4 => Some(Self::Resolved),
            5 => Some(Self::Closed),
            _ => None,
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        match self {
            Self::Open => 2,
            Self::Pending => 3,
            Self::Resolved => 4,
            Self::Closed => 5,
        }
    }

    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

/// Ticket priority codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPriority {
    /// 1
    Low,
    /// 2
    Medium,
    /// 3
    High,
    /// 4
    Urgent,
}

impl TicketPriority {
    /// Looks up a priority by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            4 => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Urgent => 4,
        }
    }

    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

/// Channel a ticket was created through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSource {
    /// 1
    Email,
    /// 2
    Portal,
    /// 3
    Phone,
    /// 7
    Chat,
    /// 9
    FeedbackWidget,
    /// 10
    OutboundEmail,
}

impl TicketSource {
    /// Looks up a source by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Email),
            2 => Some(Self::Portal),
            3 => Some(Self::Phone),
            7 => Some(Self::Chat),
            9 => Some(Self::FeedbackWidget),
            10 => Some(Self::OutboundEmail),
            _ => None,
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        match self {
            Self::Email => 1,
            Self::Portal => 2,
            Self::Phone => 3,
            Self::Chat => 7,
            Self::FeedbackWidget => 9,
            Self::OutboundEmail => 10,
        }
    }
}

/// A Freshdesk ticket.
///
/// Only the commonly used fields are typed; custom fields are kept as raw
/// JSON since their shape depends on the helpdesk's configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// HTML description.
    #[serde(default)]
    pub description: Option<String>,

    /// Plain-text description.
    #[serde(default)]
    pub description_text: Option<String>,

    /// Status code (see [`TicketStatus`]).
    #[serde(default)]
    pub status: Option<u8>,

    /// Priority code (see [`TicketPriority`]).
    #[serde(default)]
    pub priority: Option<u8>,

    /// Source code (see [`TicketSource`]).
    #[serde(default)]
    pub source: Option<u8>,

    /// Ticket type (e.g. "Question", "Incident").
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,

    /// Contact who raised the ticket.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Agent the ticket is assigned to.
    #[serde(default)]
    pub responder_id: Option<u64>,

    /// Group the ticket is assigned to.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Company of the requester.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Resolution due timestamp.
    #[serde(default)]
    pub due_by: Option<String>,

    /// First response due timestamp.
    #[serde(default)]
    pub fr_due_by: Option<String>,

    /// Custom field values keyed by `cf_` name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: serde_json::Map<String, serde_json::Value>,
}

impl Ticket {
    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("(No subject)")
    }

    /// Returns the status label, the raw code if unknown, or "Unknown".
    pub fn display_status(&self) -> String {
        match self.status {
            Some(code) => TicketStatus::from_code(code)
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| format!("Status {}", code)),
            None => "Unknown".to_string(),
        }
    }

    /// Returns the priority label, the raw code if unknown, or "Unknown".
    pub fn display_priority(&self) -> String {
        match self.priority {
            Some(code) => TicketPriority::from_code(code)
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| format!("Priority {}", code)),
            None => "Unknown".to_string(),
        }
    }

    /// Returns the assigned agent ID or "Unassigned".
    pub fn display_responder(&self) -> String {
        self.responder_id
            .map(|id| format!("agent {}", id))
            .unwrap_or_else(|| "Unassigned".to_string())
    }
}

/// A ticket field definition from `/ticket_fields`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketField {
    /// Unique field ID.
    pub id: u64,

    /// Internal name (e.g. `status`, `ticket_type`, `cf_region`).
    pub name: String,

    /// Label shown to agents.
    #[serde(default)]
    pub label: Option<String>,

    /// Field type (e.g. `default_status`, `custom_dropdown`).
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,

    /// Whether agents must fill it in.
    #[serde(default)]
    pub required_for_agents: Option<bool>,

    /// Allowed values; the shape varies by field type.
    #[serde(default)]
    pub choices: Option<serde_json::Value>,
}

/// AI-generated or agent-written ticket summary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketSummary {
    /// Summary ID.
    #[serde(default)]
    pub id: Option<u64>,

    /// HTML body.
    #[serde(default)]
    pub body: Option<String>,

    /// Plain-text body.
    #[serde(default)]
    pub body_text: Option<String>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for code in [2u8, 3, 4, 5] {
            assert_eq!(TicketStatus::from_code(code).unwrap().code(), code);
        }
        assert!(TicketStatus::from_code(1).is_none());
        assert!(TicketStatus::from_code(6).is_none());
    }

    #[test]
    fn test_source_codes() {
        assert_eq!(TicketSource::from_code(7), Some(TicketSource::Chat));
        assert!(TicketSource::from_code(4).is_none());
    }

    #[test]
    fn test_ticket_deserialize() {
        let json = r#"{
            "id": 42,
            "subject": "Printer on fire",
            "status": 2,
            "priority": 4,
            "type": "Incident",
            "tags": ["hardware"],
            "custom_fields": {"cf_region": "EU"}
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.ticket_type.as_deref(), Some("Incident"));
        assert_eq!(ticket.display_status(), "Open");
        assert_eq!(ticket.display_priority(), "Urgent");
        assert_eq!(ticket.display_responder(), "Unassigned");
        assert_eq!(ticket.custom_fields["cf_region"], "EU");
    }

    #[test]
    fn test_ticket_display_unknown_codes() {
        let ticket: Ticket = serde_json::from_str(r#"{"id": 1, "status": 9}"#).unwrap();
        assert_eq!(ticket.display_status(), "Status 9");
        assert_eq!(ticket.display_priority(), "Unknown");
        assert_eq!(ticket.display_subject(), "(No subject)");
    }

    #[test]
    fn test_ticket_null_collections_deserialize_empty() {
        let json = r#"{"id": 3, "tags": null, "custom_fields": null}"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert!(ticket.tags.is_empty());
        assert!(ticket.custom_fields.is_empty());
    }

    #[test]
    fn test_ticket_field_deserialize() {
        let json = r#"{"id": 7, "name": "ticket_type", "label": "Type", "type": "default_ticket_type", "choices": ["Question", "Incident"]}"#;
        let field: TicketField = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "ticket_type");
        assert_eq!(field.field_type.as_deref(), Some("default_ticket_type"));
        assert!(field.choices.unwrap().is_array());
    }
}

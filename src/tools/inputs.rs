//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! Input structs with free-text fields implement `sanitize()`, which trims
//! whitespace. Structs with constraints beyond their types implement
//! `validate()`, which returns `FreshdeskError::Validation` describing the
//! first violated constraint.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FreshdeskError;
use crate::models::{AgentTicketScope, PageParams, TicketPriority, TicketSource, TicketStatus};
use crate::query::{BoolOperator, Comparator, Condition, ConditionGroup, SearchValue};

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parses an optional operator, defaulting to AND.
fn parse_operator(operator: Option<&str>) -> Result<BoolOperator, FreshdeskError> {
    operator.map_or(Ok(BoolOperator::And), |op| op.parse())
}

/// Rejects an empty (after trimming) required text field.
fn require_text(value: &str, field_name: &str) -> Result<(), FreshdeskError> {
    if value.is_empty() {
        return Err(FreshdeskError::validation(format!(
            "{} is required and cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Input parameters for paginated list tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageInput {
    /// Page number, starting at 1 (default: 1).
    #[serde(default)]
    pub page: Option<u32>,

    /// Records per page, between 1 and 100 (default: 30).
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageInput {
    /// Validates the bounds and applies defaults.
    pub fn page_params(&self) -> Result<PageParams, FreshdeskError> {
        PageParams::new(self.page, self.per_page)
    }
}

/// Input parameters for tools addressing a single ticket.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TicketIdInput {
    /// The numeric ticket ID.
    pub ticket_id: u64,
}

/// Input parameters for tools addressing a record by ID
/// (contact, agent, group, company, canned response, folder, category, article).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IdInput {
    /// The numeric ID of the record.
    pub id: u64,
}

/// A numeric code that may arrive as a number or a numeric string.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumericCode {
    /// e.g. `2`
    Number(i64),
    /// e.g. `"2"`
    Text(String),
}

impl NumericCode {
    /// Parses the code into a `u8`.
    fn parse(&self, field_name: &str) -> Result<u8, FreshdeskError> {
        let parsed = match self {
            NumericCode::Number(n) => u8::try_from(*n).ok(),
            NumericCode::Text(s) => s.trim().parse::<u8>().ok(),
        };
        parsed.ok_or_else(|| {
            FreshdeskError::validation(format!("invalid value for {}", field_name))
        })
    }
}

/// Input parameters for the create_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket subject (required).
    pub subject: String,

    /// HTML description of the issue (required).
    pub description: String,

    /// Source: 1=Email, 2=Portal, 3=Phone, 7=Chat, 9=Feedback widget, 10=Outbound email.
    pub source: NumericCode,

    /// Priority: 1=Low, 2=Medium, 3=High, 4=Urgent.
    pub priority: NumericCode,

    /// Status: 2=Open, 3=Pending, 4=Resolved, 5=Closed.
    pub status: NumericCode,

    /// Requester email. Either email or requester_id is required.
    #[serde(default)]
    pub email: Option<String>,

    /// Requester contact ID. Either email or requester_id is required.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Custom field values keyed by `cf_` name.
    #[serde(default)]
    pub custom_fields: Option<Map<String, Value>>,

    /// Other top-level ticket fields (e.g. `type`, `group_id`, `tags`).
    #[serde(default)]
    pub additional_fields: Option<Map<String, Value>>,
}

impl CreateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            subject: self.subject.trim().to_string(),
            description: self.description.trim().to_string(),
            email: trim_option(&self.email),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    ///
    /// Additional fields are merged last and may override standard ones.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.subject, "subject")?;
        require_text(&self.description, "description")?;

        if self.email.is_none() && self.requester_id.is_none() {
            return Err(FreshdeskError::validation(
                "either email or requester_id must be provided",
            ));
        }

        let source = TicketSource::from_code(self.source.parse("source")?);
        let priority = TicketPriority::from_code(self.priority.parse("priority")?);
        let status = TicketStatus::from_code(self.status.parse("status")?);
        let (Some(source), Some(priority), Some(status)) = (source, priority, status) else {
            return Err(FreshdeskError::validation(
                "invalid value for source, priority, or status",
            ));
        };

        let mut body = Map::new();
        body.insert("subject".to_string(), Value::from(self.subject.clone()));
        body.insert("description".to_string(), Value::from(self.description.clone()));
        body.insert("source".to_string(), Value::from(source.code()));
        body.insert("priority".to_string(), Value::from(priority.code()));
        body.insert("status".to_string(), Value::from(status.code()));

        if let Some(ref email) = self.email {
            body.insert("email".to_string(), Value::from(email.clone()));
        }
        if let Some(requester_id) = self.requester_id {
            body.insert("requester_id".to_string(), Value::from(requester_id));
        }
        if let Some(ref custom_fields) = self.custom_fields {
            if !custom_fields.is_empty() {
                body.insert(
                    "custom_fields".to_string(),
                    Value::Object(custom_fields.clone()),
                );
            }
        }
        if let Some(ref additional) = self.additional_fields {
            for (key, value) in additional {
                body.insert(key.clone(), value.clone());
            }
        }

        Ok(Value::Object(body))
    }
}

/// Input parameters for the update_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// The numeric ticket ID.
    pub ticket_id: u64,

    /// Fields to change, e.g. `{"status": 4, "custom_fields": {"cf_region": "EU"}}`.
    pub ticket_fields: Map<String, Value>,
}

impl UpdateTicketInput {
    /// Returns true if at least one field is being changed.
    ///
    /// An empty `custom_fields` object changes nothing.
    pub fn has_updates(&self) -> bool {
        self.ticket_fields
            .iter()
            .any(|(key, value)| !(key == "custom_fields" && is_empty_object(value)))
    }

    /// Validates the input and builds the JSON request body.
    ///
    /// An empty `custom_fields` object is dropped rather than sent.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        if !self.has_updates() {
            return Err(FreshdeskError::validation(
                "at least one field must be provided in ticket_fields",
            ));
        }

        let mut body = self.ticket_fields.clone();
        if body.get("custom_fields").is_some_and(is_empty_object) {
            body.remove("custom_fields");
        }

        Ok(Value::Object(body))
    }
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

/// Input parameters for the search_tickets tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTicketsInput {
    /// A Freshdesk search query (e.g. `status:2 AND priority:3`) or plain
    /// text to match against ticket subjects and descriptions.
    pub query: String,
}

impl SearchTicketsInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
        }
    }
}

/// One search condition as supplied by a tool caller.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConditionInput {
    /// Field to match: tag, status, priority, type, agent_id, group_id,
    /// company_id, created_at, updated_at, due_by, fr_due_by or a `cf_` custom field.
    pub field: String,

    /// Value to match: string, number, boolean or null.
    pub value: Value,

    /// Optional comparison: `>`, `<`, `>=`, `<=`, `=` (or `:>` / `:<`).
    #[serde(default, alias = "comparator")]
    pub operator: Option<String>,
}

impl ConditionInput {
    /// Converts into a [`Condition`], rejecting arrays and objects as values.
    pub fn to_condition(&self) -> Result<Condition, FreshdeskError> {
        Ok(Condition {
            field: self.field.trim().to_string(),
            value: SearchValue::try_from(self.value.clone())?,
            comparator: Comparator::parse(self.operator.as_deref()),
        })
    }
}

/// Input parameters for the build_search_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildSearchQueryInput {
    /// Conditions to join.
    pub conditions: Vec<ConditionInput>,

    /// "AND" or "OR" (default: "AND").
    #[serde(default)]
    pub operator: Option<String>,
}

impl BuildSearchQueryInput {
    /// Converts into typed conditions and the joining operator.
    pub fn to_query_parts(&self) -> Result<(Vec<Condition>, BoolOperator), FreshdeskError> {
        let conditions = self
            .conditions
            .iter()
            .map(ConditionInput::to_condition)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((conditions, parse_operator(self.operator.as_deref())?))
    }
}

/// A group of conditions joined by one operator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConditionGroupInput {
    /// Conditions in the group; an empty group is skipped.
    #[serde(default)]
    pub conditions: Vec<ConditionInput>,

    /// "AND" or "OR" (default: "AND").
    #[serde(default)]
    pub operator: Option<String>,
}

impl ConditionGroupInput {
    /// Converts into a [`ConditionGroup`].
    pub fn to_group(&self) -> Result<ConditionGroup, FreshdeskError> {
        let conditions = self
            .conditions
            .iter()
            .map(ConditionInput::to_condition)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConditionGroup::new(
            conditions,
            parse_operator(self.operator.as_deref())?,
        ))
    }
}

/// Input parameters for the build_complex_search_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildComplexSearchQueryInput {
    /// Condition groups to combine.
    pub groups: Vec<ConditionGroupInput>,

    /// Operator between groups: "AND" or "OR" (default: "AND").
    #[serde(default)]
    pub operator: Option<String>,
}

impl BuildComplexSearchQueryInput {
    /// Converts into typed groups and the operator between them.
    pub fn to_query_parts(&self) -> Result<(Vec<ConditionGroup>, BoolOperator), FreshdeskError> {
        let groups = self
            .groups
            .iter()
            .map(ConditionGroupInput::to_group)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((groups, parse_operator(self.operator.as_deref())?))
    }
}

/// Input parameters for reply and summary tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TicketBodyInput {
    /// The numeric ticket ID.
    pub ticket_id: u64,

    /// HTML content.
    pub body: String,
}

impl TicketBodyInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
            ..self
        }
    }

    /// Checks that the body is not empty.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        require_text(&self.body, "body")
    }
}

/// Input parameters for the create_ticket_note tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateNoteInput {
    /// The numeric ticket ID.
    pub ticket_id: u64,

    /// HTML content of the note.
    pub body: String,

    /// If false, the note is visible to the requester. Default: true (private).
    #[serde(default)]
    pub private: Option<bool>,
}

impl CreateNoteInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
            ..self
        }
    }

    /// Checks that the body is not empty.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        require_text(&self.body, "body")
    }
}

/// Input parameters for the update_ticket_conversation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateConversationInput {
    /// The numeric conversation ID.
    pub conversation_id: u64,

    /// New HTML content.
    pub body: String,
}

impl UpdateConversationInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
            ..self
        }
    }

    /// Checks that the body is not empty.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        require_text(&self.body, "body")
    }
}

/// Input parameters for autocomplete search tools (contacts, agents, companies).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTermInput {
    /// Text to match against names (and emails, for contacts and agents).
    pub term: String,
}

impl SearchTermInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            term: self.term.trim().to_string(),
        }
    }

    /// Checks that the term is not empty.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        require_text(&self.term, "term")
    }
}

/// Input parameters for the update_contact tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateContactInput {
    /// The numeric contact ID.
    pub contact_id: u64,

    /// Fields to change, e.g. `{"job_title": "CTO"}`.
    pub contact_fields: Map<String, Value>,
}

impl UpdateContactInput {
    /// Checks that at least one field is being changed.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        if self.contact_fields.is_empty() {
            return Err(FreshdeskError::validation("no fields provided for update"));
        }
        Ok(())
    }
}

/// Input parameters for the get_field_properties tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FieldNameInput {
    /// Ticket field name, e.g. `status`, `type` or `cf_region`.
    pub field_name: String,
}

impl FieldNameInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            field_name: self.field_name.trim().to_string(),
        }
    }
}

// ============================================================================
// Record management inputs
// ============================================================================

/// Freshdesk's contact field types.
const CONTACT_FIELD_TYPES: &[&str] = &[
    "custom_text",
    "custom_paragraph",
    "custom_checkbox",
    "custom_number",
    "custom_dropdown",
    "custom_phone_number",
    "custom_url",
    "custom_date",
];

/// Freshdesk's company field types.
const COMPANY_FIELD_TYPES: &[&str] = &[
    "custom_text",
    "custom_paragraph",
    "custom_number",
    "custom_date",
    "custom_checkbox",
    "custom_dropdown",
    "custom_url",
];

/// Escalation delays a group accepts for `unassigned_for`.
const UNASSIGNED_FOR_OPTIONS: &[&str] =
    &["30m", "1h", "2h", "4h", "8h", "12h", "1d", "2d", "3d"];

/// Serializes a typed input as a JSON object and merges `extra` over it.
fn body_with_extras<T: Serialize>(
    input: &T,
    extra: Option<&Map<String, Value>>,
) -> Result<Value, FreshdeskError> {
    let mut body = match serde_json::to_value(input)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(extra) = extra {
        for (key, value) in extra {
            body.insert(key.clone(), value.clone());
        }
    }
    Ok(Value::Object(body))
}

/// Rejects a code outside `range`.
fn require_range(
    value: u8,
    range: std::ops::RangeInclusive<u8>,
    field_name: &str,
) -> Result<(), FreshdeskError> {
    if !range.contains(&value) {
        return Err(FreshdeskError::validation(format!(
            "{} must be between {} and {}",
            field_name,
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

/// Parses an agent ticket scope code.
fn parse_ticket_scope(code: u8) -> Result<AgentTicketScope, FreshdeskError> {
    AgentTicketScope::from_code(code).ok_or_else(|| {
        FreshdeskError::validation(
            "ticket_scope must be 1 (global), 2 (group) or 3 (restricted)",
        )
    })
}

/// Input parameters for tools that update a record by ID with a field map
/// (agents, groups, custom fields, canned responses, solutions).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateRecordInput {
    /// The numeric ID of the record.
    pub id: u64,

    /// Fields to change, e.g. `{"name": "Billing"}`.
    pub fields: Map<String, Value>,
}

impl UpdateRecordInput {
    /// Checks that at least one field is being changed and builds the body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        if self.fields.is_empty() {
            return Err(FreshdeskError::validation("no fields provided for update"));
        }
        Ok(Value::Object(self.fields.clone()))
    }
}

/// Input parameters for the create_contact tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateContactInput {
    /// Full name (required).
    pub name: String,

    /// Primary email. One of email, phone, mobile, twitter_id or
    /// unique_external_id is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Mobile number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// ID of the contact in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Company the contact belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,

    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    /// Language code, e.g. `en` or `pt-BR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Custom field values keyed by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,

    /// Other contact fields (e.g. `address`, `time_zone`, `other_emails`).
    #[serde(default, skip_serializing)]
    pub additional_fields: Option<Map<String, Value>>,
}

impl CreateContactInput {
    /// Sanitizes input by trimming whitespace from the name and identifiers.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: trim_option(&self.email),
            phone: trim_option(&self.phone),
            mobile: trim_option(&self.mobile),
            twitter_id: trim_option(&self.twitter_id),
            unique_external_id: trim_option(&self.unique_external_id),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.name, "name")?;

        let identified = [
            &self.email,
            &self.phone,
            &self.mobile,
            &self.twitter_id,
            &self.unique_external_id,
        ]
        .iter()
        .any(|id| id.is_some());
        if !identified {
            return Err(FreshdeskError::validation(
                "one of email, phone, mobile, twitter_id or unique_external_id must be provided",
            ));
        }

        body_with_extras(self, self.additional_fields.as_ref())
    }
}

/// Input parameters for the hard_delete_contact tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HardDeleteContactInput {
    /// The numeric contact ID.
    pub contact_id: u64,

    /// Delete even if the contact was not soft deleted first. Default: false.
    #[serde(default)]
    pub force: Option<bool>,
}

/// Input parameters for the make_agent_from_contact tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct MakeAgentInput {
    /// The numeric contact ID.
    #[serde(skip_serializing)]
    pub contact_id: u64,

    /// Ticket scope: 1=Global, 2=Group, 3=Restricted.
    pub ticket_scope: u8,

    /// True for an occasional (day pass) agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasional: Option<bool>,

    /// Groups the agent belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<u64>>,

    /// Roles granted to the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<u64>>,

    /// Skills associated with the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_ids: Option<Vec<u64>>,

    /// Departments the agent belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_ids: Option<Vec<u64>>,
}

impl MakeAgentInput {
    /// Validates the ticket scope and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        parse_ticket_scope(self.ticket_scope)?;
        body_with_extras(self, None)
    }
}

/// Input parameters for the create_agent tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateAgentInput {
    /// Agent email (required).
    pub email: String,

    /// Ticket scope: 1=Global, 2=Group, 3=Restricted (required).
    pub ticket_scope: u8,

    /// True for an occasional (day pass) agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasional: Option<bool>,

    /// Groups the agent belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<u64>>,

    /// Roles granted to the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<u64>>,

    /// Other agent fields (e.g. `signature`, `language`, `agent_type`).
    #[serde(default, skip_serializing)]
    pub additional_fields: Option<Map<String, Value>>,
}

impl CreateAgentInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.email, "email")?;
        let scope = parse_ticket_scope(self.ticket_scope)?;

        let mut body = body_with_extras(self, self.additional_fields.as_ref())?;
        // additional_fields must not override the validated scope
        body["ticket_scope"] = Value::from(scope.code());
        Ok(body)
    }
}

/// Input parameters for the create_group tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateGroupInput {
    /// Group name (required).
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Members of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<u64>>,

    /// Automatic ticket assignment: 0=off, 1=round robin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_ticket_assign: Option<u8>,

    /// Agent notified when a ticket stays unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalate_to: Option<u64>,

    /// Delay before escalation: 30m, 1h, 2h, 4h, 8h, 12h, 1d, 2d or 3d.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unassigned_for: Option<String>,
}

impl CreateGroupInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: trim_option(&self.description),
            unassigned_for: trim_option(&self.unassigned_for),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.name, "name")?;
        if let Some(assign) = self.auto_ticket_assign {
            require_range(assign, 0..=1, "auto_ticket_assign")?;
        }
        if let Some(ref delay) = self.unassigned_for {
            if !UNASSIGNED_FOR_OPTIONS.contains(&delay.as_str()) {
                return Err(FreshdeskError::validation(format!(
                    "unassigned_for must be one of {}",
                    UNASSIGNED_FOR_OPTIONS.join(", ")
                )));
            }
        }
        body_with_extras(self, None)
    }
}

/// Input parameters for the create_company tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateCompanyInput {
    /// Company name (required, unique).
    pub name: String,

    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Email domains mapped to the company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,

    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Health score, e.g. `Happy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<String>,

    /// Account tier, e.g. `Premium`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_tier: Option<String>,

    /// Contract renewal date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<String>,

    /// Industry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Custom field values keyed by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
}

impl CreateCompanyInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: trim_option(&self.description),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.name, "name")?;
        body_with_extras(self, None)
    }
}

/// Which record type a custom field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomFieldKind {
    /// `/admin/ticket_fields`
    Ticket,
    /// `/contact_fields`
    Contact,
    /// `/company_fields`
    Company,
}

impl CustomFieldKind {
    /// Field types accepted for this record type, or `None` if Freshdesk
    /// decides.
    fn allowed_types(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Ticket => None,
            Self::Contact => Some(CONTACT_FIELD_TYPES),
            Self::Company => Some(COMPANY_FIELD_TYPES),
        }
    }
}

/// Input parameters for the create_*_field tools.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateFieldInput {
    /// Label shown to agents (required).
    pub label: String,

    /// Label shown to customers. Required for ticket and contact fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_for_customers: Option<String>,

    /// Field type, e.g. `custom_text` or `custom_dropdown` (required).
    #[serde(rename = "type")]
    pub field_type: String,

    /// Position among the other fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    /// Whether agents must fill it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_for_agents: Option<bool>,

    /// Dropdown choices, e.g. `[{"value": "EU", "position": 1}]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,

    /// Other field properties (e.g. `displayed_for_customers`).
    #[serde(default, skip_serializing)]
    pub additional_fields: Option<Map<String, Value>>,
}

impl CreateFieldInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            label: self.label.trim().to_string(),
            label_for_customers: trim_option(&self.label_for_customers),
            field_type: self.field_type.trim().to_string(),
            ..self
        }
    }

    /// Validates the input for `kind` and builds the JSON request body.
    pub fn to_request_body(&self, kind: CustomFieldKind) -> Result<Value, FreshdeskError> {
        require_text(&self.label, "label")?;
        require_text(&self.field_type, "type")?;

        if kind != CustomFieldKind::Company && self.label_for_customers.is_none() {
            return Err(FreshdeskError::validation(
                "label_for_customers is required and cannot be empty",
            ));
        }
        if let Some(allowed) = kind.allowed_types() {
            if !allowed.contains(&self.field_type.as_str()) {
                return Err(FreshdeskError::validation(format!(
                    "type must be one of {}",
                    allowed.join(", ")
                )));
            }
        }

        body_with_extras(self, self.additional_fields.as_ref())
    }
}

/// Input parameters for the create_canned_response tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateCannedResponseInput {
    /// Title (required).
    pub title: String,

    /// HTML content (required).
    pub content_html: String,

    /// Folder to add the response to.
    pub folder_id: u64,

    /// Visibility: 0=All agents, 1=Personal, 2=Select groups.
    pub visibility: u8,

    /// Groups that can use the response. Required when visibility is 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<u64>>,
}

impl CreateCannedResponseInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content_html: self.content_html.trim().to_string(),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.title, "title")?;
        require_text(&self.content_html, "content_html")?;
        require_range(self.visibility, 0..=2, "visibility")?;

        let has_groups = self.group_ids.as_ref().is_some_and(|ids| !ids.is_empty());
        if self.visibility == 2 && !has_groups {
            return Err(FreshdeskError::validation(
                "group_ids is required when visibility is 2",
            ));
        }

        body_with_extras(self, None)
    }
}

/// Input parameters for tools taking a single name
/// (find_company_by_name, create_canned_response_folder).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NameInput {
    /// Company or folder name.
    pub name: String,
}

impl NameInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }

    /// Checks that the name is not empty.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        require_text(&self.name, "name")
    }
}

/// Input parameters for the update_canned_response_folder tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenameFolderInput {
    /// The numeric folder ID.
    pub folder_id: u64,

    /// New folder name.
    pub name: String,
}

impl RenameFolderInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self
        }
    }

    /// Checks that the name is not empty.
    pub fn validate(&self) -> Result<(), FreshdeskError> {
        require_text(&self.name, "name")
    }
}

/// Input parameters for the create_solution_category tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateSolutionCategoryInput {
    /// Category name (required).
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Portals the category is shown in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_in_portals: Option<Vec<u64>>,
}

impl CreateSolutionCategoryInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: trim_option(&self.description),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.name, "name")?;
        body_with_extras(self, None)
    }
}

/// Input parameters for the create_solution_category_folder tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateSolutionFolderInput {
    /// Category to create the folder in.
    #[serde(skip_serializing)]
    pub category_id: u64,

    /// Folder name (required).
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Visibility: 1=All users, 2=Logged-in users, 3=Agents, 4=Selected companies.
    pub visibility: u8,

    /// Companies that can see the folder. Required when visibility is 4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_ids: Option<Vec<u64>>,
}

impl CreateSolutionFolderInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: trim_option(&self.description),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.name, "name")?;
        require_range(self.visibility, 1..=4, "visibility")?;

        let has_companies = self.company_ids.as_ref().is_some_and(|ids| !ids.is_empty());
        if self.visibility == 4 && !has_companies {
            return Err(FreshdeskError::validation(
                "company_ids is required when visibility is 4",
            ));
        }

        body_with_extras(self, None)
    }
}

/// Input parameters for the create_solution_article tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateSolutionArticleInput {
    /// Folder to create the article in.
    #[serde(skip_serializing)]
    pub folder_id: u64,

    /// Article title (required).
    pub title: String,

    /// HTML body (required).
    pub description: String,

    /// Status: 1=Draft, 2=Published. Default: 1.
    #[serde(default = "default_article_status")]
    pub status: u8,

    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Other article fields (e.g. `seo_data`).
    #[serde(default, skip_serializing)]
    pub additional_fields: Option<Map<String, Value>>,
}

fn default_article_status() -> u8 {
    1
}

impl CreateSolutionArticleInput {
    /// Sanitizes input by trimming whitespace.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        }
    }

    /// Validates the input and builds the JSON request body.
    pub fn to_request_body(&self) -> Result<Value, FreshdeskError> {
        require_text(&self.title, "title")?;
        require_text(&self.description, "description")?;
        require_range(self.status, 1..=2, "status")?;
        body_with_extras(self, self.additional_fields.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Sanitization tests
    // ========================================================================

    #[test]
    fn test_trim_option_trims_whitespace() {
        let s = Some("  hello  ".to_string());
        assert_eq!(trim_option(&s), Some("hello".to_string()));
    }

    #[test]
    fn test_trim_option_filters_empty() {
        let s = Some("   ".to_string());
        assert_eq!(trim_option(&s), None);
    }

    #[test]
    fn test_search_tickets_input_sanitize() {
        let input = SearchTicketsInput {
            query: "  status:2  ".to_string(),
        };
        assert_eq!(input.sanitize().query, "status:2");
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    #[test]
    fn test_page_input_deserialize_empty() {
        let input: PageInput = serde_json::from_str("{}").unwrap();
        let params = input.page_params().unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 30);
    }

    #[test]
    fn test_page_input_rejects_out_of_range() {
        let input: PageInput = serde_json::from_str(r#"{"page": 0}"#).unwrap();
        assert!(input.page_params().is_err());

        let input: PageInput = serde_json::from_str(r#"{"per_page": 250}"#).unwrap();
        assert!(input.page_params().is_err());
    }

    // ========================================================================
    // Ticket creation
    // ========================================================================

    fn create_input(json: &str) -> CreateTicketInput {
        serde_json::from_str::<CreateTicketInput>(json).unwrap().sanitize()
    }

    #[test]
    fn test_create_ticket_accepts_numeric_strings() {
        let input = create_input(
            r#"{
                "subject": " Printer ",
                "description": "It is on fire",
                "source": "2",
                "priority": 4,
                "status": "2",
                "email": "user@example.com"
            }"#,
        );
        let body = input.to_request_body().unwrap();
        assert_eq!(body["subject"], "Printer");
        assert_eq!(body["source"], 2);
        assert_eq!(body["priority"], 4);
        assert_eq!(body["status"], 2);
        assert_eq!(body["email"], "user@example.com");
        assert!(body.get("requester_id").is_none());
    }

    #[test]
    fn test_create_ticket_requires_requester() {
        let input = create_input(
            r#"{"subject": "S", "description": "D", "source": 1, "priority": 1, "status": 2}"#,
        );
        let err = input.to_request_body().unwrap_err();
        assert!(err.to_string().contains("email or requester_id"));
    }

    #[test]
    fn test_create_ticket_rejects_unknown_codes() {
        let input = create_input(
            r#"{"subject": "S", "description": "D", "source": 4, "priority": 1, "status": 2, "requester_id": 5}"#,
        );
        assert!(input.to_request_body().is_err());

        let input = create_input(
            r#"{"subject": "S", "description": "D", "source": 1, "priority": "high", "status": 2, "requester_id": 5}"#,
        );
        assert!(input.to_request_body().is_err());
    }

    #[test]
    fn test_create_ticket_merges_extra_fields() {
        let input = create_input(
            r#"{
                "subject": "S", "description": "D", "source": 1, "priority": 1, "status": 2,
                "requester_id": 5,
                "custom_fields": {"cf_region": "EU"},
                "additional_fields": {"type": "Question", "group_id": 3}
            }"#,
        );
        let body = input.to_request_body().unwrap();
        assert_eq!(body["requester_id"], 5);
        assert_eq!(body["custom_fields"]["cf_region"], "EU");
        assert_eq!(body["type"], "Question");
        assert_eq!(body["group_id"], 3);
    }

    #[test]
    fn test_create_ticket_requires_subject() {
        let input = create_input(
            r#"{"subject": "   ", "description": "D", "source": 1, "priority": 1, "status": 2, "requester_id": 5}"#,
        );
        assert!(input.to_request_body().unwrap_err().to_string().contains("subject"));
    }

    // ========================================================================
    // Ticket update
    // ========================================================================

    #[test]
    fn test_update_ticket_has_updates() {
        let input: UpdateTicketInput =
            serde_json::from_str(r#"{"ticket_id": 1, "ticket_fields": {}}"#).unwrap();
        assert!(!input.has_updates());
        assert!(input.to_request_body().is_err());

        let input: UpdateTicketInput = serde_json::from_str(
            r#"{"ticket_id": 1, "ticket_fields": {"custom_fields": {}}}"#,
        )
        .unwrap();
        assert!(!input.has_updates());

        let input: UpdateTicketInput =
            serde_json::from_str(r#"{"ticket_id": 1, "ticket_fields": {"status": 4}}"#).unwrap();
        assert_eq!(input.to_request_body().unwrap()["status"], 4);
    }

    #[test]
    fn test_update_ticket_drops_empty_custom_fields() {
        let input: UpdateTicketInput = serde_json::from_str(
            r#"{"ticket_id": 1, "ticket_fields": {"priority": 2, "custom_fields": {}}}"#,
        )
        .unwrap();
        let body = input.to_request_body().unwrap();
        assert!(body.get("custom_fields").is_none());

        let input: UpdateTicketInput = serde_json::from_str(
            r#"{"ticket_id": 1, "ticket_fields": {"custom_fields": {}}}"#,
        )
        .unwrap();
        assert!(input.to_request_body().is_err());
    }

    // ========================================================================
    // Query builder inputs
    // ========================================================================

    #[test]
    fn test_condition_input_accepts_comparator_alias() {
        let input: ConditionInput = serde_json::from_str(
            r#"{"field": "created_at", "value": "2023-01-01", "comparator": ":>"}"#,
        )
        .unwrap();
        let condition = input.to_condition().unwrap();
        assert_eq!(condition.comparator, Comparator::Greater);
    }

    #[test]
    fn test_condition_input_rejects_array_value() {
        let input: ConditionInput =
            serde_json::from_str(r#"{"field": "tag", "value": ["a", "b"]}"#).unwrap();
        assert!(matches!(
            input.to_condition(),
            Err(FreshdeskError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_build_search_query_input_operator() {
        let input: BuildSearchQueryInput = serde_json::from_str(
            r#"{"conditions": [{"field": "status", "value": 2}], "operator": "OR"}"#,
        )
        .unwrap();
        let (conditions, operator) = input.to_query_parts().unwrap();
        assert_eq!(conditions.len(), 1);
        assert_eq!(operator, BoolOperator::Or);

        let input: BuildSearchQueryInput =
            serde_json::from_str(r#"{"conditions": [], "operator": "XOR"}"#).unwrap();
        assert!(input.to_query_parts().is_err());
    }

    #[test]
    fn test_complex_input_defaults_to_and() {
        let input: BuildComplexSearchQueryInput = serde_json::from_str(
            r#"{"groups": [{"conditions": [{"field": "status", "value": 2}]}, {}]}"#,
        )
        .unwrap();
        let (groups, operator) = input.to_query_parts().unwrap();
        assert_eq!(operator, BoolOperator::And);
        assert_eq!(groups[0].operator, BoolOperator::And);
        assert!(groups[1].conditions.is_empty());
    }

    // ========================================================================
    // Conversation and contact inputs
    // ========================================================================

    #[test]
    fn test_ticket_body_input_validate() {
        let input = TicketBodyInput {
            ticket_id: 1,
            body: "   ".to_string(),
        }
        .sanitize();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_note_input_deserialize() {
        let input: CreateNoteInput =
            serde_json::from_str(r#"{"ticket_id": 3, "body": " note "}"#).unwrap();
        let input = input.sanitize();
        assert_eq!(input.body, "note");
        assert!(input.private.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_contact_requires_fields() {
        let input: UpdateContactInput =
            serde_json::from_str(r#"{"contact_id": 3, "contact_fields": {}}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_search_term_input_validate() {
        let input = SearchTermInput {
            term: "  ".to_string(),
        }
        .sanitize();
        assert!(input.validate().is_err());
    }

    // ========================================================================
    // Record management inputs
    // ========================================================================

    #[test]
    fn test_create_contact_requires_identifier() {
        let input: CreateContactInput =
            serde_json::from_str(r#"{"name": "Ada", "email": "  "}"#).unwrap();
        let err = input.sanitize().to_request_body().unwrap_err();
        assert!(err.to_string().contains("unique_external_id"));

        let input: CreateContactInput = serde_json::from_str(
            r#"{"name": " Ada ", "mobile": "+44 7700 900000", "additional_fields": {"time_zone": "London"}}"#,
        )
        .unwrap();
        let body = input.sanitize().to_request_body().unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Ada", "mobile": "+44 7700 900000", "time_zone": "London"})
        );
    }

    #[test]
    fn test_create_agent_validates_ticket_scope() {
        let input: CreateAgentInput =
            serde_json::from_str(r#"{"email": "grace@example.com", "ticket_scope": 4}"#).unwrap();
        assert!(input.to_request_body().is_err());

        let input: CreateAgentInput = serde_json::from_str(
            r#"{"email": "grace@example.com", "ticket_scope": 2, "additional_fields": {"ticket_scope": 9}}"#,
        )
        .unwrap();
        let body = input.to_request_body().unwrap();
        assert_eq!(body["ticket_scope"], 2);
        assert!(body.get("additional_fields").is_none());
    }

    #[test]
    fn test_make_agent_skips_contact_id() {
        let input: MakeAgentInput =
            serde_json::from_str(r#"{"contact_id": 12, "ticket_scope": 1, "occasional": true}"#)
                .unwrap();
        assert_eq!(
            input.to_request_body().unwrap(),
            serde_json::json!({"ticket_scope": 1, "occasional": true})
        );
    }

    #[test]
    fn test_create_group_rejects_unknown_escalation_delay() {
        let input: CreateGroupInput =
            serde_json::from_str(r#"{"name": "Billing", "unassigned_for": "5m"}"#).unwrap();
        assert!(input.sanitize().to_request_body().is_err());

        let input: CreateGroupInput =
            serde_json::from_str(r#"{"name": "Billing", "auto_ticket_assign": 2}"#).unwrap();
        assert!(input.to_request_body().is_err());
    }

    #[test]
    fn test_update_record_requires_fields() {
        let input: UpdateRecordInput =
            serde_json::from_str(r#"{"id": 4, "fields": {}}"#).unwrap();
        assert!(input.to_request_body().is_err());
    }

    #[test]
    fn test_create_field_checks_type_per_kind() {
        let input: CreateFieldInput =
            serde_json::from_str(r#"{"label": "Region", "type": "custom_phone_number"}"#).unwrap();
        assert!(input.to_request_body(CustomFieldKind::Company).is_err());
        // contact fields also need a customer-facing label
        assert!(input.to_request_body(CustomFieldKind::Contact).is_err());

        let input: CreateFieldInput = serde_json::from_str(
            r#"{"label": "Region", "label_for_customers": "Region", "type": "custom_phone_number"}"#,
        )
        .unwrap();
        let body = input.to_request_body(CustomFieldKind::Contact).unwrap();
        assert_eq!(body["type"], "custom_phone_number");
    }

    #[test]
    fn test_canned_response_group_visibility_needs_groups() {
        let input: CreateCannedResponseInput = serde_json::from_str(
            r#"{"title": "Thanks", "content_html": "<p>Thanks!</p>", "folder_id": 2, "visibility": 2}"#,
        )
        .unwrap();
        assert!(input.to_request_body().is_err());

        let input: CreateCannedResponseInput = serde_json::from_str(
            r#"{"title": "Thanks", "content_html": "<p>Thanks!</p>", "folder_id": 2, "visibility": 3}"#,
        )
        .unwrap();
        assert!(input.to_request_body().is_err());
    }

    #[test]
    fn test_solution_folder_visibility_range() {
        let input: CreateSolutionFolderInput = serde_json::from_str(
            r#"{"category_id": 1, "name": "FAQ", "visibility": 0}"#,
        )
        .unwrap();
        assert!(input.to_request_body().is_err());

        let input: CreateSolutionFolderInput = serde_json::from_str(
            r#"{"category_id": 1, "name": "FAQ", "visibility": 1}"#,
        )
        .unwrap();
        assert_eq!(
            input.to_request_body().unwrap(),
            serde_json::json!({"name": "FAQ", "visibility": 1})
        );
    }

    #[test]
    fn test_solution_article_defaults_to_draft() {
        let input: CreateSolutionArticleInput = serde_json::from_str(
            r#"{"folder_id": 5, "title": "Reset a password", "description": "<p>Steps</p>"}"#,
        )
        .unwrap();
        let body = input.to_request_body().unwrap();
        assert_eq!(body["status"], 1);
        assert!(body.get("folder_id").is_none());
    }

    #[test]
    fn test_name_input_validate() {
        let input = NameInput {
            name: "   ".to_string(),
        }
        .sanitize();
        assert!(input.validate().is_err());
    }
}

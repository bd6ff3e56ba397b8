//! MCP server implementation for Freshdesk.
//!
//! This module defines the `FreshdeskServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Freshdesk operations as tools.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde::Serialize;

use crate::error::FreshdeskError;
use crate::fd_client::FreshdeskClient;
use crate::models::{Conversation, Page, SearchResults, Ticket};
use crate::query::{build_search_query, compose_groups};
use crate::tools::{
    BuildComplexSearchQueryInput, BuildSearchQueryInput, CreateAgentInput,
    CreateCannedResponseInput, CreateCompanyInput, CreateContactInput, CreateFieldInput,
    CreateGroupInput, CreateNoteInput, CreateSolutionArticleInput, CreateSolutionCategoryInput,
    CreateSolutionFolderInput, CreateTicketInput, CustomFieldKind, FieldNameInput,
    HardDeleteContactInput, IdInput, MakeAgentInput, NameInput, PageInput, RenameFolderInput,
    SearchTermInput, SearchTicketsInput, TicketBodyInput, TicketIdInput, UpdateContactInput,
    UpdateConversationInput, UpdateRecordInput, UpdateTicketInput,
};

/// The Freshdesk MCP server.
///
/// This server exposes Freshdesk operations as MCP tools.
#[derive(Clone)]
pub struct FreshdeskServer {
    /// Freshdesk client for API operations.
    fd_client: FreshdeskClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FreshdeskServer {
    /// Creates a new Freshdesk server instance.
    pub fn new(fd_client: FreshdeskClient) -> Self {
        Self {
            fd_client,
            tool_router: Self::tool_router(),
        }
    }

    /// Returns "pong"; used to check that the server is up.
    #[tool(description = "Test connectivity to the Freshdesk MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    #[tool(description = "List Freshdesk tickets, newest first. Supports page (1-based) and per_page (max 100).")]
    async fn get_tickets(
        &self,
        Parameters(input): Parameters<PageInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "get_tickets tool called");

        let params = input.page_params().map_err(|e| e.to_string())?;
        let page = self
            .fd_client
            .list_tickets(params)
            .await
            .map_err(|e| self.failure("list tickets", &e))?;

        Ok(format_ticket_page(&page))
    }

    #[tool(description = "Get full details of a single Freshdesk ticket by ID.")]
    async fn get_ticket(
        &self,
        Parameters(input): Parameters<TicketIdInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "get_ticket tool called");

        let ticket = self
            .fd_client
            .get_ticket(input.ticket_id)
            .await
            .map_err(|e| self.failure(&format!("get ticket {}", input.ticket_id), &e))?;

        Ok(format_ticket_details(&ticket, &self.fd_client.ticket_web_url(ticket.id)))
    }

    /// Create a ticket.
    ///
    /// Subject, description, source, priority and status are required, plus
    /// one of email or requester_id.
    #[tool(description = "Create a Freshdesk ticket. Requires subject, description, source, priority (1-4), status (2-5) and either email or requester_id. custom_fields and additional_fields are passed through.")]
    async fn create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(subject = %input.subject, "create_ticket tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let ticket = self
            .fd_client
            .create_ticket(&body)
            .await
            .map_err(|e| self.failure("create ticket", &e))?;

        Ok(format_ticket_change("created", &ticket))
    }

    #[tool(description = "Update a Freshdesk ticket. ticket_fields holds the fields to change; custom fields go under ticket_fields.custom_fields.")]
    async fn update_ticket(
        &self,
        Parameters(input): Parameters<UpdateTicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "update_ticket tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;

        let ticket = self
            .fd_client
            .update_ticket(input.ticket_id, &body)
            .await
            .map_err(|e| self.failure(&format!("update ticket {}", input.ticket_id), &e))?;

        Ok(format_ticket_change("updated", &ticket))
    }

    #[tool(description = "Delete a Freshdesk ticket (moves it to trash).")]
    async fn delete_ticket(
        &self,
        Parameters(input): Parameters<TicketIdInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "delete_ticket tool called");

        self.fd_client
            .delete_ticket(input.ticket_id)
            .await
            .map_err(|e| self.failure(&format!("delete ticket {}", input.ticket_id), &e))?;

        Ok(format!("Ticket #{} deleted.", input.ticket_id))
    }

    /// Search tickets with a query string or free text.
    #[tool(description = "Search Freshdesk tickets. Accepts a query like \"status:2 AND priority:3\" (see build_search_query) or free text, which is matched against subject and description.")]
    async fn search_tickets(
        &self,
        Parameters(input): Parameters<SearchTicketsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(query = %input.query, "search_tickets tool called");

        if input.query.is_empty() {
            return Err("query is required and cannot be empty.".to_string());
        }

        let results = self
            .fd_client
            .search_tickets(&input.query)
            .await
            .map_err(|e| self.failure("search tickets", &e))?;

        Ok(format_search_results(&results))
    }

    #[tool(description = "List all ticket fields, including custom fields and their allowed choices.")]
    async fn get_ticket_fields(&self) -> Result<String, String> {
        tracing::debug!("get_ticket_fields tool called");

        let fields = self
            .fd_client
            .list_ticket_fields()
            .await
            .map_err(|e| self.failure("list ticket fields", &e))?;

        to_pretty_json(&fields)
    }

    #[tool(description = "Get the definition of one ticket field by name, e.g. 'status', 'type' or 'cf_region'.")]
    async fn get_field_properties(
        &self,
        Parameters(input): Parameters<FieldNameInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(field_name = %input.field_name, "get_field_properties tool called");

        let field = self
            .fd_client
            .get_field_properties(&input.field_name)
            .await
            .map_err(|e| self.failure("get field properties", &e))?;

        match field {
            Some(field) => to_pretty_json(&field),
            None => Err(format!("No ticket field named '{}'.", input.field_name)),
        }
    }

    #[tool(description = "Create a custom ticket field. Requires label, label_for_customers and type (e.g. custom_text, custom_dropdown).")]
    async fn create_ticket_field(
        &self,
        Parameters(input): Parameters<CreateFieldInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(label = %input.label, "create_ticket_field tool called");

        let body = input
            .to_request_body(CustomFieldKind::Ticket)
            .map_err(|e| e.to_string())?;
        self.respond("create ticket field", self.fd_client.create_ticket_field(&body).await)
    }

    #[tool(description = "Get a ticket field definition by ID, including its choices.")]
    async fn view_ticket_field(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "view_ticket_field tool called");

        let result = self.fd_client.get_ticket_field(input.id).await;
        self.respond(&format!("get ticket field {}", input.id), result)
    }

    #[tool(description = "Update a ticket field definition. fields holds the properties to change.")]
    async fn update_ticket_field(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "update_ticket_field tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_ticket_field(input.id, &body).await;
        self.respond(&format!("update ticket field {}", input.id), result)
    }

    #[tool(description = "Delete a custom ticket field by ID.")]
    async fn delete_ticket_field(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "delete_ticket_field tool called");

        let result = self.fd_client.delete_ticket_field(input.id).await;
        self.confirm(
            &format!("delete ticket field {}", input.id),
            result,
            format!("Ticket field {} deleted.", input.id),
        )
    }

    // ========================================================================
    // Query builder
    // ========================================================================

    /// Build a search query from a flat list of conditions.
    #[tool(description = "Build a Freshdesk ticket search query from conditions. Each condition has field, value and optional operator ('>', '>=', '<', '<=', '='). Conditions are joined with operator AND (default) or OR. Returns the query string for search_tickets.")]
    fn build_search_query(
        &self,
        Parameters(input): Parameters<BuildSearchQueryInput>,
    ) -> Result<String, String> {
        tracing::debug!(conditions = input.conditions.len(), "build_search_query tool called");

        let (conditions, operator) = input.to_query_parts().map_err(|e| e.to_string())?;
        build_search_query(&conditions, operator).map_err(|e| e.to_string())
    }

    /// Build a search query from groups of conditions.
    #[tool(description = "Build a nested Freshdesk ticket search query. Each group has conditions and an inner operator (AND/OR); groups are joined with the outer operator. Empty groups are skipped. Returns the query string for search_tickets.")]
    fn build_complex_search_query(
        &self,
        Parameters(input): Parameters<BuildComplexSearchQueryInput>,
    ) -> Result<String, String> {
        tracing::debug!(groups = input.groups.len(), "build_complex_search_query tool called");

        let (groups, operator) = input.to_query_parts().map_err(|e| e.to_string())?;
        compose_groups(&groups, operator).map_err(|e| e.to_string())
    }

    // ========================================================================
    // Conversations and summaries
    // ========================================================================

    #[tool(description = "List the replies and notes on a ticket.")]
    async fn get_ticket_conversation(
        &self,
        Parameters(input): Parameters<TicketIdInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "get_ticket_conversation tool called");

        let conversations = self
            .fd_client
            .list_conversations(input.ticket_id)
            .await
            .map_err(|e| {
                self.failure(&format!("get conversation of ticket {}", input.ticket_id), &e)
            })?;

        Ok(format_conversations(input.ticket_id, &conversations))
    }

    #[tool(description = "Reply to the requester of a ticket.")]
    async fn create_ticket_reply(
        &self,
        Parameters(input): Parameters<TicketBodyInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "create_ticket_reply tool called");

        input.validate().map_err(|e| e.to_string())?;
        let reply = self
            .fd_client
            .create_reply(input.ticket_id, &input.body)
            .await
            .map_err(|e| self.failure(&format!("reply to ticket {}", input.ticket_id), &e))?;

        Ok(format!(
            "Reply #{} added to ticket #{}.",
            reply.id, input.ticket_id
        ))
    }

    #[tool(description = "Add a note to a ticket. Notes are private unless private is false.")]
    async fn create_ticket_note(
        &self,
        Parameters(input): Parameters<CreateNoteInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "create_ticket_note tool called");

        input.validate().map_err(|e| e.to_string())?;
        let note = self
            .fd_client
            .create_note(input.ticket_id, &input.body, input.private)
            .await
            .map_err(|e| self.failure(&format!("add note to ticket {}", input.ticket_id), &e))?;

        Ok(format!(
            "{} #{} added to ticket #{}.",
            note.direction(),
            note.id,
            input.ticket_id
        ))
    }

    #[tool(description = "Edit the body of an existing reply or note.")]
    async fn update_ticket_conversation(
        &self,
        Parameters(input): Parameters<UpdateConversationInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(
            conversation_id = input.conversation_id,
            "update_ticket_conversation tool called"
        );

        input.validate().map_err(|e| e.to_string())?;
        let conversation = self
            .fd_client
            .update_conversation(input.conversation_id, &input.body)
            .await
            .map_err(|e| {
                self.failure(&format!("update conversation {}", input.conversation_id), &e)
            })?;

        to_pretty_json(&conversation)
    }

    #[tool(description = "View the summary of a ticket.")]
    async fn view_ticket_summary(
        &self,
        Parameters(input): Parameters<TicketIdInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "view_ticket_summary tool called");

        let summary = self
            .fd_client
            .get_ticket_summary(input.ticket_id)
            .await
            .map_err(|e| self.failure(&format!("get summary of ticket {}", input.ticket_id), &e))?;

        to_pretty_json(&summary)
    }

    #[tool(description = "Replace the summary of a ticket.")]
    async fn update_ticket_summary(
        &self,
        Parameters(input): Parameters<TicketBodyInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "update_ticket_summary tool called");

        input.validate().map_err(|e| e.to_string())?;
        let summary = self
            .fd_client
            .update_ticket_summary(input.ticket_id, &input.body)
            .await
            .map_err(|e| {
                self.failure(&format!("update summary of ticket {}", input.ticket_id), &e)
            })?;

        to_pretty_json(&summary)
    }

    #[tool(description = "Delete the summary of a ticket.")]
    async fn delete_ticket_summary(
        &self,
        Parameters(input): Parameters<TicketIdInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "delete_ticket_summary tool called");

        self.fd_client
            .delete_ticket_summary(input.ticket_id)
            .await
            .map_err(|e| {
                self.failure(&format!("delete summary of ticket {}", input.ticket_id), &e)
            })?;

        Ok(format!("Summary of ticket #{} deleted.", input.ticket_id))
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    #[tool(description = "List contacts. Supports page and per_page.")]
    async fn list_contacts(
        &self,
        Parameters(input): Parameters<PageInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "list_contacts tool called");

        let params = input.page_params().map_err(|e| e.to_string())?;
        let page = self
            .fd_client
            .list_contacts(params)
            .await
            .map_err(|e| self.failure("list contacts", &e))?;

        to_pretty_json(&page)
    }

    #[tool(description = "Get a contact by ID.")]
    async fn get_contact(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.id, "get_contact tool called");

        let contact = self
            .fd_client
            .get_contact(input.id)
            .await
            .map_err(|e| self.failure(&format!("get contact {}", input.id), &e))?;

        to_pretty_json(&contact)
    }

    #[tool(description = "Find contacts whose name or email starts with the given term.")]
    async fn search_contacts(
        &self,
        Parameters(input): Parameters<SearchTermInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(term = %input.term, "search_contacts tool called");

        input.validate().map_err(|e| e.to_string())?;
        let contacts = self
            .fd_client
            .search_contacts(&input.term)
            .await
            .map_err(|e| self.failure("search contacts", &e))?;

        to_pretty_json(&contacts)
    }

    #[tool(description = "Update a contact. contact_fields holds the fields to change.")]
    async fn update_contact(
        &self,
        Parameters(input): Parameters<UpdateContactInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.contact_id, "update_contact tool called");

        input.validate().map_err(|e| e.to_string())?;
        let body = serde_json::Value::Object(input.contact_fields.clone());
        let contact = self
            .fd_client
            .update_contact(input.contact_id, &body)
            .await
            .map_err(|e| self.failure(&format!("update contact {}", input.contact_id), &e))?;

        to_pretty_json(&contact)
    }

    #[tool(description = "Create a contact. Requires name and one of email, phone, mobile, twitter_id or unique_external_id.")]
    async fn create_contact(
        &self,
        Parameters(input): Parameters<CreateContactInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_contact tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        self.respond("create contact", self.fd_client.create_contact(&body).await)
    }

    #[tool(description = "Soft delete a contact by ID. The contact can be restored with restore_contact.")]
    async fn delete_contact(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.id, "delete_contact tool called");

        let result = self.fd_client.delete_contact(input.id).await;
        self.confirm(
            &format!("delete contact {}", input.id),
            result,
            format!("Contact {} deleted.", input.id),
        )
    }

    #[tool(description = "Permanently delete a contact. Set force to delete a contact that was not soft deleted first.")]
    async fn hard_delete_contact(
        &self,
        Parameters(input): Parameters<HardDeleteContactInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.contact_id, force = ?input.force, "hard_delete_contact tool called");

        let result = self
            .fd_client
            .hard_delete_contact(input.contact_id, input.force.unwrap_or(false))
            .await;
        self.confirm(
            &format!("hard delete contact {}", input.contact_id),
            result,
            format!("Contact {} permanently deleted.", input.contact_id),
        )
    }

    #[tool(description = "Restore a soft-deleted contact by ID.")]
    async fn restore_contact(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.id, "restore_contact tool called");

        let result = self.fd_client.restore_contact(input.id).await;
        self.confirm(
            &format!("restore contact {}", input.id),
            result,
            format!("Contact {} restored.", input.id),
        )
    }

    #[tool(description = "Send the portal activation email to a contact.")]
    async fn send_invite_to_contact(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.id, "send_invite_to_contact tool called");

        let result = self.fd_client.send_invite_to_contact(input.id).await;
        self.confirm(
            &format!("send invite to contact {}", input.id),
            result,
            format!("Invitation sent to contact {}.", input.id),
        )
    }

    #[tool(description = "Convert a contact into an agent. Requires ticket_scope (1=Global, 2=Group, 3=Restricted).")]
    async fn make_agent_from_contact(
        &self,
        Parameters(input): Parameters<MakeAgentInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = input.contact_id, "make_agent_from_contact tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self
            .fd_client
            .make_agent_from_contact(input.contact_id, &body)
            .await;
        self.respond(&format!("make agent from contact {}", input.contact_id), result)
    }

    #[tool(description = "List contact field definitions.")]
    async fn list_contact_fields(&self) -> Result<String, String> {
        tracing::debug!("list_contact_fields tool called");

        self.respond("list contact fields", self.fd_client.list_contact_fields().await)
    }

    #[tool(description = "Get a contact field definition by ID.")]
    async fn view_contact_field(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "view_contact_field tool called");

        let result = self.fd_client.get_contact_field(input.id).await;
        self.respond(&format!("get contact field {}", input.id), result)
    }

    #[tool(description = "Create a custom contact field. Requires label, label_for_customers and type (custom_text, custom_paragraph, custom_checkbox, custom_number, custom_dropdown, custom_phone_number, custom_url or custom_date).")]
    async fn create_contact_field(
        &self,
        Parameters(input): Parameters<CreateFieldInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(label = %input.label, "create_contact_field tool called");

        let body = input
            .to_request_body(CustomFieldKind::Contact)
            .map_err(|e| e.to_string())?;
        self.respond("create contact field", self.fd_client.create_contact_field(&body).await)
    }

    #[tool(description = "Update a contact field definition. fields holds the properties to change.")]
    async fn update_contact_field(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "update_contact_field tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_contact_field(input.id, &body).await;
        self.respond(&format!("update contact field {}", input.id), result)
    }

    #[tool(description = "Delete a custom contact field by ID.")]
    async fn delete_contact_field(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "delete_contact_field tool called");

        let result = self.fd_client.delete_contact_field(input.id).await;
        self.confirm(
            &format!("delete contact field {}", input.id),
            result,
            format!("Contact field {} deleted.", input.id),
        )
    }

    // ========================================================================
    // Agents and groups
    // ========================================================================

    #[tool(description = "List agents. Supports page and per_page.")]
    async fn list_agents(
        &self,
        Parameters(input): Parameters<PageInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "list_agents tool called");

        let params = input.page_params().map_err(|e| e.to_string())?;
        let page = self
            .fd_client
            .list_agents(params)
            .await
            .map_err(|e| self.failure("list agents", &e))?;

        to_pretty_json(&page)
    }

    #[tool(description = "Get an agent by ID.")]
    async fn get_agent(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(agent_id = input.id, "get_agent tool called");

        let agent = self
            .fd_client
            .get_agent(input.id)
            .await
            .map_err(|e| self.failure(&format!("get agent {}", input.id), &e))?;

        to_pretty_json(&agent)
    }

    #[tool(description = "Find agents whose name or email starts with the given term. Use the ID as responder_id when assigning tickets.")]
    async fn search_agents(
        &self,
        Parameters(input): Parameters<SearchTermInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(term = %input.term, "search_agents tool called");

        input.validate().map_err(|e| e.to_string())?;
        let agents = self
            .fd_client
            .search_agents(&input.term)
            .await
            .map_err(|e| self.failure("search agents", &e))?;

        to_pretty_json(&agents)
    }

    #[tool(description = "List agent groups. Supports page and per_page.")]
    async fn list_groups(
        &self,
        Parameters(input): Parameters<PageInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "list_groups tool called");

        let params = input.page_params().map_err(|e| e.to_string())?;
        let page = self
            .fd_client
            .list_groups(params)
            .await
            .map_err(|e| self.failure("list groups", &e))?;

        to_pretty_json(&page)
    }

    #[tool(description = "Get an agent group by ID.")]
    async fn view_group(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(group_id = input.id, "view_group tool called");

        let group = self
            .fd_client
            .get_group(input.id)
            .await
            .map_err(|e| self.failure(&format!("get group {}", input.id), &e))?;

        to_pretty_json(&group)
    }

    #[tool(description = "Create an agent. Requires email and ticket_scope (1=Global, 2=Group, 3=Restricted).")]
    async fn create_agent(
        &self,
        Parameters(input): Parameters<CreateAgentInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!("create_agent tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        self.respond("create agent", self.fd_client.create_agent(&body).await)
    }

    #[tool(description = "Update an agent. fields holds the fields to change (e.g. ticket_scope, group_ids).")]
    async fn update_agent(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(agent_id = input.id, "update_agent tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_agent(input.id, &body).await;
        self.respond(&format!("update agent {}", input.id), result)
    }

    #[tool(description = "Delete an agent by ID. The agent is downgraded to a contact.")]
    async fn delete_agent(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(agent_id = input.id, "delete_agent tool called");

        let result = self.fd_client.delete_agent(input.id).await;
        self.confirm(
            &format!("delete agent {}", input.id),
            result,
            format!("Agent {} deleted and downgraded to a contact.", input.id),
        )
    }

    #[tool(description = "Create an agent group. Requires name; unassigned_for is one of 30m, 1h, 2h, 4h, 8h, 12h, 1d, 2d, 3d.")]
    async fn create_group(
        &self,
        Parameters(input): Parameters<CreateGroupInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_group tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        self.respond("create group", self.fd_client.create_group(&body).await)
    }

    #[tool(description = "Update an agent group. fields holds the fields to change.")]
    async fn update_group(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(group_id = input.id, "update_group tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_group(input.id, &body).await;
        self.respond(&format!("update group {}", input.id), result)
    }

    // ========================================================================
    // Roles and products
    // ========================================================================

    #[tool(description = "List agent roles.")]
    async fn list_roles(&self) -> Result<String, String> {
        tracing::debug!("list_roles tool called");

        self.respond("list roles", self.fd_client.list_roles().await)
    }

    #[tool(description = "Get a role by ID.")]
    async fn view_role(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(role_id = input.id, "view_role tool called");

        let result = self.fd_client.get_role(input.id).await;
        self.respond(&format!("get role {}", input.id), result)
    }

    #[tool(description = "List products.")]
    async fn list_products(&self) -> Result<String, String> {
        tracing::debug!("list_products tool called");

        self.respond("list products", self.fd_client.list_products().await)
    }

    #[tool(description = "Get a product by ID.")]
    async fn view_product(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(product_id = input.id, "view_product tool called");

        let result = self.fd_client.get_product(input.id).await;
        self.respond(&format!("get product {}", input.id), result)
    }

    // ========================================================================
    // Companies
    // ========================================================================

    #[tool(description = "List companies. Supports page and per_page.")]
    async fn list_companies(
        &self,
        Parameters(input): Parameters<PageInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "list_companies tool called");

        let params = input.page_params().map_err(|e| e.to_string())?;
        let page = self
            .fd_client
            .list_companies(params)
            .await
            .map_err(|e| self.failure("list companies", &e))?;

        to_pretty_json(&page)
    }

    #[tool(description = "Get a company by ID.")]
    async fn view_company(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(company_id = input.id, "view_company tool called");

        let company = self
            .fd_client
            .get_company(input.id)
            .await
            .map_err(|e| self.failure(&format!("get company {}", input.id), &e))?;

        to_pretty_json(&company)
    }

    #[tool(description = "Find companies whose name starts with the given term.")]
    async fn search_companies(
        &self,
        Parameters(input): Parameters<SearchTermInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(term = %input.term, "search_companies tool called");

        input.validate().map_err(|e| e.to_string())?;
        let matches = self
            .fd_client
            .search_companies(&input.term)
            .await
            .map_err(|e| self.failure("search companies", &e))?;

        to_pretty_json(&matches)
    }

    #[tool(description = "List company field definitions.")]
    async fn list_company_fields(&self) -> Result<String, String> {
        tracing::debug!("list_company_fields tool called");

        let fields = self
            .fd_client
            .list_company_fields()
            .await
            .map_err(|e| self.failure("list company fields", &e))?;

        to_pretty_json(&fields)
    }

    #[tool(description = "Create a company. Requires a unique name; domains, industry, account_tier and custom_fields are optional.")]
    async fn create_company(
        &self,
        Parameters(input): Parameters<CreateCompanyInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_company tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        self.respond("create company", self.fd_client.create_company(&body).await)
    }

    #[tool(description = "Delete a company by ID. Its contacts are kept.")]
    async fn delete_company(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(company_id = input.id, "delete_company tool called");

        let result = self.fd_client.delete_company(input.id).await;
        self.confirm(
            &format!("delete company {}", input.id),
            result,
            format!("Company {} deleted.", input.id),
        )
    }

    #[tool(description = "Find the company with exactly this name (case-insensitive). Use search_companies for prefix matches.")]
    async fn find_company_by_name(
        &self,
        Parameters(input): Parameters<NameInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "find_company_by_name tool called");

        input.validate().map_err(|e| e.to_string())?;
        let company = self
            .fd_client
            .find_company_by_name(&input.name)
            .await
            .map_err(|e| self.failure("find company", &e))?;

        match company {
            Some(company) => to_pretty_json(&company),
            None => Ok(format!("No company named '{}'.", input.name)),
        }
    }

    #[tool(description = "Create a custom company field. Requires label and type (custom_text, custom_paragraph, custom_number, custom_date, custom_checkbox, custom_dropdown or custom_url).")]
    async fn create_company_field(
        &self,
        Parameters(input): Parameters<CreateFieldInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(label = %input.label, "create_company_field tool called");

        let body = input
            .to_request_body(CustomFieldKind::Company)
            .map_err(|e| e.to_string())?;
        self.respond("create company field", self.fd_client.create_company_field(&body).await)
    }

    #[tool(description = "Get a company field definition by ID.")]
    async fn view_company_field(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "view_company_field tool called");

        let result = self.fd_client.get_company_field(input.id).await;
        self.respond(&format!("get company field {}", input.id), result)
    }

    #[tool(description = "Update a company field definition. fields holds the properties to change.")]
    async fn update_company_field(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "update_company_field tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_company_field(input.id, &body).await;
        self.respond(&format!("update company field {}", input.id), result)
    }

    #[tool(description = "Delete a custom company field by ID.")]
    async fn delete_company_field(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(field_id = input.id, "delete_company_field tool called");

        let result = self.fd_client.delete_company_field(input.id).await;
        self.confirm(
            &format!("delete company field {}", input.id),
            result,
            format!("Company field {} deleted.", input.id),
        )
    }

    // ========================================================================
    // Canned responses and solutions
    // ========================================================================

    #[tool(description = "List canned response folders.")]
    async fn list_canned_response_folders(&self) -> Result<String, String> {
        tracing::debug!("list_canned_response_folders tool called");

        let folders = self
            .fd_client
            .list_canned_response_folders()
            .await
            .map_err(|e| self.failure("list canned response folders", &e))?;

        to_pretty_json(&folders)
    }

    #[tool(description = "List the canned responses in a folder (id = folder ID).")]
    async fn list_canned_responses(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(folder_id = input.id, "list_canned_responses tool called");

        let responses = self
            .fd_client
            .list_canned_responses(input.id)
            .await
            .map_err(|e| self.failure(&format!("list canned responses in folder {}", input.id), &e))?;

        to_pretty_json(&responses)
    }

    #[tool(description = "Get a canned response by ID.")]
    async fn view_canned_response(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(response_id = input.id, "view_canned_response tool called");

        let response = self
            .fd_client
            .get_canned_response(input.id)
            .await
            .map_err(|e| self.failure(&format!("get canned response {}", input.id), &e))?;

        to_pretty_json(&response)
    }

    #[tool(description = "Create a canned response. Requires title, content_html, folder_id and visibility (0=All agents, 1=Personal, 2=Select groups, which needs group_ids).")]
    async fn create_canned_response(
        &self,
        Parameters(input): Parameters<CreateCannedResponseInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(title = %input.title, "create_canned_response tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        self.respond("create canned response", self.fd_client.create_canned_response(&body).await)
    }

    #[tool(description = "Update a canned response. fields holds the fields to change.")]
    async fn update_canned_response(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(response_id = input.id, "update_canned_response tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_canned_response(input.id, &body).await;
        self.respond(&format!("update canned response {}", input.id), result)
    }

    #[tool(description = "Create a canned response folder.")]
    async fn create_canned_response_folder(
        &self,
        Parameters(input): Parameters<NameInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_canned_response_folder tool called");

        input.validate().map_err(|e| e.to_string())?;
        let result = self.fd_client.create_canned_response_folder(&input.name).await;
        self.respond("create canned response folder", result)
    }

    #[tool(description = "Rename a canned response folder.")]
    async fn update_canned_response_folder(
        &self,
        Parameters(input): Parameters<RenameFolderInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(folder_id = input.folder_id, "update_canned_response_folder tool called");

        input.validate().map_err(|e| e.to_string())?;
        let result = self
            .fd_client
            .update_canned_response_folder(input.folder_id, &input.name)
            .await;
        self.respond(&format!("update canned response folder {}", input.folder_id), result)
    }

    #[tool(description = "List knowledge base (solution) categories.")]
    async fn list_solution_categories(&self) -> Result<String, String> {
        tracing::debug!("list_solution_categories tool called");

        let categories = self
            .fd_client
            .list_solution_categories()
            .await
            .map_err(|e| self.failure("list solution categories", &e))?;

        to_pretty_json(&categories)
    }

    #[tool(description = "List the folders in a solution category (id = category ID).")]
    async fn list_solution_folders(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(category_id = input.id, "list_solution_folders tool called");

        let folders = self
            .fd_client
            .list_solution_folders(input.id)
            .await
            .map_err(|e| self.failure(&format!("list folders in category {}", input.id), &e))?;

        to_pretty_json(&folders)
    }

    #[tool(description = "List the articles in a solution folder (id = folder ID).")]
    async fn list_solution_articles(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(folder_id = input.id, "list_solution_articles tool called");

        let articles = self
            .fd_client
            .list_solution_articles(input.id)
            .await
            .map_err(|e| self.failure(&format!("list articles in folder {}", input.id), &e))?;

        to_pretty_json(&articles)
    }

    #[tool(description = "Get a solution article by ID.")]
    async fn view_solution_article(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(article_id = input.id, "view_solution_article tool called");

        let article = self
            .fd_client
            .get_solution_article(input.id)
            .await
            .map_err(|e| self.failure(&format!("get solution article {}", input.id), &e))?;

        to_pretty_json(&article)
    }

    #[tool(description = "Get a solution category by ID.")]
    async fn view_solution_category(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(category_id = input.id, "view_solution_category tool called");

        let result = self.fd_client.get_solution_category(input.id).await;
        self.respond(&format!("get solution category {}", input.id), result)
    }

    #[tool(description = "Create a solution category. Requires name.")]
    async fn create_solution_category(
        &self,
        Parameters(input): Parameters<CreateSolutionCategoryInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_solution_category tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        self.respond(
            "create solution category",
            self.fd_client.create_solution_category(&body).await,
        )
    }

    #[tool(description = "Update a solution category. fields holds the fields to change.")]
    async fn update_solution_category(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(category_id = input.id, "update_solution_category tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_solution_category(input.id, &body).await;
        self.respond(&format!("update solution category {}", input.id), result)
    }

    #[tool(description = "Create a folder in a solution category. Requires name and visibility (1=All users, 2=Logged-in users, 3=Agents, 4=Selected companies, which needs company_ids).")]
    async fn create_solution_category_folder(
        &self,
        Parameters(input): Parameters<CreateSolutionFolderInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(category_id = input.category_id, "create_solution_category_folder tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self
            .fd_client
            .create_solution_folder(input.category_id, &body)
            .await;
        self.respond(
            &format!("create folder in category {}", input.category_id),
            result,
        )
    }

    #[tool(description = "Get a solution folder by ID.")]
    async fn view_solution_category_folder(
        &self,
        Parameters(input): Parameters<IdInput>,
    ) -> Result<String, String> {
        tracing::debug!(folder_id = input.id, "view_solution_category_folder tool called");

        let result = self.fd_client.get_solution_folder(input.id).await;
        self.respond(&format!("get solution folder {}", input.id), result)
    }

    #[tool(description = "Update a solution folder. fields holds the fields to change.")]
    async fn update_solution_category_folder(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(folder_id = input.id, "update_solution_category_folder tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_solution_folder(input.id, &body).await;
        self.respond(&format!("update solution folder {}", input.id), result)
    }

    #[tool(description = "Create a solution article in a folder. Requires title and description; status is 1=Draft (default) or 2=Published.")]
    async fn create_solution_article(
        &self,
        Parameters(input): Parameters<CreateSolutionArticleInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(folder_id = input.folder_id, title = %input.title, "create_solution_article tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self
            .fd_client
            .create_solution_article(input.folder_id, &body)
            .await;
        self.respond(&format!("create article in folder {}", input.folder_id), result)
    }

    #[tool(description = "Update a solution article. fields holds the fields to change.")]
    async fn update_solution_article(
        &self,
        Parameters(input): Parameters<UpdateRecordInput>,
    ) -> Result<String, String> {
        tracing::debug!(article_id = input.id, "update_solution_article tool called");

        let body = input.to_request_body().map_err(|e| e.to_string())?;
        let result = self.fd_client.update_solution_article(input.id, &body).await;
        self.respond(&format!("update solution article {}", input.id), result)
    }

    /// Pretty-prints a client result, or reports the failure.
    fn respond<T: Serialize>(
        &self,
        action: &str,
        result: Result<T, FreshdeskError>,
    ) -> Result<String, String> {
        let value = result.map_err(|e| self.failure(action, &e))?;
        to_pretty_json(&value)
    }

    /// Returns `done` for a completed bodyless action, or reports the failure.
    fn confirm(
        &self,
        action: &str,
        result: Result<(), FreshdeskError>,
        done: String,
    ) -> Result<String, String> {
        result.map_err(|e| self.failure(action, &e))?;
        Ok(done)
    }

    /// Sanitizes and logs a client error, returning the message for the caller.
    fn failure(&self, action: &str, error: &FreshdeskError) -> String {
        let sanitized = error.sanitized_display(self.fd_client.api_key_for_sanitization());
        if error.is_validation() {
            tracing::warn!(error = %sanitized, action, "Rejected invalid input");
        } else {
            tracing::error!(error = %sanitized, action, "Freshdesk request failed");
        }

        if error.is_rate_limit() {
            return format!("Failed to {}: {} Try again later.", action, sanitized);
        }
        format!("Failed to {}: {}", action, sanitized)
    }
}

#[tool_handler]
impl ServerHandler for FreshdeskServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Freshdesk MCP gives access to Freshdesk tickets, conversations, contacts, \
                 agents, groups, roles, products, companies, custom fields, canned \
                 responses and solution articles. \
                 To search tickets, build a query with build_search_query or \
                 build_complex_search_query and pass it to search_tickets; free text \
                 is also accepted. Use get_field_properties to look up valid values for \
                 a field. Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Response formatting helpers
// ============================================================================

/// Maximum length for description fields before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length for a single conversation entry.
const MAX_CONVERSATION_LENGTH: usize = 1000;

/// Serializes a value as pretty-printed JSON.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to format response: {}", e))
}

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }

    // Leave room for "... [truncated]" and stay on a char boundary
    let mut end = max_length.saturating_sub(15);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    if let Some(space_pos) = text[..end].rfind(char::is_whitespace) {
        end = space_pos;
    }
    format!("{}... [truncated]", &text[..end])
}

/// Appends the one-line-per-ticket listing shared by list and search output.
fn push_ticket_lines(output: &mut String, tickets: &[Ticket]) {
    for ticket in tickets {
        output.push_str(&format!("#{} - {}\n", ticket.id, ticket.display_subject()));
        output.push_str(&format!(
            "   Status: {} | Priority: {} | Assignee: {}\n",
            ticket.display_status(),
            ticket.display_priority(),
            ticket.display_responder()
        ));
        if let Some(created) = &ticket.created_at {
            output.push_str(&format!("   Created: {}\n", created));
        }
        output.push('\n');
    }
}

/// Formats one page of tickets as human-readable text.
pub fn format_ticket_page(page: &Page<Ticket>) -> String {
    if page.items.is_empty() {
        return format!("No tickets found on page {}.", page.current_page);
    }

    let mut output = format!(
        "Page {} ({} ticket(s)):\n\n",
        page.current_page,
        page.items.len()
    );
    push_ticket_lines(&mut output, &page.items);

    if let Some(next) = page.pagination.next {
        output.push_str(&format!("More tickets available: request page={}\n", next));
    }

    output
}

/// Formats ticket search results as human-readable text.
pub fn format_search_results(results: &SearchResults<Ticket>) -> String {
    if results.results.is_empty() {
        return "No tickets found matching the query.".to_string();
    }

    let mut output = format!(
        "Found {} ticket(s), showing {}:\n\n",
        results.total,
        results.results.len()
    );
    push_ticket_lines(&mut output, &results.results);
    output
}

/// Formats full ticket details as human-readable text.
pub fn format_ticket_details(ticket: &Ticket, web_url: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Ticket #{}: {}\n",
        ticket.id,
        ticket.display_subject()
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output.push_str(&format!("\nStatus: {}\n", ticket.display_status()));
    output.push_str(&format!("Priority: {}\n", ticket.display_priority()));
    if let Some(ticket_type) = &ticket.ticket_type {
        output.push_str(&format!("Type: {}\n", ticket_type));
    }

    if let Some(requester) = ticket.requester_id {
        output.push_str(&format!("\nRequester: contact {}\n", requester));
    }
    output.push_str(&format!("Assigned to: {}\n", ticket.display_responder()));
    if let Some(group) = ticket.group_id {
        output.push_str(&format!("Group: {}\n", group));
    }
    if let Some(company) = ticket.company_id {
        output.push_str(&format!("Company: {}\n", company));
    }
    if !ticket.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", ticket.tags.join(", ")));
    }

    output.push_str("\n--- Timestamps ---\n");
    if let Some(created) = &ticket.created_at {
        output.push_str(&format!("Created: {}\n", created));
    }
    if let Some(updated) = &ticket.updated_at {
        output.push_str(&format!("Last Updated: {}\n", updated));
    }
    if let Some(fr_due) = &ticket.fr_due_by {
        output.push_str(&format!("First Response Due: {}\n", fr_due));
    }
    if let Some(due) = &ticket.due_by {
        output.push_str(&format!("Due By: {}\n", due));
    }

    let description = ticket
        .description_text
        .as_deref()
        .or(ticket.description.as_deref());
    if let Some(description) = description {
        output.push_str("\n--- Description ---\n");
        output.push_str(&truncate_text(description, MAX_DESCRIPTION_LENGTH));
        output.push('\n');
    }

    if !ticket.custom_fields.is_empty() {
        output.push_str("\n--- Custom Fields ---\n");
        for (name, value) in &ticket.custom_fields {
            if !value.is_null() {
                output.push_str(&format!("{}: {}\n", name, value));
            }
        }
    }

    output.push_str(&format!("\nOpen in Freshdesk: {}\n", web_url));
    output
}

/// Formats the result of a create or update.
fn format_ticket_change(action: &str, ticket: &Ticket) -> String {
    let mut output = format!(
        "Successfully {} ticket #{}: {}\n\n",
        action,
        ticket.id,
        ticket.display_subject()
    );

    output.push_str(&format!("Status: {}\n", ticket.display_status()));
    output.push_str(&format!("Priority: {}\n", ticket.display_priority()));
    output.push_str(&format!("Assigned to: {}\n", ticket.display_responder()));

    if let Some(updated) = &ticket.updated_at {
        output.push_str(&format!("Last updated: {}\n", updated));
    }

    output
}

/// Formats a ticket's conversation thread.
pub fn format_conversations(ticket_id: u64, conversations: &[Conversation]) -> String {
    if conversations.is_empty() {
        return format!("Ticket #{} has no replies or notes.", ticket_id);
    }

    let mut output = format!(
        "Ticket #{} has {} conversation(s):\n\n",
        ticket_id,
        conversations.len()
    );

    for conversation in conversations {
        output.push_str(&format!(
            "[{}] #{}",
            conversation.direction(),
            conversation.id
        ));
        if let Some(created) = &conversation.created_at {
            output.push_str(&format!(" at {}", created));
        }
        if let Some(from) = &conversation.from_email {
            output.push_str(&format!(" from {}", from));
        }
        output.push('\n');
        output.push_str(&truncate_text(
            conversation.display_content(),
            MAX_CONVERSATION_LENGTH,
        ));
        output.push_str("\n\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Pagination;
    use serde_json::json;

    fn test_config() -> Config {
        Config::new("test.freshdesk.com", "test_key_12345").expect("valid test config")
    }

    fn test_server() -> FreshdeskServer {
        let client = FreshdeskClient::new(&test_config()).expect("Failed to create test client");
        FreshdeskServer::new(client)
    }

    fn test_ticket() -> Ticket {
        serde_json::from_value(json!({
            "id": 123,
            "subject": "Printer on fire",
            "description_text": "Smoke everywhere",
            "status": 2,
            "priority": 4,
            "responder_id": 77,
            "tags": ["hardware", "urgent"],
            "created_at": "2026-02-06T10:00:00Z",
            "custom_fields": {"cf_floor": "3", "cf_unused": null}
        }))
        .expect("valid ticket")
    }

    // ========================================================================
    // Truncation tests
    // ========================================================================

    #[test]
    fn test_truncate_text_short_text() {
        assert_eq!(truncate_text("Short text", 100), "Short text");
    }

    #[test]
    fn test_truncate_text_long_text() {
        let text = "word ".repeat(500);
        let result = truncate_text(&text, 100);
        assert!(result.len() <= 100);
        assert!(result.ends_with("... [truncated]"));
    }

    #[test]
    fn test_truncate_text_multibyte() {
        let text = "é".repeat(100);
        let result = truncate_text(&text, 51);
        assert!(result.ends_with("... [truncated]"));
    }

    // ========================================================================
    // Server tests
    // ========================================================================

    #[test]
    fn test_server_info_has_tools_capability() {
        let info = test_server().get_info();
        assert!(info.instructions.is_some());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_ping_tool_returns_pong() {
        assert_eq!(test_server().ping(), "pong");
    }

    #[test]
    fn test_build_search_query_tool() {
        let input: BuildSearchQueryInput = serde_json::from_value(json!({
            "conditions": [
                {"field": "status", "value": 2},
                {"field": "created_at", "value": "2026-01-01", "operator": ">="}
            ],
            "operator": "AND"
        }))
        .unwrap();

        let result = test_server().build_search_query(Parameters(input));
        assert_eq!(
            result.unwrap(),
            "(status:2 AND created_at:>'2026-01-01')"
        );
    }

    #[test]
    fn test_build_search_query_tool_rejects_unknown_field() {
        let input: BuildSearchQueryInput = serde_json::from_value(json!({
            "conditions": [{"field": "subject", "value": "x"}]
        }))
        .unwrap();

        let err = test_server().build_search_query(Parameters(input)).unwrap_err();
        assert!(err.contains("subject"));
    }

    #[test]
    fn test_build_complex_search_query_tool() {
        let input: BuildComplexSearchQueryInput = serde_json::from_value(json!({
            "groups": [
                {"conditions": [
                    {"field": "priority", "value": 3},
                    {"field": "priority", "value": 4}
                ], "operator": "OR"},
                {"conditions": []},
                {"conditions": [{"field": "status", "value": 2}]}
            ],
            "operator": "AND"
        }))
        .unwrap();

        let result = test_server().build_complex_search_query(Parameters(input));
        assert_eq!(result.unwrap(), "((priority:3 OR priority:4) AND status:2)");
    }

    #[test]
    fn test_search_tickets_rejects_blank_query() {
        let input = SearchTicketsInput {
            query: "   ".to_string(),
        };
        let result = tokio_test::block_on(test_server().search_tickets(Parameters(input)));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_ticket_requires_fields() {
        let input = UpdateTicketInput {
            ticket_id: 1,
            ticket_fields: serde_json::Map::new(),
        };
        let result = tokio_test::block_on(test_server().update_ticket(Parameters(input)));
        assert!(result
            .unwrap_err()
            .contains("at least one field must be provided"));
    }

    #[test]
    fn test_create_agent_rejects_bad_scope() {
        let input: CreateAgentInput =
            serde_json::from_value(json!({"email": "grace@example.com", "ticket_scope": 7})).unwrap();
        let err = tokio_test::block_on(test_server().create_agent(Parameters(input))).unwrap_err();
        assert!(err.contains("ticket_scope"));
    }

    #[test]
    fn test_update_group_requires_fields() {
        let input = UpdateRecordInput {
            id: 3,
            fields: serde_json::Map::new(),
        };
        let err = tokio_test::block_on(test_server().update_group(Parameters(input))).unwrap_err();
        assert!(err.contains("no fields provided"));
    }

    #[test]
    fn test_find_company_by_name_rejects_blank_name() {
        let input = NameInput {
            name: "  ".to_string(),
        };
        let result = tokio_test::block_on(test_server().find_company_by_name(Parameters(input)));
        assert!(result.is_err());
    }

    async fn server_for(mock: &wiremock::MockServer) -> FreshdeskServer {
        let config = Config::new(mock.uri(), "test_key_12345").unwrap();
        FreshdeskServer::new(FreshdeskClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_delete_contact_confirms() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/contacts/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock)
            .await;

        let server = server_for(&mock).await;
        let result = server.delete_contact(Parameters(IdInput { id: 9 })).await;
        assert_eq!(result.unwrap(), "Contact 9 deleted.");
    }

    #[tokio::test]
    async fn test_find_company_by_name_reports_no_match() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/companies/autocomplete"))
            .and(query_param("name", "Initech"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"companies": [{"id": 2, "name": "Initech Labs"}]})),
            )
            .mount(&mock)
            .await;

        let server = server_for(&mock).await;
        let input = NameInput {
            name: " Initech ".to_string(),
        };
        let result = server.find_company_by_name(Parameters(input)).await;
        assert_eq!(result.unwrap(), "No company named 'Initech'.");
    }

    #[tokio::test]
    async fn test_missing_role_reports_not_found() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/roles/77"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock)
            .await;

        let server = server_for(&mock).await;
        let err = server.view_role(Parameters(IdInput { id: 77 })).await.unwrap_err();
        assert_eq!(err, "Failed to get role 77: role 77 not found");
    }

    // ========================================================================
    // Formatting tests
    // ========================================================================

    #[test]
    fn test_format_ticket_page_empty() {
        let page: Page<Ticket> = Page {
            items: vec![],
            current_page: 3,
            per_page: 30,
            pagination: Pagination::default(),
        };
        assert_eq!(format_ticket_page(&page), "No tickets found on page 3.");
    }

    #[test]
    fn test_format_ticket_page_with_next() {
        let page = Page {
            items: vec![test_ticket()],
            current_page: 1,
            per_page: 30,
            pagination: Pagination {
                next: Some(2),
                prev: None,
            },
        };
        let result = format_ticket_page(&page);
        assert!(result.contains("#123 - Printer on fire"));
        assert!(result.contains("Status: Open"));
        assert!(result.contains("Priority: Urgent"));
        assert!(result.contains("agent 77"));
        assert!(result.contains("page=2"));
    }

    #[test]
    fn test_format_search_results() {
        let results = SearchResults {
            results: vec![test_ticket()],
            total: 42,
        };
        let result = format_search_results(&results);
        assert!(result.starts_with("Found 42 ticket(s), showing 1"));

        let empty: SearchResults<Ticket> = SearchResults {
            results: vec![],
            total: 0,
        };
        assert_eq!(
            format_search_results(&empty),
            "No tickets found matching the query."
        );
    }

    #[test]
    fn test_format_ticket_details() {
        let result = format_ticket_details(
            &test_ticket(),
            "https://test.freshdesk.com/a/tickets/123",
        );
        assert!(result.contains("Ticket #123: Printer on fire"));
        assert!(result.contains("Tags: hardware, urgent"));
        assert!(result.contains("Smoke everywhere"));
        assert!(result.contains("cf_floor: \"3\""));
        assert!(!result.contains("cf_unused"));
        assert!(result.contains("https://test.freshdesk.com/a/tickets/123"));
    }

    #[test]
    fn test_format_conversations() {
        let conversations: Vec<Conversation> = serde_json::from_value(json!([
            {"id": 1, "body_text": "Have you tried turning it off?", "incoming": false, "private": false},
            {"id": 2, "body_text": "Escalating", "private": true}
        ]))
        .unwrap();

        let result = format_conversations(123, &conversations);
        assert!(result.contains("2 conversation(s)"));
        assert!(result.contains("[Outgoing] #1"));
        assert!(result.contains("[Private note] #2"));

        assert_eq!(
            format_conversations(5, &[]),
            "Ticket #5 has no replies or notes."
        );
    }
}

//! HTTP client for the Freshdesk v2 API.
//!
//! This module provides the `FreshdeskClient` struct for making authenticated
//! requests to `https://{domain}/api/v2`.
//!
//! Every method issues exactly one HTTP request. Transient failures are
//! reported to the caller, not retried.
//!
//! # Security
//!
//! The API key is never logged. All error messages are sanitized before logging.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::FreshdeskError;
use crate::models::{
    Agent, AgentMatch, Company, CompanyMatch, CompanyMatches, Contact, Conversation,
    ConversationBody, Group, Page, PageParams, Pagination, SearchResults, Ticket, TicketField,
    TicketSummary,
};
use crate::query::normalize_search_query;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Basic auth password Freshdesk expects alongside an API key.
const API_KEY_PASSWORD: &str = "X";

/// Maximum length for non-JSON error bodies included in messages.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the Freshdesk API.
///
/// Handles authentication, request formatting, and response parsing
/// for all Freshdesk operations.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = FreshdeskClient::new(&config)?;
///
/// let results = client.search_tickets("status:2 AND priority:3").await?;
/// ```
#[derive(Clone)]
pub struct FreshdeskClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// API root, e.g. `https://acme.freshdesk.com/api/v2`.
    base_url: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,
}

impl FreshdeskClient {
    /// Creates a new Freshdesk client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, FreshdeskError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(FreshdeskError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.api_base_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// Returns a reference to the API key for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn api_key_for_sanitization(&self) -> &str {
        &self.api_key
    }

    /// Returns the agent portal URL for a ticket.
    pub fn ticket_web_url(&self, ticket_id: u64) -> String {
        let web_base = self.base_url.trim_end_matches("/api/v2");
        format!("{}/a/tickets/{}", web_base, ticket_id)
    }

    /// Verifies that the domain is reachable and the API key is accepted.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` describing what to check.
    pub async fn test_connection(&self) -> Result<(), FreshdeskError> {
        tracing::debug!("Testing connection to Freshdesk");

        match self.get_current_agent().await {
            Ok(agent) => {
                tracing::info!(agent_id = agent.id, "Connection test successful");
                Ok(())
            }
            Err(FreshdeskError::Authentication) => Err(FreshdeskError::invalid_config(
                "authentication failed - verify FRESHDESK_API_KEY is correct",
            )),
            Err(FreshdeskError::Timeout { duration, .. }) => {
                Err(FreshdeskError::invalid_config(format!(
                    "connection timed out after {:?} - verify FRESHDESK_DOMAIN is correct and reachable",
                    duration
                )))
            }
            Err(e) => Err(FreshdeskError::invalid_config(format!(
                "connection test failed: {}",
                e.sanitized_display(&self.api_key)
            ))),
        }
    }

    /// Builds an authenticated request for an API path.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(method = %method, path = %path, "Making Freshdesk API request");

        self.http
            .request(method, url)
            .basic_auth(&self.api_key, Some(API_KEY_PASSWORD))
    }

    /// Sends a request and turns non-success statuses into errors.
    async fn send(&self, req: RequestBuilder, operation: &str) -> Result<Response, FreshdeskError> {
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                return FreshdeskError::timeout(
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                    operation,
                );
            }
            FreshdeskError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.handle_http_error(status, response, operation).await);
        }

        Ok(response)
    }

    /// Reads and decodes a JSON response body.
    async fn decode<T>(&self, response: Response) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let body = response.text().await.map_err(FreshdeskError::Http)?;

        tracing::trace!(body = %body, "Freshdesk API response");

        serde_json::from_str(&body).map_err(FreshdeskError::Serialization)
    }

    /// Makes a GET request with optional query parameters.
    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let operation = format!("GET {}", path);
        let req = self.request(Method::GET, path).query(query);
        let response = self.send(req, &operation).await?;
        self.decode(response).await
    }

    /// Fetches one page of a list endpoint, reading pagination from the `Link` header.
    async fn get_page<T>(&self, path: &str, params: PageParams) -> Result<Page<T>, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let operation = format!("GET {}", path);
        let req = self.request(Method::GET, path).query(&params);
        let response = self.send(req, &operation).await?;

        let pagination = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(Pagination::from_link_header)
            .unwrap_or_default();

        let items: Vec<T> = self.decode(response).await?;

        Ok(Page {
            items,
            current_page: params.page,
            per_page: params.per_page,
            pagination,
        })
    }

    /// Makes a POST request with a JSON body.
    async fn post<T>(&self, path: &str, body: &impl serde::Serialize) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let operation = format!("POST {}", path);
        let req = self.request(Method::POST, path).json(body);
        let response = self.send(req, &operation).await?;
        self.decode(response).await
    }

    /// Makes a PUT request with a JSON body.
    async fn put<T>(&self, path: &str, body: &impl serde::Serialize) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let operation = format!("PUT {}", path);
        let req = self.request(Method::PUT, path).json(body);
        let response = self.send(req, &operation).await?;
        self.decode(response).await
    }

    /// Makes a DELETE request; Freshdesk answers 204 with no body.
    async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<(), FreshdeskError> {
        let operation = format!("DELETE {}", path);
        let req = self.request(Method::DELETE, path).query(query);
        self.send(req, &operation).await?;
        Ok(())
    }

    /// Makes a PUT request with no body, for actions such as restore.
    ///
    /// Any response body is ignored.
    async fn put_action(&self, path: &str) -> Result<(), FreshdeskError> {
        let operation = format!("PUT {}", path);
        let req = self.request(Method::PUT, path);
        self.send(req, &operation).await?;
        Ok(())
    }

    /// Handles HTTP-level errors and converts to FreshdeskError.
    async fn handle_http_error(
        &self,
        status: StatusCode,
        response: Response,
        operation: &str,
    ) -> FreshdeskError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.text().await.unwrap_or_default();
        // Sanitize the body to ensure no API key leakage
        let body = FreshdeskError::sanitize_message(&body, &self.api_key);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FreshdeskError::Authentication,
            StatusCode::NOT_FOUND => FreshdeskError::not_found("resource"),
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limited by Freshdesk");
                FreshdeskError::RateLimited { retry_after }
            }
            _ => {
                let details = serde_json::from_str::<Value>(&body).ok();
                let message = match (&details, body.is_empty()) {
                    (Some(_), _) | (None, true) => {
                        format!("{} failed: HTTP {}", operation, status)
                    }
                    (None, false) => {
                        let body = if body.len() > MAX_ERROR_BODY_LEN {
                            let cut = (0..=MAX_ERROR_BODY_LEN)
                                .rev()
                                .find(|i| body.is_char_boundary(*i))
                                .unwrap_or(0);
                            format!("{}...[truncated]", &body[..cut])
                        } else {
                            body
                        };
                        format!("{} failed: HTTP {}: {}", operation, status, body)
                    }
                };
                match details {
                    Some(details) => FreshdeskError::Remote {
                        status,
                        message,
                        details: Some(details),
                        query: None,
                    },
                    None => FreshdeskError::remote(status, message),
                }
            }
        }
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Lists tickets, newest first, one page at a time.
    pub async fn list_tickets(&self, params: PageParams) -> Result<Page<Ticket>, FreshdeskError> {
        self.get_page("/tickets", params).await
    }

    /// Gets a single ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::NotFound` if the ticket doesn't exist.
    pub async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, FreshdeskError> {
        let path = format!("/tickets/{}", ticket_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("ticket {}", ticket_id)))
    }

    /// Creates a ticket from a validated JSON body.
    pub async fn create_ticket(&self, body: &Value) -> Result<Ticket, FreshdeskError> {
        self.post("/tickets", body).await
    }

    /// Updates a ticket with the given fields.
    pub async fn update_ticket(&self, ticket_id: u64, body: &Value) -> Result<Ticket, FreshdeskError> {
        let path = format!("/tickets/{}", ticket_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("ticket {}", ticket_id)))
    }

    /// Deletes a ticket (moves it to trash).
    pub async fn delete_ticket(&self, ticket_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/tickets/{}", ticket_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("ticket {}", ticket_id)))
    }

    /// Searches tickets with a query string or free text.
    ///
    /// The input is normalized with [`normalize_search_query`] and sent as
    /// the single `query` parameter. A rejected search carries the exact
    /// string that was sent.
    pub async fn search_tickets(&self, query: &str) -> Result<SearchResults<Ticket>, FreshdeskError> {
        let normalized = normalize_search_query(query);

        tracing::debug!(query = %normalized, "Searching tickets");

        self.get("/search/tickets", &[("query", normalized.clone())])
            .await
            .map_err(|e| e.with_query(&normalized))
    }

    /// Lists all ticket field definitions.
    pub async fn list_ticket_fields(&self) -> Result<Vec<TicketField>, FreshdeskError> {
        self.get("/ticket_fields", &[]).await
    }

    /// Finds a ticket field by name.
    ///
    /// `type` is looked up under Freshdesk's internal name `ticket_type`.
    pub async fn get_field_properties(
        &self,
        field_name: &str,
    ) -> Result<Option<TicketField>, FreshdeskError> {
        let wanted = if field_name == "type" {
            "ticket_type"
        } else {
            field_name
        };

        let fields = self.list_ticket_fields().await?;
        Ok(fields.into_iter().find(|field| field.name == wanted))
    }

    /// Creates a custom ticket field.
    pub async fn create_ticket_field(&self, body: &Value) -> Result<Value, FreshdeskError> {
        self.post("/admin/ticket_fields", body).await
    }

    /// Gets a ticket field definition, including its choices.
    pub async fn get_ticket_field(&self, field_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/admin/ticket_fields/{}", field_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("ticket field {}", field_id)))
    }

    /// Updates a ticket field definition.
    pub async fn update_ticket_field(&self, field_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/admin/ticket_fields/{}", field_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("ticket field {}", field_id)))
    }

    /// Deletes a custom ticket field.
    pub async fn delete_ticket_field(&self, field_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/admin/ticket_fields/{}", field_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("ticket field {}", field_id)))
    }

    /// Gets the summary of a ticket.
    pub async fn get_ticket_summary(&self, ticket_id: u64) -> Result<TicketSummary, FreshdeskError> {
        let path = format!("/tickets/{}/summary", ticket_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("summary of ticket {}", ticket_id)))
    }

    /// Replaces the summary of a ticket.
    pub async fn update_ticket_summary(
        &self,
        ticket_id: u64,
        body: &str,
    ) -> Result<TicketSummary, FreshdeskError> {
        let path = format!("/tickets/{}/summary", ticket_id);
        self.put(&path, &ConversationBody::new(body)).await
    }

    /// Deletes the summary of a ticket.
    pub async fn delete_ticket_summary(&self, ticket_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/tickets/{}/summary", ticket_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("summary of ticket {}", ticket_id)))
    }

    // ========================================================================
    // Conversations
    // ========================================================================

    /// Lists replies and notes on a ticket.
    pub async fn list_conversations(&self, ticket_id: u64) -> Result<Vec<Conversation>, FreshdeskError> {
        let path = format!("/tickets/{}/conversations", ticket_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("ticket {}", ticket_id)))
    }

    /// Replies to the requester of a ticket.
    pub async fn create_reply(&self, ticket_id: u64, body: &str) -> Result<Conversation, FreshdeskError> {
        let path = format!("/tickets/{}/reply", ticket_id);
        self.post(&path, &ConversationBody::new(body)).await
    }

    /// Adds a note to a ticket.
    pub async fn create_note(
        &self,
        ticket_id: u64,
        body: &str,
        private: Option<bool>,
    ) -> Result<Conversation, FreshdeskError> {
        let path = format!("/tickets/{}/notes", ticket_id);
        let note = match private {
            Some(private) => ConversationBody::new(body).with_private(private),
            None => ConversationBody::new(body),
        };
        self.post(&path, &note).await
    }

    /// Edits the body of an existing reply or note.
    pub async fn update_conversation(
        &self,
        conversation_id: u64,
        body: &str,
    ) -> Result<Conversation, FreshdeskError> {
        let path = format!("/conversations/{}", conversation_id);
        self.put(&path, &ConversationBody::new(body))
            .await
            .map_err(|e| rename_not_found(e, format!("conversation {}", conversation_id)))
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    /// Lists contacts one page at a time.
    pub async fn list_contacts(&self, params: PageParams) -> Result<Page<Contact>, FreshdeskError> {
        self.get_page("/contacts", params).await
    }

    /// Gets a single contact.
    pub async fn get_contact(&self, contact_id: u64) -> Result<Contact, FreshdeskError> {
        let path = format!("/contacts/{}", contact_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Finds contacts whose name or email starts with `term`.
    pub async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, FreshdeskError> {
        self.get("/contacts/autocomplete", &[("term", term.to_string())])
            .await
    }

    /// Updates a contact with the given fields.
    pub async fn update_contact(&self, contact_id: u64, body: &Value) -> Result<Contact, FreshdeskError> {
        let path = format!("/contacts/{}", contact_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Creates a contact from a validated JSON body.
    pub async fn create_contact(&self, body: &Value) -> Result<Contact, FreshdeskError> {
        self.post("/contacts", body).await
    }

    /// Soft deletes a contact; it can be restored later.
    pub async fn delete_contact(&self, contact_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/contacts/{}", contact_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Permanently deletes a contact.
    ///
    /// Without `force`, Freshdesk only accepts contacts that were soft
    /// deleted first.
    pub async fn hard_delete_contact(&self, contact_id: u64, force: bool) -> Result<(), FreshdeskError> {
        let path = format!("/contacts/{}/hard_delete", contact_id);
        let query = if force {
            vec![("force", "true".to_string())]
        } else {
            Vec::new()
        };
        self.delete(&path, &query)
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Restores a soft-deleted contact.
    pub async fn restore_contact(&self, contact_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/contacts/{}/restore", contact_id);
        self.put_action(&path)
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Sends the portal activation email to a contact.
    pub async fn send_invite_to_contact(&self, contact_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/contacts/{}/send_invite", contact_id);
        self.put_action(&path)
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Converts a contact into an agent.
    pub async fn make_agent_from_contact(
        &self,
        contact_id: u64,
        body: &Value,
    ) -> Result<Agent, FreshdeskError> {
        let path = format!("/contacts/{}/make_agent", contact_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("contact {}", contact_id)))
    }

    /// Lists contact field definitions.
    pub async fn list_contact_fields(&self) -> Result<Vec<Value>, FreshdeskError> {
        self.get("/contact_fields", &[]).await
    }

    /// Gets a contact field definition.
    pub async fn get_contact_field(&self, field_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/contact_fields/{}", field_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("contact field {}", field_id)))
    }

    /// Creates a custom contact field.
    pub async fn create_contact_field(&self, body: &Value) -> Result<Value, FreshdeskError> {
        self.post("/contact_fields", body).await
    }

    /// Updates a contact field definition.
    pub async fn update_contact_field(&self, field_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/contact_fields/{}", field_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("contact field {}", field_id)))
    }

    /// Deletes a custom contact field.
    pub async fn delete_contact_field(&self, field_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/contact_fields/{}", field_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("contact field {}", field_id)))
    }

    // ========================================================================
    // Agents and groups
    // ========================================================================

    /// Lists agents one page at a time.
    pub async fn list_agents(&self, params: PageParams) -> Result<Page<Agent>, FreshdeskError> {
        self.get_page("/agents", params).await
    }

    /// Gets a single agent.
    pub async fn get_agent(&self, agent_id: u64) -> Result<Agent, FreshdeskError> {
        let path = format!("/agents/{}", agent_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("agent {}", agent_id)))
    }

    /// Gets the agent that owns the API key.
    pub async fn get_current_agent(&self) -> Result<Agent, FreshdeskError> {
        self.get("/agents/me", &[]).await
    }

    /// Finds agents whose name or email starts with `term`.
    pub async fn search_agents(&self, term: &str) -> Result<Vec<AgentMatch>, FreshdeskError> {
        self.get("/agents/autocomplete", &[("term", term.to_string())])
            .await
    }

    /// Lists groups one page at a time.
    pub async fn list_groups(&self, params: PageParams) -> Result<Page<Group>, FreshdeskError> {
        self.get_page("/groups", params).await
    }

    /// Gets a single group.
    pub async fn get_group(&self, group_id: u64) -> Result<Group, FreshdeskError> {
        let path = format!("/groups/{}", group_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("group {}", group_id)))
    }

    /// Creates an agent from a validated JSON body.
    pub async fn create_agent(&self, body: &Value) -> Result<Agent, FreshdeskError> {
        self.post("/agents", body).await
    }

    /// Updates an agent with the given fields.
    pub async fn update_agent(&self, agent_id: u64, body: &Value) -> Result<Agent, FreshdeskError> {
        let path = format!("/agents/{}", agent_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("agent {}", agent_id)))
    }

    /// Deletes an agent; Freshdesk downgrades them to a contact.
    pub async fn delete_agent(&self, agent_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/agents/{}", agent_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("agent {}", agent_id)))
    }

    /// Creates a group from a validated JSON body.
    pub async fn create_group(&self, body: &Value) -> Result<Group, FreshdeskError> {
        self.post("/groups", body).await
    }

    /// Updates a group with the given fields.
    pub async fn update_group(&self, group_id: u64, body: &Value) -> Result<Group, FreshdeskError> {
        let path = format!("/groups/{}", group_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("group {}", group_id)))
    }

    // ========================================================================
    // Roles and products
    // ========================================================================

    /// Lists agent roles.
    pub async fn list_roles(&self) -> Result<Vec<Value>, FreshdeskError> {
        self.get("/roles", &[]).await
    }

    /// Gets a single role.
    pub async fn get_role(&self, role_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/roles/{}", role_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("role {}", role_id)))
    }

    /// Lists products.
    pub async fn list_products(&self) -> Result<Vec<Value>, FreshdeskError> {
        self.get("/products", &[]).await
    }

    /// Gets a single product.
    pub async fn get_product(&self, product_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/products/{}", product_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("product {}", product_id)))
    }

    // ========================================================================
    // Companies
    // ========================================================================

    /// Lists companies one page at a time.
    pub async fn list_companies(&self, params: PageParams) -> Result<Page<Company>, FreshdeskError> {
        self.get_page("/companies", params).await
    }

    /// Gets a single company.
    pub async fn get_company(&self, company_id: u64) -> Result<Company, FreshdeskError> {
        let path = format!("/companies/{}", company_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("company {}", company_id)))
    }

    /// Finds companies whose name starts with `name`.
    pub async fn search_companies(&self, name: &str) -> Result<CompanyMatches, FreshdeskError> {
        self.get("/companies/autocomplete", &[("name", name.to_string())])
            .await
    }

    /// Lists company field definitions.
    pub async fn list_company_fields(&self) -> Result<Vec<Value>, FreshdeskError> {
        self.get("/company_fields", &[]).await
    }

    /// Creates a company from a validated JSON body.
    pub async fn create_company(&self, body: &Value) -> Result<Company, FreshdeskError> {
        self.post("/companies", body).await
    }

    /// Deletes a company. Its contacts are kept but unlinked.
    pub async fn delete_company(&self, company_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/companies/{}", company_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("company {}", company_id)))
    }

    /// Finds the company whose name matches `name`, ignoring case.
    ///
    /// Autocomplete returns prefix matches; only an exact name counts.
    pub async fn find_company_by_name(&self, name: &str) -> Result<Option<CompanyMatch>, FreshdeskError> {
        let matches = self.search_companies(name).await?;
        Ok(matches
            .companies
            .into_iter()
            .find(|company| company.name.eq_ignore_ascii_case(name)))
    }

    /// Creates a custom company field.
    pub async fn create_company_field(&self, body: &Value) -> Result<Value, FreshdeskError> {
        self.post("/company_fields", body).await
    }

    /// Gets a company field definition.
    pub async fn get_company_field(&self, field_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/company_fields/{}", field_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("company field {}", field_id)))
    }

    /// Updates a company field definition.
    pub async fn update_company_field(&self, field_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/company_fields/{}", field_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("company field {}", field_id)))
    }

    /// Deletes a custom company field.
    pub async fn delete_company_field(&self, field_id: u64) -> Result<(), FreshdeskError> {
        let path = format!("/company_fields/{}", field_id);
        self.delete(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("company field {}", field_id)))
    }

    // ========================================================================
    // Canned responses and solutions
    // ========================================================================

    /// Lists canned response folders.
    pub async fn list_canned_response_folders(&self) -> Result<Vec<Value>, FreshdeskError> {
        self.get("/canned_response_folders", &[]).await
    }

    /// Lists the canned responses in a folder.
    pub async fn list_canned_responses(&self, folder_id: u64) -> Result<Vec<Value>, FreshdeskError> {
        let path = format!("/canned_response_folders/{}/responses", folder_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("canned response folder {}", folder_id)))
    }

    /// Gets a single canned response.
    pub async fn get_canned_response(&self, response_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/canned_responses/{}", response_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("canned response {}", response_id)))
    }

    /// Creates a canned response from a validated JSON body.
    pub async fn create_canned_response(&self, body: &Value) -> Result<Value, FreshdeskError> {
        self.post("/canned_responses", body).await
    }

    /// Updates a canned response with the given fields.
    pub async fn update_canned_response(&self, response_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/canned_responses/{}", response_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("canned response {}", response_id)))
    }

    /// Creates a canned response folder.
    pub async fn create_canned_response_folder(&self, name: &str) -> Result<Value, FreshdeskError> {
        self.post("/canned_response_folders", &json!({ "name": name }))
            .await
    }

    /// Renames a canned response folder.
    pub async fn update_canned_response_folder(
        &self,
        folder_id: u64,
        name: &str,
    ) -> Result<Value, FreshdeskError> {
        let path = format!("/canned_response_folders/{}", folder_id);
        self.put(&path, &json!({ "name": name }))
            .await
            .map_err(|e| rename_not_found(e, format!("canned response folder {}", folder_id)))
    }

    /// Lists solution categories.
    pub async fn list_solution_categories(&self) -> Result<Vec<Value>, FreshdeskError> {
        self.get("/solutions/categories", &[]).await
    }

    /// Lists the folders in a solution category.
    pub async fn list_solution_folders(&self, category_id: u64) -> Result<Vec<Value>, FreshdeskError> {
        let path = format!("/solutions/categories/{}/folders", category_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("solution category {}", category_id)))
    }

    /// Lists the articles in a solution folder.
    pub async fn list_solution_articles(&self, folder_id: u64) -> Result<Vec<Value>, FreshdeskError> {
        let path = format!("/solutions/folders/{}/articles", folder_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("solution folder {}", folder_id)))
    }

    /// Gets a single solution article.
    pub async fn get_solution_article(&self, article_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/articles/{}", article_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("solution article {}", article_id)))
    }

    /// Gets a single solution category.
    pub async fn get_solution_category(&self, category_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/categories/{}", category_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("solution category {}", category_id)))
    }

    /// Creates a solution category.
    pub async fn create_solution_category(&self, body: &Value) -> Result<Value, FreshdeskError> {
        self.post("/solutions/categories", body).await
    }

    /// Updates a solution category with the given fields.
    pub async fn update_solution_category(
        &self,
        category_id: u64,
        body: &Value,
    ) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/categories/{}", category_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("solution category {}", category_id)))
    }

    /// Creates a folder in a solution category.
    pub async fn create_solution_folder(
        &self,
        category_id: u64,
        body: &Value,
    ) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/categories/{}/folders", category_id);
        self.post(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("solution category {}", category_id)))
    }

    /// Gets a single solution folder.
    pub async fn get_solution_folder(&self, folder_id: u64) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/folders/{}", folder_id);
        self.get(&path, &[])
            .await
            .map_err(|e| rename_not_found(e, format!("solution folder {}", folder_id)))
    }

    /// Updates a solution folder with the given fields.
    pub async fn update_solution_folder(&self, folder_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/folders/{}", folder_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("solution folder {}", folder_id)))
    }

    /// Creates an article in a solution folder.
    pub async fn create_solution_article(&self, folder_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/folders/{}/articles", folder_id);
        self.post(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("solution folder {}", folder_id)))
    }

    /// Updates a solution article with the given fields.
    pub async fn update_solution_article(&self, article_id: u64, body: &Value) -> Result<Value, FreshdeskError> {
        let path = format!("/solutions/articles/{}", article_id);
        self.put(&path, body)
            .await
            .map_err(|e| rename_not_found(e, format!("solution article {}", article_id)))
    }
}

/// Replaces the generic resource name of a `NotFound` error.
fn rename_not_found(err: FreshdeskError, resource: String) -> FreshdeskError {
    match err {
        FreshdeskError::NotFound { .. } => FreshdeskError::NotFound { resource },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{
        basic_auth, body_json, method, path, query_param, query_param_is_missing,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> FreshdeskClient {
        let config = Config::new(server.uri(), "test_key_12345").unwrap();
        FreshdeskClient::new(&config).unwrap()
    }

    #[test]
    fn test_ticket_web_url() {
        let config = Config::new("acme.freshdesk.com", "abc123").unwrap();
        let client = FreshdeskClient::new(&config).unwrap();
        assert_eq!(
            client.ticket_web_url(42),
            "https://acme.freshdesk.com/a/tickets/42"
        );
    }

    #[tokio::test]
    async fn test_search_tickets_sends_normalized_query_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/search/tickets"))
            .and(query_param("query", "\"status:2 AND priority:3\""))
            .and(basic_auth("test_key_12345", "X"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 7, "subject": "VPN down", "status": 2, "priority": 3}],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let results = client.search_tickets("status:2 AND priority:3").await.unwrap();
        assert_eq!(results.total, 1);
        assert_eq!(results.results[0].id, 7);
    }

    #[tokio::test]
    async fn test_search_tickets_free_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/search/tickets"))
            .and(query_param(
                "query",
                "\"(description:'payment issue' OR subject:'payment issue')\"",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"results": [], "total": 0})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let results = client.search_tickets("payment issue").await.unwrap();
        assert!(results.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_tickets_error_carries_query_and_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/search/tickets"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "description": "Validation failed",
                "errors": [{"field": "query", "message": "Invalid field", "code": "invalid_value"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.search_tickets("bogus:1").await.unwrap_err();
        assert_eq!(err.query(), Some("\"bogus:1\""));
        match err {
            FreshdeskError::Remote {
                status, details, ..
            } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(details.unwrap()["description"], "Validation failed");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_tickets_reads_link_header() {
        let server = MockServer::start().await;
        let next = format!("<{}/api/v2/tickets?page=3&per_page=10>; rel=\"next\"", server.uri());
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", next.as_str())
                    .set_body_json(json!([{"id": 1}, {"id": 2}])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client
            .list_tickets(PageParams::new(Some(2), Some(10)).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.pagination.next, Some(3));
        assert_eq!(page.pagination.prev, None);
    }

    #[tokio::test]
    async fn test_get_ticket_not_found_names_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_ticket(404).await.unwrap_err();
        assert_eq!(err.to_string(), "ticket 404 not found");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/agents/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.get_current_agent().await,
            Err(FreshdeskError::Authentication)
        ));
        assert!(client.test_connection().await.is_err());
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/groups"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.list_groups(PageParams::default()).await.unwrap_err();
        match err {
            FreshdeskError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(12)));
            }
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_note_posts_private_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/tickets/5/notes"))
            .and(body_json(json!({"body": "Checked logs", "private": true})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 99, "body": "Checked logs", "private": true, "ticket_id": 5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let note = client.create_note(5, "Checked logs", Some(true)).await.unwrap();
        assert_eq!(note.id, 99);
        assert_eq!(note.direction(), "Private note");
    }

    #[tokio::test]
    async fn test_delete_ticket_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/tickets/8"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.delete_ticket(8).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_field_properties_maps_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/ticket_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "status", "label": "Status"},
                {"id": 2, "name": "ticket_type", "label": "Type"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let field = client.get_field_properties("type").await.unwrap().unwrap();
        assert_eq!(field.id, 2);
        assert!(client.get_field_properties("cf_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_truncated_into_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/companies/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(2000)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_company(1).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("HTTP 500"));
        assert!(message.ends_with("...[truncated]"));
        assert!(message.len() < 700);
    }

    // ========================================================================
    // Record management
    // ========================================================================

    #[tokio::test]
    async fn test_hard_delete_contact_sends_force_only_when_set() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/contacts/21/hard_delete"))
            .and(query_param("force", "true"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/contacts/22/hard_delete"))
            .and(query_param_is_missing("force"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.hard_delete_contact(21, true).await.is_ok());
        assert!(client.hard_delete_contact(22, false).await.is_ok());
    }

    #[tokio::test]
    async fn test_restore_contact_not_found_names_contact() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/contacts/30/restore"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/contacts/31/restore"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.restore_contact(30).await.unwrap_err();
        assert_eq!(err.to_string(), "contact 30 not found");
        assert!(client.restore_contact(31).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_agent_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/agents"))
            .and(body_json(json!({"email": "grace@example.com", "ticket_scope": 1})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 51, "ticket_scope": 1, "contact": {"email": "grace@example.com"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let agent = client
            .create_agent(&json!({"email": "grace@example.com", "ticket_scope": 1}))
            .await
            .unwrap();
        assert_eq!(agent.id, 51);
        assert_eq!(agent.display_name(), "grace@example.com");
    }

    #[tokio::test]
    async fn test_update_group_puts_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/groups/3"))
            .and(body_json(json!({"agent_ids": [9, 10]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "name": "Billing", "agent_ids": [9, 10]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = client
            .update_group(3, &json!({"agent_ids": [9, 10]}))
            .await
            .unwrap();
        assert_eq!(group.agent_ids, vec![9, 10]);
    }

    #[tokio::test]
    async fn test_list_roles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Account Administrator", "default": true},
                {"id": 2, "name": "Supervisor", "default": true}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let roles = client.list_roles().await.unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[1]["name"], "Supervisor");
    }

    #[tokio::test]
    async fn test_create_ticket_field_uses_admin_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/admin/ticket_fields"))
            .and(body_json(json!({"label": "Region", "label_for_customers": "Region", "type": "custom_text"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 88, "name": "cf_region", "label": "Region"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let field = client
            .create_ticket_field(&json!({"label": "Region", "label_for_customers": "Region", "type": "custom_text"}))
            .await
            .unwrap();
        assert_eq!(field["name"], "cf_region");
    }

    #[tokio::test]
    async fn test_delete_contact_field_uses_plural_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/contact_fields/14"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.delete_contact_field(14).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_company_by_name_requires_exact_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/companies/autocomplete"))
            .and(query_param("name", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "companies": [{"id": 4, "name": "Acme Labs"}, {"id": 5, "name": "Acme"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/companies/autocomplete"))
            .and(query_param("name", "Globex"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"companies": null})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let found = client.find_company_by_name("acme").await.unwrap().unwrap();
        assert_eq!(found.id, 5);
        assert!(client.find_company_by_name("Globex").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_company_field_uses_plural_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v2/company_fields/7"))
            .and(body_json(json!({"label": "Tier"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "label": "Tier"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let field = client
            .update_company_field(7, &json!({"label": "Tier"}))
            .await
            .unwrap();
        assert_eq!(field["label"], "Tier");
    }

    #[tokio::test]
    async fn test_create_canned_response_folder_sends_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/canned_response_folders"))
            .and(body_json(json!({"name": "Billing"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12, "name": "Billing"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let folder = client.create_canned_response_folder("Billing").await.unwrap();
        assert_eq!(folder["id"], 12);
    }

    #[tokio::test]
    async fn test_create_solution_article_in_folder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/solutions/folders/5/articles"))
            .and(body_json(json!({"title": "Reset a password", "description": "<p>Steps</p>", "status": 1})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 300, "title": "Reset a password", "folder_id": 5, "status": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let article = client
            .create_solution_article(
                5,
                &json!({"title": "Reset a password", "description": "<p>Steps</p>", "status": 1}),
            )
            .await
            .unwrap();
        assert_eq!(article["id"], 300);
    }
}

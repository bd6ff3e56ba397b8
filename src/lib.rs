//! # freshdesk-mcp
//!
//! An MCP (Model Context Protocol) server and command-line client for the
//! Freshdesk v2 REST API.
//!
//! ## Features
//!
//! - **Search query builder**: turn structured conditions into Freshdesk's
//!   `field:value` search grammar, including nested AND/OR groups
//! - **Tickets**: list, view, create, update, delete, search, reply and annotate
//! - **Directory**: contacts, agents, groups and companies
//! - **Knowledge**: canned responses and solution articles
//! - **Security**: API keys are never logged or exposed in error messages
//!
//! ## Architecture
//!
//! - [`query`] - Condition formatting, query composition and search normalization
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with security-conscious message sanitization
//! - [`fd_client`] - HTTP client for the Freshdesk API
//! - [`server`] - MCP server implementation with tool routing
//! - [`models`] - Data models for Freshdesk API requests and responses
//! - [`tools`] - Tool input parameter structs
//!
//! ## Configuration
//!
//! - `FRESHDESK_DOMAIN`: Helpdesk domain, e.g. `acme.freshdesk.com`
//! - `FRESHDESK_API_KEY`: Agent API key (sent as the Basic auth user name)
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g., `freshdesk_mcp=debug`)
//!
//! ## Example
//!
//! Building a query and running it with the [`FreshdeskClient`](fd_client::FreshdeskClient):
//!
//! ```ignore
//! use freshdesk_mcp::config::Config;
//! use freshdesk_mcp::fd_client::FreshdeskClient;
//! use freshdesk_mcp::query::{build_search_query, BoolOperator, Condition};
//!
//! async fn example() -> Result<(), freshdesk_mcp::error::FreshdeskError> {
//!     let config = Config::from_env()?;
//!     let client = FreshdeskClient::new(&config)?;
//!
//!     let query = build_search_query(
//!         &[
//!             Condition::new("status", 2),
//!             Condition::new("priority", 3).with_operator(">="),
//!         ],
//!         BoolOperator::And,
//!     )?;
//!
//!     let found = client.search_tickets(&query).await?;
//!     for ticket in found.results {
//!         println!("#{}: {}", ticket.id, ticket.display_subject());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod fd_client;
pub mod models;
pub mod query;
pub mod server;
pub mod tools;

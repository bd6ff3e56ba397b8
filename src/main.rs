//! freshdesk-mcp - MCP server for Freshdesk
//!
//! This binary runs as an MCP server using stdio transport, exposing
//! Freshdesk tickets, contacts and knowledge base as tools.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FRESHDESK_DOMAIN`: Helpdesk domain, e.g. `acme.freshdesk.com`
//! - `FRESHDESK_API_KEY`: Agent API key
//!
//! # Usage
//!
//! ```bash
//! FRESHDESK_DOMAIN=acme.freshdesk.com FRESHDESK_API_KEY=xxx ./freshdesk-mcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use freshdesk_mcp::{config, fd_client, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("freshdesk_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Freshdesk MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!("Configuration loaded, domain: {}", config.domain);

    let fd_client =
        fd_client::FreshdeskClient::new(&config).context("Failed to create Freshdesk client")?;

    tracing::info!("Testing connection to Freshdesk...");
    if let Err(e) = fd_client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!(
            "Server will start but may not be able to reach Freshdesk. \
             Check configuration and network connectivity."
        );
    }

    let server = server::FreshdeskServer::new(fd_client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}

//! Command-line client for Freshdesk.
//!
//! Shares configuration and the HTTP client with the MCP server. Output is
//! pretty-printed JSON unless `--text` is given.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use freshdesk_mcp::config::{Config, API_KEY_VAR, DOMAIN_VAR};
use freshdesk_mcp::fd_client::FreshdeskClient;
use freshdesk_mcp::models::PageParams;
use freshdesk_mcp::server::{format_search_results, format_ticket_details};

#[derive(Parser)]
#[command(name = "freshdesk")]
#[command(about = "Query and update a Freshdesk helpdesk from the shell")]
#[command(version)]
struct Cli {
    /// Print plain text instead of JSON
    #[arg(long, global = true)]
    text: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that FRESHDESK_DOMAIN and FRESHDESK_API_KEY are set
    ValidateEnv,
    /// Ticket operations
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },
    /// Company operations
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// Show one ticket
    Get { id: u64 },
    /// Search tickets with a query (e.g. "status:2 AND priority:3") or free text
    Search { query: String },
    /// Delete a ticket
    Delete { id: u64 },
    /// Reply to a ticket
    Reply {
        id: u64,
        /// Reply body (HTML allowed)
        #[arg(long)]
        body: String,
    },
}

#[derive(Subcommand)]
enum CompanyAction {
    /// List companies
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show one company
    Get { id: u64 },
    /// Find companies by name prefix
    Search { name: String },
    /// List company field definitions
    Fields,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freshdesk_mcp=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ValidateEnv => Ok(handle_validate_env()),
        Commands::Tickets { action } => {
            let client = build_client()?;
            handle_tickets(&client, action, cli.text).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Companies { action } => {
            let client = build_client()?;
            handle_companies(&client, action, cli.text).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_client() -> Result<FreshdeskClient> {
    let config = Config::from_env().context("Failed to load configuration")?;
    FreshdeskClient::new(&config).context("Failed to create Freshdesk client")
}

/// Exit status of `validate-env` when a required variable is missing.
const EXIT_MISSING_ENV: u8 = 2;

fn handle_validate_env() -> ExitCode {
    let missing = Config::missing_vars();
    for var in &missing {
        eprintln!("Missing environment variable: {}", var);
    }

    let status = validate_env_status(&missing);
    if status == 0 {
        println!("{} and {} are set.", DOMAIN_VAR, API_KEY_VAR);
    }
    ExitCode::from(status)
}

fn validate_env_status(missing: &[&str]) -> u8 {
    if missing.is_empty() {
        0
    } else {
        EXIT_MISSING_ENV
    }
}

async fn handle_tickets(client: &FreshdeskClient, action: TicketAction, text: bool) -> Result<()> {
    match action {
        TicketAction::Get { id } => {
            let ticket = client.get_ticket(id).await?;
            if text {
                println!("{}", format_ticket_details(&ticket, &client.ticket_web_url(id)));
            } else {
                print_json(&ticket)?;
            }
        }
        TicketAction::Search { query } => {
            let results = client.search_tickets(&query).await.map_err(|e| {
                let sent = e.query().map(str::to_string);
                anyhow::Error::new(e).context(match sent {
                    Some(sent) => format!("Search failed for query {}", sent),
                    None => "Search failed".to_string(),
                })
            })?;
            if text {
                println!("{}", format_search_results(&results));
            } else {
                print_json(&results)?;
            }
        }
        TicketAction::Delete { id } => {
            client.delete_ticket(id).await?;
            if text {
                println!("Ticket #{} deleted.", id);
            } else {
                print_json(&serde_json::json!({"deleted": id}))?;
            }
        }
        TicketAction::Reply { id, body } => {
            anyhow::ensure!(!body.trim().is_empty(), "reply body cannot be empty");
            let reply = client.create_reply(id, &body).await?;
            if text {
                println!("Reply #{} added to ticket #{}.", reply.id, id);
            } else {
                print_json(&reply)?;
            }
        }
    }
    Ok(())
}

async fn handle_companies(
    client: &FreshdeskClient,
    action: CompanyAction,
    text: bool,
) -> Result<()> {
    match action {
        CompanyAction::List { page, per_page } => {
            let params = PageParams::new(page, per_page)?;
            let companies = client.list_companies(params).await?;
            if text {
                for company in &companies.items {
                    println!("{:<12} {}", company.id, company.name);
                }
                if let Some(next) = companies.pagination.next {
                    println!("\nMore companies available: --page {}", next);
                }
            } else {
                print_json(&companies)?;
            }
        }
        CompanyAction::Get { id } => {
            let company = client.get_company(id).await?;
            if text {
                println!("Company #{}: {}", company.id, company.name);
                if let Some(description) = &company.description {
                    println!("{}", description);
                }
                if !company.domains.is_empty() {
                    println!("Domains: {}", company.domains.join(", "));
                }
                if let Some(industry) = &company.industry {
                    println!("Industry: {}", industry);
                }
            } else {
                print_json(&company)?;
            }
        }
        CompanyAction::Search { name } => {
            let matches = client.search_companies(&name).await?;
            if text {
                if matches.companies.is_empty() {
                    println!("No companies match '{}'.", name);
                }
                for company in &matches.companies {
                    println!("{:<12} {}", company.id, company.name);
                }
            } else {
                print_json(&matches)?;
            }
        }
        CompanyAction::Fields => {
            let fields = client.list_company_fields().await?;
            if text {
                for field in &fields {
                    let name = field.get("name").and_then(|v| v.as_str()).unwrap_or("?");
                    let label = field.get("label").and_then(|v| v.as_str()).unwrap_or("");
                    println!("{:<30} {}", name, label);
                }
            } else {
                print_json(&fields)?;
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to format response")?;
    println!("{}", json);
    Ok(())
}

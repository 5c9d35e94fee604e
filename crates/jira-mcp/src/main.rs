//! jira MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use anyhow::Context;
use jira_cli::session::{HOST_ENV, Session, TOKEN_ENV};
use jira_credentials::CredentialStore;
use jira_mcp::JiraMcpServer;
use rmcp::{ServiceExt, transport::stdio};
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jira_mcp=info,jira_cli=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting jira-mcp server");

    let session = Session::resolve(
        env::var(HOST_ENV).ok(),
        env::var(TOKEN_ENV).ok(),
        CredentialStore::new,
    )
    .context("failed to resolve Jira credentials")?;
    tracing::info!(host = %session.host(), "Resolved Jira host");

    let server = JiraMcpServer::new(Arc::new(session.client()?));
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("jira-mcp server stopped");
    Ok(())
}

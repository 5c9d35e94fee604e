//! jira CLI binary.

use anyhow::Result;
use jira_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the jira CLI.
///
/// Uses tokio's current_thread runtime; every command is a short sequence of
/// HTTP requests.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=jira_cli=debug,jira_credentials=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jira_cli=info,jira_credentials=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting jira CLI");

    let cli = Cli::parse_args();
    tokio::select! {
        result = cli.execute() => result?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
    }

    tracing::debug!("jira CLI completed successfully");
    Ok(())
}

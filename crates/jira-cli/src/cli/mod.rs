//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for jira using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `configure`: Save the default host and its API token
//! - `get-issue`: Show an issue with its editable custom fields
//! - `get-comments`: Show the comments on an issue
//! - `add-comment`: Comment on an issue
//! - `update-status` (alias `transition`): Move an issue to a named status
//! - `create-issue`: Create an issue
//! - `search`: Run a JQL search
//! - `assign`: Assign or unassign an issue
//! - `add-to-sprint`: Move issues into a sprint
//! - `attach`: Upload a file to an issue
//!
//! # Global Flags
//!
//! - `--host` / `JIRA_HOST`: Jira host, overriding the configured one
//! - `--token` / `JIRA_TOKEN`: API token, overriding the stored one
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! echo "$TOKEN" | jira configure jira.example.com
//! jira get-issue -k PROJ-123
//! jira update-status -k PROJ-123 "In Progress"
//! JIRA_ISSUE_KEY=PROJ-123 jira add-comment "Fixed in #42"
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jira_credentials::CredentialStore;

use crate::output::OutputMode;
use crate::session::{HOST_ENV, Session, TOKEN_ENV};

// Re-export argument structs
pub use args::{
    AddCommentArgs, AddToSprintArgs, AssignArgs, AttachArgs, ConfigureArgs, CreateIssueArgs,
    ISSUE_KEY_ENV, KeyArgs, SearchArgs, UpdateStatusArgs,
};

// Re-export execution for callers that bring their own client
pub use execute::{
    execute_add_comment, execute_add_to_sprint, execute_assign, execute_attach,
    execute_configure, execute_create_issue, execute_get_comments, execute_get_issue,
    execute_search, execute_update_status,
};

// Re-export validators for external use
pub use validators::{
    validate_host, validate_issue_key, validate_not_blank, validate_project_key,
};

/// Jira from the command line
///
/// Read and update Jira issues. Credentials come from `--host`/`--token`,
/// the `JIRA_HOST`/`JIRA_TOKEN` environment variables, or the store written
/// by `jira configure`, in that order.
#[derive(Parser, Debug)]
#[command(name = "jira")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Jira host (e.g. "jira.example.com" or "https://example.com/jira")
    #[arg(long, global = true, env = HOST_ENV, value_parser = validate_host)]
    pub host: Option<String>,

    /// API token used as a bearer token
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Save the default host and its API token
    ///
    /// The token goes to the OS secret store, or to an owner-only file in the
    /// config directory when the secret store is unreachable.
    Configure(ConfigureArgs),

    /// Show an issue
    ///
    /// Displays status, type, people, description and the editable custom
    /// fields that have a value.
    GetIssue(KeyArgs),

    /// Show the comments on an issue
    GetComments(KeyArgs),

    /// Add a comment to an issue
    AddComment(AddCommentArgs),

    /// Move an issue to a status
    ///
    /// Picks the available workflow transition whose destination has the
    /// given name. Does nothing if the issue is already there.
    #[command(alias = "transition")]
    UpdateStatus(UpdateStatusArgs),

    /// Create an issue
    CreateIssue(CreateIssueArgs),

    /// Search issues with JQL
    Search(SearchArgs),

    /// Assign an issue, or unassign it when no user is given
    Assign(AssignArgs),

    /// Move issues into a sprint
    AddToSprint(AddToSprintArgs),

    /// Upload a file as an attachment
    Attach(AttachArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns any credential, validation or API error from the command.
    pub async fn execute(&self) -> Result<()> {
        let output_mode = self.output_mode();
        if let Commands::Configure(args) = &self.command {
            let store = CredentialStore::new()?;
            return execute::execute_configure(&store, args, self.token.as_deref(), output_mode);
        }

        let session =
            Session::resolve(self.host.clone(), self.token.clone(), CredentialStore::new)?;
        tracing::debug!(host = %session.host(), "Resolved session");
        let client = session.client()?;
        self.run(&client, session.host(), output_mode).await
    }

    /// Run a remote command against `api`.
    ///
    /// # Errors
    ///
    /// Returns any validation or API error from the command.
    pub async fn run(
        &self,
        api: &dyn crate::client::JiraApi,
        host: &str,
        output_mode: OutputMode,
    ) -> Result<()> {
        match &self.command {
            Commands::Configure(_) => {
                anyhow::bail!("configure does not talk to Jira; use Cli::execute")
            }
            Commands::GetIssue(args) => execute::execute_get_issue(api, args, output_mode).await,
            Commands::GetComments(args) => {
                execute::execute_get_comments(api, args, output_mode).await
            }
            Commands::AddComment(args) => {
                execute::execute_add_comment(api, args, output_mode).await
            }
            Commands::UpdateStatus(args) => {
                execute::execute_update_status(api, args, output_mode).await
            }
            Commands::CreateIssue(args) => {
                execute::execute_create_issue(api, host, args, output_mode).await
            }
            Commands::Search(args) => execute::execute_search(api, args, output_mode).await,
            Commands::Assign(args) => execute::execute_assign(api, args, output_mode).await,
            Commands::AddToSprint(args) => {
                execute::execute_add_to_sprint(api, args, output_mode).await
            }
            Commands::Attach(args) => execute::execute_attach(api, args, output_mode).await,
        }
    }
}

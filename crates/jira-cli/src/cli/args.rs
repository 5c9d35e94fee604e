//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::validators::{
    validate_host, validate_issue_key, validate_not_blank, validate_project_key,
};
use crate::client::DEFAULT_MAX_RESULTS;
use crate::domain::DEFAULT_ISSUE_TYPE;

/// Environment variable supplying the issue key when `--key` is omitted.
pub const ISSUE_KEY_ENV: &str = "JIRA_ISSUE_KEY";

/// Arguments for the `configure` command
#[derive(Parser, Debug, Clone)]
pub struct ConfigureArgs {
    /// Jira host to use by default (e.g. "jira.example.com")
    ///
    /// The API token is read from the first line of stdin unless `--token`
    /// is given.
    #[arg(value_name = "HOST", value_parser = validate_host)]
    pub new_host: String,
}

/// Arguments for commands that act on a single issue
#[derive(Parser, Debug, Clone)]
pub struct KeyArgs {
    /// Issue key (e.g., PROJ-123)
    #[arg(short, long, env = ISSUE_KEY_ENV, value_parser = validate_issue_key)]
    pub key: String,
}

/// Arguments for the `add-comment` command
#[derive(Parser, Debug, Clone)]
pub struct AddCommentArgs {
    /// Issue key (e.g., PROJ-123)
    #[arg(short, long, env = ISSUE_KEY_ENV, value_parser = validate_issue_key)]
    pub key: String,

    /// Comment text
    #[arg(value_parser = validate_not_blank)]
    pub body: String,
}

/// Arguments for the `update-status` command
#[derive(Parser, Debug, Clone)]
pub struct UpdateStatusArgs {
    /// Issue key (e.g., PROJ-123)
    #[arg(short, long, env = ISSUE_KEY_ENV, value_parser = validate_issue_key)]
    pub key: String,

    /// Target status name, matched exactly (e.g., "In Progress")
    #[arg(value_parser = validate_not_blank)]
    pub status: String,
}

/// Arguments for the `create-issue` command
#[derive(Parser, Debug, Clone)]
pub struct CreateIssueArgs {
    /// Project key (e.g., PROJ)
    #[arg(short, long, value_parser = validate_project_key)]
    pub project: String,

    /// One-line summary
    #[arg(short, long, value_parser = validate_not_blank)]
    pub summary: String,

    /// Detailed description
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// Issue type name
    #[arg(short = 't', long = "type", default_value = DEFAULT_ISSUE_TYPE)]
    pub issue_type: String,

    /// Assignee login name
    #[arg(short, long)]
    pub assignee: Option<String>,
}

/// Arguments for the `search` command
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// JQL query (e.g., "project = PROJ AND status = 'In Progress'")
    #[arg(value_parser = validate_not_blank)]
    pub jql: String,

    /// Maximum number of issues to return
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: u32,

    /// Fields to fetch (comma-separated); defaults to summary, status, assignee and type
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Arguments for the `assign` command
#[derive(Parser, Debug, Clone)]
pub struct AssignArgs {
    /// Issue key (e.g., PROJ-123)
    #[arg(short, long, env = ISSUE_KEY_ENV, value_parser = validate_issue_key)]
    pub key: String,

    /// Login name of the new assignee; omit to unassign
    #[arg(value_parser = validate_not_blank)]
    pub user: Option<String>,
}

/// Arguments for the `add-to-sprint` command
#[derive(Parser, Debug, Clone)]
pub struct AddToSprintArgs {
    /// Numeric sprint id
    pub sprint_id: u64,

    /// Issue keys to move into the sprint
    #[arg(required = true, num_args = 1.., value_parser = validate_issue_key)]
    pub keys: Vec<String>,
}

/// Arguments for the `attach` command
#[derive(Parser, Debug, Clone)]
pub struct AttachArgs {
    /// Issue key (e.g., PROJ-123)
    #[arg(short, long, env = ISSUE_KEY_ENV, value_parser = validate_issue_key)]
    pub key: String,

    /// File to upload
    pub path: PathBuf,
}

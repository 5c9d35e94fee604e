//! Command execution logic.
//!
//! Every remote command runs against a [`JiraApi`] so it can be driven by
//! the real client or by a fake in tests.

use anyhow::{Context, Result};
use jira_credentials::CredentialStore;
use std::io::{self, IsTerminal};

use super::args::{
    AddCommentArgs, AddToSprintArgs, AssignArgs, AttachArgs, ConfigureArgs, CreateIssueArgs,
    KeyArgs, SearchArgs, UpdateStatusArgs,
};
use crate::client::{DEFAULT_SEARCH_FIELDS, JiraApi};
use crate::commands::configure;
use crate::domain::NewIssue;
use crate::error::Error;
use crate::ops;
use crate::output::{self, OutputMode};

/// Execute the configure command
pub fn execute_configure(
    store: &CredentialStore,
    args: &ConfigureArgs,
    token: Option<&str>,
    output_mode: OutputMode,
) -> Result<()> {
    let token = match token.filter(|t| !t.trim().is_empty()) {
        Some(token) => token.to_string(),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprint!("API token for {}: ", args.new_host);
            }
            configure::read_token(stdin.lock())?
        }
    };

    let result = configure::configure(store, &args.new_host, &token)?;
    output::print_configured(&result, output_mode)?;
    Ok(())
}

/// Execute the get-issue command
pub async fn execute_get_issue(
    api: &dyn JiraApi,
    args: &KeyArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let details = ops::issue_details(api, &args.key).await?;
    output::print_issue_details(&details, output_mode)?;
    Ok(())
}

/// Execute the get-comments command
pub async fn execute_get_comments(
    api: &dyn JiraApi,
    args: &KeyArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let comments = api.get_comments(&args.key).await?;
    output::print_comments(&args.key, &comments, output_mode)?;
    Ok(())
}

/// Execute the add-comment command
pub async fn execute_add_comment(
    api: &dyn JiraApi,
    args: &AddCommentArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let comment = api.add_comment(&args.key, &args.body).await?;
    output::print_comment_added(&args.key, &comment, output_mode)?;
    Ok(())
}

/// Execute the update-status command
pub async fn execute_update_status(
    api: &dyn JiraApi,
    args: &UpdateStatusArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let change = ops::update_status(api, &args.key, &args.status).await?;
    output::print_status_change(&args.key, &args.status, &change, output_mode)?;
    Ok(())
}

/// Execute the create-issue command
pub async fn execute_create_issue(
    api: &dyn JiraApi,
    host: &str,
    args: &CreateIssueArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let new_issue = NewIssue {
        project: args.project.clone(),
        summary: args.summary.clone(),
        description: args.description.clone().unwrap_or_default(),
        issue_type: args.issue_type.clone(),
        assignee: args.assignee.clone(),
    };

    let created = api.create_issue(&new_issue).await?;
    output::print_created(&created, host, output_mode)?;
    Ok(())
}

/// Execute the search command
pub async fn execute_search(
    api: &dyn JiraApi,
    args: &SearchArgs,
    output_mode: OutputMode,
) -> Result<()> {
    if args.max_results == 0 {
        return Err(Error::invalid("max-results", "must be at least 1").into());
    }

    let fields: Vec<String> = if args.fields.is_empty() {
        DEFAULT_SEARCH_FIELDS.iter().map(|f| (*f).to_string()).collect()
    } else {
        args.fields.clone()
    };

    let issues = api.search_issues(&args.jql, args.max_results, &fields).await?;
    output::print_issues(&issues, output_mode)?;
    Ok(())
}

/// Execute the assign command
pub async fn execute_assign(
    api: &dyn JiraApi,
    args: &AssignArgs,
    output_mode: OutputMode,
) -> Result<()> {
    api.assign_issue(&args.key, args.user.as_deref()).await?;
    output::print_assigned(&args.key, args.user.as_deref(), output_mode)?;
    Ok(())
}

/// Execute the add-to-sprint command
pub async fn execute_add_to_sprint(
    api: &dyn JiraApi,
    args: &AddToSprintArgs,
    output_mode: OutputMode,
) -> Result<()> {
    api.add_issues_to_sprint(args.sprint_id, &args.keys).await?;
    output::print_sprint_added(args.sprint_id, &args.keys, output_mode)?;
    Ok(())
}

/// Execute the attach command
pub async fn execute_attach(
    api: &dyn JiraApi,
    args: &AttachArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let file_name = args
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::invalid(
                "path",
                format!("'{}' does not name a file", args.path.display()),
            )
        })?
        .to_string();

    let content = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let attachments = api.add_attachment(&args.key, &file_name, content).await?;
    output::print_attachments(&args.key, &attachments, output_mode)?;
    Ok(())
}

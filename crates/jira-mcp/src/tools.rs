//! MCP tool implementations.
//!
//! This module contains the implementations for all MCP tools exposed by the
//! server. Each method validates its input, runs the operation against the
//! shared [`JiraApi`] and returns a response model.

use crate::error::{Error, Result};
use crate::models::{
    ActionResponse, CommentsResponse, CreatedIssueResponse, McpIssue, SearchResponse,
    StatusUpdateResponse,
};
use jira_cli::cli::{validate_issue_key, validate_not_blank, validate_project_key};
use jira_cli::client::{DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_FIELDS, JiraApi};
use jira_cli::domain::{DEFAULT_ISSUE_TYPE, NewIssue};
use jira_cli::ops::{self, StatusChange};
use std::sync::Arc;
use tracing::info;

/// Longest summary Jira accepts.
pub const MAX_SUMMARY_CHARS: usize = 255;

/// Tool implementations for the jira MCP server.
#[derive(Clone)]
pub struct Tools {
    api: Arc<dyn JiraApi>,
}

fn issue_key(value: &str) -> Result<String> {
    validate_issue_key(value).map_err(|reason| Error::InvalidArgument {
        field: "issue_key",
        reason,
    })
}

fn required(field: &'static str, value: &str) -> Result<String> {
    validate_not_blank(value).map_err(|reason| Error::InvalidArgument { field, reason })
}

/// First non-blank line of `description`, cut to [`MAX_SUMMARY_CHARS`].
fn summary_from(description: &str) -> String {
    description
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .chars()
        .take(MAX_SUMMARY_CHARS)
        .collect()
}

impl Tools {
    /// Create a new Tools instance backed by `api`.
    pub fn new(api: Arc<dyn JiraApi>) -> Self {
        Self { api }
    }

    /// Get an issue with its editable custom fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the request fails.
    pub async fn get_issue(&self, key: &str) -> Result<McpIssue> {
        let key = issue_key(key)?;
        let details = ops::issue_details(self.api.as_ref(), &key).await?;
        Ok(details.into())
    }

    /// Get the comments on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the request fails.
    pub async fn get_comments(&self, key: &str) -> Result<CommentsResponse> {
        let key = issue_key(key)?;
        let comments = self.api.get_comments(&key).await?;
        Ok(CommentsResponse {
            issue_key: key,
            comments: comments.into_iter().map(Into::into).collect(),
        })
    }

    /// Move an issue to the named status.
    ///
    /// # Errors
    ///
    /// Returns an error if no available transition leads to `status`, listing
    /// the statuses that are reachable, or if a request fails.
    pub async fn update_issue_status(&self, key: &str, status: &str) -> Result<StatusUpdateResponse> {
        let key = issue_key(key)?;
        let status = required("status", status)?;
        let change = ops::update_status(self.api.as_ref(), &key, &status).await?;
        let message = change.message(&key, &status);

        let transition_id = match change {
            StatusChange::AlreadyInStatus => None,
            StatusChange::Transitioned { transition_id } => Some(transition_id),
        };
        Ok(StatusUpdateResponse {
            issue_key: key,
            status,
            changed: transition_id.is_some(),
            transition_id,
            message,
        })
    }

    /// Add a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed, the comment is blank, or the
    /// request fails.
    pub async fn add_comment(&self, key: &str, comment: &str) -> Result<ActionResponse> {
        let key = issue_key(key)?;
        let comment = required("comment", comment)?;
        self.api.add_comment(&key, &comment).await?;
        Ok(ActionResponse {
            message: format!("Successfully added comment to issue {key}"),
        })
    }

    /// Create an issue.
    ///
    /// The summary defaults to the first line of the description and the
    /// type to `Task`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project key or description is invalid or the
    /// request fails.
    pub async fn create_issue(
        &self,
        project: &str,
        description: &str,
        summary: Option<&str>,
        issue_type: Option<&str>,
        assignee: Option<&str>,
    ) -> Result<CreatedIssueResponse> {
        let project = validate_project_key(project).map_err(|reason| Error::InvalidArgument {
            field: "project",
            reason,
        })?;
        let description = required("description", description)?;
        let summary = match summary.filter(|s| !s.trim().is_empty()) {
            Some(summary) => summary.trim().to_string(),
            None => summary_from(&description),
        };

        let new_issue = NewIssue {
            project,
            summary,
            description,
            issue_type: issue_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(DEFAULT_ISSUE_TYPE)
                .to_string(),
            assignee: assignee
                .filter(|a| !a.trim().is_empty())
                .map(str::to_string),
        };

        let created = self.api.create_issue(&new_issue).await?;
        info!(key = %created.key, "Created issue");
        Ok(CreatedIssueResponse {
            message: format!("Successfully created issue: {}", created.key),
            key: created.key,
            id: created.id,
        })
    }

    /// Run a JQL search.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is blank, `max_results` is zero, or the
    /// request fails.
    pub async fn search_issues(
        &self,
        jql: &str,
        max_results: Option<u32>,
        fields: Option<Vec<String>>,
    ) -> Result<SearchResponse> {
        let jql = required("jql", jql)?;
        let max_results = max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if max_results == 0 {
            return Err(Error::InvalidArgument {
                field: "max_results",
                reason: "must be at least 1".to_string(),
            });
        }
        let fields = fields
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_FIELDS.iter().map(|f| (*f).to_string()).collect());

        let issues = self.api.search_issues(&jql, max_results, &fields).await?;
        Ok(SearchResponse {
            count: issues.len(),
            issues: issues.into_iter().map(Into::into).collect(),
        })
    }

    /// Assign an issue, or unassign it when `assignee` is `None` or blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the request fails.
    pub async fn assign_issue(&self, key: &str, assignee: Option<&str>) -> Result<ActionResponse> {
        let key = issue_key(key)?;
        let assignee = assignee.map(str::trim).filter(|a| !a.is_empty());
        self.api.assign_issue(&key, assignee).await?;

        let message = match assignee {
            Some(user) => format!("Assigned issue {key} to {user}"),
            None => format!("Unassigned issue {key}"),
        };
        Ok(ActionResponse { message })
    }

    /// Move issues into a sprint.
    ///
    /// # Errors
    ///
    /// Returns an error if no keys are given, any key is malformed, or the
    /// request fails.
    pub async fn add_issues_to_sprint(&self, sprint_id: u64, keys: &[String]) -> Result<ActionResponse> {
        if keys.is_empty() {
            return Err(Error::InvalidArgument {
                field: "issue_keys",
                reason: "at least one issue key is required".to_string(),
            });
        }
        let keys = keys
            .iter()
            .map(|key| issue_key(key))
            .collect::<Result<Vec<_>>>()?;

        self.api.add_issues_to_sprint(sprint_id, &keys).await?;
        Ok(ActionResponse {
            message: format!(
                "Added {} issue(s) to sprint {sprint_id}: {}",
                keys.len(),
                keys.join(", ")
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single_line("Fix the login page", "Fix the login page")]
    #[case::multi_line("\n  First line  \nSecond line", "First line")]
    #[case::empty("", "")]
    fn test_summary_from(#[case] description: &str, #[case] expected: &str) {
        assert_eq!(summary_from(description), expected);
    }

    #[test]
    fn test_summary_is_truncated_on_char_boundary() {
        let description = "é".repeat(MAX_SUMMARY_CHARS + 10);
        let summary = summary_from(&description);
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS);
    }

    #[test]
    fn test_issue_key_validation_names_the_field() {
        let err = issue_key("nope").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "issue_key", .. }));
        assert_eq!(issue_key("proj-5").unwrap(), "PROJ-5");
    }
}

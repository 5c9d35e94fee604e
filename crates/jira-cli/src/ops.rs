//! Operations shared by the CLI and the MCP server.

use crate::client::JiraApi;
use crate::domain::{EditMetadata, Issue};
use crate::error::Result;
use crate::fields::{DisplayField, displayable_custom_fields};
use crate::transition::{Resolution, resolve_transition};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of [`update_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StatusChange {
    /// The issue was already in the requested status; nothing was applied.
    AlreadyInStatus,
    /// The transition with this id was applied.
    Transitioned {
        /// Id of the applied transition.
        transition_id: String,
    },
}

impl StatusChange {
    /// Human-readable confirmation for `key` and `status`.
    #[must_use]
    pub fn message(&self, key: &str, status: &str) -> String {
        match self {
            Self::AlreadyInStatus => format!("Issue {key} is already in status: {status}"),
            Self::Transitioned { .. } => {
                format!("Successfully updated issue {key} to status: {status}")
            }
        }
    }
}

/// Move an issue to the status named `status`.
///
/// Fetches the issue and its currently available transitions, picks the one
/// leading to `status` and applies it.
///
/// # Errors
///
/// Returns [`Error::NoSuchTransition`](crate::error::Error::NoSuchTransition)
/// when no available transition leads to `status`, or any API error.
pub async fn update_status(api: &dyn JiraApi, key: &str, status: &str) -> Result<StatusChange> {
    let issue = api.get_issue(key).await?;
    if issue.status == status {
        debug!(key, status, "Issue already in requested status");
        return Ok(StatusChange::AlreadyInStatus);
    }

    let transitions = api.get_transitions(key).await?;
    match resolve_transition(&issue.status, status, &transitions)? {
        Resolution::AlreadyInStatus => Ok(StatusChange::AlreadyInStatus),
        Resolution::Apply(id) => {
            api.apply_transition(key, id).await?;
            info!(key, from = %issue.status, to = status, transition = id, "Applied transition");
            Ok(StatusChange::Transitioned {
                transition_id: id.to_string(),
            })
        }
    }
}

/// An issue together with the custom fields worth showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueDetails {
    /// The issue.
    #[serde(flatten)]
    pub issue: Issue,
    /// Editable custom fields with a set scalar value, ordered by key.
    #[serde(rename = "displayed_custom_fields")]
    pub custom_fields: Vec<DisplayField>,
}

/// Fetch an issue and its displayable custom fields.
///
/// The edit metadata only decides which custom fields are shown. If it cannot
/// be fetched the issue is returned without custom fields.
///
/// # Errors
///
/// Returns any API error from fetching the issue.
pub async fn issue_details(api: &dyn JiraApi, key: &str) -> Result<IssueDetails> {
    let issue = api.get_issue(key).await?;
    let metadata = match api.get_edit_metadata(key).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(key, error = %e, "Could not fetch edit metadata, omitting custom fields");
            EditMetadata::default()
        }
    };
    let custom_fields = displayable_custom_fields(&issue, &metadata);
    Ok(IssueDetails {
        issue,
        custom_fields,
    })
}

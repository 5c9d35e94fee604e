//! Access to the Jira REST API.
//!
//! [`JiraApi`] is the set of remote operations the CLI and the MCP server
//! need. [`RestClient`] implements it over HTTPS with `reqwest`.
//!
//! # Test Utilities
//!
//! With the `test-util` feature this module also provides [`FakeJira`], an
//! in-memory implementation with issues, workflows, comments, sprints and
//! attachments:
//!
//! ```toml
//! [dev-dependencies]
//! jira-cli = { version = "...", features = ["test-util"] }
//! ```
//!
//! ```rust,ignore
//! use jira_cli::client::{FakeJira, JiraApi};
//!
//! #[tokio::test]
//! async fn test_with_fake_jira() {
//!     let api = FakeJira::new().with_issue(issue);
//!     let issue = api.get_issue("PROJ-1").await?;
//! }
//! ```

use crate::domain::{Attachment, Comment, CreatedIssue, EditMetadata, Issue, NewIssue, Transition};
use crate::error::Result;
use async_trait::async_trait;

#[cfg(any(test, feature = "test-util"))]
mod fake;
mod rest;
mod wire;

#[cfg(any(test, feature = "test-util"))]
pub use fake::FakeJira;
pub use rest::RestClient;

/// Default number of issues returned by a search.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Fields requested by a search when the caller does not name any.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["summary", "status", "assignee", "issuetype"];

/// Remote operations on a Jira instance.
///
/// Implementations must be `Send + Sync` so one client can serve concurrent
/// MCP tool calls.
#[async_trait]
pub trait JiraApi: Send + Sync {
    /// Fetch an issue with all of its fields.
    async fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Fetch the comments on an issue, oldest first.
    async fn get_comments(&self, key: &str) -> Result<Vec<Comment>>;

    /// Fetch the transitions currently available on an issue.
    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>>;

    /// Apply the transition with `transition_id` to an issue.
    async fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()>;

    /// Add a comment to an issue.
    async fn add_comment(&self, key: &str, body: &str) -> Result<Comment>;

    /// Run a JQL search and return at most `max_results` issues with `fields` populated.
    async fn search_issues(&self, jql: &str, max_results: u32, fields: &[String])
    -> Result<Vec<Issue>>;

    /// Create an issue.
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue>;

    /// Fetch the fields the current user may edit on an issue.
    async fn get_edit_metadata(&self, key: &str) -> Result<EditMetadata>;

    /// Assign an issue to `assignee` (login name), or unassign it with `None`.
    async fn assign_issue(&self, key: &str, assignee: Option<&str>) -> Result<()>;

    /// Move issues into a sprint.
    async fn add_issues_to_sprint(&self, sprint_id: u64, keys: &[String]) -> Result<()>;

    /// Upload a file as an attachment on an issue.
    async fn add_attachment(
        &self,
        key: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Vec<Attachment>>;
}

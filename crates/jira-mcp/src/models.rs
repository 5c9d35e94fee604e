//! MCP parameter and response models.
//!
//! Parameter structs describe each tool's input schema. Response structs wrap
//! or transform jira-cli domain types for MCP transport.

use jira_cli::domain::{Comment, Issue, User};
use jira_cli::fields::DisplayField;
use jira_cli::ops::IssueDetails;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Parameters
// ============================================================================

/// Parameters for the `get_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetIssueParams {
    /// JIRA issue key (e.g., PROJ-123)
    pub issue_key: String,
}

/// Parameters for the `get_comments` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    /// JIRA issue key (e.g., PROJ-123)
    pub issue_key: String,
}

/// Parameters for the `update_issue_status` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIssueStatusParams {
    /// JIRA issue key (e.g., PROJ-123)
    pub issue_key: String,

    /// New status name (e.g., 'In Progress', 'Closed'), matched exactly
    pub status: String,
}

/// Parameters for the `add_comment` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    /// JIRA issue key (e.g., PROJ-123)
    pub issue_key: String,

    /// Comment text to add
    pub comment: String,
}

/// Parameters for the `create_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    /// JIRA project key
    pub project: String,

    /// Issue description
    pub description: String,

    /// One-line summary; defaults to the first line of the description
    #[serde(default)]
    pub summary: Option<String>,

    /// Issue type name (default: Task)
    #[serde(default)]
    pub issue_type: Option<String>,

    /// Optional assignee username
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Parameters for the `search_issues` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchIssuesParams {
    /// JQL query (e.g., "project = PROJ AND status = 'In Progress'")
    pub jql: String,

    /// Maximum number of issues to return (default: 50)
    #[serde(default)]
    pub max_results: Option<u32>,

    /// Fields to fetch (default: summary, status, assignee, issuetype)
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// Parameters for the `assign_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssignIssueParams {
    /// JIRA issue key (e.g., PROJ-123)
    pub issue_key: String,

    /// Assignee username; omit or leave empty to unassign
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Parameters for the `add_issues_to_sprint` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddIssuesToSprintParams {
    /// Numeric sprint id
    pub sprint_id: u64,

    /// Issue keys to move into the sprint
    pub issue_keys: Vec<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// A user reference for MCP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpUser {
    /// Human-readable name.
    pub display_name: String,

    /// Login name.
    pub name: String,
}

impl From<User> for McpUser {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name,
            name: user.name,
        }
    }
}

/// A custom field value ready to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpField {
    /// Field key, e.g. `customfield_10002`.
    pub key: String,

    /// Field name.
    pub name: String,

    /// Rendered value.
    pub value: String,
}

impl From<DisplayField> for McpField {
    fn from(field: DisplayField) -> Self {
        Self {
            key: field.key,
            name: field.label,
            value: field.value,
        }
    }
}

/// Issue representation for MCP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpIssue {
    /// Issue key.
    pub key: String,

    /// Current status name.
    pub status: String,

    /// One-line summary.
    pub summary: String,

    /// Issue type name.
    pub issue_type: Option<String>,

    /// Description.
    pub description: Option<String>,

    /// Reporter.
    pub reporter: Option<McpUser>,

    /// Assignee.
    pub assignee: Option<McpUser>,

    /// Editable custom fields with a value. Empty in search results.
    pub custom_fields: Vec<McpField>,
}

impl From<Issue> for McpIssue {
    fn from(issue: Issue) -> Self {
        Self {
            key: issue.key,
            status: issue.status,
            summary: issue.summary,
            issue_type: issue.issue_type,
            description: issue.description,
            reporter: issue.reporter.map(Into::into),
            assignee: issue.assignee.map(Into::into),
            custom_fields: Vec::new(),
        }
    }
}

impl From<IssueDetails> for McpIssue {
    fn from(details: IssueDetails) -> Self {
        Self {
            custom_fields: details.custom_fields.into_iter().map(Into::into).collect(),
            ..Self::from(details.issue)
        }
    }
}

/// A comment for MCP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpComment {
    /// Comment author.
    pub author: McpUser,

    /// Comment text.
    pub body: String,

    /// Creation timestamp as returned by Jira.
    pub created: Option<String>,
}

impl From<Comment> for McpComment {
    fn from(comment: Comment) -> Self {
        Self {
            author: comment.author.into(),
            body: comment.body,
            created: comment.created,
        }
    }
}

/// Response from the `get_comments` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommentsResponse {
    /// Issue key.
    pub issue_key: String,

    /// Comments, oldest first.
    pub comments: Vec<McpComment>,
}

/// Response from the `update_issue_status` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatusUpdateResponse {
    /// Issue key.
    pub issue_key: String,

    /// Requested status.
    pub status: String,

    /// Whether a transition was applied.
    pub changed: bool,

    /// Id of the applied transition, if any.
    pub transition_id: Option<String>,

    /// Status message.
    pub message: String,
}

/// Response from the `search_issues` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
    /// Number of issues returned.
    pub count: usize,

    /// Matching issues.
    pub issues: Vec<McpIssue>,
}

/// Response from the `create_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreatedIssueResponse {
    /// Key of the new issue.
    pub key: String,

    /// Id of the new issue.
    pub id: String,

    /// Status message.
    pub message: String,
}

/// Response from tools that only perform an action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActionResponse {
    /// Status message.
    pub message: String,
}

//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp.

use crate::models::{
    AddCommentParams, AddIssuesToSprintParams, AssignIssueParams, CreateIssueParams,
    GetCommentsParams, GetIssueParams, SearchIssuesParams, UpdateIssueStatusParams,
};
use crate::tools::Tools;
use jira_cli::client::JiraApi;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{
    ErrorData as McpError, handler::server::ServerHandler, tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Turn a tool outcome into an MCP result.
///
/// Bad parameters become protocol-level invalid-params errors. Every other
/// failure is returned as an error tool result so the assistant can read it.
fn respond<T: Serialize>(
    tool: &'static str,
    outcome: crate::error::Result<T>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => Ok(CallToolResult::success(vec![Content::json(value)?])),
        Err(e) if e.is_invalid_params() => Err(McpError::invalid_params(e.to_string(), None)),
        Err(e) => {
            warn!(tool, error = %e, "Tool failed");
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
    }
}

/// The jira MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct JiraMcpServer {
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl JiraMcpServer {
    /// Get details of an issue.
    #[tool(
        description = "Get details of a JIRA issue: status, summary, type, reporter, assignee, description and editable custom fields that have a value."
    )]
    async fn get_issue(
        &self,
        Parameters(params): Parameters<GetIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_issue", self.tools.get_issue(&params.issue_key).await)
    }

    /// Get the comments on an issue.
    #[tool(description = "Get comments on a JIRA issue, oldest first.")]
    async fn get_comments(
        &self,
        Parameters(params): Parameters<GetCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_comments",
            self.tools.get_comments(&params.issue_key).await,
        )
    }

    /// Move an issue to a status.
    #[tool(
        description = "Update the status of a JIRA issue by applying the workflow transition that leads to the named status. Fails with the list of reachable statuses if none matches."
    )]
    async fn update_issue_status(
        &self,
        Parameters(params): Parameters<UpdateIssueStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "update_issue_status",
            self.tools
                .update_issue_status(&params.issue_key, &params.status)
                .await,
        )
    }

    /// Add a comment to an issue.
    #[tool(description = "Add a comment to a JIRA issue.")]
    async fn add_comment(
        &self,
        Parameters(params): Parameters<AddCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "add_comment",
            self.tools
                .add_comment(&params.issue_key, &params.comment)
                .await,
        )
    }

    /// Create an issue.
    #[tool(
        description = "Create a new JIRA issue. The summary defaults to the first line of the description and the type to Task."
    )]
    async fn create_issue(
        &self,
        Parameters(params): Parameters<CreateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "create_issue",
            self.tools
                .create_issue(
                    &params.project,
                    &params.description,
                    params.summary.as_deref(),
                    params.issue_type.as_deref(),
                    params.assignee.as_deref(),
                )
                .await,
        )
    }

    /// Search issues with JQL.
    #[tool(description = "Search JIRA issues with a JQL query.")]
    async fn search_issues(
        &self,
        Parameters(params): Parameters<SearchIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "search_issues",
            self.tools
                .search_issues(&params.jql, params.max_results, params.fields)
                .await,
        )
    }

    /// Assign or unassign an issue.
    #[tool(description = "Assign a JIRA issue to a user, or unassign it when no assignee is given.")]
    async fn assign_issue(
        &self,
        Parameters(params): Parameters<AssignIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "assign_issue",
            self.tools
                .assign_issue(&params.issue_key, params.assignee.as_deref())
                .await,
        )
    }

    /// Move issues into a sprint.
    #[tool(description = "Add one or more JIRA issues to a sprint.")]
    async fn add_issues_to_sprint(
        &self,
        Parameters(params): Parameters<AddIssuesToSprintParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "add_issues_to_sprint",
            self.tools
                .add_issues_to_sprint(params.sprint_id, &params.issue_keys)
                .await,
        )
    }
}

impl JiraMcpServer {
    /// Create a server whose tools run against `api`.
    #[must_use]
    pub fn new(api: Arc<dyn JiraApi>) -> Self {
        Self {
            tools: Arc::new(Tools::new(api)),
            tool_router: Self::tool_router(),
        }
    }

    /// The tool implementations behind the server.
    #[must_use]
    pub fn tools(&self) -> &Tools {
        &self.tools
    }
}

#[tool_handler]
impl ServerHandler for JiraMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "jira-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Jira MCP server. Read, comment on, transition, create, assign and plan Jira issues. Statuses are matched by exact name."
                    .into(),
            ),
        }
    }
}

//! MCP server for Jira.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! Jira issue operations to AI assistants.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling and wraps the
//! `JiraApi` trait and shared operations from the jira-cli crate.
//! Credentials are resolved once at startup, from `JIRA_HOST`/`JIRA_TOKEN`
//! or the store written by `jira configure`.
//!
//! # Tools
//!
//! ## Issue Queries
//! - `get_issue` - Show an issue with its editable custom fields
//! - `get_comments` - List the comments on an issue
//! - `search_issues` - Run a JQL search
//!
//! ## Issue Modification
//! - `update_issue_status` - Move an issue to a named status
//! - `add_comment` - Comment on an issue
//! - `create_issue` - Create an issue
//! - `assign_issue` - Assign or unassign an issue
//! - `add_issues_to_sprint` - Move issues into a sprint

pub mod error;
pub mod models;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::JiraMcpServer;

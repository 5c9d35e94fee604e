//! jira-cli - Jira issues from the command line.
//!
//! This crate provides the `jira` binary and the library it is built from:
//! domain types, the [`client::JiraApi`] seam with its REST implementation,
//! the transition resolver, and the operations shared with the MCP server.
//! Credentials are handled by the `jira-credentials` crate.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod client;
pub mod domain;
pub mod error;
pub mod fields;
pub mod ops;
pub mod session;
pub mod transition;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod output;

pub use client::{JiraApi, RestClient};
pub use error::{Error, Result};
pub use session::Session;

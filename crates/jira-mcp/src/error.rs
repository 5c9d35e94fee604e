//! Error types for the jira MCP server.

use thiserror::Error;

/// Errors that can occur in the jira MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument value provided.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        /// The parameter that had an invalid value.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An error from the Jira client, including workflow resolution failures.
    #[error(transparent)]
    Jira(#[from] jira_cli::Error),
}

impl Error {
    /// Whether the caller sent a bad parameter, as opposed to the operation failing.
    #[must_use]
    pub fn is_invalid_params(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::Jira(jira_cli::Error::InvalidArgument { .. })
        )
    }
}

/// Result type for jira MCP operations.
pub type Result<T> = std::result::Result<T, Error>;

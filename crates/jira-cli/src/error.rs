//! Error types for jira-cli operations.

use crate::transition::NoSuchTransition;
use thiserror::Error;

/// The error type for jira-cli operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Host or token could not be loaded from the credential store.
    #[error(transparent)]
    Credentials(#[from] jira_credentials::Error),

    /// A required setting was resolved to an empty value.
    #[error("no Jira {0} configured; run `jira configure <host>` or set JIRA_HOST/JIRA_TOKEN")]
    NotConfigured(&'static str),

    /// The requested status is not reachable from the issue's current status.
    #[error(transparent)]
    NoSuchTransition(#[from] NoSuchTransition),

    /// The service answered with a non-success status.
    #[error("failed to {operation}: HTTP {status}{}", api_detail(.message))]
    Api {
        /// What was being attempted, e.g. "get issue".
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Error messages from the response body, if any.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("failed to {operation}")]
    Http {
        /// What was being attempted.
        operation: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode response to {operation}")]
    Decode {
        /// What was being attempted.
        operation: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An argument was rejected before any request was made.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// Name of the argument.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

fn api_detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

/// A specialized Result type for jira-cli operations.
pub type Result<T> = std::result::Result<T, Error>;

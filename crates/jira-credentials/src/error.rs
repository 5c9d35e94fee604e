//! Error types for credential and configuration storage.

use crate::secret::SecretStoreError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hint appended to errors the user fixes by (re)running `configure`.
pub const CONFIGURE_HINT: &str = "run `jira configure <host>` first";

/// The error type for credential storage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The per-user configuration directory could not be determined.
    #[error("could not determine the user configuration directory")]
    ConfigDirUnavailable,

    /// A blank host was passed to `save_config`.
    #[error("host must not be empty")]
    InvalidHost,

    /// No configuration has ever been saved.
    #[error("no configuration found at {}; {CONFIGURE_HINT}", path.display())]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration directory or file could not be written.
    #[error("failed to write config file {}", path.display())]
    ConfigWrite {
        /// Path of the directory or file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON of the expected shape.
    #[error("failed to parse config file {}; {CONFIGURE_HINT}", path.display())]
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Neither the secret store nor the fallback file holds a token for the host.
    #[error("no token stored for host {host}; {CONFIGURE_HINT}")]
    TokenNotFound {
        /// Host the token was looked up for.
        host: String,
    },

    /// The fallback token file exists but could not be read.
    #[error("failed to read token file {}", path.display())]
    TokenFileRead {
        /// Path of the token file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The fallback token directory or file could not be written.
    #[error("failed to write token file {}", path.display())]
    TokenFileWrite {
        /// Path of the directory or file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The fallback token file is not a JSON object of host to token.
    #[error("failed to parse token file {}", path.display())]
    TokenFileParse {
        /// Path of the token file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The OS secret store failed for a reason other than being unreachable.
    #[error("secret store error: {0}")]
    SecretStore(#[from] SecretStoreError),
}

impl Error {
    /// Whether this error means "no token/config stored" rather than a storage fault.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::TokenNotFound { .. }
                | Self::SecretStore(SecretStoreError::NoEntry)
        )
    }
}

/// A specialized Result type for credential storage operations.
pub type Result<T> = std::result::Result<T, Error>;

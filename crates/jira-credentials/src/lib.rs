//! Credential storage for jira-cli.
//!
//! Persists the default Jira host in `config.json` and per-host API tokens in
//! the OS secret store, falling back to an owner-only JSON file when the
//! secret store cannot be reached (for example on a headless Linux machine
//! without a D-Bus session).
//!
//! All operations are synchronous, bounded local calls with no retries.
//! Concurrent processes saving tokens for the same host through the fallback
//! file are not serialized; the last complete write wins.

#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod error;
mod private_fs;
pub mod secret;
pub mod store;
pub mod token_file;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use classify::{UNAVAILABLE_MARKERS, is_secret_store_unavailable};
pub use error::{CONFIGURE_HINT, Error, Result};
pub use secret::{KeyringSecretStore, SERVICE_NAME, SecretStore, SecretStoreError};
pub use store::{APP_DIR_NAME, CredentialStore, TokenLocation, default_config_dir};

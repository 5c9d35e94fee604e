//! OS secret store access.
//!
//! [`SecretStore`] is the seam between the credential logic and the platform
//! vault. [`KeyringSecretStore`] is the production backend; tests use the
//! stores in [`crate::testing`].

use crate::error::CONFIGURE_HINT;
use std::error::Error as StdError;
use thiserror::Error;
use tracing::trace;

/// Service name every token entry is filed under.
pub const SERVICE_NAME: &str = "jira-cli";

/// Errors reported by a [`SecretStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretStoreError {
    /// The store is reachable but holds no entry for the account.
    #[error("no token found in the OS secret store; {CONFIGURE_HINT}")]
    NoEntry,

    /// Any other backend failure, carrying the backend's full message.
    #[error("{message}")]
    Backend {
        /// Backend message including its cause chain.
        message: String,
    },
}

impl SecretStoreError {
    /// Build a backend error from a message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// A per-user secret vault keyed by account name.
///
/// Implementations are expected to be cheap to call and must not cache:
/// every `get` reflects the backing store at call time.
pub trait SecretStore: Send + Sync {
    /// Store `secret` for `account`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SecretStoreError::Backend`] when the vault rejects the write
    /// or cannot be reached.
    fn set(&self, account: &str, secret: &str) -> Result<(), SecretStoreError>;

    /// Fetch the secret stored for `account`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretStoreError::NoEntry`] when nothing is stored and
    /// [`SecretStoreError::Backend`] for every other failure.
    fn get(&self, account: &str) -> Result<String, SecretStoreError>;
}

/// [`SecretStore`] backed by the platform keychain through the `keyring` crate.
#[derive(Debug, Clone)]
pub struct KeyringSecretStore {
    service: String,
}

impl KeyringSecretStore {
    /// Create a store that files entries under `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, account: &str) -> Result<keyring::Entry, SecretStoreError> {
        keyring::Entry::new(&self.service, account).map_err(from_keyring)
    }
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl SecretStore for KeyringSecretStore {
    fn set(&self, account: &str, secret: &str) -> Result<(), SecretStoreError> {
        trace!(service = %self.service, account, "Writing keyring entry");
        self.entry(account)?
            .set_password(secret)
            .map_err(from_keyring)
    }

    fn get(&self, account: &str) -> Result<String, SecretStoreError> {
        trace!(service = %self.service, account, "Reading keyring entry");
        self.entry(account)?.get_password().map_err(from_keyring)
    }
}

fn from_keyring(err: keyring::Error) -> SecretStoreError {
    match err {
        keyring::Error::NoEntry => SecretStoreError::NoEntry,
        other => SecretStoreError::backend(error_chain_message(&other)),
    }
}

/// Render an error and all of its sources as one `: `-separated line.
fn error_chain_message(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

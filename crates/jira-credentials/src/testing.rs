//! Secret store doubles for tests.
//!
//! Available with the `test-util` feature:
//!
//! ```toml
//! [dev-dependencies]
//! jira-credentials = { version = "...", features = ["test-util"] }
//! ```

use crate::secret::{SecretStore, SecretStoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory secret store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySecretStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn set(&self, account: &str, secret: &str) -> Result<(), SecretStoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account.to_string(), secret.to_string());
        Ok(())
    }

    fn get(&self, account: &str) -> Result<String, SecretStoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(account)
            .cloned()
            .ok_or(SecretStoreError::NoEntry)
    }
}

/// Secret store that always fails with an "unreachable" message, like a
/// headless Linux box without a session bus.
#[derive(Debug, Clone)]
pub struct UnavailableSecretStore {
    message: String,
}

impl UnavailableSecretStore {
    /// Fail every call with `message`, which should classify as unavailable.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UnavailableSecretStore {
    fn default() -> Self {
        Self::new("dial unix /run/user/1000/bus: connect: no such file or directory")
    }
}

impl SecretStore for UnavailableSecretStore {
    fn set(&self, _account: &str, _secret: &str) -> Result<(), SecretStoreError> {
        Err(SecretStoreError::backend(self.message.clone()))
    }

    fn get(&self, _account: &str) -> Result<String, SecretStoreError> {
        Err(SecretStoreError::backend(self.message.clone()))
    }
}

/// Secret store that is reachable but fails every call with `message`.
#[derive(Debug, Clone)]
pub struct FailingSecretStore {
    message: String,
}

impl FailingSecretStore {
    /// Fail every call with `message`, which should not classify as unavailable.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl SecretStore for FailingSecretStore {
    fn set(&self, _account: &str, _secret: &str) -> Result<(), SecretStoreError> {
        Err(SecretStoreError::backend(self.message.clone()))
    }

    fn get(&self, _account: &str) -> Result<String, SecretStoreError> {
        Err(SecretStoreError::backend(self.message.clone()))
    }
}

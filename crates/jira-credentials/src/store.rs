//! The credential store: host configuration plus per-host tokens.
//!
//! Tokens go to the OS secret store first. When that store cannot be reached
//! (see [`is_secret_store_unavailable`]) they go to an owner-only JSON file in
//! the same directory as `config.json`. Nothing is cached: every load reads
//! storage again.
//!
//! # Example
//!
//! ```no_run
//! use jira_credentials::CredentialStore;
//!
//! # fn main() -> jira_credentials::Result<()> {
//! let store = CredentialStore::new()?;
//! store.save_config("jira.example.com")?;
//! store.save_token("jira.example.com", "secret-token")?;
//!
//! let host = store.load_config()?;
//! let token = store.load_token(&host)?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

use crate::classify::is_secret_store_unavailable;
use crate::config::{CONFIG_FILE_NAME, HostConfig};
use crate::error::{Error, Result};
use crate::secret::{KeyringSecretStore, SecretStore, SecretStoreError};
use crate::token_file::{TOKEN_FILE_NAME, TokenFile};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the application directory under the user config directory.
pub const APP_DIR_NAME: &str = "jira-cli";

/// Where [`CredentialStore::save_token`] put the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLocation {
    /// The OS secret store accepted the token.
    SecretStore,
    /// The secret store was unreachable; the token is in the fallback file.
    FallbackFile,
}

/// Reads and writes the host configuration and per-host tokens.
pub struct CredentialStore {
    dir: PathBuf,
    secrets: Box<dyn SecretStore>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("dir", &self.dir)
            .field("secrets", &"<dyn SecretStore>")
            .finish()
    }
}

impl CredentialStore {
    /// Store rooted at `<user config dir>/jira-cli`, using the OS keychain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigDirUnavailable`] if the platform has no user
    /// configuration directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(
            default_config_dir()?,
            Box::new(KeyringSecretStore::default()),
        ))
    }

    /// Store rooted at `dir`, using `secrets` as the secret store.
    pub fn with_parts(dir: impl Into<PathBuf>, secrets: Box<dyn SecretStore>) -> Self {
        Self {
            dir: dir.into(),
            secrets,
        }
    }

    /// Directory holding `config.json` and the fallback token file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `config.json`.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Path of the fallback token file.
    pub fn token_file_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE_NAME)
    }

    fn token_file(&self) -> TokenFile {
        TokenFile::new(self.token_file_path())
    }

    /// Persist `host` as the default host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] for a blank host and
    /// [`Error::ConfigWrite`] if the directory or file cannot be written.
    pub fn save_config(&self, host: &str) -> Result<()> {
        HostConfig {
            host: host.to_string(),
        }
        .save(&self.config_path())
    }

    /// Read the default host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if nothing was ever saved,
    /// [`Error::ConfigRead`] or [`Error::ConfigParse`] otherwise.
    pub fn load_config(&self) -> Result<String> {
        HostConfig::load(&self.config_path()).map(|config| config.host)
    }

    /// Store `token` for `host`.
    ///
    /// Falls back to the token file only when the secret store is
    /// unreachable; any other secret store failure is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SecretStore`] for secret store failures that are not
    /// "unavailable", or a token file error if the fallback write fails.
    pub fn save_token(&self, host: &str, token: &str) -> Result<TokenLocation> {
        match self.secrets.set(host, token) {
            Ok(()) => {
                debug!(host, "Saved token to secret store");
                Ok(TokenLocation::SecretStore)
            }
            Err(SecretStoreError::Backend { message }) if is_secret_store_unavailable(&message) => {
                warn!(host, reason = %message, "Secret store unavailable, saving token to file");
                self.token_file().save(host, token)?;
                Ok(TokenLocation::FallbackFile)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read the token stored for `host`.
    ///
    /// The secret store is consulted first. The fallback file is read when the
    /// store is unreachable, and also when it is reachable but has no entry
    /// (tokens saved while it was down). In that second case a miss in the
    /// file surfaces the secret store's own not-found error.
    ///
    /// # Errors
    ///
    /// Returns an error for which [`Error::is_not_found`] holds when no token
    /// exists anywhere, [`Error::SecretStore`] for other secret store
    /// failures, or a token file error if the fallback file is unreadable.
    pub fn load_token(&self, host: &str) -> Result<String> {
        match self.secrets.get(host) {
            Ok(token) => Ok(token),
            Err(SecretStoreError::Backend { message }) if is_secret_store_unavailable(&message) => {
                debug!(host, reason = %message, "Secret store unavailable, reading token file");
                self.token_file().load(host)
            }
            Err(SecretStoreError::NoEntry) => {
                debug!(host, "No secret store entry, trying token file");
                self.token_file()
                    .load(host)
                    .map_err(|_| Error::SecretStore(SecretStoreError::NoEntry))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// `<user config dir>/jira-cli`.
///
/// # Errors
///
/// Returns [`Error::ConfigDirUnavailable`] if the platform has no user
/// configuration directory.
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(Error::ConfigDirUnavailable)
}

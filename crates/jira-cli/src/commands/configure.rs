//! Implementation of the `configure` command.
//!
//! Saves the default host and stores the API token for it, in the OS secret
//! store when reachable and in the owner-only fallback file otherwise.

use crate::error::{Error, Result};
use crate::session::normalize_host;
use jira_credentials::{CredentialStore, TokenLocation};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::info;

/// Result of configuring a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureResult {
    /// The normalized host that was saved.
    pub host: String,
    /// Where the token ended up.
    pub location: TokenLocation,
    /// Path of the config file.
    pub config_path: PathBuf,
}

/// Save `host` as the default host and `token` as its credential.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a blank host or token, or a
/// credentials error if either cannot be saved.
pub fn configure(store: &CredentialStore, host: &str, token: &str) -> Result<ConfigureResult> {
    let host = normalize_host(host);
    if host.is_empty() {
        return Err(Error::invalid("host", "must not be empty"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::invalid("token", "must not be empty"));
    }

    store.save_config(&host)?;
    let location = store.save_token(&host, token)?;
    info!(host = %host, ?location, "Configured host");

    Ok(ConfigureResult {
        host,
        location,
        config_path: store.config_path(),
    })
}

/// Read a token from the first line of `reader`.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails.
pub fn read_token<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_credentials::testing::{MemorySecretStore, UnavailableSecretStore};
    use jira_credentials::SecretStore;
    use rstest::rstest;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn store_with(secrets: Box<dyn SecretStore>) -> (TempDir, CredentialStore) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let store = CredentialStore::with_parts(temp.path().join("jira-cli"), secrets);
        (temp, store)
    }

    #[test]
    fn test_configure_saves_host_and_token() {
        let (_temp, store) = store_with(Box::new(MemorySecretStore::new()));

        let result = configure(&store, " https://jira.example.com/ ", "tok\n").unwrap();

        assert_eq!(result.host, "https://jira.example.com");
        assert_eq!(result.location, TokenLocation::SecretStore);
        assert_eq!(result.config_path, store.config_path());
        assert_eq!(store.load_config().unwrap(), "https://jira.example.com");
        assert_eq!(store.load_token("https://jira.example.com").unwrap(), "tok");
    }

    #[test]
    fn test_configure_reports_fallback() {
        let (_temp, store) = store_with(Box::new(UnavailableSecretStore::default()));

        let result = configure(&store, "jira.example.com", "tok").unwrap();

        assert_eq!(result.location, TokenLocation::FallbackFile);
        assert!(store.token_file_path().exists());
    }

    #[rstest]
    #[case::blank_host("  ", "tok", "host")]
    #[case::slash_only("/", "tok", "host")]
    #[case::blank_token("jira.example.com", " \n", "token")]
    fn test_configure_rejects_blank(#[case] host: &str, #[case] token: &str, #[case] field: &str) {
        let (_temp, store) = store_with(Box::new(MemorySecretStore::new()));

        let err = configure(&store, host, token).unwrap_err();

        assert!(matches!(err, Error::InvalidArgument { field: f, .. } if f == field));
        assert!(!store.config_path().exists());
    }

    #[test]
    fn test_read_token_takes_first_line() {
        let token = read_token(Cursor::new("abc123\nignored\n")).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_read_token_empty_input() {
        assert_eq!(read_token(Cursor::new("")).unwrap(), "");
    }
}

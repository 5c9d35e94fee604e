//! Host and token for one invocation.

use crate::client::RestClient;
use crate::error::{Error, Result};
use jira_credentials::CredentialStore;
use std::fmt;
use tracing::debug;

/// Environment variable naming the Jira host.
pub const HOST_ENV: &str = "JIRA_HOST";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "JIRA_TOKEN";

/// Strip surrounding whitespace and trailing slashes from a host argument.
///
/// A scheme, if given, is kept.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

/// Resolved connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    host: String,
    token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Session {
    /// Build a session from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if either value is blank.
    pub fn new(host: &str, token: impl Into<String>) -> Result<Self> {
        let host = normalize_host(host);
        let token = token.into();
        if host.is_empty() {
            return Err(Error::NotConfigured("host"));
        }
        if token.trim().is_empty() {
            return Err(Error::NotConfigured("token"));
        }
        Ok(Self { host, token })
    }

    /// Resolve the session, preferring explicit values over the store.
    ///
    /// `host` and `token` are what the caller got from flags or the
    /// environment; blank values count as absent. The host falls back to the
    /// configured default host and the token to the one stored for the
    /// resolved host. `open_store` is only called when one of the two is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credentials`] when the store cannot be opened or a
    /// value has to come from it and cannot be loaded.
    pub fn resolve<F>(host: Option<String>, token: Option<String>, open_store: F) -> Result<Self>
    where
        F: FnOnce() -> jira_credentials::Result<CredentialStore>,
    {
        let (host, token) = (non_blank(host), non_blank(token));
        if let (Some(host), Some(token)) = (&host, &token) {
            return Self::new(host, token.clone());
        }

        let store = open_store()?;
        let host = match host {
            Some(host) => host,
            None => {
                debug!("No host given, using configured host");
                store.load_config()?
            }
        };
        let host = normalize_host(&host);

        let token = match token {
            Some(token) => token,
            None => {
                debug!(host = %host, "No token given, loading stored token");
                store.load_token(&host)?
            }
        };

        Self::new(&host, token)
    }

    /// The Jira host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build an API client for this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not a usable base URL.
    pub fn client(&self) -> Result<RestClient> {
        RestClient::new(&self.host, self.token.clone())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_credentials::testing::MemorySecretStore;
    use rstest::rstest;
    use tempfile::TempDir;

    fn store() -> (TempDir, CredentialStore) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let store =
            CredentialStore::with_parts(temp.path().join("jira-cli"), Box::new(MemorySecretStore::new()));
        (temp, store)
    }

    #[rstest]
    #[case::plain("jira.example.com", "jira.example.com")]
    #[case::whitespace("  jira.example.com \n", "jira.example.com")]
    #[case::trailing_slashes("https://jira.example.com//", "https://jira.example.com")]
    #[case::context_path("https://example.com/jira/", "https://example.com/jira")]
    fn test_normalize_host(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_host(input), expected);
    }

    #[test]
    fn test_explicit_values_win() {
        let (_temp, store) = store();
        store.save_config("stored.example.com").unwrap();
        store.save_token("stored.example.com", "stored-token").unwrap();

        let session = Session::resolve(
            Some("flag.example.com/".to_string()),
            Some("flag-token".to_string()),
            move || Ok(store),
        )
        .unwrap();

        assert_eq!(session, Session::new("flag.example.com", "flag-token").unwrap());
    }

    #[test]
    fn test_falls_back_to_store() {
        let (_temp, store) = store();
        store.save_config("stored.example.com").unwrap();
        store.save_token("stored.example.com", "stored-token").unwrap();

        let session = Session::resolve(None, Some(String::new()), move || Ok(store)).unwrap();

        assert_eq!(session.host(), "stored.example.com");
        assert_eq!(session, Session::new("stored.example.com", "stored-token").unwrap());
    }

    #[test]
    fn test_token_is_looked_up_for_explicit_host() {
        let (_temp, store) = store();
        store.save_token("other.example.com", "other-token").unwrap();

        let session =
            Session::resolve(Some("other.example.com".to_string()), None, move || Ok(store)).unwrap();

        assert_eq!(session, Session::new("other.example.com", "other-token").unwrap());
    }

    #[test]
    fn test_unconfigured_reports_not_found() {
        let (_temp, store) = store();
        let err = Session::resolve(None, None, move || Ok(store)).unwrap_err();

        match err {
            Error::Credentials(inner) => assert!(inner.is_not_found()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_token_reports_not_found() {
        let (_temp, store) = store();
        store.save_config("jira.example.com").unwrap();

        let err = Session::resolve(None, None, move || Ok(store)).unwrap_err();
        assert!(matches!(err, Error::Credentials(ref inner) if inner.is_not_found()));
        assert!(err.to_string().contains("jira configure"));
    }

    #[test]
    fn test_explicit_values_do_not_open_store() {
        let session = Session::resolve(
            Some("jira.example.com".to_string()),
            Some("tok".to_string()),
            || Err(jira_credentials::Error::ConfigDirUnavailable),
        )
        .unwrap();

        assert_eq!(session, Session::new("jira.example.com", "tok").unwrap());
    }

    #[test]
    fn test_missing_value_needs_store() {
        let err = Session::resolve(Some("jira.example.com".to_string()), None, || {
            Err(jira_credentials::Error::ConfigDirUnavailable)
        })
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Credentials(jira_credentials::Error::ConfigDirUnavailable)
        ));
    }

    #[rstest]
    #[case::blank_host("  ", "t", "host")]
    #[case::blank_token("jira.example.com", " ", "token")]
    fn test_new_rejects_blank(#[case] host: &str, #[case] token: &str, #[case] what: &str) {
        let err = Session::new(host, token).unwrap_err();
        assert!(matches!(err, Error::NotConfigured(w) if w == what));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("jira.example.com", "very-secret").unwrap();
        let debug = format!("{session:?}");
        assert!(debug.contains("jira.example.com"));
        assert!(!debug.contains("very-secret"));
    }
}

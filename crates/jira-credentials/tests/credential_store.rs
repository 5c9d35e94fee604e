//! Integration tests for the credential store.
//!
//! These run against a fresh temporary storage root and in-memory or
//! unavailable secret stores, never the real OS keychain.

use jira_credentials::testing::{MemorySecretStore, UnavailableSecretStore};
use jira_credentials::{APP_DIR_NAME, CredentialStore, Error, SecretStore, TokenLocation};
use proptest::prelude::*;
use rstest::rstest;
use std::collections::BTreeMap;
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

struct Storage {
    _temp: TempDir,
    store: CredentialStore,
}

fn storage_with(secrets: Box<dyn SecretStore>) -> Storage {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let store = CredentialStore::with_parts(temp.path().join(APP_DIR_NAME), secrets);
    Storage { _temp: temp, store }
}

/// Store whose secret store is unreachable, so every token goes to the file.
fn file_backed() -> Storage {
    storage_with(Box::new(UnavailableSecretStore::default()))
}

/// Store with a working in-memory secret store.
fn keyring_backed() -> Storage {
    storage_with(Box::new(MemorySecretStore::new()))
}

// ============================================================================
// Round trips
// ============================================================================

#[rstest]
#[case::file(file_backed(), TokenLocation::FallbackFile)]
#[case::keyring(keyring_backed(), TokenLocation::SecretStore)]
fn test_token_round_trip(#[case] storage: Storage, #[case] expected: TokenLocation) {
    let location = storage
        .store
        .save_token("jira.example.com", "MDM0NTY3ODkwOnRva2Vu")
        .unwrap();

    assert_eq!(location, expected);
    assert_eq!(
        storage.store.load_token("jira.example.com").unwrap(),
        "MDM0NTY3ODkwOnRva2Vu"
    );
}

#[rstest]
#[case::file(file_backed())]
#[case::keyring(keyring_backed())]
fn test_saving_same_token_twice_is_idempotent(#[case] storage: Storage) {
    storage.store.save_token("jira.example.com", "tok").unwrap();
    storage.store.save_token("jira.example.com", "tok").unwrap();

    assert_eq!(storage.store.load_token("jira.example.com").unwrap(), "tok");
}

#[test]
fn test_idempotent_save_does_not_grow_file() {
    let file_backed = file_backed();
    file_backed.store.save_token("jira.example.com", "tok").unwrap();
    file_backed.store.save_token("jira.example.com", "tok").unwrap();

    let raw: BTreeMap<String, String> = serde_json::from_str(
        &std::fs::read_to_string(file_backed.store.token_file_path()).unwrap(),
    )
    .unwrap();
    assert_eq!(raw.len(), 1);
}

#[rstest]
#[case::file(file_backed())]
#[case::keyring(keyring_backed())]
fn test_missing_token_is_not_found_class(#[case] storage: Storage) {
    let err = storage.store.load_token("nobody.example.com").unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got {err:?}");
    assert!(!matches!(
        err,
        Error::TokenFileRead { .. } | Error::TokenFileParse { .. }
    ));
}

#[test]
fn test_configure_flow() {
    let keyring_backed = keyring_backed();
    keyring_backed.store.save_config("jira.example.com").unwrap();
    keyring_backed
        .store
        .save_token("jira.example.com", "tok")
        .unwrap();

    let host = keyring_backed.store.load_config().unwrap();
    assert_eq!(keyring_backed.store.load_token(&host).unwrap(), "tok");
}

#[test]
fn test_token_saved_while_keyring_down_is_found_once_it_is_back() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(APP_DIR_NAME);

    let offline = CredentialStore::with_parts(&dir, Box::new(UnavailableSecretStore::default()));
    offline.save_token("jira.example.com", "offline-token").unwrap();

    let online = CredentialStore::with_parts(&dir, Box::new(MemorySecretStore::new()));
    assert_eq!(online.load_token("jira.example.com").unwrap(), "offline-token");
}

// ============================================================================
// Permissions
// ============================================================================

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn mode(path: &Path) -> u32 {
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_config_file_and_dir_are_owner_only() {
        let keyring_backed = keyring_backed();
        keyring_backed.store.save_config("jira.example.com").unwrap();

        assert_eq!(mode(keyring_backed.store.dir()), 0o700);
        assert_eq!(mode(&keyring_backed.store.config_path()), 0o600);
    }

    #[test]
    fn test_token_file_and_dir_are_owner_only() {
        let file_backed = file_backed();
        file_backed.store.save_token("jira.example.com", "tok").unwrap();

        assert_eq!(mode(file_backed.store.dir()), 0o700);
        assert_eq!(mode(&file_backed.store.token_file_path()), 0o600);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn host_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}\\.example\\.com"
}

fn token_strategy() -> impl Strategy<Value = String> {
    // Any unicode except newlines, including quotes and backslashes.
    ".{0,64}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_fallback_save_preserves_other_hosts(
        h1 in host_strategy(),
        h2 in host_strategy(),
        t1 in token_strategy(),
        t2 in token_strategy(),
    ) {
        prop_assume!(h1 != h2);
        let storage = file_backed();

        storage.store.save_token(&h2, &t2).unwrap();
        storage.store.save_token(&h1, &t1).unwrap();

        prop_assert_eq!(storage.store.load_token(&h2).unwrap(), t2);
        prop_assert_eq!(storage.store.load_token(&h1).unwrap(), t1);
    }

    #[test]
    fn prop_token_round_trips_byte_for_byte(host in host_strategy(), token in token_strategy()) {
        for storage in [file_backed(), keyring_backed()] {
            storage.store.save_token(&host, &token).unwrap();
            prop_assert_eq!(storage.store.load_token(&host).unwrap(), token.clone());
        }
    }

    #[test]
    fn prop_latest_save_wins(host in host_strategy(), tokens in prop::collection::vec(token_strategy(), 1..5)) {
        let storage = file_backed();
        for token in &tokens {
            storage.store.save_token(&host, token).unwrap();
        }

        prop_assert_eq!(&storage.store.load_token(&host).unwrap(), tokens.last().unwrap());
    }
}

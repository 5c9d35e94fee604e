//! Secret store unavailability heuristic.
//!
//! Platform vaults report "I can't be reached" through free-form messages
//! (no D-Bus session on a headless Linux box, a socket that refuses
//! connections, ...). There is no typed error for it, so the decision is made
//! on the message text against [`UNAVAILABLE_MARKERS`]. Add phrasings to the
//! table; call sites only ever use [`is_secret_store_unavailable`].

/// Lower-case substrings that mark a secret store error as "unreachable".
///
/// Matching is case-insensitive. Entries:
///
/// - `dbus`, `d-bus`, `zbus`: no session bus, or the bus client failed
/// - `cannot autolaunch`: D-Bus refused to autolaunch a daemon without X11
/// - `secret service`, `secret-service`, `org.freedesktop.secrets`: no
///   provider of the Secret Service API is running
/// - `dial unix`: the bus socket could not be dialled
/// - `connection refused`, `permission denied`: local socket rejected us
/// - `couldn't access platform secure storage`: keyring's own "no storage
///   access" wording
pub const UNAVAILABLE_MARKERS: &[&str] = &[
    "dbus",
    "d-bus",
    "zbus",
    "cannot autolaunch",
    "secret service",
    "secret-service",
    "org.freedesktop.secrets",
    "dial unix",
    "connection refused",
    "permission denied",
    "couldn't access platform secure storage",
];

/// Whether a secret store error message means the store cannot be reached.
///
/// This is a best-effort heuristic: a `true` answer sends the caller to the
/// fallback token file, a `false` answer surfaces the error unchanged.
#[must_use]
pub fn is_secret_store_unavailable(message: &str) -> bool {
    let message = message.to_lowercase();
    UNAVAILABLE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::dbus("failed to connect to dbus")]
    #[case::dbus_camel("DBus connection failed")]
    #[case::d_bus("D-Bus error: org.freedesktop.DBus.Error.ServiceUnknown")]
    #[case::zbus("zbus error: I/O error")]
    #[case::autolaunch("Cannot autolaunch D-Bus without X11 $DISPLAY")]
    #[case::secret_service("secret service not available")]
    #[case::secret_service_hyphen("secret-service: no provider")]
    #[case::freedesktop("org.freedesktop.secrets was not provided by any .service files")]
    #[case::dial_unix("dial unix /run/user/0/bus: connect: no such file or directory")]
    #[case::connection_refused("Connection refused (os error 111)")]
    #[case::permission_denied("dial unix /run/user/0/bus: connect: permission denied")]
    #[case::no_storage_access("Couldn't access platform secure storage: locked")]
    fn test_unavailable_messages(#[case] message: &str) {
        assert!(
            is_secret_store_unavailable(message),
            "expected '{message}' to be classified unavailable"
        );
    }

    #[rstest]
    #[case::invalid_token("invalid token format")]
    #[case::unrelated("some other error")]
    #[case::empty("")]
    #[case::too_long("Attribute 'password' is longer than platform limit of 2560 chars")]
    fn test_available_messages(#[case] message: &str) {
        assert!(!is_secret_store_unavailable(message));
    }

    #[test]
    fn test_every_marker_is_lowercase_and_classified() {
        for marker in UNAVAILABLE_MARKERS {
            assert_eq!(*marker, marker.to_lowercase());
            assert!(is_secret_store_unavailable(marker));
            assert!(is_secret_store_unavailable(&marker.to_uppercase()));
        }
    }

    #[test]
    fn test_marker_table_is_exactly_enumerated() {
        assert_eq!(
            UNAVAILABLE_MARKERS,
            &[
                "dbus",
                "d-bus",
                "zbus",
                "cannot autolaunch",
                "secret service",
                "secret-service",
                "org.freedesktop.secrets",
                "dial unix",
                "connection refused",
                "permission denied",
                "couldn't access platform secure storage",
            ]
        );
    }
}

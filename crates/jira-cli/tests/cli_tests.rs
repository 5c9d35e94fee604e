//! Integration tests for the jira binary.
//!
//! These run the real executable for behaviour that does not need a Jira
//! server: help, version, argument validation and missing credentials.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::run_jira;

/// Provides a fresh temporary config home for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let output = run_jira(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    for command in [
        "configure",
        "get-issue",
        "get-comments",
        "add-comment",
        "update-status",
        "create-issue",
        "search",
        "assign",
        "add-to-sprint",
        "attach",
    ] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_jira(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Argument Validation Tests
// ============================================================================

#[rstest]
#[case::bad_key(&["get-issue", "-k", "PROJ"])]
#[case::missing_key(&["get-comments"])]
#[case::unknown_command(&["frobnicate"])]
#[case::sprint_without_keys(&["add-to-sprint", "7"])]
fn test_invalid_arguments_fail(temp_dir: TempDir, #[case] args: &[&str]) {
    let output = run_jira(temp_dir.path(), args);

    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

// ============================================================================
// Credential Resolution Tests
// ============================================================================

// `dirs::config_dir` honours XDG_CONFIG_HOME only on Linux.
#[cfg(target_os = "linux")]
#[rstest]
fn test_unconfigured_host_points_at_configure(temp_dir: TempDir) {
    let output = run_jira(temp_dir.path(), &["get-issue", "-k", "PROJ-1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("jira configure"), "stderr: {stderr}");
}

#[cfg(target_os = "linux")]
#[rstest]
fn test_configure_rejects_empty_token(temp_dir: TempDir) {
    let output = run_jira(temp_dir.path(), &["configure", "jira.example.com"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("token"), "stderr: {stderr}");
    assert!(!temp_dir.path().join("jira-cli").join("config.json").exists());
}

//! Common test utilities shared across integration tests.

use std::path::Path;
use std::process::{Command, Output};

/// Run the `jira` binary with a private config home and no `JIRA_*` variables.
pub fn run_jira(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jira"))
        .args(args)
        .env_remove("JIRA_HOST")
        .env_remove("JIRA_TOKEN")
        .env_remove("JIRA_ISSUE_KEY")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute jira binary")
}

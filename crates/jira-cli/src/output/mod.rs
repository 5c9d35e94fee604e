//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or pretty JSON
//! (`--json`). Text printers write to any [`Write`] so they can be tested
//! without a terminal.

pub mod color;

use crate::commands::configure::ConfigureResult;
use crate::domain::{Attachment, Comment, CreatedIssue, Issue, User};
use crate::ops::{IssueDetails, StatusChange};
use chrono::{DateTime, Local, TimeZone};
use color::{bold, colorize_key, colorize_status, dimmed, success, warning};
use jira_credentials::TokenLocation;
use serde::Serialize;
use serde_json::json;
use std::env;
use std::fmt::Display;
use std::io::{self, Write};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Timestamp layout used by the service, e.g. `2024-03-01T10:15:30.000+0000`.
const SERVICE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Configuration for text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from the environment.
    ///
    /// Reads:
    /// - `JIRA_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("JIRA_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "JIRA_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        // https://no-color.org/
        let use_colors = env::var_os("NO_COLOR").is_none();

        Self {
            max_width,
            use_colors,
        }
    }

    fn content_width(&self) -> usize {
        terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_WIDTH, true)
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

fn dispatch<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text: impl FnOnce(&mut io::StdoutLock<'static>, &OutputConfig) -> io::Result<()>,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(value),
        OutputMode::Text => {
            let mut handle = io::stdout().lock();
            text(&mut handle, &OutputConfig::from_env())
        }
    }
}

/// Print an issue with its displayable custom fields.
pub fn print_issue_details(details: &IssueDetails, mode: OutputMode) -> io::Result<()> {
    dispatch(mode, details, |w, config| {
        write_issue_details(w, details, config.content_width(), config)
    })
}

/// Print the comments on an issue.
pub fn print_comments(key: &str, comments: &[Comment], mode: OutputMode) -> io::Result<()> {
    let value = json!({ "key": key, "comments": comments });
    dispatch(mode, &value, |w, config| {
        write_comments(w, key, comments, config.content_width(), config)
    })
}

/// Print search results.
pub fn print_issues(issues: &[Issue], mode: OutputMode) -> io::Result<()> {
    dispatch(mode, &issues, |w, config| write_issues(w, issues, config))
}

/// Print the outcome of a status update.
pub fn print_status_change(
    key: &str,
    status: &str,
    change: &StatusChange,
    mode: OutputMode,
) -> io::Result<()> {
    let value = json!({
        "key": key,
        "status": status,
        "change": change,
        "message": change.message(key, status),
    });
    dispatch(mode, &value, |w, config| {
        let message = change.message(key, status);
        match change {
            StatusChange::AlreadyInStatus => writeln!(w, "{}", warning(&message, config)),
            StatusChange::Transitioned { .. } => writeln!(w, "{}", success(&message, config)),
        }
    })
}

/// Print a newly added comment.
pub fn print_comment_added(key: &str, comment: &Comment, mode: OutputMode) -> io::Result<()> {
    let value = json!({ "key": key, "comment": comment });
    dispatch(mode, &value, |w, config| {
        writeln!(
            w,
            "{}",
            success(&format!("Comment added to issue {key}"), config)
        )
    })
}

/// Print a newly created issue.
pub fn print_created(created: &CreatedIssue, host: &str, mode: OutputMode) -> io::Result<()> {
    let url = browse_url(host, &created.key);
    let value = json!({ "id": created.id, "key": created.key, "url": url });
    dispatch(mode, &value, |w, config| {
        writeln!(
            w,
            "{} {}",
            success("Created issue", config),
            colorize_key(&created.key, config)
        )?;
        writeln!(w, "  {}", dimmed(&url, config))
    })
}

/// Print the outcome of an assignment.
pub fn print_assigned(key: &str, assignee: Option<&str>, mode: OutputMode) -> io::Result<()> {
    let value = json!({ "key": key, "assignee": assignee });
    dispatch(mode, &value, |w, config| {
        let message = match assignee {
            Some(user) => format!("Assigned issue {key} to {user}"),
            None => format!("Unassigned issue {key}"),
        };
        writeln!(w, "{}", success(&message, config))
    })
}

/// Print the outcome of adding issues to a sprint.
pub fn print_sprint_added(sprint_id: u64, keys: &[String], mode: OutputMode) -> io::Result<()> {
    let value = json!({ "sprint_id": sprint_id, "issues": keys });
    dispatch(mode, &value, |w, config| {
        writeln!(
            w,
            "{}",
            success(
                &format!("Added {} issue(s) to sprint {sprint_id}: {}", keys.len(), keys.join(", ")),
                config
            )
        )
    })
}

/// Print uploaded attachments.
pub fn print_attachments(key: &str, attachments: &[Attachment], mode: OutputMode) -> io::Result<()> {
    let value = json!({ "key": key, "attachments": attachments });
    dispatch(mode, &value, |w, config| {
        for attachment in attachments {
            writeln!(
                w,
                "{} {} ({} bytes) to {}",
                success("Attached", config),
                attachment.filename,
                attachment.size,
                colorize_key(key, config)
            )?;
        }
        Ok(())
    })
}

/// Print the outcome of `configure`.
pub fn print_configured(result: &ConfigureResult, mode: OutputMode) -> io::Result<()> {
    let location = match result.location {
        TokenLocation::SecretStore => "secret_store",
        TokenLocation::FallbackFile => "fallback_file",
    };
    let value = json!({
        "host": result.host,
        "token_location": location,
        "config_path": result.config_path.display().to_string(),
    });
    dispatch(mode, &value, |w, config| {
        writeln!(w, "{}", success(&format!("Configured {}", result.host), config))?;
        writeln!(w, "  {} {}", dimmed("Config:", config), result.config_path.display())?;
        match result.location {
            TokenLocation::SecretStore => {
                writeln!(w, "  {} system secret store", dimmed("Token:", config))
            }
            TokenLocation::FallbackFile => writeln!(
                w,
                "  {} {}",
                dimmed("Token:", config),
                warning(
                    "secret store unavailable; saved to the owner-only token file instead",
                    config
                )
            ),
        }
    })
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn browse_url(host: &str, key: &str) -> String {
    if host.contains("://") {
        format!("{host}/browse/{key}")
    } else {
        format!("https://{host}/browse/{key}")
    }
}

fn user_label(user: &User) -> String {
    match (user.display_name.is_empty(), user.name.is_empty()) {
        (false, false) => format!("{} ({})", user.display_name, user.name),
        (false, true) => user.display_name.clone(),
        (true, false) => user.name.clone(),
        (true, true) => "unknown".to_string(),
    }
}

fn write_field<W: Write>(w: &mut W, label: &str, value: &str, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "  {} {value}", dimmed(&format!("{label}:"), config))
}

fn write_issue_details<W: Write>(
    w: &mut W,
    details: &IssueDetails,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    let issue = &details.issue;
    writeln!(
        w,
        "{} {}",
        colorize_key(&issue.key, config),
        bold(&issue.summary, config)
    )?;
    writeln!(w)?;
    write_field(w, "Status", &colorize_status(&issue.status, config), config)?;
    if let Some(issue_type) = &issue.issue_type {
        write_field(w, "Type", issue_type, config)?;
    }
    if let Some(reporter) = &issue.reporter {
        write_field(w, "Reporter", &user_label(reporter), config)?;
    }
    let assignee = issue
        .assignee
        .as_ref()
        .map_or_else(|| "Unassigned".to_string(), user_label);
    write_field(w, "Assignee", &assignee, config)?;

    if !details.custom_fields.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Custom fields:", config))?;
        for field in &details.custom_fields {
            write_field(w, &field.label, &field.value, config)?;
        }
    }

    if let Some(description) = issue.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writeln!(w)?;
        writeln!(w, "{}", bold("Description:", config))?;
        for line in wrap_text(description, width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }

    Ok(())
}

fn write_comments<W: Write>(
    w: &mut W,
    key: &str,
    comments: &[Comment],
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if comments.is_empty() {
        return writeln!(w, "No comments on {}.", colorize_key(key, config));
    }

    writeln!(
        w,
        "{} comment(s) on {}:",
        comments.len(),
        colorize_key(key, config)
    )?;
    for comment in comments {
        writeln!(w)?;
        let when = comment
            .created
            .as_deref()
            .map(|raw| format_timestamp(raw, &Local))
            .unwrap_or_default();
        writeln!(
            w,
            "{} {}",
            bold(&user_label(&comment.author), config),
            dimmed(&when, config)
        )?;
        for line in wrap_text(&comment.body, width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }
    Ok(())
}

fn write_issues<W: Write>(w: &mut W, issues: &[Issue], config: &OutputConfig) -> io::Result<()> {
    if issues.is_empty() {
        return writeln!(w, "No issues found.");
    }

    writeln!(w, "Found {} issue(s):", issues.len())?;
    writeln!(w)?;

    let key_width = issues.iter().map(|i| i.key.len()).max().unwrap_or(0);
    let status_width = issues.iter().map(|i| i.status.len()).max().unwrap_or(0);
    for issue in issues {
        // Pad before coloring so escape codes do not skew the columns.
        let key = format!("{:key_width$}", issue.key);
        let status = format!("{:status_width$}", issue.status);
        writeln!(
            w,
            "{}  {}  {}",
            colorize_key(&key, config),
            colorize_status(&status, config),
            issue.summary
        )?;
    }
    Ok(())
}

/// Render a service timestamp in `tz` as `YYYY-MM-DD HH:MM`.
///
/// Unparseable input is returned unchanged.
fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::parse_from_str(raw, SERVICE_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map_or_else(
            |_| raw.to_string(),
            |dt| dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        )
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

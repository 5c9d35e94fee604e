//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green   (done-like statuses, completed actions)
//!   - Active:         yellow  (in-progress-like statuses)
//!   - Error/Blocked:  red     (blocked statuses, failures)
//!   - Reference:      cyan    (issue keys)
//!   - Muted:          dimmed  (field labels, timestamps)
//!   - Emphasis:       bold    (section headers, summaries)

use super::OutputConfig;
use colored::Colorize;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Broad grouping of workflow status names, used only for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusTone {
    Done,
    Active,
    Blocked,
    Neutral,
}

impl StatusTone {
    pub(crate) fn of(status: &str) -> Self {
        let lower = status.to_ascii_lowercase();
        if ["done", "closed", "resolved", "complete"]
            .iter()
            .any(|word| lower.contains(word))
        {
            Self::Done
        } else if ["blocked", "impeded", "rejected"]
            .iter()
            .any(|word| lower.contains(word))
        {
            Self::Blocked
        } else if ["progress", "review", "testing"]
            .iter()
            .any(|word| lower.contains(word))
        {
            Self::Active
        } else {
            Self::Neutral
        }
    }
}

/// Color a workflow status name by its tone.
pub(crate) fn colorize_status(status: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return status.to_string();
    }
    match StatusTone::of(status) {
        StatusTone::Done => status.green().to_string(),
        StatusTone::Active => status.yellow().to_string(),
        StatusTone::Blocked => status.red().to_string(),
        StatusTone::Neutral => status.white().to_string(),
    }
}

/// Colorize an issue key (cyan).
pub(crate) fn colorize_key(key: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return key.to_string();
    }
    key.cyan().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

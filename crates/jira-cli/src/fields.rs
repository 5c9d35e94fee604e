//! Custom field decoding and filtering for display.
//!
//! Custom field values arrive as arbitrary JSON. Only plain scalars print
//! sensibly on one line, and only fields the user can edit are interesting
//! next to the core issue fields.

use crate::domain::{EditMetadata, Issue};
use serde::Serialize;
use serde_json::{Number, Value};

/// A custom field value, decoded by JSON kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `null`, i.e. the field is unset.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept as JSON wrote it.
    Number(Number),
    /// A string.
    String(String),
    /// An object or array (option sets, users, sprints, ...).
    Composite,
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Composite,
        }
    }
}

impl FieldValue {
    /// Whether the value is a JSON scalar (null, bool, number or string).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Composite)
    }

    /// One-line rendering of a set scalar; `None` for null and composites.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::Composite => None,
        }
    }
}

/// A custom field ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    /// Field key, e.g. `customfield_10002`.
    pub key: String,
    /// Human-readable name from the edit metadata, or the key.
    pub label: String,
    /// Rendered value.
    pub value: String,
}

/// Custom fields of `issue` that are editable and hold a set scalar value.
///
/// Ordered by field key.
#[must_use]
pub fn displayable_custom_fields(issue: &Issue, edit_metadata: &EditMetadata) -> Vec<DisplayField> {
    issue
        .custom_fields
        .iter()
        .filter_map(|(key, raw)| {
            let descriptor = edit_metadata.get(key)?;
            let value = FieldValue::from(raw).render()?;
            let label = if descriptor.name.is_empty() {
                key.clone()
            } else {
                descriptor.name.clone()
            };
            Some(DisplayField {
                key: key.clone(),
                label,
                value,
            })
        })
        .collect()
}

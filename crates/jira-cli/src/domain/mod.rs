//! Core domain types for Jira issues.
//!
//! These are the shapes the rest of the crate works with. The client module
//! maps the service's JSON onto them; the output module and the MCP server
//! render them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Issue type used by `create-issue` when none is given.
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Prefix of custom field keys in the issue `fields` object.
pub const CUSTOM_FIELD_PREFIX: &str = "customfield_";

/// A Jira user as it appears on issues and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Human-readable name, e.g. "Alice Smith".
    #[serde(rename = "displayName", alias = "display_name", default)]
    pub display_name: String,

    /// Login name, e.g. "asmith". Empty on instances that do not expose it.
    #[serde(default)]
    pub name: String,
}

/// An issue as fetched from the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key, e.g. `PROJ-123`.
    pub key: String,

    /// Name of the current workflow status, e.g. "In Progress".
    pub status: String,

    /// One-line summary.
    pub summary: String,

    /// Free-form description, if any.
    pub description: Option<String>,

    /// Issue type name, e.g. "Bug".
    pub issue_type: Option<String>,

    /// Who reported the issue.
    pub reporter: Option<User>,

    /// Who the issue is assigned to.
    pub assignee: Option<User>,

    /// Raw `customfield_*` values keyed by field key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment author.
    pub author: User,

    /// Comment text.
    pub body: String,

    /// Creation timestamp as returned by the service.
    pub created: Option<String>,
}

/// A workflow transition currently available on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Opaque id passed back to the service to perform the transition.
    pub id: String,

    /// The transition's own label, e.g. "Start Progress".
    pub name: String,

    /// Name of the status the transition leads to, e.g. "In Progress".
    pub to_status: String,
}

impl Transition {
    /// Create a transition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, to_status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            to_status: to_status.into(),
        }
    }
}

/// Data for creating a new issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    /// Project key, e.g. `PROJ`.
    pub project: String,

    /// One-line summary.
    pub summary: String,

    /// Description (may be empty).
    pub description: String,

    /// Issue type name, e.g. "Task".
    pub issue_type: String,

    /// Login name of the assignee.
    pub assignee: Option<String>,
}

/// Identifiers of a freshly created issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Numeric id as a string.
    pub id: String,

    /// Issue key, e.g. `PROJ-124`.
    pub key: String,
}

/// An attachment stored on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment id.
    pub id: String,

    /// File name as stored by the service.
    pub filename: String,

    /// Size in bytes.
    pub size: u64,
}

/// Descriptor of one editable field from the edit metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Human-readable field name, e.g. "Story Points".
    #[serde(default)]
    pub name: String,
}

/// Fields the current user may edit on an issue, keyed by field key.
pub type EditMetadata = BTreeMap<String, FieldDescriptor>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_service_shape() {
        let user: User =
            serde_json::from_str(r#"{"displayName": "Alice Smith", "name": "asmith", "active": true}"#)
                .unwrap();

        assert_eq!(user.display_name, "Alice Smith");
        assert_eq!(user.name, "asmith");
    }

    #[test]
    fn test_user_without_name_defaults_empty() {
        let user: User = serde_json::from_str(r#"{"displayName": "Alice"}"#).unwrap();
        assert!(user.name.is_empty());
    }

    #[test]
    fn test_issue_json_omits_empty_custom_fields() {
        let issue = Issue {
            key: "PROJ-1".to_string(),
            status: "To Do".to_string(),
            summary: "Fix it".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("custom_fields").is_none());
        assert_eq!(json["key"], "PROJ-1");
    }

    #[test]
    fn test_transition_new() {
        let transition = Transition::new("21", "Start Progress", "In Progress");
        assert_eq!(transition.id, "21");
        assert_eq!(transition.name, "Start Progress");
        assert_eq!(transition.to_status, "In Progress");
    }
}

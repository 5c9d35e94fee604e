//! JSON shapes of REST API requests and responses.
//!
//! Only the parts the crate uses are modelled; everything else is ignored on
//! decode.

use crate::domain::{
    Attachment, CUSTOM_FIELD_PREFIX, Comment, CreatedIssue, EditMetadata, FieldDescriptor, Issue,
    NewIssue, Transition, User,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        let mut fields = raw.fields;
        let custom_fields = fields
            .iter()
            .filter(|(key, _)| key.starts_with(CUSTOM_FIELD_PREFIX))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            key: raw.key,
            status: nested_name(fields.get("status")).unwrap_or_default(),
            summary: string_field(fields.get("summary")).unwrap_or_default(),
            description: string_field(fields.get("description")),
            issue_type: nested_name(fields.get("issuetype")),
            reporter: user_field(fields.remove("reporter")),
            assignee: user_field(fields.remove("assignee")),
            custom_fields,
        }
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn nested_name(value: Option<&Value>) -> Option<String> {
    string_field(value.and_then(|v| v.get("name")))
}

fn user_field(value: Option<Value>) -> Option<User> {
    value
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v).ok())
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComments {
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComment {
    #[serde(default)]
    pub author: User,
    #[serde(default)]
    pub body: String,
    pub created: Option<String>,
}

impl From<RawComment> for Comment {
    fn from(raw: RawComment) -> Self {
        Self {
            author: raw.author,
            body: raw.body,
            created: raw.created,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTransitions {
    #[serde(default)]
    pub transitions: Vec<RawTransition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTransition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub to: RawStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStatus {
    pub name: String,
}

impl From<RawTransition> for Transition {
    fn from(raw: RawTransition) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            to_status: raw.to.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSearch {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCreated {
    pub id: String,
    pub key: String,
}

impl From<RawCreated> for CreatedIssue {
    fn from(raw: RawCreated) -> Self {
        Self {
            id: raw.id,
            key: raw.key,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEditMeta {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescriptor>,
}

impl From<RawEditMeta> for EditMetadata {
    fn from(raw: RawEditMeta) -> Self {
        raw.fields
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAttachment {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
}

impl From<RawAttachment> for Attachment {
    fn from(raw: RawAttachment) -> Self {
        Self {
            id: raw.id,
            filename: raw.filename,
            size: raw.size,
        }
    }
}

/// Error body returned by the service on 4xx/5xx.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl RawErrorBody {
    /// Join all messages into one line; empty if the body has none.
    pub fn summary(&self) -> String {
        self.error_messages
            .iter()
            .cloned()
            .chain(self.errors.iter().map(|(field, msg)| format!("{field}: {msg}")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Best-effort extraction of the service's error messages from a body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<RawErrorBody>(body)
        .map(|parsed| parsed.summary())
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub(crate) struct TransitionRequest<'a> {
    pub transition: IdRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub jql: &'a str,
    pub max_results: u32,
    pub fields: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignRequest<'a> {
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SprintIssuesRequest<'a> {
    pub issues: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub fields: CreateIssueFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueFields<'a> {
    pub project: KeyRef<'a>,
    pub summary: &'a str,
    pub description: &'a str,
    pub issuetype: NameRef<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NameRef<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeyRef<'a> {
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRef<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a NewIssue> for CreateIssueRequest<'a> {
    fn from(issue: &'a NewIssue) -> Self {
        Self {
            fields: CreateIssueFields {
                project: KeyRef {
                    key: &issue.project,
                },
                summary: &issue.summary,
                description: &issue.description,
                issuetype: NameRef {
                    name: &issue.issue_type,
                },
                assignee: issue
                    .assignee
                    .as_deref()
                    .map(|name| NameRef { name }),
            },
        }
    }
}

//! In-memory [`JiraApi`] for tests.

use super::JiraApi;
use crate::domain::{
    Attachment, Comment, CreatedIssue, EditMetadata, Issue, NewIssue, Transition, User,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    issues: BTreeMap<String, Issue>,
    transitions: HashMap<String, Vec<Transition>>,
    edit_metadata: HashMap<String, EditMetadata>,
    edit_forbidden: HashSet<String>,
    comments: HashMap<String, Vec<Comment>>,
    applied: Vec<(String, String)>,
    sprints: BTreeMap<u64, Vec<String>>,
    attachments: HashMap<String, Vec<Attachment>>,
    next_id: u64,
}

impl State {
    fn issue_mut(&mut self, operation: &'static str, key: &str) -> Result<&mut Issue> {
        self.issues.get_mut(key).ok_or_else(|| not_found(operation))
    }

    fn require(&self, operation: &'static str, key: &str) -> Result<()> {
        if self.issues.contains_key(key) {
            Ok(())
        } else {
            Err(not_found(operation))
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn not_found(operation: &'static str) -> Error {
    Error::Api {
        operation,
        status: 404,
        message: "Issue Does Not Exist".to_string(),
    }
}

/// A fake Jira instance holding issues, workflows and side effects in memory.
///
/// Unknown issue keys answer like the service does, with an HTTP 404
/// [`Error::Api`]. Applying a transition moves the issue to the
/// transition's destination status; the available transitions stay as
/// configured.
#[derive(Debug, Default)]
pub struct FakeJira {
    state: Mutex<State>,
}

impl FakeJira {
    /// Create an empty instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add (or replace) an issue.
    #[must_use]
    pub fn with_issue(self, issue: Issue) -> Self {
        self.state().issues.insert(issue.key.clone(), issue);
        self
    }

    /// Set the transitions available on an issue.
    #[must_use]
    pub fn with_transitions(self, key: &str, transitions: Vec<Transition>) -> Self {
        self.state().transitions.insert(key.to_string(), transitions);
        self
    }

    /// Set the edit metadata of an issue.
    #[must_use]
    pub fn with_edit_metadata(self, key: &str, metadata: EditMetadata) -> Self {
        self.state().edit_metadata.insert(key.to_string(), metadata);
        self
    }

    /// Answer edit-metadata requests for an issue with HTTP 403, as Jira does
    /// for a user without edit permission.
    #[must_use]
    pub fn without_edit_permission(self, key: &str) -> Self {
        self.state().edit_forbidden.insert(key.to_string());
        self
    }

    /// Add an existing comment to an issue.
    #[must_use]
    pub fn with_comment(self, key: &str, comment: Comment) -> Self {
        self.state()
            .comments
            .entry(key.to_string())
            .or_default()
            .push(comment);
        self
    }

    /// Current copy of an issue.
    #[must_use]
    pub fn issue(&self, key: &str) -> Option<Issue> {
        self.state().issues.get(key).cloned()
    }

    /// Every `(issue key, transition id)` applied so far, in order.
    #[must_use]
    pub fn applied_transitions(&self) -> Vec<(String, String)> {
        self.state().applied.clone()
    }

    /// Comments on an issue, oldest first.
    #[must_use]
    pub fn comments(&self, key: &str) -> Vec<Comment> {
        self.state().comments.get(key).cloned().unwrap_or_default()
    }

    /// Issue keys added to a sprint, in order.
    #[must_use]
    pub fn sprint_issues(&self, sprint_id: u64) -> Vec<String> {
        self.state().sprints.get(&sprint_id).cloned().unwrap_or_default()
    }

    /// Attachments uploaded to an issue.
    #[must_use]
    pub fn attachments(&self, key: &str) -> Vec<Attachment> {
        self.state().attachments.get(key).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl JiraApi for FakeJira {
    async fn get_issue(&self, key: &str) -> Result<Issue> {
        self.state()
            .issues
            .get(key)
            .cloned()
            .ok_or_else(|| not_found("get issue"))
    }

    async fn get_comments(&self, key: &str) -> Result<Vec<Comment>> {
        let state = self.state();
        state.require("get comments", key)?;
        Ok(state.comments.get(key).cloned().unwrap_or_default())
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let state = self.state();
        state.require("get transitions", key)?;
        Ok(state.transitions.get(key).cloned().unwrap_or_default())
    }

    async fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        let mut state = self.state();
        let target = state
            .transitions
            .get(key)
            .and_then(|ts| ts.iter().find(|t| t.id == transition_id))
            .map(|t| t.to_status.clone());

        let issue = state.issue_mut("apply transition", key)?;
        let Some(status) = target else {
            return Err(Error::Api {
                operation: "apply transition",
                status: 400,
                message: format!("Transition id '{transition_id}' is not valid for this issue."),
            });
        };
        issue.status = status;
        state.applied.push((key.to_string(), transition_id.to_string()));
        Ok(())
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<Comment> {
        let mut state = self.state();
        state.require("add comment", key)?;
        let comment = Comment {
            author: User {
                display_name: "Fake User".to_string(),
                name: "fake".to_string(),
            },
            body: body.to_string(),
            created: Some("2024-01-01T00:00:00.000+0000".to_string()),
        };
        state
            .comments
            .entry(key.to_string())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn search_issues(
        &self,
        _jql: &str,
        max_results: u32,
        _fields: &[String],
    ) -> Result<Vec<Issue>> {
        let limit = usize::try_from(max_results).unwrap_or(usize::MAX);
        Ok(self.state().issues.values().take(limit).cloned().collect())
    }

    async fn create_issue(&self, new: &NewIssue) -> Result<CreatedIssue> {
        let mut state = self.state();
        let id = state.next_id();
        let key = format!("{}-{id}", new.project);
        let issue = Issue {
            key: key.clone(),
            status: "To Do".to_string(),
            summary: new.summary.clone(),
            description: (!new.description.is_empty()).then(|| new.description.clone()),
            issue_type: Some(new.issue_type.clone()),
            reporter: None,
            assignee: new.assignee.as_ref().map(|name| User {
                display_name: name.clone(),
                name: name.clone(),
            }),
            custom_fields: BTreeMap::new(),
        };
        state.issues.insert(key.clone(), issue);
        Ok(CreatedIssue {
            id: (10_000 + id).to_string(),
            key,
        })
    }

    async fn get_edit_metadata(&self, key: &str) -> Result<EditMetadata> {
        let state = self.state();
        state.require("get edit metadata", key)?;
        if state.edit_forbidden.contains(key) {
            return Err(Error::Api {
                operation: "get edit metadata",
                status: 403,
                message: "You do not have permission to edit issues in this project."
                    .to_string(),
            });
        }
        Ok(state.edit_metadata.get(key).cloned().unwrap_or_default())
    }

    async fn assign_issue(&self, key: &str, assignee: Option<&str>) -> Result<()> {
        let mut state = self.state();
        let issue = state.issue_mut("assign issue", key)?;
        issue.assignee = assignee.map(|name| User {
            display_name: name.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    async fn add_issues_to_sprint(&self, sprint_id: u64, keys: &[String]) -> Result<()> {
        let mut state = self.state();
        for key in keys {
            state.require("add issues to sprint", key)?;
        }
        state
            .sprints
            .entry(sprint_id)
            .or_default()
            .extend(keys.iter().cloned());
        Ok(())
    }

    async fn add_attachment(
        &self,
        key: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Vec<Attachment>> {
        let mut state = self.state();
        state.require("add attachment", key)?;
        let attachment = Attachment {
            id: state.next_id().to_string(),
            filename: file_name.to_string(),
            size: content.len() as u64,
        };
        state
            .attachments
            .entry(key.to_string())
            .or_default()
            .push(attachment.clone());
        Ok(vec![attachment])
    }
}

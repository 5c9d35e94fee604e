//! [`JiraApi`] over the REST API (v2) and the agile API (v1.0).

use super::JiraApi;
use super::wire::{
    self, AssignRequest, CommentRequest, CreateIssueRequest, IdRef, RawAttachment, RawComment,
    RawComments, RawCreated, RawEditMeta, RawIssue, RawSearch, RawTransitions, SearchRequest,
    SprintIssuesRequest, TransitionRequest,
};
use crate::domain::{Attachment, Comment, CreatedIssue, EditMetadata, Issue, NewIssue, Transition};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("jira-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one Jira host, authenticating with a bearer token.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base: Url,
    token: String,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base", &self.base.as_str())
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client for `host`.
    ///
    /// `host` may be a bare host name (`jira.example.com`), which is reached
    /// over HTTPS, or a full base URL including a scheme and context path
    /// (`http://localhost:8080/jira`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `host` is not a usable base URL,
    /// or [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(host: &str, token: impl Into<String>) -> Result<Self> {
        let base = base_url(host)?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Http {
                operation: "build HTTP client",
                source,
            })?;

        Ok(Self {
            http,
            base,
            token: token.into(),
        })
    }

    /// Base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `base_url` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn api(&self, segments: &[&str]) -> Url {
        let mut all = vec!["rest", "api", "2"];
        all.extend_from_slice(segments);
        self.endpoint(&all)
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| Error::Http { operation, source })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Jira responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            operation,
            status: status.as_u16(),
            message: wire::error_message(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| Error::Http { operation, source })?;
        serde_json::from_slice(&bytes).map_err(|source| Error::Decode { operation, source })
    }
}

fn base_url(host: &str) -> Result<Url> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(Error::invalid("host", "must not be empty"));
    }

    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let url = Url::parse(&candidate).map_err(|e| Error::invalid("host", e.to_string()))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(Error::invalid("host", format!("'{host}' is not a base URL")));
    }
    Ok(url)
}

#[async_trait]
impl JiraApi for RestClient {
    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let request = self.http.get(self.api(&["issue", key]));
        let raw: RawIssue = self.send_json("get issue", request).await?;
        Ok(raw.into())
    }

    async fn get_comments(&self, key: &str) -> Result<Vec<Comment>> {
        let request = self.http.get(self.api(&["issue", key, "comment"]));
        let raw: RawComments = self.send_json("get comments", request).await?;
        Ok(raw.comments.into_iter().map(Into::into).collect())
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let request = self.http.get(self.api(&["issue", key, "transitions"]));
        let raw: RawTransitions = self.send_json("get transitions", request).await?;
        Ok(raw.transitions.into_iter().map(Into::into).collect())
    }

    async fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        let body = TransitionRequest {
            transition: IdRef { id: transition_id },
        };
        let request = self
            .http
            .post(self.api(&["issue", key, "transitions"]))
            .json(&body);
        self.send("apply transition", request).await?;
        Ok(())
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<Comment> {
        let request = self
            .http
            .post(self.api(&["issue", key, "comment"]))
            .json(&CommentRequest { body });
        let raw: RawComment = self.send_json("add comment", request).await?;
        Ok(raw.into())
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: &[String],
    ) -> Result<Vec<Issue>> {
        let request = self.http.post(self.api(&["search"])).json(&SearchRequest {
            jql,
            max_results,
            fields,
        });
        let raw: RawSearch = self.send_json("search issues", request).await?;
        Ok(raw.issues.into_iter().map(Into::into).collect())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let request = self
            .http
            .post(self.api(&["issue"]))
            .json(&CreateIssueRequest::from(issue));
        let raw: RawCreated = self.send_json("create issue", request).await?;
        Ok(raw.into())
    }

    async fn get_edit_metadata(&self, key: &str) -> Result<EditMetadata> {
        let request = self.http.get(self.api(&["issue", key, "editmeta"]));
        let raw: RawEditMeta = self.send_json("get edit metadata", request).await?;
        Ok(raw.into())
    }

    async fn assign_issue(&self, key: &str, assignee: Option<&str>) -> Result<()> {
        let request = self
            .http
            .put(self.api(&["issue", key, "assignee"]))
            .json(&AssignRequest { name: assignee });
        self.send("assign issue", request).await?;
        Ok(())
    }

    async fn add_issues_to_sprint(&self, sprint_id: u64, keys: &[String]) -> Result<()> {
        let sprint = sprint_id.to_string();
        let url = self.endpoint(&["rest", "agile", "1.0", "sprint", &sprint, "issue"]);
        let request = self
            .http
            .post(url)
            .json(&SprintIssuesRequest { issues: keys });
        self.send("add issues to sprint", request).await?;
        Ok(())
    }

    async fn add_attachment(
        &self,
        key: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Vec<Attachment>> {
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));
        let request = self
            .http
            .post(self.api(&["issue", key, "attachments"]))
            .header("X-Atlassian-Token", "no-check")
            .multipart(form);
        let raw: Vec<RawAttachment> = self.send_json("add attachment", request).await?;
        Ok(raw.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    #[rstest]
    #[case::bare_host("jira.example.com", "https://jira.example.com/")]
    #[case::trailing_slash("jira.example.com/", "https://jira.example.com/")]
    #[case::explicit_http("http://localhost:8080", "http://localhost:8080/")]
    #[case::context_path("https://example.com/jira/", "https://example.com/jira")]
    fn test_base_url(#[case] host: &str, #[case] expected: &str) {
        assert_eq!(base_url(host).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::bad_host("https://exa mple.com")]
    fn test_base_url_rejects(#[case] host: &str) {
        assert!(matches!(
            base_url(host),
            Err(Error::InvalidArgument { field: "host", .. })
        ));
    }

    #[test]
    fn test_api_paths() {
        let client = RestClient::new("https://example.com/jira", "t").unwrap();
        assert_eq!(
            client.api(&["issue", "PROJ-1", "transitions"]).as_str(),
            "https://example.com/jira/rest/api/2/issue/PROJ-1/transitions"
        );

        let client = RestClient::new("jira.example.com", "t").unwrap();
        assert_eq!(
            client.api(&["search"]).as_str(),
            "https://jira.example.com/rest/api/2/search"
        );
    }

    #[test]
    fn test_path_segments_are_escaped() {
        let client = RestClient::new("jira.example.com", "t").unwrap();
        assert_eq!(
            client.api(&["issue", "A/B"]).as_str(),
            "https://jira.example.com/rest/api/2/issue/A%2FB"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = RestClient::new("jira.example.com", "super-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    /// Serve a single canned HTTP response and hand back the raw request head.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                let done = line == "\r\n";
                head.push_str(&line);
                if done {
                    break;
                }
            }
            let mut body_buf = vec![0; content_length];
            reader.read_exact(&mut body_buf).unwrap();
            head.push_str(&String::from_utf8_lossy(&body_buf));

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            tx.send(head).unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    #[tokio::test]
    async fn test_get_issue_sends_bearer_token() {
        let (host, rx) = serve_once(
            "200 OK",
            r#"{"key": "PROJ-7", "fields": {"summary": "s", "status": {"name": "Open"}}}"#,
        );
        let client = RestClient::new(&host, "tok-123").unwrap();

        let issue = client.get_issue("PROJ-7").await.unwrap();
        let request = rx.recv().unwrap();

        assert_eq!(issue.key, "PROJ-7");
        assert_eq!(issue.status, "Open");
        assert!(request.starts_with("GET /rest/api/2/issue/PROJ-7 "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer tok-123"));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let (host, _rx) = serve_once(
            "404 Not Found",
            r#"{"errorMessages": ["Issue Does Not Exist"], "errors": {}}"#,
        );
        let client = RestClient::new(&host, "t").unwrap();

        let err = client.get_issue("PROJ-404").await.unwrap_err();

        match err {
            Error::Api {
                operation,
                status,
                message,
            } => {
                assert_eq!(operation, "get issue");
                assert_eq!(status, 404);
                assert_eq!(message, "Issue Does Not Exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_apply_transition_posts_id() {
        let (host, rx) = serve_once("204 No Content", "");
        let client = RestClient::new(&host, "t").unwrap();

        client.apply_transition("PROJ-1", "31").await.unwrap();
        let request = rx.recv().unwrap();

        assert!(request.starts_with("POST /rest/api/2/issue/PROJ-1/transitions "));
        assert!(request.ends_with(r#"{"transition":{"id":"31"}}"#));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let (host, _rx) = serve_once("200 OK", "not json");
        let client = RestClient::new(&host, "t").unwrap();

        let err = client.get_transitions("PROJ-1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                operation: "get transitions",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_sprint_uses_agile_api() {
        let (host, rx) = serve_once("204 No Content", "");
        let client = RestClient::new(&host, "t").unwrap();

        client
            .add_issues_to_sprint(42, &["PROJ-1".to_string(), "PROJ-2".to_string()])
            .await
            .unwrap();
        let request = rx.recv().unwrap();

        assert!(request.starts_with("POST /rest/agile/1.0/sprint/42/issue "));
        assert!(request.ends_with(r#"{"issues":["PROJ-1","PROJ-2"]}"#));
    }
}

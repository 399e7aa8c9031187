use serde::{Deserialize, Serialize};

use crate::error::WebhookError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookUser {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookRepository {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub owner: WebhookUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookIssue {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<WebhookUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// Payload of an `issue_comment` delivery.
pub struct IssueCommentEvent {
    #[serde(default)]
    pub action: String,
    pub issue: WebhookIssue,
    pub comment: WebhookComment,
    pub repository: WebhookRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssuesEvent {
    #[serde(default)]
    pub action: String,
    pub issue: WebhookIssue,
    pub repository: WebhookRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequestHead {
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookPullRequest {
    pub number: u64,
    pub head: PullRequestHead,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequestEvent {
    #[serde(default)]
    pub action: String,
    pub pull_request: WebhookPullRequest,
    pub repository: WebhookRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub after: Option<String>,
    pub repository: WebhookRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PingEvent {
    #[serde(default)]
    pub zen: Option<String>,
    #[serde(default)]
    pub hook_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Webhook delivery decoded according to its `X-GitHub-Event` name.
pub enum WebhookEvent {
    IssueComment(IssueCommentEvent),
    Issues(IssuesEvent),
    PullRequest(PullRequestEvent),
    Push(PushEvent),
    Ping(PingEvent),
    /// Event names without a typed model; the payload is not inspected.
    Other { name: String },
}

impl WebhookEvent {
    pub fn name(&self) -> &str {
        match self {
            Self::IssueComment(_) => "issue_comment",
            Self::Issues(_) => "issues",
            Self::PullRequest(_) => "pull_request",
            Self::Push(_) => "push",
            Self::Ping(_) => "ping",
            Self::Other { name } => name.as_str(),
        }
    }

    pub fn action(&self) -> Option<&str> {
        match self {
            Self::IssueComment(event) => Some(event.action.as_str()),
            Self::Issues(event) => Some(event.action.as_str()),
            Self::PullRequest(event) => Some(event.action.as_str()),
            Self::Push(_) | Self::Ping(_) | Self::Other { .. } => None,
        }
    }
}

fn decode<T>(event_name: &str, payload: &[u8]) -> Result<T, WebhookError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_slice(payload).map_err(|source| WebhookError::Payload {
        event: event_name.to_string(),
        source,
    })
}

pub fn parse_webhook(event_name: &str, payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    let name = event_name.trim();
    let event = match name {
        "issue_comment" => WebhookEvent::IssueComment(decode(name, payload)?),
        "issues" => WebhookEvent::Issues(decode(name, payload)?),
        "pull_request" => WebhookEvent::PullRequest(decode(name, payload)?),
        "push" => WebhookEvent::Push(decode(name, payload)?),
        "ping" => WebhookEvent::Ping(decode(name, payload)?),
        other => WebhookEvent::Other {
            name: other.to_string(),
        },
    };
    Ok(event)
}

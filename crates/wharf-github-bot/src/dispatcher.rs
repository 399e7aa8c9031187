use async_trait::async_trait;
use tracing::{debug, info};
use wharf_github_comment::{
    CommentApi, CommentError, CommentTarget, GithubApiClient, ManagedComment, RepoRef,
    DEFAULT_MESSAGE_ID,
};

use crate::echo_command::parse_echo_command;
use crate::error::WebhookError;
use crate::webhook_event::{parse_webhook, WebhookEvent};

/// Message id of the comment the `!echo` command writes to.
pub const ECHO_MESSAGE_ID: &str = DEFAULT_MESSAGE_ID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    Echo {
        repo: RepoRef,
        issue_number: u64,
        text: String,
    },
    Ignore,
}

/// Decides what a webhook event asks for. Only a created issue comment
/// starting with `!echo ` does anything.
pub fn plan_dispatch(event: &WebhookEvent) -> DispatchAction {
    match event {
        WebhookEvent::IssueComment(event) if event.action == "created" => {
            match event.comment.body.as_deref().and_then(parse_echo_command) {
                Some(text) => DispatchAction::Echo {
                    repo: RepoRef::new(
                        event.repository.owner.login.as_str(),
                        event.repository.name.as_str(),
                    ),
                    issue_number: event.issue.number,
                    text: text.to_string(),
                },
                None => DispatchAction::Ignore,
            }
        }
        _ => DispatchAction::Ignore,
    }
}

#[async_trait]
/// Writes managed comments on behalf of the dispatcher.
pub trait CommentPublisher: Send + Sync {
    async fn create_or_update(
        &self,
        comment: &ManagedComment,
        body: &str,
    ) -> Result<Option<String>, CommentError>;
}

pub struct GithubCommentPublisher<A = GithubApiClient> {
    api: A,
}

impl<A: CommentApi> GithubCommentPublisher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: CommentApi> CommentPublisher for GithubCommentPublisher<A> {
    async fn create_or_update(
        &self,
        comment: &ManagedComment,
        body: &str,
    ) -> Result<Option<String>, CommentError> {
        comment.create_or_update(&self.api, body).await
    }
}

pub struct WebhookDispatcher<P> {
    publisher: P,
    message_id: String,
}

impl<P: CommentPublisher> WebhookDispatcher<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            message_id: ECHO_MESSAGE_ID.to_string(),
        }
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Parses and dispatches one delivery, returning the action taken.
    pub async fn handle(
        &self,
        event_name: &str,
        payload: &[u8],
    ) -> Result<DispatchAction, WebhookError> {
        let event = parse_webhook(event_name, payload)?;
        self.dispatch(&event).await
    }

    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<DispatchAction, WebhookError> {
        let action = plan_dispatch(event);
        match &action {
            DispatchAction::Echo {
                repo,
                issue_number,
                text,
            } => {
                let comment = ManagedComment::new(
                    self.message_id.as_str(),
                    repo.clone(),
                    CommentTarget::Issue(*issue_number),
                );
                let url = self.publisher.create_or_update(&comment, text).await?;
                info!(
                    repo = %repo,
                    issue = issue_number,
                    url = url.as_deref().unwrap_or_default(),
                    "echo command handled"
                );
            }
            DispatchAction::Ignore => {
                debug!(
                    event = event.name(),
                    action = event.action().unwrap_or_default(),
                    "ignoring webhook event"
                );
            }
        }
        Ok(action)
    }
}

//! GitHub webhook handling for Wharf pipelines.
//! Parses raw webhook payloads by their declared event name and dispatches the
//! `!echo` issue-comment command to a managed comment.

pub mod dispatcher;
pub mod echo_command;
pub mod error;
pub mod webhook_event;

pub use dispatcher::{
    plan_dispatch, CommentPublisher, DispatchAction, GithubCommentPublisher, WebhookDispatcher,
    ECHO_MESSAGE_ID,
};
pub use echo_command::{parse_echo_command, ECHO_COMMAND_PREFIX};
pub use error::WebhookError;
pub use webhook_event::{parse_webhook, WebhookEvent};

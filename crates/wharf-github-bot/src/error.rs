use thiserror::Error;
use wharf_github_comment::CommentError;

#[derive(Debug, Error)]
/// Enumerates failures while handling one webhook delivery.
pub enum WebhookError {
    #[error("failed to parse {event} webhook payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Comment(#[from] CommentError),
}

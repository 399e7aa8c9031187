use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates failures of managed-comment operations.
pub enum CommentError {
    #[error("invalid repository format: {input}")]
    InvalidRepository { input: String },
    #[error("either issue or commit must be set")]
    MissingTarget,
    #[error("commit {commit} not found in any pull request")]
    CommitNotInPullRequest { commit: String },
    /// Transport and API failures, surfaced as reported by the client.
    #[error(transparent)]
    Api(#[from] anyhow::Error),
}

//! Managed GitHub issue/PR comments for Wharf pipelines.
//! A managed comment carries an invisible marker keyed by a message id, so
//! repeated runs edit the same comment instead of posting new ones. This crate
//! provides repository-reference parsing, marker helpers, the comment locator,
//! and the create/delete/react operations over a small GitHub REST client.

pub mod comment_api;
pub mod comment_locator;
pub mod comment_marker;
pub mod error;
pub mod github_api_client;
pub mod github_transport_helpers;
pub mod managed_comment;
pub mod reaction_kind;
pub mod repo_ref;

pub use comment_api::CommentApi;
pub use comment_locator::{locate_managed_comment, CommentTarget, LocatedComment};
pub use comment_marker::{mark_body, marker, DEFAULT_MESSAGE_ID};
pub use error::CommentError;
pub use github_api_client::{
    GithubApiClient, GithubClientConfig, GithubCommentResponse, GithubIssueComment,
    GithubPullRequest, DEFAULT_GITHUB_API_BASE,
};
pub use managed_comment::ManagedComment;
pub use reaction_kind::ReactionKind;
pub use repo_ref::RepoRef;

//! Create-or-update, delete, and react operations on a managed comment.
//!
//! Each operation locates the comment first and then performs at most one
//! write. Locate-then-write is not atomic: two concurrent runs against the
//! same message id can both create a comment.

use tracing::info;

use crate::comment_api::CommentApi;
use crate::comment_locator::{locate_managed_comment, CommentTarget, LocatedComment};
use crate::comment_marker::{mark_body, DEFAULT_MESSAGE_ID};
use crate::error::CommentError;
use crate::reaction_kind::ReactionKind;
use crate::repo_ref::RepoRef;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Identity of the one comment a caller manages on an issue or pull request.
pub struct ManagedComment {
    pub message_id: String,
    pub repo: RepoRef,
    pub target: CommentTarget,
}

impl ManagedComment {
    pub fn new(message_id: impl Into<String>, repo: RepoRef, target: CommentTarget) -> Self {
        Self {
            message_id: message_id.into(),
            repo,
            target,
        }
    }

    /// Parses the repository reference and target inputs. An empty message id
    /// falls back to [`DEFAULT_MESSAGE_ID`].
    pub fn from_inputs(
        message_id: Option<&str>,
        repo: &str,
        issue: Option<u64>,
        commit: Option<&str>,
    ) -> Result<Self, CommentError> {
        let message_id = message_id
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_MESSAGE_ID);
        let repo = RepoRef::parse(repo)?;
        let target = CommentTarget::from_parts(issue, commit)?;
        Ok(Self::new(message_id, repo, target))
    }

    pub async fn locate(&self, api: &dyn CommentApi) -> Result<LocatedComment, CommentError> {
        locate_managed_comment(api, &self.repo, &self.message_id, &self.target).await
    }

    /// Writes `body` under this comment's marker, editing the existing
    /// comment when there is one. Returns the comment's web URL.
    pub async fn create_or_update(
        &self,
        api: &dyn CommentApi,
        body: &str,
    ) -> Result<Option<String>, CommentError> {
        let located = self.locate(api).await?;
        let marked = mark_body(&self.message_id, body);
        let response = match located.comment {
            Some(existing) => {
                info!(
                    repo = %self.repo,
                    issue = located.issue_number,
                    comment_id = existing.id,
                    "updating managed comment"
                );
                api.update_issue_comment(&self.repo, existing.id, &marked)
                    .await?
            }
            None => {
                info!(
                    repo = %self.repo,
                    issue = located.issue_number,
                    "creating managed comment"
                );
                api.create_issue_comment(&self.repo, located.issue_number, &marked)
                    .await?
            }
        };
        Ok(response.html_url)
    }

    /// Deletes the managed comment; succeeds without a write when absent.
    pub async fn delete(&self, api: &dyn CommentApi) -> Result<(), CommentError> {
        let Some(comment) = self.locate(api).await?.comment else {
            return Ok(());
        };
        info!(repo = %self.repo, comment_id = comment.id, "deleting managed comment");
        api.delete_issue_comment(&self.repo, comment.id).await?;
        Ok(())
    }

    pub async fn react(
        &self,
        api: &dyn CommentApi,
        kind: &ReactionKind,
    ) -> Result<(), CommentError> {
        let Some(comment) = self.locate(api).await?.comment else {
            return Ok(());
        };
        info!(
            repo = %self.repo,
            comment_id = comment.id,
            reaction = kind.as_str(),
            "reacting to managed comment"
        );
        api.create_issue_comment_reaction(&self.repo, comment.id, kind.as_str())
            .await?;
        Ok(())
    }
}

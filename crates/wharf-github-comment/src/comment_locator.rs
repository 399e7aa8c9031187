use tracing::debug;

use crate::comment_api::CommentApi;
use crate::comment_marker::is_marked_for;
use crate::error::CommentError;
use crate::github_api_client::GithubIssueComment;
use crate::repo_ref::RepoRef;

pub const COMMENT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where a managed comment lives: an issue/PR number, or a commit whose pull
/// request is looked up.
pub enum CommentTarget {
    Issue(u64),
    Commit(String),
}

impl CommentTarget {
    /// Builds a target from optional inputs; a non-zero issue wins over a commit.
    pub fn from_parts(issue: Option<u64>, commit: Option<&str>) -> Result<Self, CommentError> {
        match (issue.filter(|number| *number != 0), commit) {
            (Some(number), _) => Ok(Self::Issue(number)),
            (None, Some(sha)) if !sha.trim().is_empty() => Ok(Self::Commit(sha.trim().to_string())),
            _ => Err(CommentError::MissingTarget),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocatedComment {
    pub issue_number: u64,
    /// `None` when no comment carries the marker yet.
    pub comment: Option<GithubIssueComment>,
}

/// Resolves a commit to the pull request that contains it.
///
/// GitHub may report several pull requests for one commit; the first returned
/// is used.
pub async fn resolve_commit_issue(
    api: &dyn CommentApi,
    repo: &RepoRef,
    commit_sha: &str,
) -> Result<u64, CommentError> {
    let pulls = api.list_pull_requests_with_commit(repo, commit_sha).await?;
    let first = pulls
        .first()
        .ok_or_else(|| CommentError::CommitNotInPullRequest {
            commit: commit_sha.to_string(),
        })?;
    if pulls.len() > 1 {
        debug!(
            commit = commit_sha,
            candidates = pulls.len(),
            chosen = first.number,
            "commit belongs to several pull requests"
        );
    }
    Ok(first.number)
}

pub async fn locate_managed_comment(
    api: &dyn CommentApi,
    repo: &RepoRef,
    message_id: &str,
    target: &CommentTarget,
) -> Result<LocatedComment, CommentError> {
    let issue_number = match target {
        CommentTarget::Issue(number) if *number != 0 => *number,
        CommentTarget::Issue(_) => return Err(CommentError::MissingTarget),
        CommentTarget::Commit(sha) if sha.is_empty() => return Err(CommentError::MissingTarget),
        CommentTarget::Commit(sha) => resolve_commit_issue(api, repo, sha).await?,
    };

    let mut page = 1_u32;
    loop {
        let chunk = api
            .list_issue_comments_page(repo, issue_number, page, COMMENT_PAGE_SIZE)
            .await?;
        let chunk_len = chunk.len();
        if let Some(comment) = chunk.into_iter().find(|comment| {
            comment
                .body
                .as_deref()
                .is_some_and(|body| is_marked_for(body, message_id))
        }) {
            debug!(repo = %repo, issue = issue_number, comment_id = comment.id, "found managed comment");
            return Ok(LocatedComment {
                issue_number,
                comment: Some(comment),
            });
        }
        if chunk_len < COMMENT_PAGE_SIZE as usize {
            break;
        }
        page = page.saturating_add(1);
    }

    debug!(repo = %repo, issue = issue_number, "no managed comment");
    Ok(LocatedComment {
        issue_number,
        comment: None,
    })
}

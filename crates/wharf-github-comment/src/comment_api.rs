use anyhow::Result;
use async_trait::async_trait;

use crate::github_api_client::{GithubCommentResponse, GithubIssueComment, GithubPullRequest};
use crate::repo_ref::RepoRef;

#[async_trait]
/// GitHub REST calls needed to manage a single issue comment.
pub trait CommentApi: Send + Sync {
    async fn list_pull_requests_with_commit(
        &self,
        repo: &RepoRef,
        commit_sha: &str,
    ) -> Result<Vec<GithubPullRequest>>;

    /// Returns one page (1-based) of an issue's comments in API order.
    async fn list_issue_comments_page(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GithubIssueComment>>;

    async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubCommentResponse>;

    async fn update_issue_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> Result<GithubCommentResponse>;

    async fn delete_issue_comment(&self, repo: &RepoRef, comment_id: u64) -> Result<()>;

    async fn create_issue_comment_reaction(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        content: &str,
    ) -> Result<()>;
}

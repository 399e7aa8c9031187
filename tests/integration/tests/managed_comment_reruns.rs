use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex as AsyncMutex;
use wharf_alpine::AlpineImage;
use wharf_github_bot::{DispatchAction, GithubCommentPublisher, WebhookDispatcher};
use wharf_github_comment::{
    CommentApi, CommentTarget, GithubCommentResponse, GithubIssueComment, GithubPullRequest,
    ManagedComment, ReactionKind, RepoRef,
};

#[derive(Default)]
struct InMemoryIssues {
    pull_requests: Vec<u64>,
    comments: AsyncMutex<BTreeMap<u64, Vec<GithubIssueComment>>>,
    reactions: AsyncMutex<Vec<(u64, String)>>,
    next_id: AsyncMutex<u64>,
    writes: AsyncMutex<usize>,
}

impl InMemoryIssues {
    async fn bodies(&self, issue: u64) -> Vec<String> {
        self.comments
            .lock()
            .await
            .get(&issue)
            .map(|comments| {
                comments
                    .iter()
                    .filter_map(|comment| comment.body.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn seed(&self, issue: u64, body: &str) {
        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        self.comments
            .lock()
            .await
            .entry(issue)
            .or_default()
            .push(GithubIssueComment {
                id: *next_id,
                body: Some(body.to_string()),
                html_url: None,
                user: None,
            });
    }
}

#[async_trait]
impl CommentApi for InMemoryIssues {
    async fn list_pull_requests_with_commit(
        &self,
        _repo: &RepoRef,
        _commit_sha: &str,
    ) -> Result<Vec<GithubPullRequest>> {
        Ok(self
            .pull_requests
            .iter()
            .map(|number| GithubPullRequest {
                number: *number,
                html_url: None,
            })
            .collect())
    }

    async fn list_issue_comments_page(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GithubIssueComment>> {
        let comments = self.comments.lock().await;
        Ok(comments
            .get(&issue_number)
            .map(|all| {
                all.iter()
                    .skip(((page - 1) * per_page) as usize)
                    .take(per_page as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_issue_comment(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubCommentResponse> {
        *self.writes.lock().await += 1;
        self.seed(issue_number, body).await;
        let id = *self.next_id.lock().await;
        Ok(GithubCommentResponse {
            id,
            html_url: Some(format!("https://example.test/comment/{id}")),
        })
    }

    async fn update_issue_comment(
        &self,
        _repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> Result<GithubCommentResponse> {
        *self.writes.lock().await += 1;
        let mut comments = self.comments.lock().await;
        let comment = comments
            .values_mut()
            .flatten()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| anyhow!("comment {comment_id} not found"))?;
        comment.body = Some(body.to_string());
        Ok(GithubCommentResponse {
            id: comment_id,
            html_url: Some(format!("https://example.test/comment/{comment_id}")),
        })
    }

    async fn delete_issue_comment(&self, _repo: &RepoRef, comment_id: u64) -> Result<()> {
        *self.writes.lock().await += 1;
        for comments in self.comments.lock().await.values_mut() {
            comments.retain(|comment| comment.id != comment_id);
        }
        Ok(())
    }

    async fn create_issue_comment_reaction(
        &self,
        _repo: &RepoRef,
        comment_id: u64,
        content: &str,
    ) -> Result<()> {
        *self.writes.lock().await += 1;
        self.reactions
            .lock()
            .await
            .push((comment_id, content.to_string()));
        Ok(())
    }
}

fn echo_payload(issue: u64, body: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "action": "created",
        "issue": {"number": issue},
        "comment": {"id": 1, "body": body},
        "repository": {"name": "repo", "owner": {"login": "owner"}}
    }))
    .expect("payload")
}

#[tokio::test]
async fn integration_repeated_echo_commands_keep_a_single_managed_comment() {
    let issues = InMemoryIssues::default();
    issues.seed(4, "!echo first run").await;
    let dispatcher = WebhookDispatcher::new(GithubCommentPublisher::new(issues));

    for text in ["first run", "second run", "third run"] {
        let action = dispatcher
            .handle("issue_comment", &echo_payload(4, &format!("!echo {text}")))
            .await
            .expect("dispatch");
        assert!(matches!(action, DispatchAction::Echo { .. }));
    }

    let issues = dispatcher.publisher().api();
    assert_eq!(
        issues.bodies(4).await,
        vec![
            "!echo first run".to_string(),
            "<!-- marker: github.com/aluzzardi/daggerverse/github-comment -->\nthird run"
                .to_string(),
        ]
    );
    assert_eq!(*issues.writes.lock().await, 3);
}

#[tokio::test]
async fn integration_managed_comment_lifecycle_create_edit_react_delete() {
    let api = InMemoryIssues {
        pull_requests: vec![8, 3],
        ..InMemoryIssues::default()
    };
    api.seed(8, "unrelated review note").await;
    let comment = ManagedComment::new(
        "pipeline-status",
        RepoRef::parse("https://github.com/owner/repo.git").expect("repo"),
        CommentTarget::Commit("abc123".to_string()),
    );

    let first_url = comment
        .create_or_update(&api, "build started")
        .await
        .expect("create");
    let second_url = comment
        .create_or_update(&api, "build passed")
        .await
        .expect("update");
    assert_eq!(first_url, second_url);
    assert_eq!(
        api.bodies(8).await,
        vec![
            "unrelated review note".to_string(),
            "<!-- marker: pipeline-status -->\nbuild passed".to_string(),
        ]
    );

    comment
        .react(&api, &ReactionKind::Hooray)
        .await
        .expect("react");
    assert_eq!(api.reactions.lock().await.len(), 1);

    comment.delete(&api).await.expect("delete");
    comment.delete(&api).await.expect("second delete is a no-op");
    assert_eq!(api.bodies(8).await, vec!["unrelated review note".to_string()]);
    assert_eq!(*api.writes.lock().await, 4);
}

#[test]
fn integration_alpine_plan_is_stable_across_builds() {
    let image = AlpineImage::new().with_package("curl").with_package("git");
    let dockerfile = image.build().to_dockerfile();
    assert_eq!(dockerfile, image.clone().build().to_dockerfile());
    assert_eq!(
        dockerfile,
        "FROM alpine:latest\n\
         RUN [\"apk\",\"add\",\"--no-cache\",\"curl\"]\n\
         RUN [\"apk\",\"add\",\"--no-cache\",\"git\"]\n"
    );
}

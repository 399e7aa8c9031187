use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::comment_api::CommentApi;
use crate::github_transport_helpers::{
    bearer_header_value, truncate_for_error, ERROR_BODY_MAX_CHARS,
};
use crate::repo_ref::RepoRef;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubIssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Option<GithubUser>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubPullRequest {
    pub number: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubCommentResponse {
    pub id: u64,
    pub html_url: Option<String>,
}

#[derive(Clone)]
/// Connection settings for [`GithubApiClient`].
pub struct GithubClientConfig {
    pub api_base: String,
    pub token: String,
    pub request_timeout_ms: u64,
}

impl GithubClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            token: token.into(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl std::fmt::Debug for GithubClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClientConfig")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

#[derive(Clone)]
/// Minimal GitHub REST client. Failures are reported once, without retry.
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubApiClient {
    pub fn new(config: GithubClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("wharf-github-comment"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let mut auth_value =
            reqwest::header::HeaderValue::from_str(&bearer_header_value(&config.token))
                .context("invalid github authorization header")?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoRef, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, repo.owner, repo.name, tail
        )
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("github api {operation} request failed"))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        bail!(
            "github api {operation} failed with status {}: {}",
            status.as_u16(),
            truncate_for_error(&body, ERROR_BODY_MAX_CHARS)
        );
    }

    async fn request_json<T>(&self, operation: &str, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(operation, request).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode github {operation}"))
    }
}

#[async_trait]
impl CommentApi for GithubApiClient {
    async fn list_pull_requests_with_commit(
        &self,
        repo: &RepoRef,
        commit_sha: &str,
    ) -> Result<Vec<GithubPullRequest>> {
        debug!(repo = %repo, commit = commit_sha, "listing pull requests for commit");
        let url = self.repo_url(repo, &format!("commits/{commit_sha}/pulls"));
        self.request_json("list pull requests with commit", self.http.get(url))
            .await
    }

    async fn list_issue_comments_page(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GithubIssueComment>> {
        debug!(repo = %repo, issue = issue_number, page, "listing issue comments");
        let url = self.repo_url(repo, &format!("issues/{issue_number}/comments"));
        let request = self.http.get(url).query(&[
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ]);
        self.request_json("list issue comments", request).await
    }

    async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubCommentResponse> {
        let url = self.repo_url(repo, &format!("issues/{issue_number}/comments"));
        let payload = json!({ "body": body });
        self.request_json("create issue comment", self.http.post(url).json(&payload))
            .await
    }

    async fn update_issue_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> Result<GithubCommentResponse> {
        let url = self.repo_url(repo, &format!("issues/comments/{comment_id}"));
        let payload = json!({ "body": body });
        self.request_json("update issue comment", self.http.patch(url).json(&payload))
            .await
    }

    async fn delete_issue_comment(&self, repo: &RepoRef, comment_id: u64) -> Result<()> {
        let url = self.repo_url(repo, &format!("issues/comments/{comment_id}"));
        self.send("delete issue comment", self.http.delete(url))
            .await?;
        Ok(())
    }

    async fn create_issue_comment_reaction(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        content: &str,
    ) -> Result<()> {
        let url = self.repo_url(repo, &format!("issues/comments/{comment_id}/reactions"));
        let payload = json!({ "content": content });
        self.send(
            "create issue comment reaction",
            self.http.post(url).json(&payload),
        )
        .await?;
        Ok(())
    }
}

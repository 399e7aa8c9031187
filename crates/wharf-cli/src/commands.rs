use anyhow::{anyhow, Context, Result};
use tracing::warn;
use wharf_alpine::{AlpineImage, ContainerBackend, DockerCliBackend};
use wharf_github_bot::{DispatchAction, GithubCommentPublisher, WebhookDispatcher};
use wharf_github_comment::{GithubApiClient, GithubClientConfig, ManagedComment, ReactionKind};

use crate::cli_args::{
    AlpineCommand, AlpineImageArgs, Cli, CliCommand, CommentCommand, CommentTargetArgs,
    WebhookCommand,
};

fn github_client(cli: &Cli) -> Result<GithubApiClient> {
    let token = cli
        .github_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| anyhow!("missing GitHub token; pass --github-token or set GITHUB_TOKEN"))?;
    GithubApiClient::new(GithubClientConfig {
        api_base: cli.github_api_base.clone(),
        token: token.to_string(),
        request_timeout_ms: cli.request_timeout_ms,
    })
}

fn managed_comment(target: &CommentTargetArgs) -> Result<ManagedComment> {
    Ok(ManagedComment::from_inputs(
        Some(target.message_id.as_str()),
        &target.repo,
        target.issue,
        target.commit.as_deref(),
    )?)
}

fn alpine_image(args: &AlpineImageArgs) -> AlpineImage {
    AlpineImage::new()
        .with_version(args.version.as_str())
        .with_packages(args.packages.iter().map(String::as_str))
}

/// Runs the parsed command and returns the text to print on stdout, if any.
pub(crate) async fn run_command(cli: &Cli) -> Result<Option<String>> {
    match &cli.command {
        CliCommand::Comment(command) => run_comment_command(cli, command).await,
        CliCommand::Webhook(command) => run_webhook_command(cli, command).await,
        CliCommand::Alpine(command) => run_alpine_command(command).await,
    }
}

async fn run_comment_command(cli: &Cli, command: &CommentCommand) -> Result<Option<String>> {
    match command {
        CommentCommand::Create { target, body } => {
            let comment = managed_comment(target)?;
            let client = github_client(cli)?;
            let url = comment.create_or_update(&client, body).await?;
            Ok(url)
        }
        CommentCommand::Delete { target } => {
            let comment = managed_comment(target)?;
            let client = github_client(cli)?;
            comment.delete(&client).await?;
            Ok(None)
        }
        CommentCommand::React { target, kind } => {
            let comment = managed_comment(target)?;
            let kind = ReactionKind::parse(kind);
            if !kind.is_supported() {
                warn!(
                    reaction = kind.as_str(),
                    supported = ?ReactionKind::SUPPORTED,
                    "unknown reaction kind, sending as-is"
                );
            }
            let client = github_client(cli)?;
            comment.react(&client, &kind).await?;
            Ok(None)
        }
    }
}

async fn run_webhook_command(cli: &Cli, command: &WebhookCommand) -> Result<Option<String>> {
    match command {
        WebhookCommand::Handle {
            event_name,
            event_file,
        } => {
            let payload = tokio::fs::read(event_file)
                .await
                .with_context(|| format!("failed to read {}", event_file.display()))?;
            let dispatcher = WebhookDispatcher::new(GithubCommentPublisher::new(github_client(cli)?));
            let action = dispatcher.handle(event_name, &payload).await?;
            Ok(match action {
                DispatchAction::Echo {
                    repo, issue_number, ..
                } => Some(format!("echo posted to {repo}#{issue_number}")),
                DispatchAction::Ignore => None,
            })
        }
    }
}

async fn run_alpine_command(command: &AlpineCommand) -> Result<Option<String>> {
    match command {
        AlpineCommand::Plan { image } => Ok(Some(alpine_image(image).build().to_dockerfile())),
        AlpineCommand::Build { image, tag, engine } => {
            let plan = alpine_image(image).build();
            let built = DockerCliBackend::new(engine.as_str())
                .build(&plan, tag.as_deref())
                .await?;
            Ok(Some(built.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::tempdir;

    use super::run_command;
    use crate::cli_args::Cli;

    #[tokio::test]
    async fn functional_alpine_plan_prints_dockerfile() {
        let cli = Cli::try_parse_from([
            "wharf",
            "alpine",
            "plan",
            "--alpine-version",
            "3.20",
            "--package",
            "curl",
        ])
        .expect("parse");
        let output = run_command(&cli).await.expect("run");
        assert_eq!(
            output.as_deref(),
            Some("FROM alpine:3.20\nRUN [\"apk\",\"add\",\"--no-cache\",\"curl\"]\n")
        );
    }

    #[tokio::test]
    async fn regression_comment_create_requires_token() {
        let cli = Cli::try_parse_from([
            "wharf",
            "--github-token",
            "  ",
            "comment",
            "create",
            "--repo",
            "owner/repo",
            "--issue",
            "1",
            "hi",
        ])
        .expect("parse");
        let error = run_command(&cli).await.expect_err("should fail");
        assert!(error.to_string().contains("missing GitHub token"));
    }

    #[tokio::test]
    async fn regression_comment_create_rejects_bad_repo_before_network() {
        let cli = Cli::try_parse_from([
            "wharf",
            "--github-token",
            "t",
            "comment",
            "create",
            "--repo",
            "onlyonepart",
            "--issue",
            "1",
            "hi",
        ])
        .expect("parse");
        let error = run_command(&cli).await.expect_err("should fail");
        assert_eq!(error.to_string(), "invalid repository format: onlyonepart");
    }

    #[tokio::test]
    async fn integration_comment_create_updates_existing_marked_comment() {
        let server = MockServer::start();
        let _list = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/owner/repo/issues/5/comments");
            then.status(200).json_body(json!([
                {"id": 50, "body": "unrelated"},
                {"id": 51, "body": "<!-- marker: deploy -->\nold"}
            ]));
        });
        let update = server.mock(|when, then| {
            when.method(PATCH)
                .path("/repos/owner/repo/issues/comments/51")
                .json_body(json!({"body": "<!-- marker: deploy -->\nnew"}));
            then.status(200).json_body(json!({
                "id": 51,
                "html_url": "https://example.test/comment/51"
            }));
        });
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/owner/repo/issues/5/comments");
            then.status(201).json_body(json!({"id": 52}));
        });

        let base_url = server.base_url();
        let cli = Cli::try_parse_from([
            "wharf",
            "--github-token",
            "t",
            "--github-api-base",
            base_url.as_str(),
            "comment",
            "create",
            "--repo",
            "https://github.com/owner/repo.git",
            "--issue",
            "5",
            "--message-id",
            "deploy",
            "new",
        ])
        .expect("parse");
        let output = run_command(&cli).await.expect("run");

        update.assert_calls(1);
        create.assert_calls(0);
        assert_eq!(output.as_deref(), Some("https://example.test/comment/51"));
    }

    #[tokio::test]
    async fn integration_webhook_handle_reads_event_file_and_posts_echo() {
        let server = MockServer::start();
        let _list = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/owner/repo/issues/9/comments");
            then.status(200).json_body(json!([]));
        });
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/owner/repo/issues/9/comments")
                .body_includes("from the pipeline");
            then.status(201).json_body(json!({
                "id": 90,
                "html_url": "https://example.test/comment/90"
            }));
        });

        let temp = tempdir().expect("tempdir");
        let event_file = temp.path().join("event.json");
        std::fs::write(
            &event_file,
            serde_json::to_vec(&json!({
                "action": "created",
                "issue": {"number": 9},
                "comment": {"id": 1, "body": "!echo from the pipeline"},
                "repository": {"name": "repo", "owner": {"login": "owner"}}
            }))
            .expect("payload"),
        )
        .expect("write event");

        let base_url = server.base_url();
        let event_path = event_file.display().to_string();
        let cli = Cli::try_parse_from([
            "wharf",
            "--github-token",
            "t",
            "--github-api-base",
            base_url.as_str(),
            "webhook",
            "handle",
            "--event-name",
            "issue_comment",
            "--event-file",
            event_path.as_str(),
        ])
        .expect("parse");
        let output = run_command(&cli).await.expect("run");

        create.assert_calls(1);
        assert_eq!(output.as_deref(), Some("echo posted to owner/repo#9"));
    }
}

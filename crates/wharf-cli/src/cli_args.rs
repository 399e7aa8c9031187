use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wharf_github_comment::{DEFAULT_GITHUB_API_BASE, DEFAULT_MESSAGE_ID};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "wharf",
    about = "Container pipeline helpers: managed GitHub comments, webhook commands, Alpine images",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        global = true,
        help = "GitHub API token used for comment and webhook commands"
    )]
    pub(crate) github_token: Option<String>,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_URL",
        default_value = DEFAULT_GITHUB_API_BASE,
        global = true,
        help = "Base URL of the GitHub REST API"
    )]
    pub(crate) github_api_base: String,

    #[arg(
        long = "request-timeout-ms",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        global = true,
        help = "Timeout for each GitHub API request"
    )]
    pub(crate) request_timeout_ms: u64,

    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CliCommand {
    /// Manage the comment identified by a message id.
    #[command(subcommand)]
    Comment(CommentCommand),
    /// Handle GitHub webhook deliveries.
    #[command(subcommand)]
    Webhook(WebhookCommand),
    /// Build Alpine images with extra packages.
    #[command(subcommand)]
    Alpine(AlpineCommand),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct CommentTargetArgs {
    #[arg(
        long,
        help = "Repository as owner/repo, github.com/owner/repo or https://github.com/owner/repo(.git)"
    )]
    pub(crate) repo: String,

    #[arg(long, help = "Issue or pull request number")]
    pub(crate) issue: Option<u64>,

    #[arg(long, help = "Commit SHA; the first pull request containing it is used")]
    pub(crate) commit: Option<String>,

    #[arg(
        long = "message-id",
        default_value = DEFAULT_MESSAGE_ID,
        help = "Stable id embedded in the hidden comment marker"
    )]
    pub(crate) message_id: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CommentCommand {
    /// Create the comment, or replace its body when it already exists.
    Create {
        #[command(flatten)]
        target: CommentTargetArgs,
        /// Comment text (markdown).
        body: String,
    },
    /// Delete the comment if it exists.
    Delete {
        #[command(flatten)]
        target: CommentTargetArgs,
    },
    /// Add a reaction to the comment if it exists.
    React {
        #[command(flatten)]
        target: CommentTargetArgs,
        /// One of +1, -1, laugh, confused, heart, hooray, rocket, eyes.
        #[arg(allow_hyphen_values = true)]
        kind: String,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum WebhookCommand {
    /// Dispatch one webhook delivery read from a file.
    Handle {
        #[arg(long = "event-name", env = "GITHUB_EVENT_NAME")]
        event_name: String,
        #[arg(long = "event-file", env = "GITHUB_EVENT_PATH")]
        event_file: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AlpineImageArgs {
    #[arg(long = "alpine-version", default_value = "", help = "Alpine tag; empty means latest")]
    pub(crate) version: String,

    #[arg(long = "package", help = "Package to install; repeat to add more, in order")]
    pub(crate) packages: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AlpineCommand {
    /// Print the Dockerfile for the image.
    Plan {
        #[command(flatten)]
        image: AlpineImageArgs,
    },
    /// Build the image with a docker-compatible engine.
    Build {
        #[command(flatten)]
        image: AlpineImageArgs,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long, default_value = "docker")]
        engine: String,
    },
}

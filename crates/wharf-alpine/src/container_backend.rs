use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::container_plan::ContainerPlan;

#[derive(Debug, Error)]
pub enum AlpineError {
    #[error("failed to run container engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("container build exited with status {status}: {stderr}")]
    BuildFailed { status: String, stderr: String },
    #[error("container build produced no image id")]
    MissingImageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltImage {
    pub id: String,
    pub tag: Option<String>,
}

#[async_trait]
/// Executes a [`ContainerPlan`] and returns the resulting image.
pub trait ContainerBackend: Send + Sync {
    async fn build(
        &self,
        plan: &ContainerPlan,
        tag: Option<&str>,
    ) -> Result<BuiltImage, AlpineError>;
}

#[derive(Debug, Clone)]
/// Builds through a docker-compatible CLI (`docker`, `podman`, ...), feeding
/// the rendered Dockerfile on stdin.
pub struct DockerCliBackend {
    program: String,
    leading_args: Vec<String>,
}

impl Default for DockerCliBackend {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCliBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before `build`, e.g. a remote-connection flag.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn build_args(&self, tag: Option<&str>) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend(["build".to_string(), "--quiet".to_string()]);
        if let Some(tag) = tag {
            args.extend(["--tag".to_string(), tag.to_string()]);
        }
        args.push("-".to_string());
        args
    }

    fn spawn_error(&self, source: std::io::Error) -> AlpineError {
        AlpineError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl ContainerBackend for DockerCliBackend {
    async fn build(
        &self,
        plan: &ContainerPlan,
        tag: Option<&str>,
    ) -> Result<BuiltImage, AlpineError> {
        let dockerfile = plan.to_dockerfile();
        let args = self.build_args(tag);
        debug!(program = %self.program, ?args, base_image = %plan.base_image, "starting container build");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| self.spawn_error(source))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(dockerfile.as_bytes())
                .await
                .map_err(|source| self.spawn_error(source))?;
        }
        let output = child
            .wait_with_output()
            .await
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            return Err(AlpineError::BuildFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let id = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(ToOwned::to_owned)
            .ok_or(AlpineError::MissingImageId)?;
        info!(image_id = %id, steps = plan.steps.len(), "container build finished");
        Ok(BuiltImage {
            id,
            tag: tag.map(ToOwned::to_owned),
        })
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One command executed on top of the previous layer.
pub struct ExecStep {
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Base image plus ordered exec steps; each step runs on the previous output.
pub struct ContainerPlan {
    pub base_image: String,
    pub steps: Vec<ExecStep>,
}

impl ContainerPlan {
    pub fn from_image(base_image: impl Into<String>) -> Self {
        Self {
            base_image: base_image.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_exec<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(ExecStep {
            args: args.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Renders the plan as a Dockerfile with exec-form `RUN` lines.
    pub fn to_dockerfile(&self) -> String {
        let mut lines = vec![format!("FROM {}", self.base_image)];
        for step in &self.steps {
            let encoded = serde_json::to_string(&step.args).unwrap_or_else(|_| "[]".to_string());
            lines.push(format!("RUN {encoded}"));
        }
        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }
}

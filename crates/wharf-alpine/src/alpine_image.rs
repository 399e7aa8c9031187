use crate::container_plan::ContainerPlan;

pub const ALPINE_BASE_IMAGE: &str = "alpine";
pub const DEFAULT_ALPINE_VERSION: &str = "latest";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Owned builder for an Alpine image with extra packages.
///
/// Each `with_*` call consumes and returns the value, so a configured image
/// can be cloned and extended as a prototype.
pub struct AlpineImage {
    version: String,
    packages: Vec<String>,
}

impl AlpineImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.packages.push(name.into());
        self
    }

    pub fn with_packages<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, Self::with_package)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn base_image(&self) -> String {
        let version = if self.version.is_empty() {
            DEFAULT_ALPINE_VERSION
        } else {
            self.version.as_str()
        };
        format!("{ALPINE_BASE_IMAGE}:{version}")
    }

    pub fn build(&self) -> ContainerPlan {
        self.packages
            .iter()
            .fold(ContainerPlan::from_image(self.base_image()), |plan, package| {
                plan.with_exec(["apk", "add", "--no-cache", package.as_str()])
            })
    }
}

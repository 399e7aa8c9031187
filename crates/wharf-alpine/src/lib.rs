//! Alpine container images assembled from an ordered package list.
//! [`AlpineImage`] produces a [`ContainerPlan`]; a [`ContainerBackend`] turns
//! the plan into an image.

pub mod alpine_image;
pub mod container_backend;
pub mod container_plan;

pub use alpine_image::{AlpineImage, ALPINE_BASE_IMAGE, DEFAULT_ALPINE_VERSION};
pub use container_backend::{AlpineError, BuiltImage, ContainerBackend, DockerCliBackend};
pub use container_plan::{ContainerPlan, ExecStep};

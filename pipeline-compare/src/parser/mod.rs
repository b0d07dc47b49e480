// Parser module for Azure DevOps pipelines
// Loads YAML files into untyped documents and exposes task step views

pub mod error;
pub mod loader;
pub mod models;

pub use error::{LoadError, LoadErrorKind};
pub use loader::PipelineLoader;
pub use models::{scalar_to_string, PipelineDocument, TaskStep};

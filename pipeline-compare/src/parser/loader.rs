// Pipeline YAML Loader
// Reads azure-pipelines.yml files into untyped documents

use crate::parser::error::LoadError;
use crate::parser::models::PipelineDocument;

use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Loads pipeline YAML without enforcing any schema
pub struct PipelineLoader;

impl PipelineLoader {
    /// Parse a document from YAML text. `origin` is only used in error messages.
    pub fn load_str<P: AsRef<Path>>(
        content: &str,
        origin: P,
    ) -> Result<PipelineDocument, LoadError> {
        let origin = origin.as_ref();
        // An empty or comment-only file holds no documents at all
        let root = match serde_yaml::Deserializer::from_str(content).next() {
            Some(document) => Value::deserialize(document)
                .map_err(|e| LoadError::from_yaml_error(origin, &e, content))?,
            None => Value::Null,
        };

        if !matches!(root, Value::Mapping(_) | Value::Null) {
            tracing::warn!(
                path = %origin.display(),
                "document root is not a mapping; no tasks will be found"
            );
        }

        Ok(PipelineDocument::new(origin, root))
    }

    /// Load a document from a file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<PipelineDocument, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::from_io_error(path, &e))?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "loaded pipeline file");
        Self::load_str(&content, path)
    }
}

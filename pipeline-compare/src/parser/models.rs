// Azure DevOps Pipeline Document Models
// Untyped YAML tree plus a borrowed view over individual task steps

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// A parsed pipeline YAML file.
///
/// The tree is kept untyped: comparing tasks never needs the full Azure DevOps
/// schema, and every lookup must tolerate missing keys.
#[derive(Debug, Clone)]
pub struct PipelineDocument {
    path: PathBuf,
    root: Value,
}

impl PipelineDocument {
    pub fn new(path: impl Into<PathBuf>, root: Value) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    /// File the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Sequence stored under a top-level key, or an empty slice
    pub fn sequence(&self, key: &str) -> &[Value] {
        sequence_at(&self.root, key)
    }
}

/// Sequence stored under `key` of a mapping value.
/// Missing keys and values of any other type yield an empty slice.
pub(crate) fn sequence_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Borrowed view of a `- task: ...` step inside a [`PipelineDocument`]
#[derive(Debug, Clone, Copy)]
pub struct TaskStep<'a> {
    step: &'a Mapping,
}

impl<'a> TaskStep<'a> {
    pub fn new(step: &'a Mapping) -> Self {
        Self { step }
    }

    /// Task identifier, e.g. `PublishPipelineArtifact@1`
    pub fn task(&self) -> Option<&'a str> {
        self.step.get("task").and_then(Value::as_str)
    }

    pub fn display_name(&self) -> Option<String> {
        self.step.get("displayName").and_then(scalar_to_string)
    }

    /// Raw `continueOnError` value; may be a bool or a runtime expression
    pub fn continue_on_error(&self) -> Option<&'a Value> {
        self.step
            .get("continueOnError")
            .filter(|value| !value.is_null())
    }

    pub fn condition(&self) -> Option<String> {
        self.step.get("condition").and_then(scalar_to_string)
    }

    pub fn artifact_name(&self) -> Option<String> {
        self.input("artifactName")
    }

    pub fn target_path(&self) -> Option<String> {
        self.input("targetPath")
    }

    fn input(&self, name: &str) -> Option<String> {
        self.step
            .get("inputs")
            .and_then(|inputs| inputs.get(name))
            .and_then(scalar_to_string)
    }
}

/// Render a YAML scalar as text. Null and non-scalar values count as absent.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

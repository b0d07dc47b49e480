// Comparison Data Models
// Normalized task records and the classification produced by the matcher

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_yaml::Value;
use std::fmt;

/// Task identifier compared by default
pub const PUBLISH_PIPELINE_ARTIFACT: &str = "PublishPipelineArtifact@1";

/// Rendering of an absent `continueOnError`
pub const UNSET: &str = "<unset>";

/// Flat, normalized view of one task step; the unit of comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTask {
    pub display_name: Option<String>,
    pub continue_on_error: Option<Value>,
    pub condition: String,
    pub artifact_name: Option<String>,
    pub target_path: Option<String>,
}

impl NormalizedTask {
    /// Display name or an empty string, for rendering
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    /// True when both tasks share `(displayName, artifactName, targetPath)`
    pub fn same_key(&self, other: &NormalizedTask) -> bool {
        self.display_name == other.display_name
            && self.artifact_name == other.artifact_name
            && self.target_path == other.target_path
    }

    /// Rendered value of a field
    pub fn field(&self, field: TaskField) -> String {
        match field {
            TaskField::DisplayName => self.name().to_string(),
            TaskField::ContinueOnError => match &self.continue_on_error {
                Some(value) => crate::parser::scalar_to_string(value)
                    .unwrap_or_else(|| format!("{:?}", value)),
                None => UNSET.to_string(),
            },
            TaskField::Condition => self.condition.clone(),
            TaskField::ArtifactName => self.artifact_name.clone().unwrap_or_default(),
            TaskField::TargetPath => self.target_path.clone().unwrap_or_default(),
        }
    }

    /// Like [`field`](Self::field) but strings are quoted and absence is `<unset>`,
    /// so values of different YAML types never render alike
    pub fn field_typed(&self, field: TaskField) -> String {
        let quoted = |value: &Option<String>| match value {
            Some(value) => format!("'{}'", value),
            None => UNSET.to_string(),
        };
        match field {
            TaskField::DisplayName => quoted(&self.display_name),
            TaskField::ContinueOnError => match &self.continue_on_error {
                Some(Value::String(value)) => format!("'{}'", value),
                _ => self.field(field),
            },
            TaskField::Condition => format!("'{}'", self.condition),
            TaskField::ArtifactName => quoted(&self.artifact_name),
            TaskField::TargetPath => quoted(&self.target_path),
        }
    }

    fn field_eq(&self, other: &NormalizedTask, field: TaskField) -> bool {
        match field {
            TaskField::DisplayName => self.display_name == other.display_name,
            TaskField::ContinueOnError => self.continue_on_error == other.continue_on_error,
            TaskField::Condition => self.condition == other.condition,
            TaskField::ArtifactName => self.artifact_name == other.artifact_name,
            TaskField::TargetPath => self.target_path == other.target_path,
        }
    }

    /// Every field other than `displayName` whose values differ, in declaration order.
    /// When the plain renderings coincide (`'true'` vs `true`) both sides use
    /// [`field_typed`](Self::field_typed).
    pub fn differences(&self, other: &NormalizedTask) -> IndexMap<TaskField, FieldChange> {
        TaskField::ALL
            .into_iter()
            .filter(|field| *field != TaskField::DisplayName)
            .filter(|field| !self.field_eq(other, *field))
            .map(|field| {
                let mut change = FieldChange {
                    source: self.field(field),
                    target: other.field(field),
                };
                if change.source == change.target {
                    change = FieldChange {
                        source: self.field_typed(field),
                        target: other.field_typed(field),
                    };
                }
                (field, change)
            })
            .collect()
    }
}

/// Fields of a [`NormalizedTask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskField {
    DisplayName,
    ContinueOnError,
    Condition,
    ArtifactName,
    TargetPath,
}

impl TaskField {
    pub const ALL: [TaskField; 5] = [
        TaskField::DisplayName,
        TaskField::ContinueOnError,
        TaskField::Condition,
        TaskField::ArtifactName,
        TaskField::TargetPath,
    ];

    /// Field name as written in pipeline YAML
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskField::DisplayName => "displayName",
            TaskField::ContinueOnError => "continueOnError",
            TaskField::Condition => "condition",
            TaskField::ArtifactName => "artifactName",
            TaskField::TargetPath => "targetPath",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Values of one differing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub source: String,
    pub target: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} != {}", self.source, self.target)
    }
}

/// Classification of one task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonResult {
    Identical {
        source: NormalizedTask,
        target: NormalizedTask,
    },
    Different {
        source: NormalizedTask,
        target: NormalizedTask,
        differences: IndexMap<TaskField, FieldChange>,
    },
    MissingInTarget {
        source: NormalizedTask,
    },
    /// Target task no source task matched
    ExtraInTarget {
        target: NormalizedTask,
    },
}

impl ComparisonResult {
    pub fn status(&self) -> ComparisonStatus {
        match self {
            ComparisonResult::Identical { .. } => ComparisonStatus::Identical,
            ComparisonResult::Different { .. } => ComparisonStatus::Different,
            ComparisonResult::MissingInTarget { .. } => ComparisonStatus::MissingInTarget,
            ComparisonResult::ExtraInTarget { .. } => ComparisonStatus::ExtraInTarget,
        }
    }
}

/// Variant tag of a [`ComparisonResult`], ordered as rows are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComparisonStatus {
    Identical,
    Different,
    MissingInTarget,
    ExtraInTarget,
}

/// Count of results per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub identical: usize,
    pub different: usize,
    pub missing_in_target: usize,
    pub extra_in_target: usize,
}

impl ComparisonSummary {
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status() {
                ComparisonStatus::Identical => summary.identical += 1,
                ComparisonStatus::Different => summary.different += 1,
                ComparisonStatus::MissingInTarget => summary.missing_in_target += 1,
                ComparisonStatus::ExtraInTarget => summary.extra_in_target += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.identical + self.different + self.missing_in_target + self.extra_in_target
    }

    /// True when every task matched without differences
    pub fn all_identical(&self) -> bool {
        self.identical == self.total()
    }
}

/// Knobs for extraction and matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    /// Task identifier to extract
    pub task_name: String,
    /// Append target tasks no source task matched
    pub report_extra: bool,
    /// A target task can be matched by at most one source task
    pub one_to_one: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            task_name: PUBLISH_PIPELINE_ARTIFACT.to_string(),
            report_extra: false,
            one_to_one: false,
        }
    }
}

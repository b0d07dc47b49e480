// Task Extraction
// Walks stages -> jobs -> steps and collects steps running a given task

use crate::parser::models::sequence_at;
use crate::parser::{PipelineDocument, TaskStep};

use serde_yaml::Value;

/// Collect every `stages[*].jobs[*].steps[*]` step whose `task` equals `task_name`.
///
/// Order follows the document. Missing or mistyped `stages`, `jobs`, or `steps`
/// contribute nothing.
pub fn extract_tasks<'a>(document: &'a PipelineDocument, task_name: &str) -> Vec<TaskStep<'a>> {
    let tasks: Vec<TaskStep<'a>> = document
        .sequence("stages")
        .iter()
        .flat_map(|stage| sequence_at(stage, "jobs"))
        .flat_map(|job| sequence_at(job, "steps"))
        .filter_map(Value::as_mapping)
        .map(TaskStep::new)
        .filter(|step| step.task() == Some(task_name))
        .collect();

    tracing::debug!(
        path = %document.path().display(),
        task = task_name,
        count = tasks.len(),
        "extracted tasks"
    );

    tasks
}

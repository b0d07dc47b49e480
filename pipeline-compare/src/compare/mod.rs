// Compare module
// Extracts, normalizes, and matches tasks between two pipeline documents

pub mod extract;
pub mod matcher;
pub mod models;
pub mod normalize;

pub use extract::extract_tasks;
pub use matcher::match_tasks;
pub use models::*;
pub use normalize::{
    clean_display_name, normalize_condition, normalize_path, normalize_task, DEFAULT_CONDITION,
};

use crate::parser::PipelineDocument;

/// Extract and normalize the tasks of one document
pub fn normalized_tasks(document: &PipelineDocument, task_name: &str) -> Vec<NormalizedTask> {
    extract_tasks(document, task_name)
        .iter()
        .map(normalize_task)
        .collect()
}

/// Compare the tasks of two loaded documents
pub fn compare_documents(
    source: &PipelineDocument,
    target: &PipelineDocument,
    options: &CompareOptions,
) -> Vec<ComparisonResult> {
    let source_tasks = normalized_tasks(source, &options.task_name);
    let target_tasks = normalized_tasks(target, &options.task_name);
    match_tasks(&source_tasks, &target_tasks, options)
}

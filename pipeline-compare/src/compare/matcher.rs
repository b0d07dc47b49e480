// Task Matching
// Pairs source tasks with target tasks by (displayName, artifactName, targetPath)

use crate::compare::models::{CompareOptions, ComparisonResult, NormalizedTask};

/// Classify every source task against the target tasks.
///
/// Source order is preserved. Each source task is paired with the first target
/// task sharing its key triple; unless `one_to_one` is set, a target task may be
/// the match for several source tasks. With `report_extra`, unmatched target
/// tasks are appended in target order.
pub fn match_tasks(
    source: &[NormalizedTask],
    target: &[NormalizedTask],
    options: &CompareOptions,
) -> Vec<ComparisonResult> {
    let mut matched = vec![false; target.len()];
    let mut results = Vec::with_capacity(source.len());

    for task in source {
        let found = target
            .iter()
            .enumerate()
            .find(|(index, candidate)| {
                !(options.one_to_one && matched[*index]) && task.same_key(candidate)
            });

        let result = match found {
            None => {
                tracing::trace!(task = task.name(), "no match in target");
                ComparisonResult::MissingInTarget {
                    source: task.clone(),
                }
            }
            Some((index, candidate)) => {
                matched[index] = true;
                classify(task, candidate)
            }
        };
        results.push(result);
    }

    if options.report_extra {
        results.extend(
            target
                .iter()
                .zip(&matched)
                .filter(|(_, was_matched)| !**was_matched)
                .map(|(task, _)| ComparisonResult::ExtraInTarget {
                    target: task.clone(),
                }),
        );
    }

    tracing::debug!(
        source = source.len(),
        target = target.len(),
        results = results.len(),
        "matched tasks"
    );

    results
}

fn classify(source: &NormalizedTask, target: &NormalizedTask) -> ComparisonResult {
    let differences = source.differences(target);
    tracing::trace!(
        task = source.name(),
        differences = differences.len(),
        "matched target task"
    );

    if differences.is_empty() {
        ComparisonResult::Identical {
            source: source.clone(),
            target: target.clone(),
        }
    } else {
        ComparisonResult::Different {
            source: source.clone(),
            target: target.clone(),
            differences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::models::{ComparisonStatus, FieldChange, TaskField};

    use serde_yaml::Value;

    fn task(name: &str, artifact: &str, path: &str) -> NormalizedTask {
        NormalizedTask {
            display_name: Some(name.to_string()),
            continue_on_error: None,
            condition: "succeeded()".to_string(),
            artifact_name: Some(artifact.to_string()),
            target_path: Some(path.to_string()),
        }
    }

    fn statuses(results: &[ComparisonResult]) -> Vec<ComparisonStatus> {
        results.iter().map(ComparisonResult::status).collect()
    }

    #[test]
    fn test_identical_match() {
        let source = vec![task("Publish Logs", "logs", "a/b")];
        let target = vec![task("Other", "x", "y"), task("Publish Logs", "logs", "a/b")];

        let results = match_tasks(&source, &target, &CompareOptions::default());
        assert_eq!(statuses(&results), vec![ComparisonStatus::Identical]);
    }

    #[test]
    fn test_continue_on_error_difference() {
        let mut a = task("Publish", "drop", "out");
        a.continue_on_error = Some(Value::Bool(true));
        let mut b = task("Publish", "drop", "out");
        b.continue_on_error = Some(Value::Bool(false));

        let results = match_tasks(&[a], &[b], &CompareOptions::default());
        match &results[0] {
            ComparisonResult::Different { differences, .. } => {
                assert_eq!(differences.len(), 1);
                assert_eq!(
                    differences[&TaskField::ContinueOnError],
                    FieldChange {
                        source: "true".to_string(),
                        target: "false".to_string(),
                    }
                );
            }
            other => panic!("expected Different, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_is_not_part_of_the_key() {
        let a = task("Publish", "drop", "out");
        let mut b = task("Publish", "drop", "out");
        b.condition = "always()".to_string();

        let results = match_tasks(&[a], &[b], &CompareOptions::default());
        assert_eq!(statuses(&results), vec![ComparisonStatus::Different]);
    }

    #[test]
    fn test_missing_in_target() {
        let source = vec![task("Publish", "drop", "out")];
        let target = vec![task("Publish", "drop", "elsewhere")];

        let results = match_tasks(&source, &target, &CompareOptions::default());
        assert_eq!(statuses(&results), vec![ComparisonStatus::MissingInTarget]);
    }

    #[test]
    fn test_first_match_wins() {
        let source = vec![task("Publish", "drop", "out")];
        let mut first = task("Publish", "drop", "out");
        first.condition = "always()".to_string();
        let second = task("Publish", "drop", "out");

        let results = match_tasks(&source, &[first, second], &CompareOptions::default());
        assert_eq!(statuses(&results), vec![ComparisonStatus::Different]);
    }

    #[test]
    fn test_target_reused_by_default() {
        let source = vec![task("Publish", "drop", "out"), task("Publish", "drop", "out")];
        let target = vec![task("Publish", "drop", "out")];

        let results = match_tasks(&source, &target, &CompareOptions::default());
        assert_eq!(
            statuses(&results),
            vec![ComparisonStatus::Identical, ComparisonStatus::Identical]
        );
    }

    #[test]
    fn test_one_to_one_consumes_targets() {
        let source = vec![task("Publish", "drop", "out"), task("Publish", "drop", "out")];
        let target = vec![task("Publish", "drop", "out")];
        let options = CompareOptions {
            one_to_one: true,
            ..CompareOptions::default()
        };

        let results = match_tasks(&source, &target, &options);
        assert_eq!(
            statuses(&results),
            vec![ComparisonStatus::Identical, ComparisonStatus::MissingInTarget]
        );
    }

    #[test]
    fn test_extra_in_target_only_when_requested() {
        let source = vec![task("A", "a", "a")];
        let target = vec![task("B", "b", "b"), task("A", "a", "a"), task("C", "c", "c")];

        let default = match_tasks(&source, &target, &CompareOptions::default());
        assert_eq!(statuses(&default), vec![ComparisonStatus::Identical]);

        let options = CompareOptions {
            report_extra: true,
            ..CompareOptions::default()
        };
        let results = match_tasks(&source, &target, &options);
        assert_eq!(
            statuses(&results),
            vec![
                ComparisonStatus::Identical,
                ComparisonStatus::ExtraInTarget,
                ComparisonStatus::ExtraInTarget,
            ]
        );
        match &results[1] {
            ComparisonResult::ExtraInTarget { target } => assert_eq!(target.name(), "B"),
            other => panic!("expected ExtraInTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_matching_is_deterministic() {
        let source = vec![
            task("A", "a", "a"),
            task("B", "b", "b"),
            task("C", "c", "c"),
        ];
        let target = vec![task("C", "c", "c"), task("A", "a", "a")];

        let first = match_tasks(&source, &target, &CompareOptions::default());
        let second = match_tasks(&source, &target, &CompareOptions::default());
        assert_eq!(first, second);
        assert_eq!(
            statuses(&first),
            vec![
                ComparisonStatus::Identical,
                ComparisonStatus::MissingInTarget,
                ComparisonStatus::Identical,
            ]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let results = match_tasks(&[], &[task("A", "a", "a")], &CompareOptions::default());
        assert!(results.is_empty());
    }
}

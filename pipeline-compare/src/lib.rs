// Pipeline Compare Library
// Diffs PublishPipelineArtifact task configurations between two Azure DevOps pipelines

pub mod compare;
pub mod error;
pub mod parser;
pub mod report;

use std::path::Path;

// Re-export commonly used types
pub use error::{CompareError, CompareResult};

// Re-export parser types
pub use parser::{LoadError, LoadErrorKind, PipelineDocument, PipelineLoader, TaskStep};

// Re-export comparison types
pub use compare::{
    compare_documents, extract_tasks, match_tasks, normalize_task, CompareOptions,
    ComparisonResult, ComparisonStatus, ComparisonSummary, FieldChange, NormalizedTask,
    TaskField, PUBLISH_PIPELINE_ARTIFACT,
};

// Re-export report types
pub use report::{group_by_status, ReportFormat, ReportLabels, Reporter};

/// Load both files, then compare their tasks.
///
/// Both documents are loaded before any comparison runs, so a bad target file
/// fails the whole run without partial results.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target: Q,
    options: &CompareOptions,
) -> CompareResult<Vec<ComparisonResult>> {
    let source = PipelineLoader::load_file(source)?;
    let target = PipelineLoader::load_file(target)?;
    Ok(compare_documents(&source, &target, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    const SOURCE: &str = r#"
stages:
  - stage: Build
    jobs:
      - job: Build
        steps:
          - task: PublishPipelineArtifact@1
            displayName: Publish Logs (debug)
            inputs:
              artifactName: logs
              targetPath: 'a\b'
          - task: PublishPipelineArtifact@1
            displayName: Publish drop
            continueOnError: true
            inputs:
              artifactName: drop
              targetPath: out/drop
          - task: PublishPipelineArtifact@1
            displayName: Publish symbols
            inputs:
              artifactName: symbols
              targetPath: out/symbols
"#;

    const TARGET: &str = r#"
stages:
  - stage: Build
    jobs:
      - job: Build
        steps:
          - task: PublishPipelineArtifact@1
            displayName: Publish Logs
            inputs:
              artifactName: logs
              targetPath: a/b
          - task: PublishPipelineArtifact@1
            displayName: Publish drop
            continueOnError: false
            inputs:
              artifactName: drop
              targetPath: ./out/drop
"#;

    #[test]
    fn test_compare_files() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("non-1espt.yml");
        let target = temp.path().join("1espt.yml");
        fs::write(&source, SOURCE).unwrap();
        fs::write(&target, TARGET).unwrap();

        let results = compare_files(&source, &target, &CompareOptions::default()).unwrap();
        let statuses: Vec<ComparisonStatus> = results.iter().map(|r| r.status()).collect();
        assert_eq!(
            statuses,
            vec![
                ComparisonStatus::Identical,
                ComparisonStatus::Different,
                ComparisonStatus::MissingInTarget,
            ]
        );

        let table = Reporter::to_table(&results, &ReportLabels::default());
        assert!(table.contains("continueOnError: true != false"));
        assert!(table.contains("Publish symbols"));
    }

    #[test]
    fn test_compare_files_missing_target() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("source.yml");
        fs::write(&source, SOURCE).unwrap();
        let target = temp.path().join("absent.yml");

        match compare_files(&source, &target, &CompareOptions::default()) {
            Err(CompareError::Load(err)) => {
                assert_eq!(err.kind, LoadErrorKind::NotFound);
                assert_eq!(err.path, target);
            }
            other => panic!("expected load error, got {:?}", other),
        }
    }
}

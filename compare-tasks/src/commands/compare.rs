use crate::output;

use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::Result;

use pipeline_compare::{
    compare_documents, group_by_status, CompareOptions, ComparisonSummary, PipelineDocument,
    PipelineLoader, ReportFormat, ReportLabels, Reporter, PUBLISH_PIPELINE_ARTIFACT,
};

/// Compare task configurations between two pipeline YAML files
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Baseline pipeline YAML file
    #[arg(env = "COMPARE_TASKS_SOURCE")]
    pub source: PathBuf,

    /// Pipeline YAML file to check against the baseline
    #[arg(env = "COMPARE_TASKS_TARGET")]
    pub target: PathBuf,

    /// Task identifier to compare
    #[arg(long, value_name = "TASK", default_value = PUBLISH_PIPELINE_ARTIFACT)]
    pub task: String,

    /// Output format: table, json
    #[arg(long, short = 'o', default_value = "table")]
    pub format: String,

    /// Label for the source pipeline in the table header
    #[arg(long, value_name = "LABEL", default_value = "source")]
    pub source_label: String,

    /// Label for the target pipeline in the table header
    #[arg(long, value_name = "LABEL", default_value = "target")]
    pub target_label: String,

    /// List identical tasks first, then differing, then missing
    #[arg(long)]
    pub group_by_status: bool,

    /// Match each target task at most once
    #[arg(long)]
    pub one_to_one: bool,

    /// Also report target tasks no source task matched
    #[arg(long)]
    pub report_extra: bool,

    /// Exit with status 1 when any task is not identical
    #[arg(long)]
    pub fail_on_diff: bool,
}

impl CompareArgs {
    fn options(&self) -> CompareOptions {
        CompareOptions {
            task_name: self.task.clone(),
            report_extra: self.report_extra,
            one_to_one: self.one_to_one,
        }
    }

    fn labels(&self) -> ReportLabels {
        ReportLabels {
            source: self.source_label.clone(),
            target: self.target_label.clone(),
        }
    }
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let format: ReportFormat = args
        .format
        .parse()
        .map_err(|e: String| color_eyre::eyre::eyre!("{}", e))?;

    // Load both sides before printing anything to stdout
    let source = load_or_exit(&args.source);
    let target = load_or_exit(&args.target);

    output::comparing(&args.task, &args.source, &args.target);

    let mut results = compare_documents(&source, &target, &args.options());
    if args.group_by_status {
        group_by_status(&mut results);
    }

    let summary = ComparisonSummary::from_results(&results);
    tracing::debug!(?summary, grouped = args.group_by_status, "comparison finished");
    if summary.total() == 0 {
        output::no_tasks_found(&args.task, &args.source);
    }

    let report = Reporter::report(&results, format, &args.labels())?;
    print!("{}", report);

    output::summary(&summary);

    if args.fail_on_diff && !summary.all_identical() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_or_exit(path: &Path) -> PipelineDocument {
    match PipelineLoader::load_file(path) {
        Ok(document) => document,
        Err(err) => {
            output::load_error(&err);
            std::process::exit(1);
        }
    }
}

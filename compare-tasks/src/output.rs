// Terminal output for the compare command
// Everything here goes to stderr; stdout carries only the report

use std::path::Path;

use pipeline_compare::{ComparisonSummary, LoadError};

const HEADING: &str = "1;36";
const PASS: &str = "1;32";
const FAIL: &str = "1;31";
const WARN: &str = "33";
const HINT: &str = "36";
const MUTED: &str = "2";

fn paint(style: &str, text: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", style, text)
}

/// "   Comparing PublishPipelineArtifact@1 tasks: a.yml -> b.yml"
pub fn comparing(task: &str, source: &Path, target: &Path) {
    eprintln!(
        "{} {} tasks: {} -> {}",
        paint(HEADING, &format!("{:>12}", "Comparing")),
        task,
        source.display(),
        target.display()
    );
}

/// Warn that the source pipeline holds none of the requested task
pub fn no_tasks_found(task: &str, source: &Path) {
    eprintln!(
        "{} No {} tasks found under stages[].jobs[].steps[] in {}",
        paint(WARN, "  !"),
        task,
        source.display()
    );
}

/// Print a load failure with its source excerpt and fix hint
pub fn load_error(err: &LoadError) {
    for line in load_error_lines(err) {
        eprintln!("{}", line);
    }
}

fn load_error_lines(err: &LoadError) -> Vec<String> {
    let mut lines = vec![format!("{} {}", paint(FAIL, "error:"), err)];
    if !err.context.is_empty() {
        lines.push(paint(MUTED, err.context.trim_end()));
    }
    if let Some(suggestion) = &err.suggestion {
        lines.push(format!("{}   Suggestion: {}", paint(HINT, "  i"), suggestion));
    }
    lines
}

/// Print the per-status counts, marked pass when every task is identical
pub fn summary(summary: &ComparisonSummary) {
    let mark = if summary.all_identical() {
        paint(PASS, "  \u{2713}")
    } else {
        paint(FAIL, "  \u{2717}")
    };
    eprintln!();
    eprintln!("{} {}", mark, summary_line(summary));
}

fn summary_line(summary: &ComparisonSummary) -> String {
    let mut line = format!(
        "{} identical, {} different, {} missing in target",
        summary.identical, summary.different, summary.missing_in_target
    );
    if summary.extra_in_target > 0 {
        line.push_str(&format!(", {} extra in target", summary.extra_in_target));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_compare::LoadErrorKind;

    #[test]
    fn test_summary_line() {
        let mut summary = ComparisonSummary {
            identical: 2,
            different: 1,
            missing_in_target: 0,
            extra_in_target: 0,
        };
        assert_eq!(
            summary_line(&summary),
            "2 identical, 1 different, 0 missing in target"
        );

        summary.extra_in_target = 3;
        assert!(summary_line(&summary).ends_with(", 3 extra in target"));
    }

    #[test]
    fn test_load_error_lines() {
        let err = LoadError::new(
            "broken.yml",
            "did not find expected key",
            LoadErrorKind::YamlSyntax,
        )
        .at(3, 4)
        .with_suggestion("Check indentation");

        let lines = load_error_lines(&err);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "\x1b[1;31merror:\x1b[0m broken.yml: did not find expected key (line 3:4)"
        );
        assert!(lines[1].ends_with("Suggestion: Check indentation"));
    }

    #[test]
    fn test_load_error_lines_without_extras() {
        let err = LoadError::new("gone.yml", "file not found", LoadErrorKind::NotFound);
        assert_eq!(load_error_lines(&err).len(), 1);
    }
}

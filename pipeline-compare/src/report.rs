// Comparison Reporter
// Renders comparison results as a plain-text table or JSON

use crate::compare::{ComparisonResult, ComparisonSummary};
use crate::error::CompareResult;

use serde::Serialize;
use std::fmt;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" | "terminal" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown report format '{}'. Valid formats: table, json",
                s
            )),
        }
    }
}

/// Names of the two compared pipelines, used in table headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLabels {
    pub source: String,
    pub target: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
        }
    }
}

/// Placeholder for the side of a row that has no task
pub const MISSING: &str = "Missing";
/// Differences cell for unmatched tasks
pub const NOT_APPLICABLE: &str = "N/A";
/// Differences cell for identical tasks
pub const NO_DIFFERENCES: &str = "No differences";

/// Column separator in the table layout
const COLUMN_GAP: &str = "  ";

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    target: &'a str,
    summary: ComparisonSummary,
    results: &'a [ComparisonResult],
}

/// Report generator for comparison results
pub struct Reporter;

impl Reporter {
    /// Generate a report in the specified format
    pub fn report(
        results: &[ComparisonResult],
        format: ReportFormat,
        labels: &ReportLabels,
    ) -> CompareResult<String> {
        match format {
            ReportFormat::Table => Ok(Self::to_table(results, labels)),
            ReportFormat::Json => Self::to_json(results, labels),
        }
    }

    /// One `[source name, target name, differences]` row per result
    pub fn rows(results: &[ComparisonResult]) -> Vec<[String; 3]> {
        results
            .iter()
            .map(|result| match result {
                ComparisonResult::Identical { source, target } => [
                    source.name().to_string(),
                    target.name().to_string(),
                    NO_DIFFERENCES.to_string(),
                ],
                ComparisonResult::Different {
                    source,
                    target,
                    differences,
                } => [
                    source.name().to_string(),
                    target.name().to_string(),
                    differences
                        .iter()
                        .map(|(field, change)| format!("{}: {}", field, change))
                        .collect::<Vec<_>>()
                        .join("; "),
                ],
                ComparisonResult::MissingInTarget { source } => [
                    source.name().to_string(),
                    MISSING.to_string(),
                    NOT_APPLICABLE.to_string(),
                ],
                ComparisonResult::ExtraInTarget { target } => [
                    MISSING.to_string(),
                    target.name().to_string(),
                    NOT_APPLICABLE.to_string(),
                ],
            })
            .collect()
    }

    /// Generate the table: a header row, dashes under each column, then one row per
    /// result. Columns are left-aligned and padded to their widest cell. Line
    /// breaks inside a cell become spaces so every result stays on one line.
    pub fn to_table(results: &[ComparisonResult], labels: &ReportLabels) -> String {
        let headers = [
            format!("Task Display Name ({})", labels.source),
            format!("Task Display Name ({})", labels.target),
            "Differences".to_string(),
        ]
        .map(|header| single_line(&header));
        let rows: Vec<[String; 3]> = Self::rows(results)
            .into_iter()
            .map(|row| row.map(|cell| single_line(&cell)))
            .collect();

        let mut widths = headers.clone().map(|header| header.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let dashes = widths.map(|width| "-".repeat(width));

        let mut table = String::new();
        push_row(&mut table, &headers, &widths);
        push_row(&mut table, &dashes, &widths);
        for row in &rows {
            push_row(&mut table, row, &widths);
        }
        table
    }

    /// Generate JSON output with a summary and every result
    pub fn to_json(results: &[ComparisonResult], labels: &ReportLabels) -> CompareResult<String> {
        let report = JsonReport {
            source: &labels.source,
            target: &labels.target,
            summary: ComparisonSummary::from_results(results),
            results,
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}

/// Reorder results as identical, different, missing, extra. Stable within a group.
pub fn group_by_status(results: &mut [ComparisonResult]) {
    results.sort_by_key(ComparisonResult::status);
}

fn single_line(cell: &str) -> String {
    cell.replace("\r\n", " ")
        .replace(|c: char| c == '\r' || c == '\n', " ")
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

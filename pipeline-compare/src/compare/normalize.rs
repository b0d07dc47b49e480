// Task Normalization
// Flattens task steps and cleans up fields that differ only cosmetically between pipelines

use crate::compare::models::NormalizedTask;
use crate::parser::TaskStep;

use once_cell::sync::Lazy;
use regex::Regex;

/// Condition every Azure DevOps step runs under when none is given
pub const DEFAULT_CONDITION: &str = "succeeded()";

static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(.*?\)").expect("parenthesized pattern is valid"));
static NON_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("non-ascii pattern is valid"));

/// Build the comparison record for a task step
pub fn normalize_task(step: &TaskStep<'_>) -> NormalizedTask {
    NormalizedTask {
        display_name: step.display_name().map(|name| clean_display_name(&name)),
        continue_on_error: step.continue_on_error().cloned(),
        condition: normalize_condition(step.condition().as_deref()),
        artifact_name: step.artifact_name(),
        target_path: step.target_path().map(|path| normalize_path(&path)),
    }
}

/// Drop parenthesized annotations and non-ASCII characters (emoji, decorations)
///
/// `"Publish Logs (debug) 📦"` becomes `"Publish Logs"`. Cleanup repeats until
/// nothing changes: removing one pair can expose another, e.g. `"(\n())"`.
pub fn clean_display_name(display_name: &str) -> String {
    let mut cleaned = clean_once(display_name);
    loop {
        let next = clean_once(&cleaned);
        if next == cleaned {
            return cleaned;
        }
        cleaned = next;
    }
}

fn clean_once(display_name: &str) -> String {
    let without_parens = PARENTHESIZED.replace_all(display_name, "");
    let ascii = NON_ASCII.replace_all(without_parens.trim(), "");
    ascii.trim().to_string()
}

/// An absent condition is the same as the implicit `succeeded()`
pub fn normalize_condition(condition: Option<&str>) -> String {
    match condition {
        None => DEFAULT_CONDITION.to_string(),
        Some(condition) => condition.to_string(),
    }
}

/// Lexically canonicalize a path and express it with forward slashes.
///
/// Both `/` and `\` separate segments. `.` and empty segments are dropped and
/// `..` consumes the preceding segment. A `C:` style drive prefix is kept, as is
/// the `//` of a UNC path (`\\server\share`). A relative path whose first
/// segment looks like a drive keeps a `./` prefix so it stays relative.
/// The filesystem is never consulted, so pipeline variables such as
/// `$(Build.ArtifactStagingDirectory)` pass through untouched.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let (drive, rest) = split_drive(path);
    let rooted = rest.starts_with(is_separator);
    let unc = drive.is_empty() && is_unc(rest);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    // `..` above the root is the root itself
                    segments.push("..");
                }
            }
            segment => segments.push(segment),
        }
    }

    let mut normalized = String::from(drive);
    if unc && !segments.is_empty() {
        normalized.push_str("//");
    } else if rooted {
        normalized.push('/');
    } else if drive.is_empty() && segments.first().is_some_and(|first| has_drive(first)) {
        normalized.push_str("./");
    }
    normalized.push_str(&segments.join("/"));

    if normalized.is_empty() {
        normalized.push('.');
    }
    normalized
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Exactly two leading separators
fn is_unc(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some(b), Some(c)) if is_separator(a) && is_separator(b) && !is_separator(c)
    )
}

fn has_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn split_drive(path: &str) -> (&str, &str) {
    if has_drive(path) {
        path.split_at(2)
    } else {
        ("", path)
    }
}

// Loader error types with helpful error messages
// Carries the offending path, line/column info, and suggestions for common mistakes

use std::fmt;
use std::path::{Path, PathBuf};

/// Failure to turn a file into a pipeline document
#[derive(Debug, Clone)]
pub struct LoadError {
    /// File the document was loaded from
    pub path: PathBuf,
    /// Error message
    pub message: String,
    /// Line number (1-indexed, 0 when unknown)
    pub line: usize,
    /// Column number (1-indexed, 0 when unknown)
    pub column: usize,
    /// Surrounding source lines
    pub context: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
    pub kind: LoadErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// File does not exist
    NotFound,
    /// File exists but could not be read
    Io,
    /// YAML syntax error
    YamlSyntax,
}

impl LoadError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: LoadErrorKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            line: 0,
            column: 0,
            context: String::new(),
            suggestion: None,
            kind,
        }
    }

    /// Build from an io error raised while reading `path`
    pub fn from_io_error(path: &Path, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                Self::new(path, "file not found", LoadErrorKind::NotFound)
                    .with_suggestion("paths are resolved relative to the current directory")
            }
            _ => Self::new(
                path,
                format!("failed to read file: {}", err),
                LoadErrorKind::Io,
            ),
        }
    }

    /// Build from a serde_yaml error, attaching source context
    pub fn from_yaml_error(path: &Path, err: &serde_yaml::Error, source: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((0, 0));

        let mut error =
            Self::new(path, format_yaml_error_message(err), LoadErrorKind::YamlSyntax)
                .at(line, column)
                .with_source_context(source, 2);
        error.suggestion = suggest_yaml_fix(source, line);
        error
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create context from source content
    pub fn with_source_context(mut self, source: &str, context_lines: usize) -> Self {
        if self.line == 0 {
            return self;
        }

        let lines: Vec<&str> = source.lines().collect();
        let start = self.line.saturating_sub(context_lines + 1);
        let end = (self.line + context_lines).min(lines.len());

        let mut context = String::new();
        for (i, line) in lines.iter().enumerate().take(end).skip(start) {
            let line_num = i + 1;
            let prefix = if line_num == self.line { ">" } else { " " };
            context.push_str(&format!("{} {:4} | {}\n", prefix, line_num, line));

            if line_num == self.line && self.column > 0 {
                let indicator = " ".repeat(self.column - 1) + "^";
                context.push_str(&format!("       | {}\n", indicator));
            }
        }

        self.context = context;
        self
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)?;
        if self.line > 0 {
            write!(f, " (line {}:{})", self.line, self.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}

/// serde_yaml appends "at line X column Y"; the location is reported separately
fn format_yaml_error_message(err: &serde_yaml::Error) -> String {
    let msg = err.to_string();
    match msg.find(" at line ") {
        Some(idx) => msg[..idx].to_string(),
        None => msg,
    }
}

fn suggest_yaml_fix(source: &str, line: usize) -> Option<String> {
    let error_line = source.lines().nth(line.checked_sub(1)?)?;

    if error_line.starts_with('\t') {
        return Some(
            "YAML does not allow tabs for indentation. Replace tabs with spaces.".to_string(),
        );
    }

    if error_line.matches('"').count() % 2 == 1 || error_line.matches('\'').count() % 2 == 1 {
        return Some("check for an unterminated quoted string".to_string());
    }

    None
}

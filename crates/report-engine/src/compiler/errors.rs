//! Error types for report compilation

use thiserror::Error;

/// A typst diagnostic flattened for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    pub hint: Option<String>,
    pub severity: ErrorSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn as_warning(mut self) -> Self {
        self.severity = ErrorSeverity::Warning;
        self
    }
}

/// Report generation failures. Each one aborts only the current report.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid report input: {0}")]
    InvalidInput(String),

    #[error("Report template failed to compile: {}", summarize(.0))]
    Compile(Vec<CompileError>),

    #[error("Report generation timed out after {0}ms")]
    Timeout(u64),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Report task failed: {0}")]
    Task(String),
}

fn summarize(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

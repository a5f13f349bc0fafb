use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use std::path::Path;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub code: String,
    pub message: String,
    pub context: IndexMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        AppError {
            category,
            code: default_code(category).to_string(),
            message: message.into(),
            context: IndexMap::new(),
            recovery_suggestions: vec![],
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(source.into());
        error
    }

    /// Failure to read or decode a workflow document.
    pub fn input(path: &Path, source: std::io::Error) -> Self {
        let mut error = AppError::with_source(
            ErrorCategory::InputError,
            format!("failed to read {}", path.display()),
            source,
        );
        error.add_context("path", &path.display().to_string());
        error
            .recovery_suggestions
            .push("Check that the file exists, is readable and is UTF-8 encoded".to_string());
        error
    }

    /// Failure to write a generated report.
    pub fn output(path: &Path, source: std::io::Error) -> Self {
        let mut error = AppError::with_source(
            ErrorCategory::OutputError,
            format!("failed to write {}", path.display()),
            source,
        );
        error.add_context("path", &path.display().to_string());
        error
            .recovery_suggestions
            .push("Check write permissions on the output directory".to_string());
        error
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }
}

fn default_code(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::InputError => "INPUT_ERROR",
        ErrorCategory::OutputError => "OUTPUT_ERROR",
        ErrorCategory::ConfigError => "CONFIG_ERROR",
        ErrorCategory::UsageError => "USAGE_ERROR",
        ErrorCategory::SerializationError => "SERIALIZATION_ERROR",
        ErrorCategory::IoError => "IO_ERROR",
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<crate::core::types::FormatError> for AppError {
    fn from(e: crate::core::types::FormatError) -> Self {
        AppError::new(ErrorCategory::UsageError, e.to_string())
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
    fn report_file_error(&self, file: &Path, error: &AppError);
}

/// Prints operator-facing messages: results to stdout, failures to stderr.
pub struct DefaultErrorReporter;

impl DefaultErrorReporter {
    pub fn new() -> Self {
        DefaultErrorReporter
    }
}

impl Default for DefaultErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        tracing::error!(code = %error.code, category = %error.category, "{}", error.message);
        eprintln!("Error documenting the FME workflow: {}", error);
        for suggestion in &error.recovery_suggestions {
            eprintln!("  Hint: {}", suggestion);
        }
    }

    fn report_file_error(&self, file: &Path, error: &AppError) {
        let name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        tracing::error!(file = %file.display(), code = %error.code, "{}", error.message);
        eprintln!("Error processing {}: {}", name, error);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    InputError,
    OutputError,
    ConfigError,
    UsageError,
    SerializationError,
    IoError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Report formats understood by the documentation renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report with tables and a process-flow narrative
    #[default]
    #[value(alias = "md")]
    Markdown,
    /// Accepted for compatibility; rendered exactly like markdown
    Html,
    /// Pretty-printed JSON dump of the parsed workflow
    Json,
    /// Graphviz DOT graph of the workflow connections
    Dot,
}

impl OutputFormat {
    /// File name appended to the input stem when writing a report.
    pub fn output_suffix<'a>(&self, markdown_suffix: &'a str) -> &'a str {
        match self {
            OutputFormat::Markdown | OutputFormat::Html => markdown_suffix,
            OutputFormat::Json => ".json",
            OutputFormat::Dot => ".dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Raised when a caller asks for a report format that does not exist.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown output format '{0}'; supported values are markdown, html, json, dot")]
    Unknown(String),
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(FormatError::Unknown(value.to_string())),
        }
    }
}

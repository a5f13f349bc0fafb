use serde::{Deserialize, Serialize};

use crate::core::types::{FormatError, OutputFormat};

/// Documentation settings loaded from fmwdoc.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DocConfig {
    /// Report rendering
    #[serde(default)]
    pub render: RenderConfig,

    /// Directory scanning
    #[serde(default)]
    pub scan: ScanConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Format used when none is given on the command line
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Order transformers by numeric identifier
    #[serde(default)]
    pub sort_transformers: bool,

    /// Transformer parameters whose names start with one of these are not shown
    #[serde(default = "default_hidden_parameter_prefixes")]
    pub hidden_parameter_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// File extensions picked up in directory mode, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Appended to the input stem for markdown and html reports
    #[serde(default = "default_markdown_suffix")]
    pub markdown_suffix: String,
}

fn default_format() -> String {
    OutputFormat::Markdown.to_string()
}

fn default_hidden_parameter_prefixes() -> Vec<String> {
    crate::core::workflow::render::DEFAULT_HIDDEN_PREFIXES
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}

fn default_extensions() -> Vec<String> {
    vec!["fmw".to_string(), "txt".to_string()]
}

fn default_markdown_suffix() -> String {
    "_documentation.md".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            default_format: default_format(),
            sort_transformers: false,
            hidden_parameter_prefixes: default_hidden_parameter_prefixes(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            extensions: default_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            markdown_suffix: default_markdown_suffix(),
        }
    }
}

impl RenderConfig {
    pub fn output_format(&self) -> Result<OutputFormat, FormatError> {
        self.default_format.parse()
    }
}

impl ScanConfig {
    /// Case-insensitive extension match; a leading dot in the configured value is ignored.
    pub fn matches(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

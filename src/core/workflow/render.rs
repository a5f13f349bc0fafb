#![allow(clippy::result_large_err)]

use crate::core::config::DocConfig;
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, OutputFormat};
use crate::core::workflow::dot::workflow_to_dot;
use crate::core::workflow::markdown::render_markdown;
use crate::core::workflow::schema::WorkflowDocument;
use crate::utils::serialization::{JsonSerializer, Serializer};

/// Parameter name prefixes that are never shown in reports by default.
pub const DEFAULT_HIDDEN_PREFIXES: [&str; 2] = ["XFORMER_NAME", "TRANSFORMER_GROUP"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub sort_transformers: bool,
    pub hidden_parameter_prefixes: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            sort_transformers: false,
            hidden_parameter_prefixes: DEFAULT_HIDDEN_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

impl RenderOptions {
    pub fn is_hidden_parameter(&self, name: &str) -> bool {
        self.hidden_parameter_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

impl From<&DocConfig> for RenderOptions {
    fn from(config: &DocConfig) -> Self {
        RenderOptions {
            sort_transformers: config.render.sort_transformers,
            hidden_parameter_prefixes: config.render.hidden_parameter_prefixes.clone(),
        }
    }
}

pub struct DocumentationRenderer {
    serializer: JsonSerializer,
    options: RenderOptions,
}

impl DocumentationRenderer {
    pub fn new(options: RenderOptions) -> Self {
        DocumentationRenderer {
            serializer: JsonSerializer,
            options,
        }
    }

    pub fn generate_report(
        &self,
        document: &WorkflowDocument,
        output_format: OutputFormat,
    ) -> Result<String, AppError> {
        tracing::debug!(format = %output_format, "generating report");

        match output_format {
            OutputFormat::Markdown | OutputFormat::Html => {
                Ok(render_markdown(document, &self.options))
            }
            OutputFormat::Json => self.generate_json_report(document),
            OutputFormat::Dot => Ok(workflow_to_dot(document)),
        }
    }

    fn generate_json_report(&self, document: &WorkflowDocument) -> Result<String, AppError> {
        self.serializer.serialize(document).map_err(|e| {
            AppError::with_source(
                ErrorCategory::SerializationError,
                "failed to generate JSON report",
                e,
            )
            .with_code("REPORT-JSON-001")
        })
    }
}

impl Default for DocumentationRenderer {
    fn default() -> Self {
        DocumentationRenderer::new(RenderOptions::default())
    }
}

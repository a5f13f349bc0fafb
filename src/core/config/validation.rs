#![allow(clippy::result_large_err)]

use super::DocConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &DocConfig) -> Result<(), AppError> {
        config.render.output_format().map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("render.default_format is invalid: {}", e),
            )
        })?;

        if config
            .scan
            .extensions
            .iter()
            .all(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "scan.extensions must name at least one extension",
            ));
        }

        let suffix = &config.output.markdown_suffix;
        if suffix.is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "output.markdown_suffix cannot be empty",
            ));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "output.markdown_suffix cannot contain a path separator",
            ));
        }

        Ok(())
    }
}

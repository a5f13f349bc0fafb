#![allow(clippy::result_large_err)]

use super::DocConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;

/// Name of the configuration file looked up next to the documented workspace.
pub const CONFIG_FILE_NAME: &str = "fmwdoc.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `<dir>/fmwdoc.toml`, falling back to defaults when the
    /// file is absent. Environment variables override file values.
    pub fn load_from_workspace(workspace_path: &Path) -> Result<DocConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let mut config = Self::load_from_file(&config_path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load config from an explicit path. Unlike the workspace lookup a missing
    /// file is an error here.
    pub fn load_explicit(path: &Path) -> Result<DocConfig, AppError> {
        let mut config = Self::load_from_file(path)?.ok_or_else(|| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Config file {} does not exist", path.display()),
            )
        })?;
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Returns Ok(None) if the file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<DocConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: DocConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(Some(config))
    }

    fn apply_env_overrides(config: &mut DocConfig) {
        if let Ok(format) = env::var("FMWDOC_DEFAULT_FORMAT") {
            config.render.default_format = format;
        }

        if let Ok(sort) = env::var("FMWDOC_SORT_TRANSFORMERS") {
            if let Ok(sort) = sort.trim().parse::<bool>() {
                config.render.sort_transformers = sort;
            }
        }

        if let Ok(extensions) = env::var("FMWDOC_EXTENSIONS") {
            config.scan.extensions = extensions
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect();
        }

        if let Ok(suffix) = env::var("FMWDOC_MARKDOWN_SUFFIX") {
            config.output.markdown_suffix = suffix;
        }
    }
}

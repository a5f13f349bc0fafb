#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

pub trait Serializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;
}

/// Pretty JSON with two-space indentation and a trailing newline.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        let mut text = serde_json::to_string_pretty(data)?;
        text.push('\n');
        Ok(text)
    }
}

pub trait ReportWriter {
    fn write_report(&self, path: &Path, contents: &str) -> Result<(), AppError>;
}

/// Writes reports as UTF-8, replacing any existing file.
pub struct FileUtils;

impl ReportWriter for FileUtils {
    fn write_report(&self, path: &Path, contents: &str) -> Result<(), AppError> {
        let mut file = fs::File::create(path).map_err(|err| AppError::output(path, err))?;
        file.write_all(contents.as_bytes())
            .map_err(|err| AppError::output(path, err))?;
        Ok(())
    }
}

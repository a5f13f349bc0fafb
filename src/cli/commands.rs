#![allow(clippy::result_large_err)]

use crate::cli::args::DocumentArgs;
use crate::core::config::loader::CONFIG_FILE_NAME;
use crate::core::config::{ConfigLoader, ConfigValidator, DocConfig};
use crate::core::error::{AppError, DefaultErrorReporter, ErrorReporter};
use crate::core::types::{ErrorCategory, OutputFormat};
use crate::core::workflow::dot::unreachable_labels;
use crate::core::workflow::{parse_workflow_file, DocumentationRenderer, RenderOptions};
use crate::utils::serialization::{FileUtils, ReportWriter};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one invocation, used to pick the process exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

pub fn document(args: DocumentArgs) -> Result<RunSummary> {
    let config = load_config(&args)?;
    let format = match args.format {
        Some(format) => format,
        None => config.render.output_format().map_err(AppError::from)?,
    };
    let job = DocumentJob {
        renderer: DocumentationRenderer::new(RenderOptions::from(&config)),
        writer: &FileUtils,
        reporter: &DefaultErrorReporter,
        format,
        config: &config,
    };

    if args.path.is_dir() {
        job.process_directory(&args.path)
    } else {
        Ok(job.process_single(&args.path))
    }
}

fn load_config(args: &DocumentArgs) -> Result<DocConfig> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_explicit(path)?,
        None => ConfigLoader::load_from_workspace(&args.workspace_dir())?,
    };
    ConfigValidator::validate(&config).map_err(|mut err| {
        err.recovery_suggestions.push(format!(
            "Fix the setting in {} or the matching FMWDOC_* environment variable",
            args.config
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| CONFIG_FILE_NAME.to_string())
        ));
        err
    })?;
    Ok(config)
}

struct DocumentJob<'a> {
    renderer: DocumentationRenderer,
    writer: &'a dyn ReportWriter,
    reporter: &'a dyn ErrorReporter,
    format: OutputFormat,
    config: &'a DocConfig,
}

impl DocumentJob<'_> {
    fn process_single(&self, path: &Path) -> RunSummary {
        let mut summary = RunSummary::default();
        self.process_counted(path, &mut summary);
        summary
    }

    /// Documents every matching regular file of `dir` in file-name order. A
    /// failing file is reported and the remaining files are still processed.
    fn process_directory(&self, dir: &Path) -> Result<RunSummary> {
        let files = self.collect_inputs(dir)?;
        tracing::info!(dir = %dir.display(), files = files.len(), "documenting directory");

        let mut summary = RunSummary::default();
        for path in &files {
            self.process_counted(path, &mut summary);
        }
        println!("Processed {} files.", summary.succeeded);
        Ok(summary)
    }

    fn process_counted(&self, path: &Path, summary: &mut RunSummary) {
        match self.document_file(path) {
            Ok(output) => {
                println!("Documentation generated successfully: {}", output.display());
                summary.succeeded += 1;
            }
            Err(err) => {
                self.reporter.report_file_error(path, &err);
                summary.failed += 1;
            }
        }
    }

    fn collect_inputs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|err| AppError::input(dir, err))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| AppError::input(dir, err))?.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| self.config.scan.matches(ext))
                .unwrap_or(false);
            if path.is_file() && matches {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn document_file(&self, path: &Path) -> std::result::Result<PathBuf, AppError> {
        let _span = tracing::info_span!("document", file = %path.display()).entered();

        let document = parse_workflow_file(path)?;
        let unreachable = unreachable_labels(&document);
        if !unreachable.is_empty() {
            tracing::info!(nodes = ?unreachable, "nodes not reachable from any source");
        }

        let report = self.renderer.generate_report(&document, self.format)?;
        let output = output_path(path, self.format, &self.config.output.markdown_suffix)?;
        self.writer.write_report(&output, &report)?;
        tracing::debug!(output = %output.display(), bytes = report.len(), "report written");
        Ok(output)
    }
}

/// Sibling path of `input` named after its stem plus the format's suffix.
pub fn output_path(
    input: &Path,
    format: OutputFormat,
    markdown_suffix: &str,
) -> std::result::Result<PathBuf, AppError> {
    let stem = input.file_stem().ok_or_else(|| {
        AppError::new(
            ErrorCategory::UsageError,
            format!("{} does not name a file", input.display()),
        )
    })?;
    let file_name = format!(
        "{}{}",
        stem.to_string_lossy(),
        format.output_suffix(markdown_suffix)
    );
    Ok(input.with_file_name(file_name))
}

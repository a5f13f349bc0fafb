use crate::core::types::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// FME workspace file (.fmw, .txt) or a directory containing them
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Report format (default: render.default_format from fmwdoc.toml, markdown)
    #[arg(value_enum, ignore_case = true, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Read settings from FILE instead of fmwdoc.toml next to PATH
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl DocumentArgs {
    /// Directory searched for fmwdoc.toml and used as the logging anchor.
    pub fn workspace_dir(&self) -> PathBuf {
        if self.path.is_dir() {
            return self.path.clone();
        }
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

use crate::cli::Args;
use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A single workspace file is documented.
    SingleFile,
    /// Every matching file of a directory is documented.
    Batch,
    /// Console logging is switched off by `--quiet` or `FMWDOC_QUIET=1`.
    Quiet,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Quiet)
    }
}

/// Derive the active execution context from the parsed arguments plus overrides.
pub fn detect_context(args: &Args) -> ExecutionContext {
    if args.quiet || quiet_override_enabled() {
        return ExecutionContext::Quiet;
    }

    if args.document.path.is_dir() {
        ExecutionContext::Batch
    } else {
        ExecutionContext::SingleFile
    }
}

fn quiet_override_enabled() -> bool {
    env::var("FMWDOC_QUIET")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}

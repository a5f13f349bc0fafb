use clap::Parser;
use fmwdoc::cli::{self, Args};
use fmwdoc::core::error::{AppError, DefaultErrorReporter, ErrorReporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let _logging = match fmwdoc::logging::init(&args) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("[WARNING] logging disabled: {:#}", err);
            None
        }
    };

    match cli::run(args) {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => DefaultErrorReporter::new().report_error(app_error),
                None => eprintln!("Error documenting the FME workflow: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

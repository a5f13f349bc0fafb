pub mod args;
pub mod commands;

pub use args::DocumentArgs;
pub use commands::RunSummary;
use clap::Parser;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nARGUMENTS:\n{positionals}\n\
\nOPTIONS:\n{options}\n";

#[derive(Parser, Debug)]
#[command(name = "fmwdoc")]
#[command(version = crate::VERSION)]
#[command(about = "Generate Markdown documentation from FME workspace files")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Examples:\n    fmwdoc treefarm.fmw\n    fmwdoc ./workspaces json\n\nReports are written next to each input: <stem>_documentation.md, <stem>.json or <stem>.dot."
)]
pub struct Args {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable console logging
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

pub fn run(args: Args) -> crate::Result<RunSummary> {
    commands::document(args.document)
}

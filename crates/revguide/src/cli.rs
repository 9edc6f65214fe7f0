use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "revguide",
    about = "Rule-driven review routing for source files and git diffs",
    version
)]
pub struct Cli {
    /// Path to the config file (discovered from the working directory when
    /// omitted).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show whether a file would be reviewed, and with which guides.
    Check(CheckArgs),
    /// Resolve changed files in a git range and print their diffs for review.
    Diff(DiffArgs),
    /// Load a configuration file and report whether it is valid.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File to test against the rule set.
    pub file: String,

    /// Also resolve and list the matched guide documents.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Git range to review (e.g. "main..HEAD"). Defaults to "HEAD~1..HEAD".
    pub range: Option<String>,

    /// Restrict the review to a single file within the range.
    pub file: Option<String>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Config file to validate; discovered when omitted.
    pub path: Option<PathBuf>,
}

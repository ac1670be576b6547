//! Command-line interface implementation for cutter.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::constants::{DEFAULT_HOOK_PATTERN, DEFAULT_HOOK_RUNNER};

/// Command-line arguments structure for cutter.
#[derive(Parser, Debug)]
#[command(author, version, about = "cutter: cookiecutter-style project scaffolding tool", long_about = None)]
pub struct Args {
    /// Path to the template directory or git repository URL.
    /// Asked for interactively when omitted.
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Directory where the generated project will be created.
    /// Defaults to the template's base name in the current directory.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not prompt; keep every default value
    #[arg(long, conflicts_with = "stdin")]
    pub no_input: bool,

    /// Read answers as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Fail on answers that do not parse as the default value's type
    /// instead of storing the type's zero value
    #[arg(long)]
    pub strict_answers: bool,

    /// Do not run scripts from the generated post_gen directory
    #[arg(long)]
    pub skip_hooks: bool,

    /// Run post_gen scripts without asking for confirmation first
    #[arg(long, conflicts_with = "skip_hooks")]
    pub skip_hooks_check: bool,

    /// Glob selecting post_gen scripts to run
    #[arg(long, value_name = "GLOB", default_value = DEFAULT_HOOK_PATTERN)]
    pub hook_pattern: String,

    /// Command used to run each post_gen script; the script path is appended
    #[arg(long, value_name = "CMD", default_value = DEFAULT_HOOK_RUNNER)]
    pub hook_runner: String,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}

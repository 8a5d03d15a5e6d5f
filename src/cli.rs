//! Command line interface.

use clap::Parser;

use crate::config::RunConfig;
use crate::subst::SubstituteOptions;

const AFTER_HELP: &str = "\
Examples:
  $ envsubst 'dist/**/*.js'
  $ envsubst 'dist/**/*.js' -p FOO_
  $ envsubst 'dist/**/*.js' '!dist/vendor/**' --dry-run --diff";

/// Substitute ${VAR} and ${VAR:-default} placeholders in files with
/// environment variables.
#[derive(Debug, Parser)]
#[command(name = "envsubst", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Files or globs to process; prefix with ! to exclude
    #[arg(value_name = "GLOB")]
    pub globs: Vec<String>,

    /// Do not edit any files
    #[arg(short, long)]
    pub dry_run: bool,

    /// Only replace variable names with the given prefix
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Replace variables using the window syntax window["${VAR}"]
    #[arg(short, long)]
    pub window: bool,

    /// Match variable names without regard to case
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Print a unified diff for every changed file
    #[arg(long)]
    pub diff: bool,

    /// Print the replacement report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            globs: self.globs,
            dry_run: self.dry_run,
            diff: self.diff,
            json: self.json,
            options: SubstituteOptions {
                prefix: self.prefix,
                ignore_case: self.ignore_case,
                window: self.window,
            },
        }
    }
}

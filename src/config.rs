//! Run configuration resolved from the command line.

use crate::subst::SubstituteOptions;

/// Everything one `envsubst` run needs besides the variable mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// File globs; `!`-prefixed entries exclude.
    pub globs: Vec<String>,
    /// Compute and report, but never write.
    pub dry_run: bool,
    /// Print a unified diff for each changed file.
    pub diff: bool,
    /// Report as JSON instead of a table.
    pub json: bool,
    pub options: SubstituteOptions,
}

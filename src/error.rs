//! Error types for the envsubst crate.

use std::path::PathBuf;

/// Envsubst-specific error types.
///
/// The substitution engine itself never fails on input text: unresolvable
/// placeholders are left verbatim. Errors only come from building the
/// placeholder grammar and from the file-processing collaborators.
#[derive(Debug, thiserror::Error)]
pub enum EnvsubstError {
    /// The placeholder grammar could not be compiled for the given prefix.
    #[error("invalid placeholder pattern for prefix {prefix:?}: {source}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    /// A glob argument could not be parsed.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for envsubst operations.
pub type EnvsubstResult<T> = Result<T, EnvsubstError>;

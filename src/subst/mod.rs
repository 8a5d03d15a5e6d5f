//! Placeholder substitution engine.
//!
//! Scans text for `${NAME}` and `${NAME:-default}` references, resolves them
//! against a variable mapping and rewrites the text in place.
//!
//! # Pipeline
//!
//! 1. [`pattern::Pattern`]: builds the grammar from prefix, case and
//!    window options.
//! 2. [`resolve::resolve`]: collects every match left to right and
//!    resolves it from the mapping or its inline default.
//! 3. [`report::apply`]: rewrites each resolved literal across the whole
//!    document and de-duplicates `(from, to)` pairs into the report.
//!
//! The engine is pure: it never touches the filesystem and never mutates
//! the caller's mapping. Unresolvable placeholders are left verbatim.
//!
//! # Forms
//!
//! | Form | Result |
//! |---|---|
//! | `${NAME}` | `variables[NAME]`, or untouched |
//! | `${NAME:-default}` | `variables[NAME]` (even if empty), else `default` |
//! | `window["${NAME}"]` | window mode only: the value re-wrapped as `"value"` |

pub mod pattern;
pub mod report;
pub mod resolve;

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::EnvsubstResult;

pub use pattern::Pattern;
pub use report::{apply, Replacement, Substitution};
pub use resolve::{resolve, ResolvedToken, Token};

/// Options controlling which placeholders are recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubstituteOptions {
    /// Literal that every variable name must start with.
    pub prefix: String,
    /// Match the grammar and look up names without regard to case.
    pub ignore_case: bool,
    /// Only rewrite `window["${...}"]` / `window['${...}']` wrapped placeholders.
    pub window: bool,
}

/// Substitute every resolvable placeholder in `text`.
///
/// # Errors
///
/// Returns an error only if the grammar for `options.prefix` cannot be
/// compiled. The input text never causes a failure.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use envsubst::subst::{substitute, SubstituteOptions};
///
/// let vars = HashMap::from([("FOO".to_owned(), "baz".to_owned())]);
/// let result = substitute("${FOO:-bar}${FOO:-bar}${FOO}", &vars, &SubstituteOptions::default())
///     .expect("should substitute");
/// assert_eq!(result.text, "bazbazbaz");
/// assert_eq!(result.replacements.len(), 2);
/// ```
pub fn substitute(
    text: &str,
    variables: &HashMap<String, String>,
    options: &SubstituteOptions,
) -> EnvsubstResult<Substitution> {
    let pattern = Pattern::build(&options.prefix, options.ignore_case, options.window)?;
    let tokens = resolve(text, &pattern, variables, options.ignore_case);
    let result = apply(text, &tokens);

    debug!(
        tokens = tokens.len(),
        distinct = result.replacements.len(),
        replaced = result.total(),
        "substitution complete"
    );

    Ok(result)
}

/// Deferred form of [`substitute`] for use inside async file pipelines.
///
/// Performs the same synchronous computation; it never suspends.
///
/// # Errors
///
/// See [`substitute`].
pub async fn substitute_async(
    text: &str,
    variables: &HashMap<String, String>,
    options: &SubstituteOptions,
) -> EnvsubstResult<Substitution> {
    substitute(text, variables, options)
}

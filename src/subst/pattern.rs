//! Placeholder grammar.
//!
//! The base grammar recognizes `${<prefix><name>}` and
//! `${<prefix><name>:-<default>}`. In window mode it is wrapped with an
//! optional `window["` / `window['` opener and an optional `"]` / `']`
//! closer; the resolver decides whether a wrapped match is usable.

use regex::{CaptureMatches, Regex, RegexBuilder};
use tracing::debug;

use crate::error::{EnvsubstError, EnvsubstResult};

/// Identifier characters following the prefix, one or more.
///
/// Unicode mode is off for the class so that case-insensitive matching does
/// not fold `k` to U+212A KELVIN SIGN or `s` to U+017F LONG S.
const NAME_CLASS: &str = "(?-u:[0-9A-Za-z_])+";

/// Default text: anything up to the closing brace, spaces included.
const DEFAULT_CLASS: &str = "[^}]*";

const WINDOW_OPEN: &str = r#"(?:window\[(?P<open>["']))?"#;
const WINDOW_CLOSE: &str = r#"(?:(?P<close>["'])\])?"#;

/// A compiled placeholder grammar.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    window: bool,
}

impl Pattern {
    /// Build the grammar for the given prefix.
    ///
    /// The prefix is escaped, so it is always matched literally and is
    /// concatenated directly onto the name class: a prefix of `FOO_` yields
    /// names of the form `FOO_<word>+`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvsubstError::Pattern`] if the regex cannot be compiled
    /// (for example when an enormous prefix exceeds the size limit).
    pub fn build(prefix: &str, ignore_case: bool, window: bool) -> EnvsubstResult<Self> {
        let source = Self::source(prefix, window);
        debug!(pattern = %source, ignore_case, window, "building placeholder pattern");

        let regex = RegexBuilder::new(&source)
            .case_insensitive(ignore_case)
            .multi_line(true)
            .build()
            .map_err(|source| EnvsubstError::Pattern {
                prefix: prefix.to_owned(),
                source,
            })?;

        Ok(Self { regex, window })
    }

    /// Regex source for a prefix, without compiling it.
    pub fn source(prefix: &str, window: bool) -> String {
        let base = format!(
            r"\$\{{(?P<name>{}{NAME_CLASS})(?::-(?P<default>{DEFAULT_CLASS}))?\}}",
            literal_prefix(prefix)
        );

        if window {
            format!("{WINDOW_OPEN}{base}{WINDOW_CLOSE}")
        } else {
            base
        }
    }

    /// Whether this pattern recognizes the `window[...]` wrapper.
    pub fn is_window(&self) -> bool {
        self.window
    }

    /// Iterate over every non-overlapping match, leftmost first.
    pub(crate) fn captures_iter<'r, 't>(&'r self, text: &'t str) -> CaptureMatches<'r, 't> {
        self.regex.captures_iter(text)
    }
}

/// Escaped prefix. An ASCII prefix gets the same non-Unicode folding as the
/// name class; a non-ASCII one is kept as written.
fn literal_prefix(prefix: &str) -> String {
    let escaped = regex::escape(prefix);
    if prefix.is_empty() || !prefix.is_ascii() {
        escaped
    } else {
        format!("(?-u:{escaped})")
    }
}

//! Rewriter/Reporter: apply resolved tokens and summarize what changed.

use std::borrow::Cow;

use serde::Serialize;

use super::resolve::ResolvedToken;

/// One distinct substitution performed on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// The exact original literal, window wrapper included.
    pub from: String,
    /// The literal written in its place.
    pub to: String,
    /// How many occurrences of `from` were rewritten to `to`.
    pub count: usize,
}

/// Result of substituting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub text: String,
    /// Distinct `(from, to)` pairs in first-encounter order.
    pub replacements: Vec<Replacement>,
}

impl Substitution {
    /// Total number of rewritten occurrences.
    pub fn total(&self) -> usize {
        self.replacements.iter().map(|r| r.count).sum()
    }
}

/// The literal that replaces a token: the bare value, or in window mode the
/// value re-quoted with the token's own quote characters.
fn final_literal<'a>(resolved: &ResolvedToken<'a>, value: &'a str) -> Cow<'a, str> {
    match resolved.token.quotes() {
        Some((open, close)) => Cow::Owned(format!("{open}{value}{close}")),
        None => Cow::Borrowed(value),
    }
}

/// Rewrite `text` with every resolved token and build the replacement report.
///
/// Replacement is keyed by literal, not by position: each resolved token
/// rewrites every remaining occurrence of its `full_match` in the document.
/// Tokens without a value are skipped. Each token occurrence adds one to
/// the count of its `(from, to)` record.
pub fn apply(text: &str, tokens: &[ResolvedToken<'_>]) -> Substitution {
    let mut replaced = text.to_owned();
    let mut replacements: Vec<Replacement> = Vec::new();

    for resolved in tokens {
        let Some(value) = resolved.value else {
            continue;
        };
        let from = resolved.token.full_match;
        let to = final_literal(resolved, value);

        match replacements
            .iter_mut()
            .find(|r| r.from == from && r.to == to)
        {
            Some(record) => record.count += 1,
            None => replacements.push(Replacement {
                from: from.to_owned(),
                to: to.clone().into_owned(),
                count: 1,
            }),
        }

        if replaced.contains(from) {
            replaced = replaced.replace(from, &to);
        }
    }

    Substitution {
        text: replaced,
        replacements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subst::resolve::Token;

    fn token<'a>(full_match: &'a str, name: &'a str, value: Option<&'a str>) -> ResolvedToken<'a> {
        ResolvedToken {
            token: Token {
                full_match,
                name,
                default: None,
                wrap_prefix: None,
                wrap_suffix: None,
            },
            value,
        }
    }

    #[test]
    fn test_skips_unresolved_tokens() {
        let result = apply("${A} ${B}", &[token("${A}", "A", None), token("${B}", "B", Some("b"))]);
        assert_eq!(result.text, "${A} b");
        assert_eq!(
            result.replacements,
            [Replacement {
                from: "${B}".into(),
                to: "b".into(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_counts_each_occurrence_once() {
        let tokens = [
            token("${A}", "A", Some("x")),
            token("${A}", "A", Some("x")),
            token("${A}", "A", Some("x")),
        ];
        let result = apply("${A}-${A}-${A}", &tokens);
        assert_eq!(result.text, "x-x-x");
        assert_eq!(result.replacements.len(), 1);
        assert_eq!(result.replacements[0].count, 3);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_distinct_literals_with_same_output_stay_separate() {
        let tokens = [token("${a}", "a", Some("v")), token("${A}", "A", Some("v"))];
        let result = apply("${a}${A}", &tokens);
        assert_eq!(result.text, "vv");
        assert_eq!(result.replacements.len(), 2);
        assert_eq!(result.replacements[0].from, "${a}");
        assert_eq!(result.replacements[1].from, "${A}");
    }

    #[test]
    fn test_window_token_is_requoted() {
        let resolved = ResolvedToken {
            token: Token {
                full_match: "window['${A}']",
                name: "A",
                default: None,
                wrap_prefix: Some("window['"),
                wrap_suffix: Some("']"),
            },
            value: Some("x"),
        };
        let result = apply("f(window['${A}'])", &[resolved]);
        assert_eq!(result.text, "f('x')");
        assert_eq!(result.replacements[0].to, "'x'");
    }

    #[test]
    fn test_no_tokens_returns_text_unchanged() {
        let result = apply("plain", &[]);
        assert_eq!(result.text, "plain");
        assert!(result.replacements.is_empty());
        assert_eq!(result.total(), 0);
    }
}

//! Matcher/Resolver: scan text for placeholders and resolve their values.

use std::collections::HashMap;

use tracing::trace;

use super::pattern::Pattern;

/// One placeholder occurrence found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The literal matched substring, including any window wrapper.
    pub full_match: &'a str,
    /// The variable identifier, prefix included.
    pub name: &'a str,
    /// Fallback text after `:-`. `Some("")` for `${FOO:-}`, `None` for `${FOO}`.
    pub default: Option<&'a str>,
    /// `window["` or `window['` when the opener was present.
    pub wrap_prefix: Option<&'a str>,
    /// `"]` or `']` when the closer was present.
    pub wrap_suffix: Option<&'a str>,
}

impl<'a> Token<'a> {
    /// Opening and closing quote characters of a fully wrapped token.
    pub fn quotes(&self) -> Option<(&'a str, &'a str)> {
        // Both quote characters are single ASCII bytes.
        let prefix = self.wrap_prefix?;
        let suffix = self.wrap_suffix?;
        Some((&prefix[prefix.len() - 1..], &suffix[..1]))
    }
}

/// A token paired with its resolved value.
///
/// `value` is `None` when the name is not in the mapping and no default was
/// given; such tokens are left untouched by the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken<'a> {
    pub token: Token<'a>,
    pub value: Option<&'a str>,
}

/// Variable lookup, exact or through a lower-cased shadow of the caller's map.
enum Lookup<'a> {
    Exact(&'a HashMap<String, String>),
    Folded(HashMap<String, &'a str>),
}

impl<'a> Lookup<'a> {
    fn new(variables: &'a HashMap<String, String>, ignore_case: bool) -> Self {
        if !ignore_case {
            return Self::Exact(variables);
        }

        // Keys differing only by case collapse onto one entry; whichever the
        // map yields last wins.
        let folded = variables
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.as_str()))
            .collect();
        Self::Folded(folded)
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        match self {
            Self::Exact(map) => map.get(name).map(String::as_str),
            Self::Folded(map) => map.get(&name.to_lowercase()).copied(),
        }
    }
}

/// Collect every placeholder in `text` and resolve it against `variables`.
///
/// Resolution order per token:
/// 1. the name is a key of the mapping: use the mapped value, even if empty;
/// 2. otherwise a default is present (possibly empty): use the default;
/// 3. otherwise the value is `None`.
///
/// In window mode only fully wrapped occurrences are returned. A bare
/// placeholder, or one missing either side of the wrapper, is dropped here
/// and never reaches resolution.
pub fn resolve<'a>(
    text: &'a str,
    pattern: &Pattern,
    variables: &'a HashMap<String, String>,
    ignore_case: bool,
) -> Vec<ResolvedToken<'a>> {
    let lookup = Lookup::new(variables, ignore_case);

    let mut resolved = Vec::new();
    for caps in pattern.captures_iter(text) {
        let Some(full) = caps.get(0) else {
            continue;
        };
        let Some(name) = caps.name("name") else {
            continue;
        };

        let token = Token {
            full_match: full.as_str(),
            name: name.as_str(),
            default: caps.name("default").map(|m| m.as_str()),
            wrap_prefix: caps
                .name("open")
                .map(|quote| &text[full.start()..quote.end()]),
            wrap_suffix: caps
                .name("close")
                .map(|quote| &text[quote.start()..full.end()]),
        };

        if pattern.is_window() && token.quotes().is_none() {
            trace!(token = token.full_match, "skipping unwrapped placeholder");
            continue;
        }

        let value = lookup.get(token.name).or(token.default);
        resolved.push(ResolvedToken { token, value });
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn values<'a>(tokens: &[ResolvedToken<'a>]) -> Vec<Option<&'a str>> {
        tokens.iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_resolves_in_document_order() {
        let pattern = Pattern::build("", false, false).expect("pattern should compile");
        let variables = vars(&[("VAR", "foo")]);
        let tokens = resolve("${VAR}\n${FOO:-bar}\n${BAZ:-}\n${NOPE}", &pattern, &variables, false);

        let names: Vec<&str> = tokens.iter().map(|t| t.token.name).collect();
        assert_eq!(names, ["VAR", "FOO", "BAZ", "NOPE"]);
        assert_eq!(values(&tokens), [Some("foo"), Some("bar"), Some(""), None]);
    }

    #[test]
    fn test_mapped_empty_value_beats_default() {
        let pattern = Pattern::build("", false, false).expect("pattern should compile");
        let variables = vars(&[("FOO", "")]);
        let tokens = resolve("${FOO:-bar}", &pattern, &variables, false);
        assert_eq!(values(&tokens), [Some("")]);
    }

    #[test]
    fn test_lookup_is_case_sensitive_by_default() {
        let pattern = Pattern::build("", false, false).expect("pattern should compile");
        let variables = vars(&[("VAR", "foo")]);
        let tokens = resolve("${var}", &pattern, &variables, false);
        assert_eq!(values(&tokens), [None]);
    }

    #[test]
    fn test_ignore_case_folds_names() {
        let pattern = Pattern::build("", true, false).expect("pattern should compile");
        let variables = vars(&[("VAR", "foo")]);
        let tokens = resolve("${var}${Var}", &pattern, &variables, true);
        assert_eq!(values(&tokens), [Some("foo"), Some("foo")]);
        // The caller's mapping is left as it was.
        assert_eq!(variables.get("VAR").map(String::as_str), Some("foo"));
        assert!(!variables.contains_key("var"));
    }

    #[test]
    fn test_window_keeps_only_wrapped_tokens() {
        let pattern = Pattern::build("", false, true).expect("pattern should compile");
        let variables = vars(&[("A", "1"), ("B", "2")]);
        let tokens = resolve(r#"${A} window["${B}"]"#, &pattern, &variables, false);

        assert_eq!(tokens.len(), 1);
        let token = &tokens[0].token;
        assert_eq!(token.full_match, r#"window["${B}"]"#);
        assert_eq!(token.wrap_prefix, Some(r#"window[""#));
        assert_eq!(token.wrap_suffix, Some(r#""]"#));
        assert_eq!(token.quotes(), Some(("\"", "\"")));
    }

    #[test]
    fn test_window_rejects_half_wrapped_tokens() {
        let pattern = Pattern::build("", false, true).expect("pattern should compile");
        let variables = vars(&[("A", "1")]);
        assert!(resolve(r#"window["${A}"#, &pattern, &variables, false).is_empty());
        assert!(resolve(r#"${A}"]"#, &pattern, &variables, false).is_empty());
    }

    #[test]
    fn test_window_single_quotes() {
        let pattern = Pattern::build("", false, true).expect("pattern should compile");
        let variables = HashMap::new();
        let tokens = resolve("window['${A:-x}']", &pattern, &variables, false);
        assert_eq!(tokens[0].token.quotes(), Some(("'", "'")));
        assert_eq!(values(&tokens), [Some("x")]);
    }

    #[test]
    fn test_window_mismatched_quotes_keep_each_side() {
        let pattern = Pattern::build("", false, true).expect("pattern should compile");
        let variables = vars(&[("X", "x")]);
        let tokens = resolve(r#"window["${X}']"#, &pattern, &variables, false);
        assert_eq!(tokens[0].token.quotes(), Some(("\"", "'")));
        assert_eq!(values(&tokens), [Some("x")]);
    }
}

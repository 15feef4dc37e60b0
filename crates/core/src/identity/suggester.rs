//! Reference identifier suggester
//!
//! Mirrors the host's username suggestion rules closely enough to be used in
//! tests and by hosts that do not bring their own algorithm. Operates on a
//! fixed snapshot of taken identifiers.

use std::collections::HashSet;

use wikiauth_domain::constants::{DEFAULT_MAX_IDENTIFIER_LENGTH, FALLBACK_IDENTIFIER};
use wikiauth_domain::AuthConfig;

use super::ports::IdentifierSuggester;

/// Sanitizes candidates and appends numeric suffixes on clashes.
#[derive(Debug, Clone)]
pub struct SanitizingSuggester {
    /// Lowercased identifiers already held by accounts
    taken: HashSet<String>,
    max_length: usize,
}

impl SanitizingSuggester {
    pub fn new(max_length: usize) -> Self {
        Self { taken: HashSet::new(), max_length: max_length.max(1) }
    }

    /// Suggester capped at the configured `max_identifier_length`.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.max_identifier_length)
    }

    /// Add identifiers that are already in use. Comparison ignores case.
    pub fn with_taken<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.taken.extend(identifiers.into_iter().map(|id| id.as_ref().to_lowercase()));
        self
    }

    /// Apply the character rules without checking availability.
    pub fn sanitize(&self, candidate: &str) -> String {
        let replaced: String =
            candidate.chars().map(|c| if is_allowed(c) { c } else { '_' }).collect();

        let stripped = trim_edges(&replaced);
        let collapsed = collapse_specials(stripped);
        let truncated: String = collapsed.chars().take(self.max_length).collect();
        let result = trim_edges(&truncated);

        if result.is_empty() {
            FALLBACK_IDENTIFIER.chars().take(self.max_length).collect()
        } else {
            result.to_string()
        }
    }

    fn is_taken(&self, identifier: &str, allowed: Option<&str>) -> bool {
        if allowed.is_some_and(|allowed| allowed.to_lowercase() == identifier.to_lowercase()) {
            return false;
        }
        self.taken.contains(&identifier.to_lowercase())
    }

    fn find_available(&self, candidate: &str, allowed: Option<&str>) -> String {
        let base = self.sanitize(candidate);
        if !self.is_taken(&base, allowed) {
            return base;
        }

        let mut suffix = 1usize;
        loop {
            let digits = suffix.to_string();
            let stem_length = self.max_length.saturating_sub(digits.len());
            let stem: String = base.chars().take(stem_length).collect();
            let attempt = format!("{}{digits}", trim_edges(&stem));
            if !self.is_taken(&attempt, allowed) {
                return attempt;
            }
            suffix += 1;
        }
    }
}

impl Default for SanitizingSuggester {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDENTIFIER_LENGTH)
    }
}

impl IdentifierSuggester for SanitizingSuggester {
    fn suggest(&self, candidate: &str) -> String {
        self.find_available(candidate, None)
    }

    fn suggest_allowing(&self, candidate: &str, allowed: &str) -> String {
        self.find_available(candidate, Some(allowed))
    }
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || is_special(c)
}

fn is_special(c: char) -> bool {
    matches!(c, '_' | '.' | '-')
}

/// Leading characters must be alphanumeric; trailing ones must be word
/// characters.
fn trim_edges(value: &str) -> &str {
    value
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
}

/// Runs of two or more of `_ . -` become a single `_`.
fn collapse_specials(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut run = String::new();

    for c in value.chars() {
        if is_special(c) {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);

    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.chars().count() >= 2 {
        out.push('_');
    } else {
        out.push_str(run);
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_disallowed_characters() {
        let suggester = SanitizingSuggester::default();
        assert_eq!(suggester.suggest("Jane Doe"), "Jane_Doe");
        assert_eq!(suggester.suggest("jane@doe!x"), "jane_doe_x");
    }

    #[test]
    fn keeps_unicode_letters() {
        let suggester = SanitizingSuggester::default();
        assert_eq!(suggester.suggest("Zoë Ångström"), "Zoë_Ångström");
    }

    #[test]
    fn collapses_runs_of_special_characters() {
        let suggester = SanitizingSuggester::default();
        assert_eq!(suggester.suggest("Jane  Doe"), "Jane_Doe");
        assert_eq!(suggester.suggest("a.-_b"), "a_b");
        assert_eq!(suggester.suggest("a.b"), "a.b");
    }

    #[test]
    fn strips_edges() {
        let suggester = SanitizingSuggester::default();
        assert_eq!(suggester.suggest("  Jane Doe."), "Jane_Doe");
        assert_eq!(suggester.suggest("-x_"), "x_");
    }

    #[test]
    fn truncates_to_max_length() {
        let suggester = SanitizingSuggester::new(8);
        assert_eq!(suggester.suggest("Abcdefghijkl"), "Abcdefgh");
        // Truncation never leaves a trailing dot.
        assert_eq!(suggester.suggest("Abcdefg.hij"), "Abcdefg");
    }

    #[test]
    fn from_config_uses_configured_length() {
        let config = AuthConfig { max_identifier_length: 6, ..AuthConfig::default() };
        let suggester = SanitizingSuggester::from_config(&config);
        assert_eq!(suggester.suggest("Jane Doe"), "Jane_D");

        let defaults = SanitizingSuggester::from_config(&AuthConfig::default());
        assert_eq!(defaults.suggest("Jane Doe"), "Jane_Doe");
    }

    #[test]
    fn falls_back_when_nothing_survives() {
        let suggester = SanitizingSuggester::default();
        assert_eq!(suggester.suggest(""), FALLBACK_IDENTIFIER);
        assert_eq!(suggester.suggest("!!!"), FALLBACK_IDENTIFIER);
    }

    #[test]
    fn appends_smallest_free_suffix() {
        let suggester = SanitizingSuggester::default().with_taken(["jane_doe", "Jane_Doe1"]);
        assert_eq!(suggester.suggest("Jane Doe"), "Jane_Doe2");
    }

    #[test]
    fn suffix_respects_max_length() {
        let suggester = SanitizingSuggester::new(6).with_taken(["abcdef"]);
        assert_eq!(suggester.suggest("abcdefgh"), "abcde1");
    }

    #[test]
    fn allowed_identifier_counts_as_free() {
        let suggester = SanitizingSuggester::default().with_taken(["Jane_Doe"]);
        assert_eq!(suggester.suggest_allowing("Jane Doe", "jane_doe"), "Jane_Doe");
    }
}

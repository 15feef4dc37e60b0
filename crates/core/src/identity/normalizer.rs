//! Identifier normalizer
//!
//! Maps a raw remote display name to the canonical local identifier:
//! Unicode NFC composition first, then the host's suggestion algorithm.
//!
//! The mapping is deterministic for a fixed snapshot of existing accounts but
//! not idempotent: when the suggester appends a disambiguating suffix,
//! `normalize(normalize(x))` may differ from `normalize(x)`.

use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use wikiauth_domain::CanonicalIdentifier;

use super::ports::IdentifierSuggester;

/// Derives canonical identifiers from remote display names.
#[derive(Clone)]
pub struct IdentifierNormalizer {
    suggester: Arc<dyn IdentifierSuggester>,
}

impl IdentifierNormalizer {
    pub fn new(suggester: Arc<dyn IdentifierSuggester>) -> Self {
        Self { suggester }
    }

    /// Canonical identifier for a raw display name.
    pub fn normalize(&self, raw_name: &str) -> CanonicalIdentifier {
        let composed = compose(raw_name);
        CanonicalIdentifier::new(self.suggester.suggest(&composed))
    }

    /// Canonical identifier for a raw display name when re-deriving the
    /// identifier of an account currently holding `current_identifier`.
    pub fn normalize_for_account(
        &self,
        raw_name: &str,
        current_identifier: &str,
    ) -> CanonicalIdentifier {
        let composed = compose(raw_name);
        CanonicalIdentifier::new(self.suggester.suggest_allowing(&composed, current_identifier))
    }
}

impl std::fmt::Debug for IdentifierNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierNormalizer").finish_non_exhaustive()
    }
}

fn compose(raw_name: &str) -> String {
    raw_name.nfc().collect()
}

//! Remote identity handling: payload extraction and identifier derivation

pub mod extractor;
pub mod normalizer;
pub mod ports;
pub mod suggester;

pub use normalizer::IdentifierNormalizer;
pub use suggester::SanitizingSuggester;

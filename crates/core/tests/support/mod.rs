//! Shared test helpers for `wikiauth-core` integration tests.
//!
//! In-memory stand-ins for every host port so gate and enforcer tests can
//! focus on behaviour instead of wiring.

#![allow(dead_code)]

pub mod accounts;
pub mod host;

use std::sync::Arc;

use serde_json::{json, Value};
use wikiauth_core::{IdentifierNormalizer, SanitizingSuggester};
use wikiauth_domain::{LocalAccount, RemoteIdentity};

/// Verified identity for subject 42 / `a@x.org` / "Jane Doe".
pub fn jane() -> RemoteIdentity {
    RemoteIdentity {
        subject_id: "42".into(),
        email: "a@x.org".into(),
        email_verified: true,
        display_name: Some("Jane Doe".into()),
        real_name: Some("Jane Q. Doe".into()),
    }
}

/// Flat provider payload matching [`jane`].
pub fn jane_payload() -> Value {
    json!({
        "sub": "42",
        "email": "a@x.org",
        "confirmed_email": true,
        "username": "Jane Doe",
        "realname": "Jane Q. Doe"
    })
}

pub fn account(id: &str, identifier: &str) -> LocalAccount {
    LocalAccount { id: id.into(), identifier: identifier.into(), email: None, name: None }
}

pub fn normalizer() -> IdentifierNormalizer {
    IdentifierNormalizer::new(Arc::new(SanitizingSuggester::default()))
}

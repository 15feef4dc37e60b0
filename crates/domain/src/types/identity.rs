//! Remote identity types
//!
//! A [`RemoteIdentity`] lives for exactly one authentication attempt. The
//! session-scoped [`PendingIdentity`] is what survives between a successful
//! login and the signup form submission.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validated identity asserted by the provider for one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIdentity {
    /// Stable identifier assigned by the provider. Never empty.
    pub subject_id: String,
    /// May be empty when the provider withholds the address.
    pub email: String,
    pub email_verified: bool,
    /// Raw remote username
    pub display_name: Option<String>,
    pub real_name: Option<String>,
}

impl RemoteIdentity {
    /// Session data to keep for the signup checkpoint.
    ///
    /// The signup username starts out as the display name; the gate replaces
    /// it with the host-resolved username when there is one.
    pub fn to_pending(&self) -> PendingIdentity {
        PendingIdentity {
            subject_id: self.subject_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            username: self.display_name.clone(),
            real_name: self.real_name.clone(),
        }
    }
}

/// Identity data held in the host session until the signup form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingIdentity {
    pub subject_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Raw username the signup identifier must be the canonical form of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
}

impl PendingIdentity {
    pub fn with_username(self, username: Option<String>) -> Self {
        Self { username, ..self }
    }
}

/// Local identifier derived from the remote display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalIdentifier(String);

impl CanonicalIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalIdentifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

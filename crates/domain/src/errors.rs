//! Error types used throughout the login reconciliation pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MSG_GENERIC_FAILURE, MSG_NON_CONFORMING_IDENTIFIER};

/// Main error type for wikiauth
///
/// Rejections decided by the authentication gate are not errors; they are
/// carried by [`crate::AuthenticationOutcome`]. Everything here is either a
/// fatal failure of the current attempt or a signup-time rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WikiAuthError {
    #[error("Malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("Submitted identifier '{submitted}' does not match provider identifier '{expected}'")]
    NonConformingIdentifier { submitted: String, expected: String },

    #[error("Account conflict: {0}")]
    AccountConflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WikiAuthError {
    /// Localisation key for the user-facing message.
    ///
    /// Only the non-conforming identifier has its own message; every other
    /// failure surfaces as the generic authentication failure.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::NonConformingIdentifier { .. } => MSG_NON_CONFORMING_IDENTIFIER,
            _ => MSG_GENERIC_FAILURE,
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => "malformed_payload",
            Self::NonConformingIdentifier { .. } => "non_conforming_identifier",
            Self::AccountConflict(_) => "account_conflict",
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for wikiauth operations
pub type Result<T> = std::result::Result<T, WikiAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_share_generic_message() {
        let errors = [
            WikiAuthError::MalformedPayload("sub missing".into()),
            WikiAuthError::AccountConflict("taken".into()),
            WikiAuthError::Database("locked".into()),
        ];

        for err in errors {
            assert_eq!(err.message_key(), MSG_GENERIC_FAILURE);
        }
    }

    #[test]
    fn non_conforming_identifier_has_own_message() {
        let err = WikiAuthError::NonConformingIdentifier {
            submitted: "janedoe".into(),
            expected: "jane_doe".into(),
        };
        assert_eq!(err.message_key(), MSG_NON_CONFORMING_IDENTIFIER);
        assert_eq!(err.label(), "non_conforming_identifier");
        assert!(err.to_string().contains("'janedoe'"));
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = WikiAuthError::Database("busy".into());
        let json = serde_json::to_value(&err).expect("serializable");
        assert_eq!(json["type"], "Database");
        assert_eq!(json["message"], "busy");
    }
}

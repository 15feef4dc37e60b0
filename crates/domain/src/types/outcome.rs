//! Authentication outcomes

use serde::{Deserialize, Serialize};

use super::account::LocalAccount;
use super::identity::PendingIdentity;
use crate::constants::{MSG_EMAIL_NOT_VERIFIED, MSG_EXISTING_ACCOUNT};

/// Result of one pass through the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthenticationOutcome {
    Accepted(AcceptedLogin),
    Rejected(RejectionReason),
}

impl AuthenticationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::Accepted(_) => None,
        }
    }

    pub fn accepted(&self) -> Option<&AcceptedLogin> {
        match self {
            Self::Accepted(login) => Some(login),
            Self::Rejected(_) => None,
        }
    }
}

/// Successful login handed back to the host pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedLogin {
    /// Account identifier after any sync, or the canonical identifier the
    /// signup form must use when no local account exists yet.
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<LocalAccount>,
    /// Set when signup is still required; the host stores it in the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingIdentity>,
    pub identifier_synced: bool,
    /// Suppresses the host prompt asking the user to choose a username.
    pub omit_username: bool,
}

/// Why the gate refused an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    EmailNotVerified,
    DuplicateAccount { conflicting_email: String },
}

impl RejectionReason {
    /// Localisation key for the user-facing message.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::EmailNotVerified => MSG_EMAIL_NOT_VERIFIED,
            Self::DuplicateAccount { .. } => MSG_EXISTING_ACCOUNT,
        }
    }

    /// Interpolation arguments for the localised message.
    pub fn message_args(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::EmailNotVerified => Vec::new(),
            Self::DuplicateAccount { conflicting_email } => {
                vec![("email", conflicting_email.clone())]
            }
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailNotVerified => "email_not_verified",
            Self::DuplicateAccount { .. } => "duplicate_account",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_account_names_the_email() {
        let reason = RejectionReason::DuplicateAccount { conflicting_email: "a@x.org".into() };
        assert_eq!(reason.message_key(), MSG_EXISTING_ACCOUNT);
        assert_eq!(reason.message_args(), vec![("email", "a@x.org".to_string())]);
    }

    #[test]
    fn unverified_email_has_no_arguments() {
        let reason = RejectionReason::EmailNotVerified;
        assert_eq!(reason.message_key(), MSG_EMAIL_NOT_VERIFIED);
        assert!(reason.message_args().is_empty());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = AuthenticationOutcome::Rejected(RejectionReason::EmailNotVerified);
        let json = serde_json::to_value(&outcome).expect("serializable");
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "email_not_verified");
        assert!(outcome.rejection().is_some());
        assert!(!outcome.is_accepted());
    }
}

//! Port interfaces for the host account store
//!
//! These traits define the boundaries between the reconciliation logic and
//! the host's account machinery. The core never writes linked-account
//! records itself; creation and linking happen behind [`AccountResolver`].

use async_trait::async_trait;
use wikiauth_domain::{Actor, CanonicalIdentifier, LinkedAccountRecord, LocalAccount, Result};

/// Read access to persisted linked-account records.
///
/// Implementations must use parameterized lookups; `email` and
/// `exclude_subject_id` come straight from the provider payload.
///
/// Backing stores are expected to enforce uniqueness of non-empty
/// `stored_email` per provider. The collision check in the gate is
/// read-then-decide and cannot close the race between two simultaneous
/// first logins on its own.
#[async_trait]
pub trait AccountAssociationStore: Send + Sync {
    /// Any record of `provider_name` whose stored email equals `email`
    /// (exact, case-sensitive) and whose subject differs from
    /// `exclude_subject_id`.
    async fn find_by_email_excluding_subject(
        &self,
        provider_name: &str,
        email: &str,
        exclude_subject_id: &str,
    ) -> Result<Option<LinkedAccountRecord>>;
}

/// Identity handed to the host's link-or-create procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub provider_name: String,
    pub subject_id: String,
    pub email: String,
    pub email_verified: bool,
    /// Display nickname, taken from the remote username when present
    pub nickname: Option<String>,
    /// Taken from the remote real name when present
    pub name: Option<String>,
}

/// What the host's resolution produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountResolution {
    /// `None` when no local account exists yet and signup is required.
    pub account: Option<LocalAccount>,
    /// Username the host associated with the login, usually the nickname.
    pub username: Option<String>,
}

/// Host link-or-create procedure.
#[async_trait]
pub trait AccountResolver: Send + Sync {
    /// Resolve the local account for `request`.
    ///
    /// When `link_existing` is false the host must not attach the remote
    /// identity to a pre-existing local account.
    ///
    /// # Errors
    /// `WikiAuthError::AccountConflict` when the host refuses the
    /// association; any error is fatal for the attempt.
    async fn resolve_account(
        &self,
        request: &ResolutionRequest,
        link_existing: bool,
    ) -> Result<AccountResolution>;
}

/// Host identifier-rename procedure.
#[async_trait]
pub trait IdentifierRenamer: Send + Sync {
    /// Rename `account` to `new_identifier`, attributing the change to
    /// `actor`. Returns the account as stored after the rename.
    async fn rename_identifier(
        &self,
        account: &LocalAccount,
        new_identifier: &CanonicalIdentifier,
        actor: &Actor,
    ) -> Result<LocalAccount>;
}

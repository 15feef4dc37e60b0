//! Port interfaces for host account creation and permission checks

use async_trait::async_trait;
use wikiauth_domain::{Actor, LocalAccount, PendingIdentity, Result};

/// Signup form submission as received by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Identifier typed (or pre-filled) in the signup form
    pub identifier: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Session state available while the signup request is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupContext {
    /// Provider identity kept in the session after a successful login that
    /// still needs a local account.
    pub pending: Option<PendingIdentity>,
}

impl SignupContext {
    pub fn with_pending(pending: PendingIdentity) -> Self {
        Self { pending: Some(pending) }
    }
}

/// Check run before the host creates an account.
#[async_trait]
pub trait SignupHook: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return an error to abort account creation.
    async fn before_create(&self, request: &SignupRequest, context: &SignupContext) -> Result<()>;
}

/// Host account-creation procedure.
#[async_trait]
pub trait AccountCreator: Send + Sync {
    async fn create_account(&self, request: &SignupRequest) -> Result<LocalAccount>;
}

/// Host check deciding whether `actor` may change `target`'s identifier.
#[async_trait]
pub trait IdentifierEditPermission: Send + Sync {
    async fn can_edit_identifier(&self, actor: &Actor, target: &LocalAccount) -> Result<bool>;
}

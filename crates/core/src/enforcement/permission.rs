//! Identifier-edit permission decorator

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use wikiauth_domain::{Actor, LocalAccount, Result};

use super::ports::IdentifierEditPermission;

/// Wraps the host's identifier-edit check.
///
/// While the provider is enabled, identifiers are owned by the provider and
/// only administrators may change them. Administrators get the inner check's
/// answer unmodified. With the provider disabled every actor falls through.
pub struct ProviderIdentifierEditGuard {
    inner: Arc<dyn IdentifierEditPermission>,
    auth_enabled: bool,
}

impl ProviderIdentifierEditGuard {
    pub fn new(inner: Arc<dyn IdentifierEditPermission>, auth_enabled: bool) -> Self {
        Self { inner, auth_enabled }
    }
}

#[async_trait]
impl IdentifierEditPermission for ProviderIdentifierEditGuard {
    async fn can_edit_identifier(&self, actor: &Actor, target: &LocalAccount) -> Result<bool> {
        if self.auth_enabled && !actor.is_admin() {
            info!(account_id = %target.id, "identifier_edit_denied");
            return Ok(false);
        }
        self.inner.can_edit_identifier(actor, target).await
    }
}

impl std::fmt::Debug for ProviderIdentifierEditGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderIdentifierEditGuard")
            .field("auth_enabled", &self.auth_enabled)
            .finish_non_exhaustive()
    }
}

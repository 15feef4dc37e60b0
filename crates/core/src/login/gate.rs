//! Authentication gate - login decision logic
//!
//! One transition per attempt, no persisted state:
//!
//! 1. Unverified email is rejected before anything else runs, so an
//!    unverified address never discloses whether it collides.
//! 2. In full mode, an email already linked under another subject is
//!    rejected as a duplicate.
//! 3. The host resolves (links or looks up) the local account.
//! 4. In full mode with identifier sync on, a resolved account is renamed to
//!    the canonical identifier before the gate returns.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use wikiauth_domain::constants::PROVIDER_NAME;
use wikiauth_domain::{
    AcceptedLogin, Actor, AuthConfig, AuthenticationOutcome, GateMode, LocalAccount,
    RejectionReason, RemoteIdentity, Result,
};

use crate::accounts::ports::{
    AccountAssociationStore, AccountResolution, AccountResolver, IdentifierRenamer,
    ResolutionRequest,
};
use crate::accounts::CollisionDetector;
use crate::identity::{extractor, IdentifierNormalizer};

/// Behaviour switches for the gate, taken from [`AuthConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    pub mode: GateMode,
    pub always_sync_identifier: bool,
    pub allow_link_existing: bool,
}

impl GatePolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            mode: config.gate_mode,
            always_sync_identifier: config.always_sync_identifier,
            allow_link_existing: config.allow_link_existing,
        }
    }

    fn link_existing(&self) -> bool {
        self.mode == GateMode::Full && self.allow_link_existing
    }

    fn sync_enabled(&self) -> bool {
        self.mode == GateMode::Full && self.always_sync_identifier
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

/// Decides whether a provider-authenticated identity may log in.
pub struct AuthenticationGate {
    collisions: CollisionDetector,
    resolver: Arc<dyn AccountResolver>,
    renamer: Arc<dyn IdentifierRenamer>,
    normalizer: IdentifierNormalizer,
    policy: GatePolicy,
}

impl AuthenticationGate {
    pub fn new(
        store: Arc<dyn AccountAssociationStore>,
        resolver: Arc<dyn AccountResolver>,
        renamer: Arc<dyn IdentifierRenamer>,
        normalizer: IdentifierNormalizer,
        policy: GatePolicy,
    ) -> Self {
        Self {
            collisions: CollisionDetector::new(store, PROVIDER_NAME),
            resolver,
            renamer,
            normalizer,
            policy,
        }
    }

    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    /// Extract the identity from a raw provider response, then gate it.
    ///
    /// # Errors
    /// `WikiAuthError::MalformedPayload` for an unusable response, plus
    /// everything [`AuthenticationGate::authenticate`] returns.
    pub async fn authenticate_payload(&self, provider_response: &Value) -> Result<AuthenticationOutcome> {
        let identity = extractor::extract(provider_response).map_err(|err| {
            warn!(error = %err, "provider payload rejected");
            err
        })?;
        self.authenticate(identity).await
    }

    /// Run one authentication attempt.
    ///
    /// Rejections are returned as [`AuthenticationOutcome::Rejected`]. Errors
    /// are reserved for failures that abort the attempt: store lookups,
    /// resolver conflicts and failed renames.
    pub async fn authenticate(&self, identity: RemoteIdentity) -> Result<AuthenticationOutcome> {
        if !identity.email_verified {
            return Ok(self.reject(&identity, RejectionReason::EmailNotVerified));
        }

        if self.policy.mode == GateMode::Full {
            if let Some(conflict) =
                self.collisions.find_conflict(&identity.email, &identity.subject_id).await?
            {
                let reason =
                    RejectionReason::DuplicateAccount { conflicting_email: conflict.stored_email };
                return Ok(self.reject(&identity, reason));
            }
        }

        let request = ResolutionRequest {
            provider_name: PROVIDER_NAME.to_string(),
            subject_id: identity.subject_id.clone(),
            email: identity.email.clone(),
            email_verified: identity.email_verified,
            nickname: identity.display_name.clone(),
            name: identity.real_name.clone(),
        };

        let resolution = self
            .resolver
            .resolve_account(&request, self.policy.link_existing())
            .await
            .map_err(|err| {
                warn!(error = %err, label = err.label(), subject_id = %identity.subject_id, "account resolution failed");
                err
            })?;

        let login = match resolution.account.clone() {
            Some(account) => self.accept_existing(&identity, &resolution, account).await?,
            None => self.accept_pending(&identity, &resolution),
        };

        info!(
            subject_id = %identity.subject_id,
            identifier = %login.identifier,
            identifier_synced = login.identifier_synced,
            signup_required = login.pending.is_some(),
            mode = %self.policy.mode,
            "authentication_accepted"
        );

        Ok(AuthenticationOutcome::Accepted(login))
    }

    async fn accept_existing(
        &self,
        identity: &RemoteIdentity,
        resolution: &AccountResolution,
        account: LocalAccount,
    ) -> Result<AcceptedLogin> {
        let (account, identifier_synced) = if self.policy.sync_enabled() {
            self.sync_identifier(resolution, account).await?
        } else {
            (account, false)
        };

        Ok(AcceptedLogin {
            identifier: account.identifier.clone(),
            real_name: identity.real_name.clone(),
            account: Some(account),
            pending: None,
            identifier_synced,
            omit_username: true,
        })
    }

    fn accept_pending(&self, identity: &RemoteIdentity, resolution: &AccountResolution) -> AcceptedLogin {
        let username = resolution.username.clone().or_else(|| identity.display_name.clone());
        let identifier = self.normalizer.normalize(username.as_deref().unwrap_or_default());

        AcceptedLogin {
            identifier: identifier.into_inner(),
            real_name: identity.real_name.clone(),
            account: None,
            pending: Some(identity.to_pending().with_username(username)),
            identifier_synced: false,
            omit_username: true,
        }
    }

    /// Rename `account` to the canonical form of the resolved username.
    async fn sync_identifier(
        &self,
        resolution: &AccountResolution,
        account: LocalAccount,
    ) -> Result<(LocalAccount, bool)> {
        let raw = resolution.username.as_deref().unwrap_or(&account.identifier);
        let target = self.normalizer.normalize_for_account(raw, &account.identifier);

        if target == account.identifier.as_str() {
            debug!(account_id = %account.id, identifier = %account.identifier, "identifier already canonical");
            return Ok((account, false));
        }

        let renamed = self
            .renamer
            .rename_identifier(&account, &target, &Actor::System)
            .await
            .map_err(|err| {
                warn!(error = %err, account_id = %account.id, target = %target, "identifier sync failed");
                err
            })?;

        info!(
            account_id = %renamed.id,
            previous = %account.identifier,
            identifier = %renamed.identifier,
            "identifier_synced"
        );

        Ok((renamed, true))
    }

    fn reject(&self, identity: &RemoteIdentity, reason: RejectionReason) -> AuthenticationOutcome {
        info!(
            subject_id = %identity.subject_id,
            reason = reason.label(),
            mode = %self.policy.mode,
            "authentication_rejected"
        );
        AuthenticationOutcome::Rejected(reason)
    }
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate")
            .field("collisions", &self.collisions)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

//! MediaWiki authenticator
//!
//! Single entry point the host registers for the provider. Bundles the gate,
//! the signup pipeline and the identifier-edit guard, all built from one
//! [`AuthConfig`] snapshot.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;
use wikiauth_domain::constants::PROVIDER_NAME;
use wikiauth_domain::{AuthConfig, AuthenticationOutcome, Result, WikiAuthError};

use crate::accounts::ports::{AccountAssociationStore, AccountResolver, IdentifierRenamer};
use crate::enforcement::ports::{AccountCreator, IdentifierEditPermission};
use crate::enforcement::{IdentifierConformityHook, ProviderIdentifierEditGuard, SignupPipeline};
use crate::identity::ports::IdentifierSuggester;
use crate::identity::IdentifierNormalizer;
use crate::login::{AuthenticationGate, GatePolicy};

/// Host collaborators the authenticator needs.
#[derive(Clone)]
pub struct AuthenticatorPorts {
    pub association_store: Arc<dyn AccountAssociationStore>,
    pub resolver: Arc<dyn AccountResolver>,
    pub renamer: Arc<dyn IdentifierRenamer>,
    pub suggester: Arc<dyn IdentifierSuggester>,
}

/// Settings handed to the OAuth strategy. Opaque to the login logic.
#[derive(Clone, PartialEq, Eq)]
pub struct StrategyOptions {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub site: String,
    pub callback_url: String,
}

impl std::fmt::Debug for StrategyOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyOptions")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("site", &self.site)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

pub struct MediaWikiAuthenticator {
    config: AuthConfig,
    gate: AuthenticationGate,
    normalizer: IdentifierNormalizer,
}

impl MediaWikiAuthenticator {
    /// Build the authenticator from a validated configuration.
    ///
    /// # Errors
    /// Returns `WikiAuthError::Config` when `config` fails validation.
    pub fn new(config: AuthConfig, ports: AuthenticatorPorts) -> Result<Self> {
        config.validate()?;

        let normalizer = IdentifierNormalizer::new(ports.suggester);
        let gate = AuthenticationGate::new(
            ports.association_store,
            ports.resolver,
            ports.renamer,
            normalizer.clone(),
            GatePolicy::from_config(&config),
        );

        Ok(Self { config, gate, normalizer })
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Linked accounts cannot be disconnected by the user.
    pub fn can_revoke(&self) -> bool {
        false
    }

    pub fn can_connect_existing_user(&self) -> bool {
        self.config.link_existing_allowed()
    }

    pub fn always_update_user_username(&self) -> bool {
        self.config.always_sync_identifier
    }

    pub fn strategy_options(&self) -> StrategyOptions {
        StrategyOptions {
            consumer_key: self.config.consumer_key.clone(),
            consumer_secret: self.config.consumer_secret.clone(),
            site: self.config.site.clone(),
            callback_url: self.config.callback_url.clone(),
        }
    }

    pub fn normalizer(&self) -> &IdentifierNormalizer {
        &self.normalizer
    }

    pub fn gate(&self) -> &AuthenticationGate {
        &self.gate
    }

    /// Gate a raw provider response.
    ///
    /// # Errors
    /// `WikiAuthError::Config` when the provider is disabled, otherwise as
    /// [`AuthenticationGate::authenticate_payload`].
    pub async fn after_authenticate(&self, provider_response: &Value) -> Result<AuthenticationOutcome> {
        if !self.config.enabled {
            warn!(provider = PROVIDER_NAME, "login attempted while provider is disabled");
            return Err(WikiAuthError::Config(format!("{PROVIDER_NAME} login is disabled")));
        }
        self.gate.authenticate_payload(provider_response).await
    }

    /// Signup pipeline with the identifier conformity hook installed.
    pub fn signup_pipeline(&self, creator: Arc<dyn AccountCreator>) -> SignupPipeline {
        SignupPipeline::new(creator)
            .with_hook(Arc::new(IdentifierConformityHook::new(self.normalizer.clone())))
    }

    /// Wrap the host's identifier-edit check.
    pub fn guard_identifier_edit(
        &self,
        inner: Arc<dyn IdentifierEditPermission>,
    ) -> ProviderIdentifierEditGuard {
        ProviderIdentifierEditGuard::new(inner, self.config.enabled)
    }
}

impl std::fmt::Debug for MediaWikiAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaWikiAuthenticator")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_options_debug_redacts_secret() {
        let options = StrategyOptions {
            consumer_key: "key".into(),
            consumer_secret: "hunter2".into(),
            site: "https://meta.wikimedia.org".into(),
            callback_url: "https://forum.example/auth/mediawiki/callback".into(),
        };

        let rendered = format!("{options:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}

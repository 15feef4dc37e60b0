//! Signup pipeline and the identifier conformity hook

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use wikiauth_domain::{LocalAccount, Result, WikiAuthError};

use super::ports::{AccountCreator, SignupContext, SignupHook, SignupRequest};
use crate::identity::IdentifierNormalizer;

/// Runs registered hooks in order, then delegates to the host creator.
///
/// The first hook that fails aborts the chain; the creator is never called.
pub struct SignupPipeline {
    hooks: Vec<Arc<dyn SignupHook>>,
    creator: Arc<dyn AccountCreator>,
}

impl SignupPipeline {
    pub fn new(creator: Arc<dyn AccountCreator>) -> Self {
        Self { hooks: Vec::new(), creator }
    }

    /// Append a hook to the end of the chain.
    pub fn with_hook(mut self, hook: Arc<dyn SignupHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn hook_names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    /// Process one signup submission.
    ///
    /// # Errors
    /// The first hook error, or whatever the host creator returns.
    pub async fn submit(
        &self,
        request: &SignupRequest,
        context: &SignupContext,
    ) -> Result<LocalAccount> {
        for hook in &self.hooks {
            if let Err(err) = hook.before_create(request, context).await {
                warn!(hook = hook.name(), label = err.label(), error = %err, "signup_denied");
                return Err(err);
            }
        }

        let account = self.creator.create_account(request).await?;
        info!(account_id = %account.id, identifier = %account.identifier, "account_created");
        Ok(account)
    }
}

impl std::fmt::Debug for SignupPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupPipeline").field("hooks", &self.hook_names()).finish_non_exhaustive()
    }
}

/// Rejects signups whose identifier differs from the canonical form of the
/// provider username held in the session.
#[derive(Debug, Clone)]
pub struct IdentifierConformityHook {
    normalizer: IdentifierNormalizer,
}

impl IdentifierConformityHook {
    pub fn new(normalizer: IdentifierNormalizer) -> Self {
        Self { normalizer }
    }
}

#[async_trait]
impl SignupHook for IdentifierConformityHook {
    fn name(&self) -> &'static str {
        "identifier_conformity"
    }

    async fn before_create(&self, request: &SignupRequest, context: &SignupContext) -> Result<()> {
        let Some(pending) = context.pending.as_ref() else {
            debug!("no pending provider identity, signup passes through");
            return Ok(());
        };

        let expected = self.normalizer.normalize(pending.username.as_deref().unwrap_or_default());
        if expected == request.identifier.as_str() {
            return Ok(());
        }

        Err(WikiAuthError::NonConformingIdentifier {
            submitted: request.identifier.clone(),
            expected: expected.into_inner(),
        })
    }
}

//! Collision detector
//!
//! Finds a linked account that already claims the same email under a
//! different remote subject.

use std::sync::Arc;

use tracing::{debug, warn};
use wikiauth_domain::{LinkedAccountRecord, Result};

use super::ports::AccountAssociationStore;

/// Read-only point lookup over linked-account records of one provider.
#[derive(Clone)]
pub struct CollisionDetector {
    store: Arc<dyn AccountAssociationStore>,
    provider_name: String,
}

impl CollisionDetector {
    pub fn new(store: Arc<dyn AccountAssociationStore>, provider_name: impl Into<String>) -> Self {
        Self { store, provider_name: provider_name.into() }
    }

    /// Any record holding `email` under a subject other than `subject_id`.
    ///
    /// An empty email never collides. When several records conflict, which
    /// one is returned is unspecified.
    ///
    /// # Errors
    /// Store failures are returned unchanged and are fatal for the attempt.
    pub async fn find_conflict(
        &self,
        email: &str,
        subject_id: &str,
    ) -> Result<Option<LinkedAccountRecord>> {
        if email.is_empty() {
            return Ok(None);
        }

        let conflict = self
            .store
            .find_by_email_excluding_subject(&self.provider_name, email, subject_id)
            .await
            .map_err(|err| {
                warn!(error = %err, provider = %self.provider_name, "collision lookup failed");
                err
            })?;

        if let Some(record) = &conflict {
            debug!(
                provider = %self.provider_name,
                subject_id,
                conflicting_subject_id = %record.provider_subject_id,
                "linked account collision detected"
            );
        }

        Ok(conflict)
    }
}

impl std::fmt::Debug for CollisionDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionDetector").field("provider_name", &self.provider_name).finish()
    }
}

//! Mock account-side ports: association store, resolver and renamer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use wikiauth_core::{
    AccountAssociationStore, AccountResolution, AccountResolver, IdentifierRenamer,
    ResolutionRequest,
};
use wikiauth_domain::{
    Actor, CanonicalIdentifier, LinkedAccountRecord, LocalAccount, Result as DomainResult,
    WikiAuthError,
};

/// In-memory `AccountAssociationStore` with a lookup counter.
#[derive(Default, Clone)]
pub struct MockAssociationStore {
    records: Arc<Mutex<Vec<LinkedAccountRecord>>>,
    lookups: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockAssociationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record for provider `mediawiki`.
    pub fn with_record(self, subject_id: &str, email: &str) -> Self {
        self.records.lock().unwrap().push(LinkedAccountRecord {
            provider_name: "mediawiki".into(),
            provider_subject_id: subject_id.into(),
            stored_email: email.into(),
            user_id: None,
            linked_at: Utc::now(),
        });
        self
    }

    /// Every lookup fails with a database error.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl AccountAssociationStore for MockAssociationStore {
    async fn find_by_email_excluding_subject(
        &self,
        provider_name: &str,
        email: &str,
        exclude_subject_id: &str,
    ) -> DomainResult<Option<LinkedAccountRecord>> {
        *self.lookups.lock().unwrap() += 1;
        if self.fail {
            return Err(WikiAuthError::Database("disk I/O error".into()));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|record| {
                record.provider_name == provider_name
                    && record.stored_email == email
                    && record.provider_subject_id != exclude_subject_id
            })
            .cloned())
    }
}

/// `AccountResolver` returning pre-registered accounts by subject id.
///
/// The resolved username is the request nickname, as the host does, unless
/// overridden with [`MockAccountResolver::reporting_username`].
#[derive(Default, Clone)]
pub struct MockAccountResolver {
    accounts: Arc<Mutex<HashMap<String, LocalAccount>>>,
    requests: Arc<Mutex<Vec<(ResolutionRequest, bool)>>>,
    username: Option<Option<String>>,
    conflict: bool,
}

impl MockAccountResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, subject_id: &str, account: LocalAccount) -> Self {
        self.accounts.lock().unwrap().insert(subject_id.into(), account);
        self
    }

    /// Report `username` instead of the request nickname.
    pub fn reporting_username(self, username: Option<&str>) -> Self {
        Self { username: Some(username.map(str::to_string)), ..self }
    }

    /// Every resolution is refused by the host.
    pub fn conflicting() -> Self {
        Self { conflict: true, ..Self::default() }
    }

    pub fn requests(&self) -> Vec<(ResolutionRequest, bool)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountResolver for MockAccountResolver {
    async fn resolve_account(
        &self,
        request: &ResolutionRequest,
        link_existing: bool,
    ) -> DomainResult<AccountResolution> {
        self.requests.lock().unwrap().push((request.clone(), link_existing));
        if self.conflict {
            return Err(WikiAuthError::AccountConflict(format!(
                "subject {} already linked",
                request.subject_id
            )));
        }

        Ok(AccountResolution {
            account: self.accounts.lock().unwrap().get(&request.subject_id).cloned(),
            username: self.username.clone().unwrap_or_else(|| request.nickname.clone()),
        })
    }
}

/// `IdentifierRenamer` that records every rename it performs.
#[derive(Default, Clone)]
pub struct MockIdentifierRenamer {
    renames: Arc<Mutex<Vec<(String, String, Actor)>>>,
    fail: bool,
}

impl MockIdentifierRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    /// `(account id, new identifier, actor)` per call.
    pub fn renames(&self) -> Vec<(String, String, Actor)> {
        self.renames.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentifierRenamer for MockIdentifierRenamer {
    async fn rename_identifier(
        &self,
        account: &LocalAccount,
        new_identifier: &CanonicalIdentifier,
        actor: &Actor,
    ) -> DomainResult<LocalAccount> {
        if self.fail {
            return Err(WikiAuthError::Internal("rename rejected".into()));
        }

        self.renames.lock().unwrap().push((
            account.id.clone(),
            new_identifier.as_str().to_string(),
            actor.clone(),
        ));
        Ok(LocalAccount { identifier: new_identifier.as_str().to_string(), ..account.clone() })
    }
}

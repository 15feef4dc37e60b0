//! Mock host-side ports: account creation and identifier-edit permission.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wikiauth_core::{AccountCreator, IdentifierEditPermission, SignupRequest};
use wikiauth_domain::{Actor, LocalAccount, Result as DomainResult};

/// `AccountCreator` that records submitted identifiers.
#[derive(Default, Clone)]
pub struct MockAccountCreator {
    created: Arc<Mutex<Vec<String>>>,
}

impl MockAccountCreator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountCreator for MockAccountCreator {
    async fn create_account(&self, request: &SignupRequest) -> DomainResult<LocalAccount> {
        let mut created = self.created.lock().unwrap();
        created.push(request.identifier.clone());
        Ok(LocalAccount {
            id: format!("user-{}", created.len()),
            identifier: request.identifier.clone(),
            email: request.email.clone(),
            name: request.name.clone(),
        })
    }
}

/// Generic permission check with a fixed answer and a call counter.
#[derive(Clone)]
pub struct StaticPermission {
    answer: bool,
    calls: Arc<Mutex<usize>>,
}

impl StaticPermission {
    pub fn new(answer: bool) -> Self {
        Self { answer, calls: Arc::new(Mutex::new(0)) }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl IdentifierEditPermission for StaticPermission {
    async fn can_edit_identifier(&self, _actor: &Actor, _target: &LocalAccount) -> DomainResult<bool> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.answer)
    }
}

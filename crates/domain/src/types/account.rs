//! Account-side types
//!
//! The generic account model belongs to the host; these are the narrow views
//! the reconciliation logic reads and hands back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted association between a local account and a remote subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccountRecord {
    pub provider_name: String,
    pub provider_subject_id: String,
    pub stored_email: String,
    /// Local account the association belongs to, once one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub linked_at: DateTime<Utc>,
}

/// Host account as seen by the reconciliation logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAccount {
    pub id: String,
    /// Current local identifier (username)
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Who performs an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// The host's system user; used to attribute automatic renames.
    System,
    User { id: String, admin: bool },
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        match self {
            Self::System => true,
            Self::User { admin, .. } => *admin,
        }
    }
}

//! Domain types and models

pub mod account;
pub mod identity;
pub mod outcome;

pub use account::{Actor, LinkedAccountRecord, LocalAccount};
pub use identity::{CanonicalIdentifier, PendingIdentity, RemoteIdentity};
pub use outcome::{AcceptedLogin, AuthenticationOutcome, RejectionReason};

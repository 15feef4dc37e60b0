//! Consistency enforcers
//!
//! Explicit extension points the host invokes around account creation and
//! identifier edits: an ordered chain of [`ports::SignupHook`]s run before the
//! account is created, and a decorator over the host's identifier-edit
//! permission check.

pub mod permission;
pub mod ports;
pub mod signup;

pub use permission::ProviderIdentifierEditGuard;
pub use signup::{IdentifierConformityHook, SignupPipeline};

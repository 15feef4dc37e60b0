//! # wikiauth Core
//!
//! Pure reconciliation logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Identifier normalization and provider payload extraction
//! - Collision detection over linked-account records
//! - The authentication gate (accept / reject, identifier sync)
//! - Signup and identifier-edit consistency enforcers
//! - Port/adapter interfaces (traits) for every host collaborator
//!
//! ## Architecture Principles
//! - Only depends on `wikiauth-domain`
//! - No database, HTTP, or OAuth transport code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod accounts;
pub mod authenticator;
pub mod enforcement;
pub mod identity;
pub mod login;

// Re-export specific items to avoid ambiguity
pub use accounts::ports::{
    AccountAssociationStore, AccountResolution, AccountResolver, IdentifierRenamer,
    ResolutionRequest,
};
pub use accounts::CollisionDetector;
pub use authenticator::{AuthenticatorPorts, MediaWikiAuthenticator, StrategyOptions};
pub use enforcement::ports::{
    AccountCreator, IdentifierEditPermission, SignupContext, SignupHook, SignupRequest,
};
pub use enforcement::{IdentifierConformityHook, ProviderIdentifierEditGuard, SignupPipeline};
pub use identity::extractor::extract;
pub use identity::ports::IdentifierSuggester;
pub use identity::{IdentifierNormalizer, SanitizingSuggester};
pub use login::{AuthenticationGate, GatePolicy};

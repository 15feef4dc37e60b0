//! Provider constants
//!
//! Centralized location for provider names, localisation keys and
//! identifier limits used throughout the crate family.

/// Provider name under which linked accounts are recorded.
pub const PROVIDER_NAME: &str = "mediawiki";

// Localisation keys
pub const MSG_EMAIL_NOT_VERIFIED: &str = "login.authenticator_email_not_verified";
pub const MSG_EXISTING_ACCOUNT: &str = "login.authenticator_existing_account";
pub const MSG_NON_CONFORMING_IDENTIFIER: &str = "login.non_wikimedia_username";
pub const MSG_GENERIC_FAILURE: &str = "login.omniauth_error";

// Identifier suggestion
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 20;
pub const FALLBACK_IDENTIFIER: &str = "user";

//! # wikiauth Domain
//!
//! Domain types and models for MediaWiki-family login reconciliation.
//!
//! This crate contains:
//! - Identity, linked-account and outcome types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Provider constants and localisation keys
//!
//! ## Architecture
//! - No dependencies on other wikiauth crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

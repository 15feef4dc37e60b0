//! # wikiauth Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - SQLite linked-account store (r2d2 pool)
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `wikiauth-core`
//! - Depends on `wikiauth-domain` and `wikiauth-core`
//! - Contains all "impure" code (I/O, global subscriber)

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use database::{DbManager, SqliteLinkedAccountRepository};
pub use errors::InfraError;
pub use observability::init_tracing;

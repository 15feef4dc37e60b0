//! Database implementations

pub mod linked_account_repository;
pub mod manager;

pub use linked_account_repository::SqliteLinkedAccountRepository;
pub use manager::{DbManager, SqliteConnection, SqlitePool};

//! Linked-account ports and collision detection

pub mod collision;
pub mod ports;

pub use collision::CollisionDetector;

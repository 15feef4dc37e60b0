//! Authentication gate

pub mod gate;

pub use gate::{AuthenticationGate, GatePolicy};

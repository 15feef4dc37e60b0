//! Observability infrastructure
//!
//! Installs the process-wide `tracing` subscriber. Core code only emits
//! events; choosing the filter and output format happens here.

pub mod logging;

pub use logging::{build_filter, init_tracing};

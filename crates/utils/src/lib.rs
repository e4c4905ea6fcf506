//! Shared utilities for the reservation commit engine
//!
//! - Logging configuration
//! - Health-check types consumed by the HTTP shell's `/health`, `/ready`, `/live` probes

pub mod logger;
pub mod observability;

pub use logger::*;
pub use observability::*;

//! Tests-only crate; see `tests/concurrency_scenarios.rs`.

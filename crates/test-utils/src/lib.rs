//! Test harness for integration tests: a real Postgres pool, the migration
//! runner, and scoped rollback-only transactions.

pub mod database;

pub use database::*;

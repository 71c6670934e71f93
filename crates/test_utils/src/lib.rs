//! Test Utilities Crate
//!
//! Shared test infrastructure for the billbook workspace.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built businesses, dates and line items
//! - `builders`: Builders for bill drafts
//! - `database`: Testcontainers PostgreSQL harness
//! - `assertions`: Assertion helpers for numbering and ledgers
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;

//! Infrastructure Database Layer
//!
//! PostgreSQL storage for billbook using SQLx:
//!
//! - `businesses`: tenant records with embedded numbering counters
//! - `bills`: bill documents
//! - `transactions`: the append-only bill ledger
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig};
//! use infra_db::adapters::{PostgresBusinessAdapter, StoreSettings};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/billbook")).await?;
//! let businesses = PostgresBusinessAdapter::new(pool.clone(), StoreSettings::default());
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresBillAdapter, PostgresBusinessAdapter, PostgresLedgerAdapter, StoreSettings};

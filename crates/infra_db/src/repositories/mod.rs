//! Repository implementations
//!
//! Repositories own the SQL and work with plain row types; the adapters in
//! `crate::adapters` convert rows to and from domain models.
//!
//! Queries are built at runtime with `sqlx::query`/`query_as` so the crate
//! compiles without a live database.

pub mod business;
pub mod bill;
pub mod ledger;

pub use business::BusinessRepository;
pub use bill::BillRepository;
pub use ledger::LedgerRepository;

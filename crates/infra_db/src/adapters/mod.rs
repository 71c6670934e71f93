//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - implements the domain's port trait
//! - translates between domain models and repository rows
//! - bounds every store call with the configured persistence timeout
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresBusinessAdapter, StoreSettings};
//! use domain_billing::{CounterPort, NumberingAllocator};
//!
//! let adapter = Arc::new(PostgresBusinessAdapter::new(pool, StoreSettings::default()));
//! let allocator = NumberingAllocator::new(adapter.clone());
//! ```

pub mod business;
pub mod bill;
pub mod ledger;

pub use business::PostgresBusinessAdapter;
pub use bill::PostgresBillAdapter;
pub use ledger::PostgresLedgerAdapter;

use std::future::Future;
use std::time::{Duration, Instant};

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};
use crate::error::DatabaseError;

/// Settings shared by all adapters
#[derive(Debug, Clone, Copy)]
pub struct StoreSettings {
    /// Upper bound for a single store call
    pub timeout: Duration,
}

impl StoreSettings {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Runs a store call under the configured timeout
///
/// An elapsed timeout means the outcome of the call is unknown to the caller;
/// for counter updates the numbers are treated as not allocated.
pub(crate) async fn bounded<T, F>(
    settings: &StoreSettings,
    operation: &str,
    call: F,
) -> Result<T, PortError>
where
    F: Future<Output = Result<T, DatabaseError>>,
{
    match tokio::time::timeout(settings.timeout, call).await {
        Ok(result) => result.map_err(db_to_port_error),
        Err(_) => {
            tracing::warn!(operation, timeout_ms = settings.timeout.as_millis() as u64, "Store call timed out");
            Err(PortError::timeout(operation, settings.timeout.as_millis() as u64))
        }
    }
}

/// Translates database errors into port errors
pub(crate) fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound { entity, id } => PortError::NotFound { entity_type: entity, id },
        DatabaseError::DuplicateEntry(msg) => PortError::conflict(msg),
        DatabaseError::ForeignKeyViolation(msg) | DatabaseError::ConstraintViolation(msg) => {
            PortError::validation(msg)
        }
        DatabaseError::SerializationError(msg) => PortError::Transformation { message: msg },
        DatabaseError::ConnectionFailed(msg) => PortError::connection(msg),
        DatabaseError::PoolExhausted => PortError::connection("connection pool exhausted"),
        other => PortError::internal(other.to_string()),
    }
}

/// Runs `SELECT 1` and reports the result under `adapter_id`
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let (status, message) = match result {
        Ok(_) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };

    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        status,
        latency_ms,
        message,
        checked_at: Utc::now(),
    }
}

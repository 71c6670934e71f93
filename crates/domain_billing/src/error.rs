//! Billing domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the billing domain
///
/// Allocation failures surface as `NotFound` or `Persistence` and abort the
/// enclosing bill creation. Ledger failures never reach this type; the
/// recorder downgrades them to warnings.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Referenced tenant or bill does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying store unavailable, timed out, or rejected the write
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Bill input rejected before any number was allocated
    #[error("Validation error: {0}")]
    Validation(String),
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BillingError::NotFound(_))
    }
}

impl From<PortError> for BillingError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => BillingError::NotFound(err.to_string()),
            PortError::Validation { message, .. } => BillingError::Validation(message),
            other => BillingError::Persistence(other.to_string()),
        }
    }
}

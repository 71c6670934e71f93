//! Business domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the business domain
#[derive(Debug, Error)]
pub enum BusinessError {
    /// Business with the given ID was not found
    #[error("Business not found: {0}")]
    NotFound(String),

    /// A business is already registered with this owner email
    #[error("Business already registered for {0}")]
    DuplicateEmail(String),

    /// Invalid business data provided
    #[error("Invalid business data: {0}")]
    InvalidData(String),

    /// Registration input failed validation
    #[error("Business validation failed: {0}")]
    ValidationFailed(String),

    /// Paid plan selected without a payment reference
    #[error("Payment required for {0} plan")]
    PaymentRequired(String),

    /// Cannot operate on a deactivated business
    #[error("Business is inactive")]
    Inactive,

    /// Store unavailable or rejected the write
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl BusinessError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        BusinessError::NotFound(id.to_string())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        BusinessError::InvalidData(message.into())
    }

    /// Creates a ValidationFailed error from validator output
    pub fn validation_failed(errors: &validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        BusinessError::ValidationFailed(fields.join("; "))
    }
}

impl From<PortError> for BusinessError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { id, .. } => BusinessError::NotFound(id),
            PortError::Conflict { message } => BusinessError::DuplicateEmail(message),
            PortError::Validation { message, .. } => BusinessError::InvalidData(message),
            other => BusinessError::Persistence(other.to_string()),
        }
    }
}

//! Request handlers

pub mod health;
pub mod business;
pub mod bills;
pub mod numbers;
pub mod transactions;
pub mod reports;

use core_kernel::{BusinessId, OperationMetadata};

use crate::auth::Claims;
use crate::error::ApiError;

/// Tenant scope of an authenticated request
pub(crate) fn tenant(claims: &Claims) -> Result<BusinessId, ApiError> {
    Ok(claims.business_id()?)
}

/// Ledger attribution for mutations made with these claims
pub(crate) fn metadata(claims: &Claims) -> OperationMetadata {
    OperationMetadata::default().initiated_by(claims.email.clone())
}

//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_billing::BillingError;
use domain_business::BusinessError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized".to_string()),
            ApiError::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, "payment_required", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone()),
            ApiError::Persistence(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone()),
        };

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::NotFound(msg) => ApiError::NotFound(msg),
            BillingError::Validation(msg) => ApiError::Validation(msg),
            BillingError::Persistence(msg) => ApiError::Persistence(msg),
        }
    }
}

impl From<BusinessError> for ApiError {
    fn from(err: BusinessError) -> Self {
        match err {
            BusinessError::NotFound(id) => ApiError::NotFound(format!("Business {id}")),
            BusinessError::DuplicateEmail(email) => {
                ApiError::Conflict(format!("a business is already registered for {email}"))
            }
            BusinessError::InvalidData(msg) => ApiError::BadRequest(msg),
            BusinessError::ValidationFailed(msg) => ApiError::Validation(msg),
            BusinessError::PaymentRequired(plan) => {
                ApiError::PaymentRequired(format!("the {plan} plan needs a payment reference"))
            }
            BusinessError::Inactive => ApiError::Forbidden("business is inactive".to_string()),
            BusinessError::Persistence(msg) => ApiError::Persistence(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        ApiError::Validation(fields.join("; "))
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(_: crate::auth::AuthError) -> Self {
        ApiError::Unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_errors_map_to_status() {
        let cases = [
            (BillingError::NotFound("bill".into()), StatusCode::NOT_FOUND),
            (BillingError::validation("no items"), StatusCode::UNPROCESSABLE_ENTITY),
            (BillingError::Persistence("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_business_errors_map_to_status() {
        let cases = [
            (BusinessError::DuplicateEmail("a@b.in".into()), StatusCode::CONFLICT),
            (BusinessError::invalid("bad list"), StatusCode::BAD_REQUEST),
            (BusinessError::PaymentRequired("premium".into()), StatusCode::PAYMENT_REQUIRED),
            (BusinessError::Inactive, StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}

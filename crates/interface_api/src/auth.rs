//! Authentication
//!
//! Tokens are issued to a business on registration. The `sub` claim carries
//! the business id and scopes every protected request to that tenant.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::BusinessId;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (business ID)
    pub sub: String,
    /// Owner email of the business
    pub email: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Tenant this token was issued for
    pub fn business_id(&self) -> Result<BusinessId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `business_id` - Tenant the token grants access to
/// * `email` - Owner email, recorded as the actor on ledger entries
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    business_id: BusinessId,
    email: &str,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: business_id.as_uuid().to_string(),
        email: email.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let id = BusinessId::new_v7();
        let token = create_token(id, "owner@store.in", "secret", 60).unwrap();

        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.business_id().unwrap(), id);
        assert_eq!(claims.email, "owner@store.in");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(BusinessId::new_v7(), "owner@store.in", "secret", 60).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_subject_rejected() {
        let claims = Claims { sub: "nope".into(), email: String::new(), exp: 0, iat: 0 };
        assert!(claims.business_id().is_err());
    }
}

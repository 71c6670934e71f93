//! Numbering preview

use axum::{extract::State, Extension, Json};

use crate::auth::Claims;
use crate::dto::bill::NextNumbersResponse;
use crate::error::ApiError;
use crate::handlers::tenant;
use crate::AppState;

/// Shows the numbers the next bill would get; nothing is consumed
pub async fn next_numbers(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<NextNumbersResponse>, ApiError> {
    let business = state.businesses.get(tenant(&claims)?).await?;
    let numbers = state
        .bills
        .allocator()
        .peek_next(business.id, business.today())
        .await?;
    Ok(Json(numbers.into()))
}

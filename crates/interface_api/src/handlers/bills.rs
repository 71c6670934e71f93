//! Bill handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::BillId;
use domain_billing::BillQuery;

use crate::auth::Claims;
use crate::dto::bill::*;
use crate::error::ApiError;
use crate::handlers::{metadata, tenant};
use crate::AppState;

/// Creates a bill, allocating its receipt and invoice numbers
///
/// The bill is dated and numbered on the business's local day.
pub async fn create_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<BillMutationResponse>), ApiError> {
    request.validate()?;
    let business = state.businesses.get_active(tenant(&claims)?).await?;

    let outcome = state
        .bills
        .create_bill(
            business.id,
            request.into(),
            business.settings.billing_profile(),
            business.today(),
            Some(&metadata(&claims)),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// Lists bills, newest first
pub async fn list_bills(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<BillFilterParams>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let query = BillQuery::from(params);
    let bills = state.bills.list_bills(tenant(&claims)?, &query).await?;
    Ok(Json(bills.into_iter().map(BillResponse::from).collect()))
}

/// Gets a bill by ID
pub async fn get_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BillResponse>, ApiError> {
    let bill = state.bills.get_bill(tenant(&claims)?, BillId::from(id)).await?;
    Ok(Json(bill.into()))
}

/// Updates the payment fields of a bill
pub async fn update_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBillRequest>,
) -> Result<Json<BillMutationResponse>, ApiError> {
    let business = state.businesses.get_active(tenant(&claims)?).await?;

    let outcome = state
        .bills
        .update_bill(business.id, BillId::from(id), request.into(), Some(&metadata(&claims)))
        .await?;
    Ok(Json(outcome.into()))
}

/// Deletes a bill; its ledger history remains
pub async fn delete_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BillMutationResponse>, ApiError> {
    let business = state.businesses.get_active(tenant(&claims)?).await?;

    let outcome = state
        .bills
        .delete_bill(business.id, BillId::from(id), Some(&metadata(&claims)))
        .await?;
    Ok(Json(outcome.into()))
}

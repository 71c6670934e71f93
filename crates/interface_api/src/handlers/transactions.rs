//! Ledger handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use domain_billing::{LedgerEntry, LedgerQuery};

use crate::auth::Claims;
use crate::dto::ledger::TransactionParams;
use crate::error::ApiError;
use crate::handlers::tenant;
use crate::AppState;

/// Lists ledger entries for the calling business, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<TransactionParams>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    let query = LedgerQuery::from(params);
    let entries = state
        .bills
        .recorder()
        .port()
        .query_by_tenant(tenant(&claims)?, &query)
        .await
        .map_err(domain_billing::BillingError::from)?;
    Ok(Json(entries))
}

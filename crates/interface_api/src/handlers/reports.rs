//! Report handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use domain_billing::{report::daily_totals, BillQuery, BillSummary};

use crate::auth::Claims;
use crate::dto::bill::BillFilterParams;
use crate::dto::report::SummaryResponse;
use crate::error::ApiError;
use crate::handlers::tenant;
use crate::AppState;

/// Purchase and sales totals over an optional date range
pub async fn summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<BillFilterParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let query = BillQuery::from(params);
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(ApiError::BadRequest(format!("from {from} is after to {to}")));
        }
    }

    let bills = state.bills.list_bills(tenant(&claims)?, &query).await?;
    let summary = BillSummary::from_bills(&bills);

    Ok(Json(SummaryResponse {
        from: query.from,
        to: query.to,
        gross_margin: summary.gross_margin(),
        daily: daily_totals(&bills),
        summary,
    }))
}

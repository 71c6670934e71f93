//! Report DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::BusinessDate;
use domain_billing::{BillSummary, DailyTotal};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub from: Option<BusinessDate>,
    pub to: Option<BusinessDate>,
    pub summary: BillSummary,
    pub gross_margin: Decimal,
    pub daily: Vec<DailyTotal>,
}

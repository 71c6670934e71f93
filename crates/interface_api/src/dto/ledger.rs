//! Transaction ledger DTOs

use serde::Deserialize;
use uuid::Uuid;

use core_kernel::BillId;
use domain_billing::LedgerQuery;

/// Largest page a client may request
pub const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionParams {
    pub bill_id: Option<Uuid>,
    pub limit: Option<u32>,
}

impl From<TransactionParams> for LedgerQuery {
    fn from(params: TransactionParams) -> Self {
        LedgerQuery {
            bill_id: params.bill_id.map(BillId::from),
            limit: Some(params.limit.unwrap_or(100).min(MAX_LIMIT)),
        }
    }
}

//! Bill DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::BusinessDate;
use domain_billing::{
    AllocatedNumbers, Bill, BillQuery, BillType, BillUpdate, Expense, LineItem, MutationOutcome,
    NewBill, PaymentStatus, PaymentType,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub item: String,
    #[serde(default)]
    pub bags: u32,
    pub weight: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
    #[serde(default)]
    pub apply_commission: bool,
}

impl From<LineItemRequest> for LineItem {
    fn from(request: LineItemRequest) -> Self {
        LineItem::new(request.item, request.bags, request.weight, request.rate)
            .with_other_charges(request.other_charges)
            .with_commission(request.apply_commission)
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    pub expense_type: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBillRequest {
    pub bill_type: BillType,
    /// Defaults to the business's current day
    pub date: Option<BusinessDate>,
    pub party_name: Option<String>,
    #[validate(length(min = 1))]
    pub items: Vec<LineItemRequest>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRequest>,
    pub payment_type: PaymentType,
    #[serde(default)]
    pub received_amount: Decimal,
}

impl From<CreateBillRequest> for NewBill {
    fn from(request: CreateBillRequest) -> Self {
        NewBill {
            bill_type: request.bill_type,
            date: request.date,
            party_name: request.party_name,
            items: request.items.into_iter().map(LineItem::from).collect(),
            expenses: request
                .expenses
                .into_iter()
                .map(|e| Expense::new(e.expense_type, e.amount))
                .collect(),
            payment_type: request.payment_type,
            received_amount: request.received_amount,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBillRequest {
    pub payment_type: Option<PaymentType>,
    pub received_amount: Option<Decimal>,
    pub party_name: Option<String>,
}

impl From<UpdateBillRequest> for BillUpdate {
    fn from(request: UpdateBillRequest) -> Self {
        BillUpdate {
            payment_type: request.payment_type,
            received_amount: request.received_amount,
            party_name: request.party_name,
        }
    }
}

/// Query string for listing bills and summaries
#[derive(Debug, Default, Deserialize)]
pub struct BillFilterParams {
    pub bill_type: Option<BillType>,
    pub from: Option<BusinessDate>,
    pub to: Option<BusinessDate>,
}

impl From<BillFilterParams> for BillQuery {
    fn from(params: BillFilterParams) -> Self {
        BillQuery {
            bill_type: params.bill_type,
            from: params.from,
            to: params.to,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    #[serde(flatten)]
    pub bill: Bill,
    pub payment_status: PaymentStatus,
    pub balance_due: Decimal,
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        Self {
            payment_status: bill.payment_status(),
            balance_due: bill.balance_due(),
            bill,
        }
    }
}

/// Result of a create, update or delete
///
/// `warnings` is non-empty when the ledger entry could not be written; the
/// bill change itself has been committed.
#[derive(Debug, Serialize)]
pub struct BillMutationResponse {
    pub bill: BillResponse,
    pub warnings: Vec<String>,
}

impl From<MutationOutcome> for BillMutationResponse {
    fn from(outcome: MutationOutcome) -> Self {
        Self {
            warnings: outcome.warnings(),
            bill: outcome.bill.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NextNumbersResponse {
    pub receipt_no: String,
    pub invoice_no: String,
    pub date: BusinessDate,
}

impl From<AllocatedNumbers> for NextNumbersResponse {
    fn from(numbers: AllocatedNumbers) -> Self {
        Self {
            receipt_no: numbers.receipt_no,
            invoice_no: numbers.invoice_no,
            date: numbers.receipt_date,
        }
    }
}

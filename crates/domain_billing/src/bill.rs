//! Purchase and sales bills
//!
//! A bill is created once with numbers from the allocator, then only its
//! payment fields change. Totals are derived from line items and expenses at
//! creation time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, BusinessDate, BusinessId};
use crate::counter::AllocatedNumbers;
use crate::error::BillingError;

/// Expense type recorded for commission on flagged line items
pub const COMMISSION_EXPENSE: &str = "Commission";

/// Kind of bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    /// Goods bought from a vendor
    Purchase,
    /// Goods sold to a customer
    Sales,
}

impl BillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::Purchase => "purchase",
            BillType::Sales => "sales",
        }
    }
}

impl std::str::FromStr for BillType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "purchase" => Ok(BillType::Purchase),
            "sales" | "sale" => Ok(BillType::Sales),
            other => Err(BillingError::validation(format!("unknown bill type '{other}'"))),
        }
    }
}

/// How the bill is being settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Credit,
    Online,
}

/// Settlement status derived from received vs. net amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

/// One goods line on a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item: String,
    pub bags: u32,
    pub weight: Decimal,
    pub rate: Decimal,
    /// weight × rate, rounded to 2 dp
    pub amount: Decimal,
    pub other_charges: Decimal,
    pub apply_commission: bool,
}

impl LineItem {
    pub fn new(item: impl Into<String>, bags: u32, weight: Decimal, rate: Decimal) -> Self {
        Self {
            item: item.into(),
            bags,
            weight,
            rate,
            amount: (weight * rate).round_dp(2),
            other_charges: Decimal::ZERO,
            apply_commission: false,
        }
    }

    pub fn with_other_charges(mut self, charges: Decimal) -> Self {
        self.other_charges = charges;
        self
    }

    pub fn with_commission(mut self, apply: bool) -> Self {
        self.apply_commission = apply;
        self
    }

    /// Amount plus other charges
    pub fn line_total(&self) -> Decimal {
        self.amount + self.other_charges
    }

    fn validate(&self, index: usize) -> Result<(), BillingError> {
        if self.item.trim().is_empty() {
            return Err(BillingError::validation(format!("item {index}: name is required")));
        }
        if self.weight.is_sign_negative() || self.rate.is_sign_negative() {
            return Err(BillingError::validation(format!(
                "item {index}: weight and rate must not be negative"
            )));
        }
        if self.other_charges.is_sign_negative() {
            return Err(BillingError::validation(format!(
                "item {index}: other charges must not be negative"
            )));
        }
        Ok(())
    }
}

/// A typed expense on a bill (labour, transport, commission...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub expense_type: String,
    pub amount: Decimal,
}

impl Expense {
    pub fn new(expense_type: impl Into<String>, amount: Decimal) -> Self {
        Self {
            expense_type: expense_type.into(),
            amount,
        }
    }
}

/// Tenant-level inputs that shape bill totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillingProfile {
    /// Percentage applied to flagged line items
    pub commission_rate: Decimal,
}

/// Input for a new bill; numbers and totals are filled in on issue
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub bill_type: BillType,
    /// Defaults to the allocation day
    pub date: Option<BusinessDate>,
    pub party_name: Option<String>,
    pub items: Vec<LineItem>,
    pub expenses: Vec<Expense>,
    pub payment_type: PaymentType,
    pub received_amount: Decimal,
}

impl NewBill {
    pub fn new(bill_type: BillType, payment_type: PaymentType) -> Self {
        Self {
            bill_type,
            date: None,
            party_name: None,
            items: Vec::new(),
            expenses: Vec::new(),
            payment_type,
            received_amount: Decimal::ZERO,
        }
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn party(mut self, name: impl Into<String>) -> Self {
        self.party_name = Some(name.into());
        self
    }

    pub fn dated(mut self, date: BusinessDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn received(mut self, amount: Decimal) -> Self {
        self.received_amount = amount;
        self
    }

    /// Rejects drafts that must not consume a number
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.items.is_empty() {
            return Err(BillingError::validation("a bill needs at least one line item"));
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate(index)?;
        }
        if let Some(bad) = self.expenses.iter().find(|e| e.amount.is_sign_negative()) {
            return Err(BillingError::validation(format!(
                "expense '{}' must not be negative",
                bad.expense_type
            )));
        }
        if self.received_amount.is_sign_negative() {
            return Err(BillingError::validation("received amount must not be negative"));
        }
        Ok(())
    }
}

/// Partial update of a stored bill
///
/// Numbers, type, owner and line items are fixed after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillUpdate {
    pub payment_type: Option<PaymentType>,
    pub received_amount: Option<Decimal>,
    pub party_name: Option<String>,
}

impl BillUpdate {
    pub fn is_empty(&self) -> bool {
        self.payment_type.is_none() && self.received_amount.is_none() && self.party_name.is_none()
    }
}

/// A stored purchase or sales bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub business_id: BusinessId,
    pub bill_type: BillType,
    pub receipt_no: String,
    pub invoice_no: String,
    pub date: BusinessDate,
    pub party_name: Option<String>,
    pub items: Vec<LineItem>,
    pub expenses: Vec<Expense>,
    pub total_amount: Decimal,
    pub total_expense: Decimal,
    pub net_amount: Decimal,
    pub payment_type: PaymentType,
    pub received_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Builds a bill from a validated draft and freshly allocated numbers
    pub fn issue(
        business_id: BusinessId,
        draft: NewBill,
        numbers: &AllocatedNumbers,
        profile: &BillingProfile,
    ) -> Self {
        let now = Utc::now();
        let mut expenses = draft.expenses;

        let commission: Decimal = draft
            .items
            .iter()
            .filter(|item| item.apply_commission)
            .map(|item| item.amount * profile.commission_rate / dec!(100))
            .sum::<Decimal>()
            .round_dp(2);
        if commission > Decimal::ZERO {
            expenses.push(Expense::new(COMMISSION_EXPENSE, commission));
        }

        let total_amount: Decimal = draft.items.iter().map(LineItem::line_total).sum();
        let total_expense: Decimal = expenses.iter().map(|e| e.amount).sum();
        let net_amount = match draft.bill_type {
            BillType::Purchase => total_amount - total_expense,
            BillType::Sales => total_amount + total_expense,
        };

        Self {
            id: BillId::new_v7(),
            business_id,
            bill_type: draft.bill_type,
            receipt_no: numbers.receipt_no.clone(),
            invoice_no: numbers.invoice_no.clone(),
            date: draft.date.unwrap_or(numbers.receipt_date),
            party_name: draft.party_name,
            items: draft.items,
            expenses,
            total_amount,
            total_expense,
            net_amount,
            payment_type: draft.payment_type,
            received_amount: draft.received_amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a payment/party update in place
    pub fn apply(&mut self, update: BillUpdate) -> Result<(), BillingError> {
        if let Some(amount) = update.received_amount {
            if amount.is_sign_negative() {
                return Err(BillingError::validation("received amount must not be negative"));
            }
            self.received_amount = amount;
        }
        if let Some(payment_type) = update.payment_type {
            self.payment_type = payment_type;
        }
        if let Some(name) = update.party_name {
            self.party_name = Some(name);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn balance_due(&self) -> Decimal {
        (self.net_amount - self.received_amount).max(Decimal::ZERO)
    }

    pub fn payment_status(&self) -> PaymentStatus {
        if self.received_amount >= self.net_amount {
            PaymentStatus::Paid
        } else if self.received_amount > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{AllocatedNumbers, InvoiceNumberFormat, TenantCounterState};

    fn numbers() -> AllocatedNumbers {
        let state = TenantCounterState::default().advance("2024-03-10".parse().unwrap());
        AllocatedNumbers::from_state(&state, &InvoiceNumberFormat::default()).unwrap()
    }

    #[test]
    fn test_line_item_amount() {
        let item = LineItem::new("Wheat", 10, dec!(502.5), dec!(22.40));
        assert_eq!(item.amount, dec!(11256.00));
    }

    #[test]
    fn test_purchase_net_deducts_expenses() {
        let draft = NewBill::new(BillType::Purchase, PaymentType::Cash)
            .item(LineItem::new("Wheat", 4, dec!(100), dec!(20)).with_other_charges(dec!(50)))
            .expense(Expense::new("Labour", dec!(120)));

        let bill = Bill::issue(BusinessId::new(), draft, &numbers(), &BillingProfile::default());
        assert_eq!(bill.total_amount, dec!(2050));
        assert_eq!(bill.total_expense, dec!(120));
        assert_eq!(bill.net_amount, dec!(1930));
    }

    #[test]
    fn test_sales_commission_added_as_expense() {
        let profile = BillingProfile { commission_rate: dec!(2.5) };
        let draft = NewBill::new(BillType::Sales, PaymentType::Credit)
            .item(LineItem::new("Rice", 2, dec!(100), dec!(40)).with_commission(true))
            .item(LineItem::new("Gram", 1, dec!(50), dec!(60)));

        let bill = Bill::issue(BusinessId::new(), draft, &numbers(), &profile);
        assert_eq!(bill.expenses.len(), 1);
        assert_eq!(bill.expenses[0].expense_type, COMMISSION_EXPENSE);
        assert_eq!(bill.expenses[0].amount, dec!(100));
        assert_eq!(bill.net_amount, dec!(7100));
    }

    #[test]
    fn test_draft_without_items_is_rejected() {
        let draft = NewBill::new(BillType::Sales, PaymentType::Cash);
        assert!(matches!(draft.validate(), Err(BillingError::Validation(_))));
    }

    #[test]
    fn test_payment_status_transitions() {
        let draft = NewBill::new(BillType::Sales, PaymentType::Credit)
            .item(LineItem::new("Rice", 1, dec!(10), dec!(10)));
        let mut bill = Bill::issue(BusinessId::new(), draft, &numbers(), &BillingProfile::default());
        assert_eq!(bill.payment_status(), PaymentStatus::Unpaid);

        bill.apply(BillUpdate { received_amount: Some(dec!(40)), ..Default::default() }).unwrap();
        assert_eq!(bill.payment_status(), PaymentStatus::Partial);
        assert_eq!(bill.balance_due(), dec!(60));

        bill.apply(BillUpdate { received_amount: Some(dec!(100)), ..Default::default() }).unwrap();
        assert_eq!(bill.payment_status(), PaymentStatus::Paid);
    }
}

//! Test Data Builders

use rust_decimal::Decimal;

use core_kernel::BusinessDate;
use domain_billing::{BillType, Expense, LineItem, NewBill, PaymentType};

use crate::fixtures::ItemFixtures;

/// Builder for bill drafts with one default line item
pub struct BillDraftBuilder {
    bill_type: BillType,
    payment_type: PaymentType,
    party_name: Option<String>,
    date: Option<BusinessDate>,
    items: Vec<LineItem>,
    expenses: Vec<Expense>,
    received_amount: Decimal,
}

impl BillDraftBuilder {
    pub fn new(bill_type: BillType) -> Self {
        Self {
            bill_type,
            payment_type: PaymentType::Cash,
            party_name: None,
            date: None,
            items: Vec::new(),
            expenses: Vec::new(),
            received_amount: Decimal::ZERO,
        }
    }

    pub fn sales() -> Self {
        Self::new(BillType::Sales).with_party("Mehta & Sons")
    }

    pub fn purchase() -> Self {
        Self::new(BillType::Purchase)
            .with_party("Farmer Co-op")
            .with_expense(ItemFixtures::labour())
    }

    pub fn with_party(mut self, name: impl Into<String>) -> Self {
        self.party_name = Some(name.into());
        self
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    pub fn dated(mut self, date: BusinessDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn received(mut self, amount: Decimal) -> Self {
        self.received_amount = amount;
        self
    }

    /// Builds the draft, adding the wheat line if no item was given
    pub fn build(self) -> NewBill {
        let items = if self.items.is_empty() {
            vec![ItemFixtures::wheat()]
        } else {
            self.items
        };

        NewBill {
            bill_type: self.bill_type,
            date: self.date,
            party_name: self.party_name,
            items,
            expenses: self.expenses,
            payment_type: self.payment_type,
            received_amount: self.received_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_draft_is_valid() {
        let draft = BillDraftBuilder::sales().build();
        assert_eq!(draft.items, vec![ItemFixtures::wheat()]);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_purchase_carries_labour() {
        let draft = BillDraftBuilder::purchase()
            .with_item(ItemFixtures::rice())
            .with_payment_type(PaymentType::Credit)
            .received(dec!(100))
            .build();
        assert_eq!(draft.expenses, vec![ItemFixtures::labour()]);
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.payment_type, PaymentType::Credit);
    }
}

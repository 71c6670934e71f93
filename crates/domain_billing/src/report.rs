//! Bill summaries for the reports endpoint

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::BusinessDate;
use crate::bill::{Bill, BillType};

/// Totals for one bill type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub count: usize,
    pub total_amount: Decimal,
    pub total_expense: Decimal,
    pub net_amount: Decimal,
    pub received_amount: Decimal,
    pub outstanding: Decimal,
}

impl TypeSummary {
    fn add(&mut self, bill: &Bill) {
        self.count += 1;
        self.total_amount += bill.total_amount;
        self.total_expense += bill.total_expense;
        self.net_amount += bill.net_amount;
        self.received_amount += bill.received_amount;
        self.outstanding += bill.balance_due();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    pub purchases: TypeSummary,
    pub sales: TypeSummary,
}

impl BillSummary {
    pub fn from_bills(bills: &[Bill]) -> Self {
        let mut summary = Self::default();
        for bill in bills {
            match bill.bill_type {
                BillType::Purchase => summary.purchases.add(bill),
                BillType::Sales => summary.sales.add(bill),
            }
        }
        summary
    }

    /// Sales net minus purchase net
    pub fn gross_margin(&self) -> Decimal {
        self.sales.net_amount - self.purchases.net_amount
    }
}

/// Net amounts for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: BusinessDate,
    pub bills: usize,
    pub purchase_net: Decimal,
    pub sales_net: Decimal,
}

/// Per-day totals in ascending date order
pub fn daily_totals(bills: &[Bill]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<BusinessDate, DailyTotal> = BTreeMap::new();
    for bill in bills {
        let day = days.entry(bill.date).or_insert_with(|| DailyTotal {
            date: bill.date,
            bills: 0,
            purchase_net: Decimal::ZERO,
            sales_net: Decimal::ZERO,
        });
        day.bills += 1;
        match bill.bill_type {
            BillType::Purchase => day.purchase_net += bill.net_amount,
            BillType::Sales => day.sales_net += bill.net_amount,
        }
    }
    days.into_values().collect()
}

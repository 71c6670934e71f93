//! Property-Based Test Generators

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::BusinessDate;
use domain_billing::{BillType, LineItem, NewBill, PaymentType};

pub fn bill_type_strategy() -> impl Strategy<Value = BillType> {
    prop_oneof![Just(BillType::Purchase), Just(BillType::Sales)]
}

pub fn payment_type_strategy() -> impl Strategy<Value = PaymentType> {
    prop_oneof![
        Just(PaymentType::Cash),
        Just(PaymentType::Credit),
        Just(PaymentType::Online),
    ]
}

/// Amount with two decimal places in `0.00..max`
pub fn amount_strategy(max_minor: i64) -> impl Strategy<Value = Decimal> {
    (0..max_minor).prop_map(|minor| Decimal::new(minor, 2))
}

pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (
        "[A-Z][a-z]{2,10}",
        1u32..100,
        amount_strategy(1_000_000),
        amount_strategy(10_000),
        any::<bool>(),
    )
        .prop_map(|(name, bags, weight, rate, commission)| {
            LineItem::new(name, bags, weight, rate).with_commission(commission)
        })
}

pub fn new_bill_strategy() -> impl Strategy<Value = NewBill> {
    (
        bill_type_strategy(),
        payment_type_strategy(),
        prop::collection::vec(line_item_strategy(), 1..6),
    )
        .prop_map(|(bill_type, payment_type, items)| NewBill {
            items,
            ..NewBill::new(bill_type, payment_type)
        })
}

/// Non-decreasing dates starting at 2024-01-01, at most `len` long
pub fn date_walk_strategy(len: usize) -> impl Strategy<Value = Vec<BusinessDate>> {
    prop::collection::vec(0u8..3, 1..len).prop_map(|steps| {
        let mut today = BusinessDate::from_ymd(2024, 1, 1).expect("valid start date");
        steps
            .into_iter()
            .map(|step| {
                for _ in 0..step {
                    today = today.succ();
                }
                today
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_drafts_pass_validation(draft in new_bill_strategy()) {
            prop_assert!(draft.validate().is_ok());
        }

        #[test]
        fn date_walks_never_go_backwards(dates in date_walk_strategy(40)) {
            for pair in dates.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}

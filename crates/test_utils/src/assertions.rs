//! Custom Test Assertions

use std::collections::HashSet;

use domain_billing::{AllocatedNumbers, LedgerEntry};

/// Asserts that no receipt or invoice number was handed out twice
///
/// # Panics
///
/// Names the first repeated number.
pub fn assert_unique_numbers(numbers: &[AllocatedNumbers]) {
    let mut receipts = HashSet::new();
    let mut invoices = HashSet::new();
    for n in numbers {
        assert!(receipts.insert(&n.receipt_no), "receipt number {} allocated twice", n.receipt_no);
        assert!(invoices.insert(&n.invoice_no), "invoice number {} allocated twice", n.invoice_no);
    }
}

/// Asserts that invoice sequences form exactly `1..=len` in some order
pub fn assert_gap_free_invoices(numbers: &[AllocatedNumbers]) {
    let mut sequences: Vec<u64> = numbers.iter().map(|n| n.invoice_sequence).collect();
    sequences.sort_unstable();
    let expected: Vec<u64> = (1..=numbers.len() as u64).collect();
    assert_eq!(sequences, expected, "invoice sequence has gaps or repeats");
}

/// Asserts that ledger entries are ordered newest first
pub fn assert_newest_first(entries: &[LedgerEntry]) {
    for pair in entries.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "ledger entry {} ({}) listed before older entry {} ({})",
            pair[0].id,
            pair[0].created_at,
            pair[1].id,
            pair[1].created_at
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_billing::{InvoiceNumberFormat, TenantCounterState};

    use crate::fixtures::DateFixtures;

    fn run(days: &[core_kernel::BusinessDate]) -> Vec<AllocatedNumbers> {
        let format = InvoiceNumberFormat::default();
        let mut state = TenantCounterState::default();
        days.iter()
            .map(|day| {
                state = state.advance(*day);
                AllocatedNumbers::from_state(&state, &format).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_sequential_allocations_pass() {
        let numbers = run(&[DateFixtures::march_10(), DateFixtures::march_10(), DateFixtures::march_11()]);
        assert_unique_numbers(&numbers);
        assert_gap_free_invoices(&numbers);
    }

    #[test]
    #[should_panic(expected = "allocated twice")]
    fn test_repeated_number_detected() {
        let mut numbers = run(&[DateFixtures::march_10()]);
        numbers.push(numbers[0].clone());
        assert_unique_numbers(&numbers);
    }
}

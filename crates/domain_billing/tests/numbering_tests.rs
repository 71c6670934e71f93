//! Numbering allocator tests
//!
//! - Receipt sequence restarts on the first allocation of a new day
//! - Receipt sequence increments within a day
//! - Invoice sequence is gap-free and never resets
//! - Concurrent allocations for one tenant never collide
//! - Previews do not consume numbers; failed writes allocate nothing
//! - A local day that moves backwards continues the latest day's receipts

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::{BusinessDate, BusinessId};
use domain_billing::ports::mock::MockCounterPort;
use domain_billing::{
    BillingError, CounterPort, InvoiceNumberFormat, NumberingAllocator, TenantCounterState,
};
use test_utils::{assert_gap_free_invoices, assert_unique_numbers, date_walk_strategy};

fn date(s: &str) -> BusinessDate {
    s.parse().unwrap()
}

async fn allocator_for(state: TenantCounterState) -> (BusinessId, Arc<MockCounterPort>, NumberingAllocator) {
    let business_id = BusinessId::new();
    let port = Arc::new(MockCounterPort::with_tenant(business_id, state).await);
    let allocator = NumberingAllocator::new(port.clone());
    (business_id, port, allocator)
}

// ============================================================================
// Daily reset and same-day increment
// ============================================================================

#[tokio::test]
async fn test_first_allocation_of_new_day_restarts_receipt() {
    let (business_id, port, allocator) = allocator_for(TenantCounterState {
        last_receipt_number: 5,
        last_receipt_date: Some(date("2024-01-01")),
        last_invoice_number: 5,
    })
    .await;

    let numbers = allocator.allocate(business_id, date("2024-01-02")).await.unwrap();

    assert_eq!(numbers.receipt_no, "2024-01-02-1");
    assert_eq!(numbers.invoice_no, "6");
    let stored = port.load_counters(business_id).await.unwrap();
    assert_eq!(stored.last_receipt_number, 1);
    assert_eq!(stored.last_receipt_date, Some(date("2024-01-02")));
    assert_eq!(stored.last_invoice_number, 6);
}

#[tokio::test]
async fn test_same_day_allocation_increments_receipt() {
    let today = date("2024-06-01");
    let (business_id, _, allocator) = allocator_for(TenantCounterState {
        last_receipt_number: 3,
        last_receipt_date: Some(today),
        last_invoice_number: 3,
    })
    .await;

    let numbers = allocator.allocate(business_id, today).await.unwrap();
    assert_eq!(numbers.receipt_no, "2024-06-01-4");
    assert_eq!(numbers.invoice_no, "4");
}

#[tokio::test]
async fn test_fresh_tenant_starts_at_one() {
    let (business_id, _, allocator) = allocator_for(TenantCounterState::default()).await;

    let numbers = allocator.allocate(business_id, date("2024-03-10")).await.unwrap();
    assert_eq!(numbers.receipt_no, "2024-03-10-1");
    assert_eq!(numbers.invoice_no, "1");
}

#[tokio::test]
async fn test_invoice_width_is_applied() {
    let business_id = BusinessId::new();
    let port = Arc::new(MockCounterPort::with_tenant(business_id, TenantCounterState::default()).await);
    let allocator = NumberingAllocator::new(port).with_format(InvoiceNumberFormat::zero_padded(5));

    let numbers = allocator.allocate(business_id, date("2024-03-10")).await.unwrap();
    assert_eq!(numbers.invoice_no, "00001");
    assert_eq!(numbers.receipt_no, "2024-03-10-1");
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_failed_write_allocates_nothing() {
    let today = date("2024-03-10");
    let (business_id, port, allocator) = allocator_for(TenantCounterState::default()).await;
    allocator.allocate(business_id, today).await.unwrap();

    port.set_failing(true);
    let result = allocator.allocate(business_id, today).await;
    assert!(matches!(result, Err(BillingError::Persistence(_))));

    port.set_failing(false);
    let numbers = allocator.allocate(business_id, today).await.unwrap();
    assert_eq!(numbers.receipt_no, "2024-03-10-2");
    assert_eq!(numbers.invoice_no, "2");
}

#[tokio::test]
async fn test_earlier_day_continues_latest_receipts() {
    let (business_id, port, allocator) = allocator_for(TenantCounterState::default()).await;

    let first = allocator.allocate(business_id, date("2024-03-10")).await.unwrap();
    let later = allocator.allocate(business_id, date("2024-03-11")).await.unwrap();
    let peek = allocator.peek_next(business_id, date("2024-03-10")).await.unwrap();
    let back = allocator.allocate(business_id, date("2024-03-10")).await.unwrap();

    assert_eq!(first.receipt_no, "2024-03-10-1");
    assert_eq!(later.receipt_no, "2024-03-11-1");
    assert_eq!(peek.receipt_no, "2024-03-11-2");
    assert_eq!(back.receipt_no, "2024-03-11-2");
    assert_eq!(back.invoice_no, "3");
    assert_eq!(
        port.load_counters(business_id).await.unwrap().last_receipt_date,
        Some(date("2024-03-11"))
    );
}

#[tokio::test]
async fn test_unknown_tenant_is_not_found() {
    let allocator = NumberingAllocator::new(Arc::new(MockCounterPort::new()));

    let result = allocator.allocate(BusinessId::new(), date("2024-03-10")).await;
    assert!(matches!(result, Err(BillingError::NotFound(_))));

    let preview = allocator.peek_next(BusinessId::new(), date("2024-03-10")).await;
    assert!(matches!(preview, Err(BillingError::NotFound(_))));
}

// ============================================================================
// Preview
// ============================================================================

#[tokio::test]
async fn test_peek_reports_rollover_without_committing() {
    let (business_id, port, allocator) = allocator_for(TenantCounterState {
        last_receipt_number: 9,
        last_receipt_date: Some(date("2024-03-10")),
        last_invoice_number: 9,
    })
    .await;

    let preview = allocator.peek_next(business_id, date("2024-03-11")).await.unwrap();
    assert_eq!(preview.receipt_no, "2024-03-11-1");
    assert_eq!(preview.invoice_no, "10");

    let stored = port.load_counters(business_id).await.unwrap();
    assert_eq!(stored.last_receipt_number, 9);
    assert_eq!(stored.last_receipt_date, Some(date("2024-03-10")));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_are_unique() {
    const CALLERS: u64 = 64;
    let today = date("2024-03-10");
    let (business_id, port, allocator) = allocator_for(TenantCounterState::default()).await;

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let allocator = allocator.clone();
            tokio::spawn(async move { allocator.allocate(business_id, today).await })
        })
        .collect();

    let mut receipts = HashSet::new();
    let mut invoices = HashSet::new();
    for handle in handles {
        let numbers = handle.await.unwrap().unwrap();
        assert!(receipts.insert(numbers.receipt_no));
        assert!(invoices.insert(numbers.invoice_sequence));
    }

    assert_eq!(receipts.len() as u64, CALLERS);
    assert_eq!(invoices, (1..=CALLERS).collect::<HashSet<_>>());

    let stored = port.load_counters(business_id).await.unwrap();
    assert_eq!(stored.last_receipt_number, CALLERS);
    assert_eq!(stored.last_invoice_number, CALLERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tenants_do_not_share_counters() {
    let today = date("2024-03-10");
    let port = Arc::new(MockCounterPort::new());
    let first = BusinessId::new();
    let second = BusinessId::new();
    port.register(first).await;
    port.register(second).await;
    let allocator = NumberingAllocator::new(port);

    allocator.allocate(first, today).await.unwrap();
    allocator.allocate(first, today).await.unwrap();
    let numbers = allocator.allocate(second, today).await.unwrap();

    assert_eq!(numbers.receipt_no, "2024-03-10-1");
    assert_eq!(numbers.invoice_no, "1");
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn prop_invoice_sequence_is_gap_free(days in date_walk_strategy(60)) {
        let mut state = TenantCounterState::default();
        let mut seen = HashSet::new();

        for (i, today) in days.iter().enumerate() {
            let next = state.advance(*today);

            prop_assert_eq!(next.last_invoice_number, i as u64 + 1);
            prop_assert!(seen.insert(next.last_invoice_number));
            if state.last_receipt_date == Some(*today) {
                prop_assert_eq!(next.last_receipt_number, state.last_receipt_number + 1);
            } else {
                prop_assert_eq!(next.last_receipt_number, 1);
            }
            state = next;
        }
    }

    #[test]
    fn prop_receipt_numbers_unique_per_day(days in date_walk_strategy(60)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let business_id = BusinessId::new();
            let port = Arc::new(MockCounterPort::with_tenant(business_id, TenantCounterState::default()).await);
            let allocator = NumberingAllocator::new(port);

            let mut allocated = Vec::new();
            for today in days {
                let numbers = allocator.allocate(business_id, today).await.unwrap();
                assert!(numbers.receipt_no.starts_with(&today.to_string()));
                allocated.push(numbers);
            }
            assert_unique_numbers(&allocated);
            assert_gap_free_invoices(&allocated);
        });
    }

    #[test]
    fn prop_shuffled_days_never_reissue_receipts(offsets in prop::collection::vec(0u8..4, 1..40)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let business_id = BusinessId::new();
            let port = Arc::new(MockCounterPort::with_tenant(business_id, TenantCounterState::default()).await);
            let allocator = NumberingAllocator::new(port);
            let start = date("2024-01-01");

            let mut allocated = Vec::new();
            for offset in offsets {
                let mut today = start;
                for _ in 0..offset {
                    today = today.succ();
                }
                allocated.push(allocator.allocate(business_id, today).await.unwrap());
            }
            assert_unique_numbers(&allocated);
            assert_gap_free_invoices(&allocated);
        });
    }
}

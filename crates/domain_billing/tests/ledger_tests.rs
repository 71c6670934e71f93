//! Ledger recorder tests

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{BusinessDate, BusinessId, OperationMetadata};
use domain_billing::ports::mock::MockLedgerPort;
use domain_billing::{
    AllocatedNumbers, Bill, BillType, BillUpdate, BillingProfile, InvoiceNumberFormat,
    LedgerOperation, LedgerPort, LedgerQuery, LedgerRecorder, LineItem, NewBill, PaymentType,
    RecordOutcome, TenantCounterState,
};

fn sample_bill(business_id: BusinessId) -> Bill {
    let today: BusinessDate = "2024-03-10".parse().unwrap();
    let state = TenantCounterState::default().advance(today);
    let numbers = AllocatedNumbers::from_state(&state, &InvoiceNumberFormat::default()).unwrap();
    let draft = NewBill::new(BillType::Sales, PaymentType::Credit)
        .party("Ramesh Traders")
        .item(LineItem::new("Wheat", 10, dec!(500), dec!(22)));
    Bill::issue(business_id, draft, &numbers, &BillingProfile::default())
}

#[tokio::test]
async fn test_snapshot_is_not_aliased() {
    let business_id = BusinessId::new();
    let port = Arc::new(MockLedgerPort::new());
    let recorder = LedgerRecorder::new(port.clone());
    let mut bill = sample_bill(business_id);

    let outcome = recorder
        .record_mutation(business_id, LedgerOperation::Add, &bill, None)
        .await;
    assert!(outcome.is_recorded());

    bill.apply(BillUpdate {
        received_amount: Some(dec!(11000)),
        party_name: Some("Someone Else".to_string()),
        ..Default::default()
    })
    .unwrap();

    let entries = port.query_by_tenant(business_id, &LedgerQuery::default()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].data_snapshot.received_amount, dec!(0));
    assert_eq!(entries[0].data_snapshot.party_name.as_deref(), Some("Ramesh Traders"));
}

#[tokio::test]
async fn test_entries_are_returned_newest_first() {
    let business_id = BusinessId::new();
    let port = Arc::new(MockLedgerPort::new());
    let recorder = LedgerRecorder::new(port.clone());
    let mut bill = sample_bill(business_id);

    recorder.record_mutation(business_id, LedgerOperation::Add, &bill, None).await;
    bill.apply(BillUpdate { received_amount: Some(dec!(100)), ..Default::default() }).unwrap();
    recorder.record_mutation(business_id, LedgerOperation::Update, &bill, None).await;
    recorder.record_mutation(business_id, LedgerOperation::Delete, &bill, None).await;

    let entries = port.query_by_tenant(business_id, &LedgerQuery::default()).await.unwrap();
    let operations: Vec<_> = entries.iter().map(|e| e.operation).collect();
    assert_eq!(
        operations,
        vec![LedgerOperation::Delete, LedgerOperation::Update, LedgerOperation::Add]
    );
    assert!(entries.iter().all(|e| e.bill_id == bill.id));
}

#[tokio::test]
async fn test_query_filters_by_tenant_bill_and_limit() {
    let business_id = BusinessId::new();
    let other_tenant = BusinessId::new();
    let port = Arc::new(MockLedgerPort::new());
    let recorder = LedgerRecorder::new(port.clone());
    let first = sample_bill(business_id);
    let second = sample_bill(business_id);
    let foreign = sample_bill(other_tenant);

    recorder.record_mutation(business_id, LedgerOperation::Add, &first, None).await;
    recorder.record_mutation(business_id, LedgerOperation::Add, &second, None).await;
    recorder.record_mutation(other_tenant, LedgerOperation::Add, &foreign, None).await;

    let all = port.query_by_tenant(business_id, &LedgerQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_first = port.query_by_tenant(business_id, &LedgerQuery::for_bill(first.id)).await.unwrap();
    assert_eq!(only_first.len(), 1);
    assert_eq!(only_first[0].bill_id, first.id);

    let latest = port
        .query_by_tenant(business_id, &LedgerQuery { bill_id: None, limit: Some(1) })
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].bill_id, second.id);
}

#[tokio::test]
async fn test_failed_append_degrades_to_warning() {
    let business_id = BusinessId::new();
    let port = Arc::new(MockLedgerPort::new());
    port.set_failing(true);
    let recorder = LedgerRecorder::new(port.clone());
    let bill = sample_bill(business_id);

    let outcome = recorder
        .record_mutation(business_id, LedgerOperation::Add, &bill, None)
        .await;

    match outcome {
        RecordOutcome::Degraded { warning } => assert!(warning.contains(&bill.receipt_no)),
        other => panic!("expected degraded outcome, got {other:?}"),
    }
    assert_eq!(port.len().await, 0);
}

#[tokio::test]
async fn test_recorded_by_comes_from_metadata() {
    let business_id = BusinessId::new();
    let port = Arc::new(MockLedgerPort::new());
    let recorder = LedgerRecorder::new(port.clone());
    let bill = sample_bill(business_id);
    let metadata = OperationMetadata::with_correlation_id("req-1").initiated_by("owner@example.com");

    recorder
        .record_mutation(business_id, LedgerOperation::Add, &bill, Some(&metadata))
        .await;

    let entries = port.query_by_tenant(business_id, &LedgerQuery::default()).await.unwrap();
    assert_eq!(entries[0].recorded_by.as_deref(), Some("owner@example.com"));
    assert_eq!(entries[0].bill_type, BillType::Sales);
}

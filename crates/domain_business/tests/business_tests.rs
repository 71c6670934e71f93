//! Business domain tests
//!
//! Registration, settings management, and numbering through the counters
//! embedded in the tenant record.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{BusinessDate, BusinessId, Timezone};
use domain_billing::{CounterPort, NumberingAllocator};
use domain_business::{
    BusinessError, BusinessPort, BusinessService, MockBusinessPort, Plan, RegisterBusiness,
    SettingsList, SettingsPatch,
};

fn registration(email: &str) -> RegisterBusiness {
    RegisterBusiness {
        name: "Ganesh Grain Store".to_string(),
        owner_email: email.to_string(),
        phone: "+91 98450 12345".to_string(),
        plan: Plan::Standard,
        payment_reference: Some("pay_Nx81".to_string()),
    }
}

fn setup() -> (Arc<MockBusinessPort>, BusinessService) {
    let port = Arc::new(MockBusinessPort::new());
    let service = BusinessService::new(port.clone());
    (port, service)
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_and_fetch() {
    let (_, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();

    let fetched = service.get(business.id).await.unwrap();
    assert_eq!(fetched, business);
    assert_eq!(fetched.plan, Plan::Standard);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (_, service) = setup();
    service.register(registration("owner@grain.in")).await.unwrap();

    let err = service.register(registration("OWNER@grain.in")).await.unwrap_err();
    assert!(matches!(err, BusinessError::DuplicateEmail(_)));
}

#[tokio::test]
async fn test_unknown_business_not_found() {
    let (_, service) = setup();
    let err = service.get(BusinessId::new()).await.unwrap_err();
    assert!(matches!(err, BusinessError::NotFound(_)));
}

#[tokio::test]
async fn test_inactive_business_cannot_change_settings() {
    let (port, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();
    port.deactivate(business.id).await;

    let err = service
        .add_entry(business.id, SettingsList::Products, "Maize")
        .await
        .unwrap_err();
    assert!(matches!(err, BusinessError::Inactive));
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_lists_persist() {
    let (port, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();

    service.add_entry(business.id, SettingsList::Customers, "Mehta & Sons").await.unwrap();
    service.add_entry(business.id, SettingsList::Customers, "mehta & sons").await.unwrap();
    let settings = service.add_entry(business.id, SettingsList::Vendors, "Farmer Co-op").await.unwrap();
    assert_eq!(settings.customers, vec!["Mehta & Sons".to_string()]);

    let settings = service.remove_entry(business.id, SettingsList::Vendors, "farmer co-op").await.unwrap();
    assert!(settings.vendors.is_empty());

    let stored = port.get(business.id).await.unwrap();
    assert_eq!(stored.settings, settings);
}

#[tokio::test]
async fn test_remove_missing_entry_is_not_found() {
    let (_, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();

    let err = service
        .remove_entry(business.id, SettingsList::Products, "Barley")
        .await
        .unwrap_err();
    assert!(matches!(err, BusinessError::NotFound(_)));
}

#[tokio::test]
async fn test_update_commission_and_timezone() {
    let (_, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();

    let patch = SettingsPatch {
        commission_rate: Some(dec!(1.5)),
        timezone: Some("Asia/Kolkata".parse::<Timezone>().unwrap()),
    };
    let settings = service.update_settings(business.id, patch).await.unwrap();
    assert_eq!(settings.commission_rate, dec!(1.5));
    assert_eq!(settings.timezone.name(), "Asia/Kolkata");

    let bad = SettingsPatch { commission_rate: Some(dec!(120)), ..Default::default() };
    assert!(service.update_settings(business.id, bad).await.is_err());
}

// ============================================================================
// Counters embedded in the tenant record
// ============================================================================

#[tokio::test]
async fn test_settings_save_leaves_counters_alone() {
    let (port, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();
    let allocator = NumberingAllocator::new(port.clone());
    let today: BusinessDate = "2024-03-10".parse().unwrap();

    allocator.allocate(business.id, today).await.unwrap();
    service.add_entry(business.id, SettingsList::Products, "Maize").await.unwrap();

    let counters = port.load_counters(business.id).await.unwrap();
    assert_eq!(counters.last_invoice_number, 1);
    assert_eq!(counters.last_receipt_date, Some(today));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_on_tenant_record() {
    let (port, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();
    let allocator = NumberingAllocator::new(port.clone());
    let today: BusinessDate = "2024-03-10".parse().unwrap();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let allocator = allocator.clone();
            let id = business.id;
            tokio::spawn(async move { allocator.allocate(id, today).await })
        })
        .collect();

    let mut receipts = HashSet::new();
    for handle in handles {
        let numbers = handle.await.unwrap().unwrap();
        assert!(receipts.insert(numbers.receipt_no));
    }
    assert_eq!(receipts.len(), 32);

    let stored = port.get(business.id).await.unwrap();
    assert_eq!(stored.counters.last_receipt_number, 32);
    assert_eq!(stored.counters.last_invoice_number, 32);
}

#[tokio::test]
async fn test_timezone_switch_never_reissues_receipt() {
    let (port, service) = setup();
    let business = service.register(registration("owner@grain.in")).await.unwrap();
    let allocator = NumberingAllocator::new(port.clone());

    let mut allocated = Vec::new();
    for zone in ["Pacific/Pago_Pago", "Pacific/Kiritimati", "Pacific/Pago_Pago"] {
        let patch = SettingsPatch {
            timezone: Some(zone.parse::<Timezone>().unwrap()),
            ..Default::default()
        };
        service.update_settings(business.id, patch).await.unwrap();
        let today = service.get(business.id).await.unwrap().today();
        allocated.push(allocator.allocate(business.id, today).await.unwrap());
    }

    // Kiritimati runs a day or more ahead of Pago Pago
    assert!(allocated[1].receipt_date > allocated[0].receipt_date);
    assert_eq!(allocated[2].receipt_date, allocated[1].receipt_date);
    assert_eq!(allocated[2].receipt_no, format!("{}-2", allocated[1].receipt_date));

    let receipts: HashSet<_> = allocated.iter().map(|n| n.receipt_no.clone()).collect();
    assert_eq!(receipts.len(), 3);
    assert_eq!(allocated[2].invoice_no, "3");
}

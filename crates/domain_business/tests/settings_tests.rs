//! Settings list tests
//!
//! Properties of the named lists and the stored settings document.

use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::Timezone;
use domain_business::{BusinessSettings, SettingsList};

fn list_strategy() -> impl Strategy<Value = SettingsList> {
    prop_oneof![
        Just(SettingsList::Products),
        Just(SettingsList::Customers),
        Just(SettingsList::Vendors),
        Just(SettingsList::ExpenseCategories),
    ]
}

proptest! {
    #[test]
    fn prop_entries_stay_unique_ignoring_case(
        which in list_strategy(),
        names in prop::collection::vec("[ ]{0,2}[A-Za-z]{1,6}[ ]{0,2}", 1..30),
    ) {
        let mut settings = BusinessSettings::default();
        for name in &names {
            let before = settings.list(which).len();
            let added = settings.add_entry(which, name).unwrap();
            prop_assert_eq!(added, settings.list(which).len() == before + 1);
        }

        let lowered: Vec<String> = settings.list(which).iter().map(|e| e.to_ascii_lowercase()).collect();
        let mut deduped = lowered.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), lowered.len());
        prop_assert!(settings.list(which).iter().all(|e| e.trim() == e.as_str()));
    }

    #[test]
    fn prop_add_then_remove_leaves_entry_absent(
        which in list_strategy(),
        name in "[A-Za-z]{1,12}",
    ) {
        let mut settings = BusinessSettings::default();
        settings.add_entry(which, &name).unwrap();
        prop_assert!(settings.remove_entry(which, &name.to_ascii_uppercase()));
        prop_assert!(!settings.list(which).iter().any(|e| e.eq_ignore_ascii_case(&name)));
    }
}

#[test]
fn test_settings_document_shape() {
    let mut settings = BusinessSettings::default();
    settings.add_entry(SettingsList::Customers, "Ravi Traders").unwrap();
    settings.set_commission_rate(dec!(2.5)).unwrap();
    settings.timezone = "Asia/Kolkata".parse::<Timezone>().unwrap();

    let doc = serde_json::to_value(&settings).unwrap();
    assert_eq!(doc["customers"], serde_json::json!(["Ravi Traders"]));
    assert_eq!(doc["timezone"], "Asia/Kolkata");

    let restored: BusinessSettings = serde_json::from_value(doc).unwrap();
    assert_eq!(restored, settings);
}

#[test]
fn test_settings_document_without_timezone_defaults_to_utc() {
    let doc = serde_json::json!({
        "products": [],
        "customers": [],
        "vendors": [],
        "expense_categories": ["Labour"],
        "commission_rate": "0",
    });
    let settings: BusinessSettings = serde_json::from_value(doc).unwrap();
    assert_eq!(settings.timezone, Timezone::default());
    assert_eq!(settings.timezone.name(), "UTC");
}

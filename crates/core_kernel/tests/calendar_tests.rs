//! Tests for business dates and tenant timezones

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{BusinessDate, CalendarError, Timezone};
use proptest::prelude::*;

mod business_date {
    use super::*;

    #[test]
    fn test_from_ymd_rejects_impossible_date() {
        let result = BusinessDate::from_ymd(2024, 2, 30);
        assert!(matches!(result, Err(CalendarError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!("10/03/2024".parse::<BusinessDate>().is_err());
        assert!("".parse::<BusinessDate>().is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let date: BusinessDate = " 2024-01-02 ".parse().unwrap();
        assert_eq!(date, BusinessDate::from_ymd(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_succ_crosses_month_and_year() {
        let eom = BusinessDate::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(eom.succ().to_string(), "2024-03-01");

        let eoy = BusinessDate::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(eoy.succ().to_string(), "2024-01-01");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let date = BusinessDate::from_ymd(2024, 3, 10).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-03-10\"");

        let back: BusinessDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<BusinessDate, _> = serde_json::from_str("\"yesterday\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let a = BusinessDate::from_ymd(2024, 1, 31).unwrap();
        let b = BusinessDate::from_ymd(2024, 2, 1).unwrap();
        assert!(a < b);
    }

    proptest! {
        #[test]
        fn prop_display_is_zero_padded_and_parses_back(days in 0i64..100_000) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let date = BusinessDate::from(base + chrono::Duration::days(days));
            let text = date.to_string();

            prop_assert_eq!(text.len(), 10);
            prop_assert_eq!(text.parse::<BusinessDate>().unwrap(), date);
        }
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_default_is_utc() {
        assert_eq!(Timezone::default().name(), "UTC");
    }

    #[test]
    fn test_unknown_timezone() {
        let result = "Mars/Olympus".parse::<Timezone>();
        assert!(matches!(result, Err(CalendarError::UnknownTimezone(_))));
    }

    #[test]
    fn test_date_of_behind_utc() {
        let tz: Timezone = "America/New_York".parse().unwrap();
        let early_utc = Utc.with_ymd_and_hms(2024, 3, 11, 2, 0, 0).unwrap();
        assert_eq!(tz.date_of(early_utc).to_string(), "2024-03-10");
    }

    #[test]
    fn test_serde_uses_iana_name() {
        let tz: Timezone = "Asia/Kolkata".parse().unwrap();
        assert_eq!(serde_json::to_string(&tz).unwrap(), "\"Asia/Kolkata\"");
    }
}

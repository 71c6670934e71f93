//! Pre-built Test Fixtures

use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::BusinessDate;
use domain_billing::{Expense, LineItem};
use domain_business::{Business, Plan, RegisterBusiness};

/// Registration input on the free plan for the given owner email
pub fn sample_registration(email: &str) -> RegisterBusiness {
    RegisterBusiness {
        name: "Lakshmi Agro Traders".to_string(),
        owner_email: email.to_string(),
        phone: "9845012345".to_string(),
        plan: Plan::Basic,
        payment_reference: None,
    }
}

/// Registration input with a random company name and email
pub fn random_registration() -> RegisterBusiness {
    RegisterBusiness {
        name: CompanyName().fake(),
        owner_email: SafeEmail().fake(),
        phone: "9845012345".to_string(),
        plan: Plan::Standard,
        payment_reference: Some(format!("pay_{}", (100_000u32..999_999).fake::<u32>())),
    }
}

/// A freshly registered business with zeroed counters
pub fn sample_business() -> Business {
    Business::register(random_registration()).expect("fixture registration is valid")
}

/// Fixed dates used across the numbering scenarios
pub struct DateFixtures;

impl DateFixtures {
    pub fn march_10() -> BusinessDate {
        BusinessDate::from_ymd(2024, 3, 10).expect("valid date")
    }

    pub fn march_11() -> BusinessDate {
        Self::march_10().succ()
    }
}

/// Common goods lines
pub struct ItemFixtures;

impl ItemFixtures {
    /// 10 bags, 500 kg at 22.40 = 11200.00
    pub fn wheat() -> LineItem {
        LineItem::new("Wheat", 10, dec!(500), dec!(22.40))
    }

    /// 4 bags, 200 kg at 38 = 7600.00
    pub fn rice() -> LineItem {
        LineItem::new("Rice", 4, dec!(200), dec!(38))
    }

    pub fn labour() -> Expense {
        Expense::new("Labour", dec!(150))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_business_is_registered_on_paid_plan() {
        let business = sample_business();
        assert_eq!(business.plan, Plan::Standard);
        assert!(business.payment_reference.is_some());
        assert_eq!(business.counters.last_invoice_number, 0);
    }

    #[test]
    fn test_item_amounts() {
        assert_eq!(ItemFixtures::wheat().amount, dec!(11200.00));
        assert_eq!(ItemFixtures::rice().amount, dec!(7600));
        assert_eq!(DateFixtures::march_11().to_string(), "2024-03-11");
    }
}

//! Per-business settings
//!
//! Named lists (products, customers, vendors, expense categories) feed the
//! bill entry forms. Entries are trimmed and de-duplicated case-insensitively.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Timezone;
use domain_billing::BillingProfile;
use crate::error::BusinessError;

/// Expense categories every new business starts with
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 3] = ["Labour", "Transport", "Packing"];

/// Which named list of the settings an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsList {
    Products,
    Customers,
    Vendors,
    ExpenseCategories,
}

impl SettingsList {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsList::Products => "products",
            SettingsList::Customers => "customers",
            SettingsList::Vendors => "vendors",
            SettingsList::ExpenseCategories => "expense-categories",
        }
    }
}

impl std::str::FromStr for SettingsList {
    type Err = BusinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(SettingsList::Products),
            "customers" => Ok(SettingsList::Customers),
            "vendors" => Ok(SettingsList::Vendors),
            "expense-categories" | "expense_categories" => Ok(SettingsList::ExpenseCategories),
            other => Err(BusinessError::invalid(format!("unknown settings list '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSettings {
    pub products: Vec<String>,
    pub customers: Vec<String>,
    pub vendors: Vec<String>,
    pub expense_categories: Vec<String>,
    /// Percentage charged on line items flagged for commission
    pub commission_rate: Decimal,
    /// Determines the local day used for receipt numbering
    #[serde(default)]
    pub timezone: Timezone,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            customers: Vec::new(),
            vendors: Vec::new(),
            expense_categories: DEFAULT_EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            commission_rate: Decimal::ZERO,
            timezone: Timezone::default(),
        }
    }
}

impl BusinessSettings {
    pub fn list(&self, which: SettingsList) -> &[String] {
        match which {
            SettingsList::Products => &self.products,
            SettingsList::Customers => &self.customers,
            SettingsList::Vendors => &self.vendors,
            SettingsList::ExpenseCategories => &self.expense_categories,
        }
    }

    fn list_mut(&mut self, which: SettingsList) -> &mut Vec<String> {
        match which {
            SettingsList::Products => &mut self.products,
            SettingsList::Customers => &mut self.customers,
            SettingsList::Vendors => &mut self.vendors,
            SettingsList::ExpenseCategories => &mut self.expense_categories,
        }
    }

    /// Adds `name` to a list; returns false if it was already present
    pub fn add_entry(&mut self, which: SettingsList, name: &str) -> Result<bool, BusinessError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BusinessError::invalid(format!("{} entry must not be empty", which.as_str())));
        }
        if name.chars().count() > 100 {
            return Err(BusinessError::invalid(format!(
                "{} entry must be at most 100 characters",
                which.as_str()
            )));
        }

        let list = self.list_mut(which);
        if list.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
            return Ok(false);
        }
        list.push(name.to_string());
        Ok(true)
    }

    /// Removes `name` from a list; returns false if it was not present
    pub fn remove_entry(&mut self, which: SettingsList, name: &str) -> bool {
        let name = name.trim();
        let list = self.list_mut(which);
        let before = list.len();
        list.retain(|existing| !existing.eq_ignore_ascii_case(name));
        list.len() != before
    }

    pub fn set_commission_rate(&mut self, rate: Decimal) -> Result<(), BusinessError> {
        if rate < Decimal::ZERO || rate > dec!(100) {
            return Err(BusinessError::invalid("commission rate must be between 0 and 100"));
        }
        self.commission_rate = rate;
        Ok(())
    }

    pub fn apply(&mut self, patch: SettingsPatch) -> Result<(), BusinessError> {
        if let Some(rate) = patch.commission_rate {
            self.set_commission_rate(rate)?;
        }
        if let Some(tz) = patch.timezone {
            self.timezone = tz;
        }
        Ok(())
    }

    pub fn billing_profile(&self) -> BillingProfile {
        BillingProfile {
            commission_rate: self.commission_rate,
        }
    }
}

/// Scalar settings changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub commission_rate: Option<Decimal>,
    pub timezone: Option<Timezone>,
}

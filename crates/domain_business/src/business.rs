//! Business (tenant) entity
//!
//! A business owns its bills, settings and the numbering counters. The
//! counters are embedded here so that the store can advance them with the
//! same row lock that guards the tenant record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{BusinessDate, BusinessId};
use domain_billing::TenantCounterState;
use crate::error::BusinessError;
use crate::settings::BusinessSettings;

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Basic,
    Standard,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
        }
    }

    /// Yearly subscription price
    pub fn yearly_price(&self) -> Decimal {
        match self {
            Plan::Basic => Decimal::ZERO,
            Plan::Standard => dec!(4999),
            Plan::Premium => dec!(9999),
        }
    }

    pub fn requires_payment(&self) -> bool {
        self.yearly_price() > Decimal::ZERO
    }
}

impl std::str::FromStr for Plan {
    type Err = BusinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Plan::Basic),
            "standard" => Ok(Plan::Standard),
            "premium" => Ok(Plan::Premium),
            other => Err(BusinessError::invalid(format!("unknown plan '{other}'"))),
        }
    }
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBusiness {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub owner_email: String,
    #[validate(length(min = 7, max = 20))]
    pub phone: String,
    pub plan: Plan,
    /// Reference of the captured subscription payment
    pub payment_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub owner_email: String,
    pub phone: String,
    pub plan: Plan,
    pub payment_reference: Option<String>,
    pub counters: TenantCounterState,
    pub settings: BusinessSettings,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// Validates registration input and builds a new active business
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for malformed name, email or phone
    /// - `PaymentRequired` for a paid plan without a payment reference
    pub fn register(input: RegisterBusiness) -> Result<Self, BusinessError> {
        input
            .validate()
            .map_err(|e| BusinessError::validation_failed(&e))?;

        let payment_reference = input
            .payment_reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if input.plan.requires_payment() && payment_reference.is_none() {
            return Err(BusinessError::PaymentRequired(input.plan.as_str().to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            id: BusinessId::new_v7(),
            name: input.name.trim().to_string(),
            owner_email: input.owner_email.trim().to_lowercase(),
            phone: input.phone.trim().to_string(),
            plan: input.plan,
            payment_reference,
            counters: TenantCounterState::default(),
            settings: BusinessSettings::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Current day in the business's timezone
    pub fn today(&self) -> BusinessDate {
        BusinessDate::today_in(self.settings.timezone)
    }

    pub fn ensure_active(&self) -> Result<(), BusinessError> {
        if self.is_active {
            Ok(())
        } else {
            Err(BusinessError::Inactive)
        }
    }
}

//! Business DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Timezone;
use domain_billing::TenantCounterState;
use domain_business::{Business, BusinessSettings, Plan, RegisterBusiness, SettingsPatch};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBusinessRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub owner_email: String,
    #[validate(length(min = 7, max = 20))]
    pub phone: String,
    #[serde(default = "default_plan")]
    pub plan: Plan,
    pub payment_reference: Option<String>,
}

fn default_plan() -> Plan {
    Plan::Basic
}

impl From<RegisterBusinessRequest> for RegisterBusiness {
    fn from(request: RegisterBusinessRequest) -> Self {
        RegisterBusiness {
            name: request.name,
            owner_email: request.owner_email,
            phone: request.phone,
            plan: request.plan,
            payment_reference: request.payment_reference,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BusinessResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_email: String,
    pub phone: String,
    pub plan: Plan,
    pub is_active: bool,
    pub counters: TenantCounterState,
    pub settings: BusinessSettings,
    pub created_at: DateTime<Utc>,
}

impl From<Business> for BusinessResponse {
    fn from(business: Business) -> Self {
        Self {
            id: *business.id.as_uuid(),
            name: business.name,
            owner_email: business.owner_email,
            phone: business.phone,
            plan: business.plan,
            is_active: business.is_active,
            counters: business.counters,
            settings: business.settings,
            created_at: business.created_at,
        }
    }
}

/// Registration result; the token authenticates later requests for this business
#[derive(Debug, Serialize)]
pub struct RegisterBusinessResponse {
    pub business: BusinessResponse,
    pub token: String,
}

/// Scalar settings; the commission rate is checked against 0-100 by the domain
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub commission_rate: Option<Decimal>,
    /// IANA timezone name, e.g. `Asia/Kolkata`
    pub timezone: Option<String>,
}

impl TryFrom<UpdateSettingsRequest> for SettingsPatch {
    type Error = ApiError;

    fn try_from(request: UpdateSettingsRequest) -> Result<Self, Self::Error> {
        let timezone = request
            .timezone
            .map(|name| name.parse::<Timezone>())
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(SettingsPatch {
            commission_rate: request.commission_rate,
            timezone,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SettingsEntryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

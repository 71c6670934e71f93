//! PostgreSQL Business Adapter
//!
//! Backs both `BusinessPort` and `CounterPort` from the `businesses` table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    BusinessDate, BusinessId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_billing::{CounterPort, TenantCounterState};
use domain_business::{Business, BusinessPort, BusinessSettings};

use crate::repositories::business::{BusinessRepository, BusinessRow, CounterRow, NewBusiness};
use super::{bounded, ping, StoreSettings};

#[derive(Debug, Clone)]
pub struct PostgresBusinessAdapter {
    repository: BusinessRepository,
    pool: PgPool,
    settings: StoreSettings,
}

impl PostgresBusinessAdapter {
    pub fn new(pool: PgPool, settings: StoreSettings) -> Self {
        Self {
            repository: BusinessRepository::new(pool.clone()),
            pool,
            settings,
        }
    }

    pub fn repository(&self) -> &BusinessRepository {
        &self.repository
    }
}

impl DomainPort for PostgresBusinessAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBusinessAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-business-adapter").await
    }
}

#[async_trait]
impl BusinessPort for PostgresBusinessAdapter {
    #[instrument(skip(self, business), fields(business_id = %business.id))]
    async fn create(&self, business: &Business) -> Result<(), PortError> {
        let row = NewBusiness {
            business_id: *business.id.as_uuid(),
            name: business.name.clone(),
            owner_email: business.owner_email.clone(),
            phone: business.phone.clone(),
            plan: business.plan.as_str().to_string(),
            payment_reference: business.payment_reference.clone(),
            settings: settings_to_json(&business.settings)?,
            is_active: business.is_active,
            created_at: business.created_at,
        };

        bounded(&self.settings, "business.create", self.repository.insert(&row))
            .await
            .map_err(|e| match e {
                PortError::Conflict { .. } => PortError::conflict(business.owner_email.clone()),
                other => other,
            })
    }

    #[instrument(skip(self), fields(business_id = %id))]
    async fn get(&self, id: BusinessId) -> Result<Business, PortError> {
        let row = bounded(&self.settings, "business.get", self.repository.get_by_id(*id.as_uuid())).await?;
        row_to_business(row)
    }

    #[instrument(skip(self, settings), fields(business_id = %id))]
    async fn save_settings(&self, id: BusinessId, settings: &BusinessSettings) -> Result<(), PortError> {
        let document = settings_to_json(settings)?;
        bounded(
            &self.settings,
            "business.save_settings",
            self.repository.update_settings(*id.as_uuid(), &document),
        )
        .await
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Business>, PortError> {
        let row = bounded(&self.settings, "business.find_by_email", self.repository.find_by_email(email)).await?;
        row.map(row_to_business).transpose()
    }
}

#[async_trait]
impl CounterPort for PostgresBusinessAdapter {
    #[instrument(skip(self), fields(business_id = %business_id, today = %today))]
    async fn increment_and_fetch(
        &self,
        business_id: BusinessId,
        today: BusinessDate,
    ) -> Result<TenantCounterState, PortError> {
        let row = bounded(
            &self.settings,
            "counters.increment_and_fetch",
            self.repository.advance_counters(*business_id.as_uuid(), today.as_naive()),
        )
        .await?;

        let state = counters_from_row(row)?;
        debug!(
            receipt = state.last_receipt_number,
            invoice = state.last_invoice_number,
            "Counters advanced"
        );
        Ok(state)
    }

    #[instrument(skip(self), fields(business_id = %business_id))]
    async fn load_counters(&self, business_id: BusinessId) -> Result<TenantCounterState, PortError> {
        let row = bounded(
            &self.settings,
            "counters.load",
            self.repository.get_counters(*business_id.as_uuid()),
        )
        .await?;
        counters_from_row(row)
    }
}

fn settings_to_json(settings: &BusinessSettings) -> Result<serde_json::Value, PortError> {
    serde_json::to_value(settings).map_err(|e| PortError::Transformation {
        message: format!("settings: {}", e),
    })
}

fn counters_from_row(row: CounterRow) -> Result<TenantCounterState, PortError> {
    let to_u64 = |value: i64, column: &str| {
        u64::try_from(value).map_err(|_| PortError::Transformation {
            message: format!("negative {} {}", column, value),
        })
    };

    Ok(TenantCounterState {
        last_receipt_number: to_u64(row.last_receipt_number, "last_receipt_number")?,
        last_receipt_date: row.last_receipt_date.map(BusinessDate::from),
        last_invoice_number: to_u64(row.last_invoice_number, "last_invoice_number")?,
    })
}

fn row_to_business(row: BusinessRow) -> Result<Business, PortError> {
    let counters = counters_from_row(row.counters())?;
    let plan = row.plan.parse().map_err(|e: domain_business::BusinessError| PortError::Transformation {
        message: e.to_string(),
    })?;
    let settings: BusinessSettings =
        serde_json::from_value(row.settings).map_err(|e| PortError::Transformation {
            message: format!("settings: {}", e),
        })?;

    Ok(Business {
        id: BusinessId::from(row.business_id),
        name: row.name,
        owner_email: row.owner_email,
        phone: row.phone,
        plan,
        payment_reference: row.payment_reference,
        counters,
        settings,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

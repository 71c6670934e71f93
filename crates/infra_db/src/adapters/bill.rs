//! PostgreSQL Bill Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{BillId, BusinessId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_billing::{Bill, BillPort, BillQuery};

use crate::repositories::bill::{BillRepository, BillRow};
use super::{bounded, ping, StoreSettings};

#[derive(Debug, Clone)]
pub struct PostgresBillAdapter {
    repository: BillRepository,
    pool: PgPool,
    settings: StoreSettings,
}

impl PostgresBillAdapter {
    pub fn new(pool: PgPool, settings: StoreSettings) -> Self {
        Self {
            repository: BillRepository::new(pool.clone()),
            pool,
            settings,
        }
    }
}

impl DomainPort for PostgresBillAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBillAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-bill-adapter").await
    }
}

#[async_trait]
impl BillPort for PostgresBillAdapter {
    #[instrument(skip(self, bill), fields(bill_id = %bill.id, receipt_no = %bill.receipt_no))]
    async fn insert_bill(&self, bill: &Bill) -> Result<(), PortError> {
        let row = bill_to_row(bill)?;
        bounded(&self.settings, "bills.insert", self.repository.insert(&row)).await
    }

    #[instrument(skip(self), fields(business_id = %business_id, bill_id = %bill_id))]
    async fn get_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<Bill, PortError> {
        let row = bounded(
            &self.settings,
            "bills.get",
            self.repository.get(*business_id.as_uuid(), *bill_id.as_uuid()),
        )
        .await?;
        row_to_bill(row)
    }

    #[instrument(skip(self, bill), fields(bill_id = %bill.id))]
    async fn update_bill(&self, bill: &Bill) -> Result<(), PortError> {
        let row = bill_to_row(bill)?;
        bounded(&self.settings, "bills.update", self.repository.update(&row)).await
    }

    #[instrument(skip(self), fields(business_id = %business_id, bill_id = %bill_id))]
    async fn delete_bill(&self, business_id: BusinessId, bill_id: BillId) -> Result<(), PortError> {
        bounded(
            &self.settings,
            "bills.delete",
            self.repository.delete(*business_id.as_uuid(), *bill_id.as_uuid()),
        )
        .await
    }

    #[instrument(skip(self, query), fields(business_id = %business_id))]
    async fn list_bills(
        &self,
        business_id: BusinessId,
        query: &BillQuery,
    ) -> Result<Vec<Bill>, PortError> {
        let rows = bounded(
            &self.settings,
            "bills.list",
            self.repository.list(
                *business_id.as_uuid(),
                query.bill_type.map(|t| t.as_str()),
                query.from.map(|d| d.as_naive()),
                query.to.map(|d| d.as_naive()),
            ),
        )
        .await?;

        rows.into_iter().map(row_to_bill).collect()
    }
}

fn bill_to_row(bill: &Bill) -> Result<BillRow, PortError> {
    let document = serde_json::to_value(bill).map_err(|e| PortError::Transformation {
        message: format!("bill {}: {}", bill.id, e),
    })?;

    Ok(BillRow {
        bill_id: *bill.id.as_uuid(),
        business_id: *bill.business_id.as_uuid(),
        bill_type: bill.bill_type.as_str().to_string(),
        receipt_no: bill.receipt_no.clone(),
        invoice_no: bill.invoice_no.clone(),
        bill_date: bill.date.as_naive(),
        document,
        created_at: bill.created_at,
        updated_at: bill.updated_at,
    })
}

fn row_to_bill(row: BillRow) -> Result<Bill, PortError> {
    serde_json::from_value(row.document).map_err(|e| PortError::Transformation {
        message: format!("bill {}: {}", row.bill_id, e),
    })
}

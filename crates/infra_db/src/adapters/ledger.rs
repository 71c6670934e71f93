//! PostgreSQL Ledger Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    BillId, BusinessId, DomainPort, HealthCheckResult, HealthCheckable, PortError, TransactionId,
};
use domain_billing::{LedgerEntry, LedgerPort, LedgerQuery};

use crate::repositories::ledger::{LedgerRepository, NewTransaction, TransactionRow};
use super::{bounded, ping, StoreSettings};

#[derive(Debug, Clone)]
pub struct PostgresLedgerAdapter {
    repository: LedgerRepository,
    pool: PgPool,
    settings: StoreSettings,
}

impl PostgresLedgerAdapter {
    pub fn new(pool: PgPool, settings: StoreSettings) -> Self {
        Self {
            repository: LedgerRepository::new(pool.clone()),
            pool,
            settings,
        }
    }
}

impl DomainPort for PostgresLedgerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresLedgerAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-ledger-adapter").await
    }
}

#[async_trait]
impl LedgerPort for PostgresLedgerAdapter {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, operation = entry.operation.as_str()))]
    async fn append(&self, entry: &LedgerEntry) -> Result<(), PortError> {
        let data_snapshot = serde_json::to_value(&entry.data_snapshot).map_err(|e| {
            PortError::Transformation {
                message: format!("ledger snapshot {}: {}", entry.id, e),
            }
        })?;
        let row = NewTransaction {
            transaction_id: *entry.id.as_uuid(),
            business_id: *entry.business_id.as_uuid(),
            operation: entry.operation.as_str().to_string(),
            bill_type: entry.bill_type.as_str().to_string(),
            bill_id: *entry.bill_id.as_uuid(),
            data_snapshot,
            recorded_by: entry.recorded_by.clone(),
            created_at: entry.created_at,
        };

        bounded(&self.settings, "ledger.append", self.repository.append(&row))
            .await
            .map(|_seq| ())
    }

    #[instrument(skip(self, query), fields(business_id = %business_id))]
    async fn query_by_tenant(
        &self,
        business_id: BusinessId,
        query: &LedgerQuery,
    ) -> Result<Vec<LedgerEntry>, PortError> {
        let rows = bounded(
            &self.settings,
            "ledger.query_by_tenant",
            self.repository.list_for_business(
                *business_id.as_uuid(),
                query.bill_id.map(|id| *id.as_uuid()),
                query.limit.map(i64::from),
            ),
        )
        .await?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: TransactionRow) -> Result<LedgerEntry, PortError> {
    let transformation = |message: String| PortError::Transformation { message };

    Ok(LedgerEntry {
        id: TransactionId::from(row.transaction_id),
        business_id: BusinessId::from(row.business_id),
        operation: row.operation.parse().map_err(transformation)?,
        bill_type: row
            .bill_type
            .parse()
            .map_err(|e: domain_billing::BillingError| transformation(e.to_string()))?,
        bill_id: BillId::from(row.bill_id),
        data_snapshot: serde_json::from_value(row.data_snapshot)
            .map_err(|e| transformation(format!("ledger snapshot {}: {}", row.transaction_id, e)))?,
        recorded_by: row.recorded_by,
        created_at: row.created_at,
    })
}

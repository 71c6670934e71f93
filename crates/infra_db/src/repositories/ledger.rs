//! Transaction ledger repository
//!
//! Insert-only. The BIGSERIAL `seq` column records commit order and is the
//! sort key for newest-first reads; a trigger rejects UPDATE and DELETE.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one entry and returns its sequence number
    pub async fn append(&self, entry: &NewTransaction) -> Result<i64, DatabaseError> {
        let seq = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO transactions (
                transaction_id, business_id, operation, bill_type, bill_id,
                data_snapshot, recorded_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING seq
            "#,
        )
        .bind(entry.transaction_id)
        .bind(entry.business_id)
        .bind(&entry.operation)
        .bind(&entry.bill_type)
        .bind(entry.bill_id)
        .bind(&entry.data_snapshot)
        .bind(&entry.recorded_by)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(seq)
    }

    /// Entries for a tenant in reverse commit order
    pub async fn list_for_business(
        &self,
        business_id: Uuid,
        bill_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<TransactionRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT seq, transaction_id, business_id, operation, bill_type, bill_id,
                   data_snapshot, recorded_by, created_at
            FROM transactions
            WHERE business_id = $1
              AND ($2::uuid IS NULL OR bill_id = $2)
            ORDER BY seq DESC
            LIMIT $3
            "#,
        )
        .bind(business_id)
        .bind(bill_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row for a ledger entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRow {
    pub seq: i64,
    pub transaction_id: Uuid,
    pub business_id: Uuid,
    pub operation: String,
    pub bill_type: String,
    pub bill_id: Uuid,
    pub data_snapshot: serde_json::Value,
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for appending a ledger entry
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub transaction_id: Uuid,
    pub business_id: Uuid,
    pub operation: String,
    pub bill_type: String,
    pub bill_id: Uuid,
    pub data_snapshot: serde_json::Value,
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

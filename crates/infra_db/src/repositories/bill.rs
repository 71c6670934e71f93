//! Bill repository implementation
//!
//! Bills are stored as JSONB documents. Type, numbers and date are copied
//! into columns for filtering and the per-tenant receipt uniqueness check.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, bill: &BillRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO bills (
                bill_id, business_id, bill_type, receipt_no, invoice_no,
                bill_date, document, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(bill.bill_id)
        .bind(bill.business_id)
        .bind(&bill.bill_type)
        .bind(&bill.receipt_no)
        .bind(&bill.invoice_no)
        .bind(bill.bill_date)
        .bind(&bill.document)
        .bind(bill.created_at)
        .bind(bill.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches a bill scoped to its owner
    pub async fn get(&self, business_id: Uuid, bill_id: Uuid) -> Result<BillRow, DatabaseError> {
        sqlx::query_as::<_, BillRow>(
            r#"
            SELECT bill_id, business_id, bill_type, receipt_no, invoice_no,
                   bill_date, document, created_at, updated_at
            FROM bills
            WHERE business_id = $1 AND bill_id = $2
            "#,
        )
        .bind(business_id)
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Bill", bill_id))
    }

    /// Replaces the document of an existing bill
    pub async fn update(&self, bill: &BillRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET document = $3, updated_at = $4
            WHERE business_id = $1 AND bill_id = $2
            "#,
        )
        .bind(bill.business_id)
        .bind(bill.bill_id)
        .bind(&bill.document)
        .bind(bill.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Bill", bill.bill_id));
        }
        Ok(())
    }

    pub async fn delete(&self, business_id: Uuid, bill_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM bills WHERE business_id = $1 AND bill_id = $2")
            .bind(business_id)
            .bind(bill_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Bill", bill_id));
        }
        Ok(())
    }

    /// Lists bills newest first; `None` filters match everything
    pub async fn list(
        &self,
        business_id: Uuid,
        bill_type: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<BillRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillRow>(
            r#"
            SELECT bill_id, business_id, bill_type, receipt_no, invoice_no,
                   bill_date, document, created_at, updated_at
            FROM bills
            WHERE business_id = $1
              AND ($2::text IS NULL OR bill_type = $2)
              AND ($3::date IS NULL OR bill_date >= $3)
              AND ($4::date IS NULL OR bill_date <= $4)
            ORDER BY bill_date DESC, created_at DESC
            "#,
        )
        .bind(business_id)
        .bind(bill_type)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row for a bill
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BillRow {
    pub bill_id: Uuid,
    pub business_id: Uuid,
    pub bill_type: String,
    pub receipt_no: String,
    pub invoice_no: String,
    pub bill_date: NaiveDate,
    pub document: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

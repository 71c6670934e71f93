//! Business repository implementation
//!
//! Tenant rows, including the numbering counters. The counters are only ever
//! advanced by [`BusinessRepository::advance_counters`], a single
//! `UPDATE ... RETURNING` statement, so concurrent allocations serialize on
//! the row lock.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const BUSINESS_COLUMNS: &str = r#"
    business_id, name, owner_email, phone, plan, payment_reference,
    last_receipt_number, last_receipt_date, last_invoice_number,
    settings, is_active, created_at, updated_at
"#;

#[derive(Debug, Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new tenant row with zeroed counters
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the owner email is taken
    pub async fn insert(&self, business: &NewBusiness) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO businesses (
                business_id, name, owner_email, phone, plan, payment_reference,
                settings, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(business.business_id)
        .bind(&business.name)
        .bind(&business.owner_email)
        .bind(&business.phone)
        .bind(&business.plan)
        .bind(&business.payment_reference)
        .bind(&business.settings)
        .bind(business.is_active)
        .bind(business.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("Business", "owner_email", &business.owner_email)
            }
            other => other,
        })?;

        Ok(())
    }

    pub async fn get_by_id(&self, business_id: Uuid) -> Result<BusinessRow, DatabaseError> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE business_id = $1");
        sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(business_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Business", business_id))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<BusinessRow>, DatabaseError> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE lower(owner_email) = lower($1)");
        let row = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replaces the settings document; counters are not touched
    pub async fn update_settings(
        &self,
        business_id: Uuid,
        settings: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE businesses SET settings = $2, updated_at = now() WHERE business_id = $1",
        )
        .bind(business_id)
        .bind(settings)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Business", business_id));
        }
        Ok(())
    }

    /// Applies one allocation for `today` and returns the committed counters
    ///
    /// The receipt counter restarts when `today` is later than the stored date
    /// (or the date is NULL). An earlier `today` keeps the stored date and
    /// continues its sequence. The invoice counter always increments.
    pub async fn advance_counters(
        &self,
        business_id: Uuid,
        today: NaiveDate,
    ) -> Result<CounterRow, DatabaseError> {
        sqlx::query_as::<_, CounterRow>(
            r#"
            UPDATE businesses
            SET last_receipt_number = CASE
                    WHEN last_receipt_date IS NULL OR last_receipt_date < $2 THEN 1
                    ELSE last_receipt_number + 1
                END,
                last_receipt_date = GREATEST(last_receipt_date, $2),
                last_invoice_number = last_invoice_number + 1,
                updated_at = now()
            WHERE business_id = $1
            RETURNING last_receipt_number, last_receipt_date, last_invoice_number
            "#,
        )
        .bind(business_id)
        .bind(today)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Business", business_id))
    }

    pub async fn get_counters(&self, business_id: Uuid) -> Result<CounterRow, DatabaseError> {
        sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT last_receipt_number, last_receipt_date, last_invoice_number
            FROM businesses
            WHERE business_id = $1
            "#,
        )
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Business", business_id))
    }
}

/// Database row for a business
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessRow {
    pub business_id: Uuid,
    pub name: String,
    pub owner_email: String,
    pub phone: String,
    pub plan: String,
    pub payment_reference: Option<String>,
    pub last_receipt_number: i64,
    pub last_receipt_date: Option<NaiveDate>,
    pub last_invoice_number: i64,
    pub settings: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessRow {
    pub fn counters(&self) -> CounterRow {
        CounterRow {
            last_receipt_number: self.last_receipt_number,
            last_receipt_date: self.last_receipt_date,
            last_invoice_number: self.last_invoice_number,
        }
    }
}

/// Counter columns of a business row
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct CounterRow {
    pub last_receipt_number: i64,
    pub last_receipt_date: Option<NaiveDate>,
    pub last_invoice_number: i64,
}

/// Data for inserting a business
#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub business_id: Uuid,
    pub name: String,
    pub owner_email: String,
    pub phone: String,
    pub plan: String,
    pub payment_reference: Option<String>,
    pub settings: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

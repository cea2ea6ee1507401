use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{QuotationRepository, StoreError, StoreResult};
use crate::models::{Quotation, SaveQuotationRequest};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS quotation (
    id BIGSERIAL PRIMARY KEY,
    company_name VARCHAR(100),
    company_address VARCHAR(200),
    company_phone VARCHAR(20),
    company_email VARCHAR(100),
    client_name VARCHAR(100),
    client_address VARCHAR(200),
    quotation_no VARCHAR(50),
    date VARCHAR(50),
    items TEXT,
    received DOUBLE PRECISION,
    deposit_info TEXT
)";

const SELECT_COLUMNS: &str = "SELECT
    id,
    company_name,
    company_address,
    company_phone,
    company_email,
    client_name,
    client_address,
    quotation_no,
    date,
    items,
    received,
    deposit_info
 FROM quotation";

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await
}

pub struct PgQuotationRepository {
    pool: PgPool,
}

impl PgQuotationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl QuotationRepository for PgQuotationRepository {
    async fn list(&self) -> StoreResult<Vec<Quotation>> {
        // Postgres sorts NULL first on DESC; keep undated rows last like SQLite.
        let rows = sqlx::query_as::<_, Quotation>(&format!(
            "{} ORDER BY date DESC NULLS LAST, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Quotation>> {
        let row = sqlx::query_as::<_, Quotation>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, request: SaveQuotationRequest) -> StoreResult<i64> {
        let items = request.items_json();

        match request.target_id() {
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE quotation SET
                        company_name = $1,
                        company_address = $2,
                        company_phone = $3,
                        company_email = $4,
                        client_name = $5,
                        client_address = $6,
                        quotation_no = $7,
                        date = $8,
                        items = $9,
                        received = $10,
                        deposit_info = $11
                    WHERE id = $12
                    "#,
                )
                .bind(&request.company_name)
                .bind(&request.company_address)
                .bind(&request.company_phone)
                .bind(&request.company_email)
                .bind(&request.client_name)
                .bind(&request.client_address)
                .bind(&request.quotation_no)
                .bind(&request.date)
                .bind(&items)
                .bind(request.received)
                .bind(&request.deposit_info)
                .bind(id)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::NotFound(id));
                }
                tracing::debug!(id, "quotation updated");
                Ok(id)
            }
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO quotation (
                        company_name, company_address, company_phone, company_email,
                        client_name, client_address, quotation_no, date,
                        items, received, deposit_info
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    RETURNING id
                    "#,
                )
                .bind(&request.company_name)
                .bind(&request.company_address)
                .bind(&request.company_phone)
                .bind(&request.company_email)
                .bind(&request.client_name)
                .bind(&request.client_address)
                .bind(&request.quotation_no)
                .bind(&request.date)
                .bind(&items)
                .bind(request.received)
                .bind(&request.deposit_info)
                .fetch_one(&self.pool)
                .await?;

                tracing::debug!(id, "quotation created");
                Ok(id)
            }
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM quotation WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

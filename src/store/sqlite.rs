use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::{QuotationRepository, StoreError, StoreResult};
use crate::models::{Quotation, SaveQuotationRequest};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS quotation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name VARCHAR(100),
    company_address VARCHAR(200),
    company_phone VARCHAR(20),
    company_email VARCHAR(100),
    client_name VARCHAR(100),
    client_address VARCHAR(200),
    quotation_no VARCHAR(50),
    date VARCHAR(50),
    items TEXT,
    received REAL,
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

/// Opens a pool, creating the database file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
}

pub struct SqliteQuotationRepository {
    pool: SqlitePool,
}

impl SqliteQuotationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the quotation table when it does not exist yet.
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QuotationRepository for SqliteQuotationRepository {
    async fn list(&self) -> StoreResult<Vec<Quotation>> {
        let rows = sqlx::query_as::<_, Quotation>(&format!(
            "{} ORDER BY date DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Quotation>> {
        let row = sqlx::query_as::<_, Quotation>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
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
                    "UPDATE quotation SET
                        company_name = ?,
                        company_address = ?,
                        company_phone = ?,
                        company_email = ?,
                        client_name = ?,
                        client_address = ?,
                        quotation_no = ?,
                        date = ?,
                        items = ?,
                        received = ?,
                        deposit_info = ?
                     WHERE id = ?",
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
                let result = sqlx::query(
                    "INSERT INTO quotation (
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
                     ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
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
                .execute(&self.pool)
                .await?;

                let id = result.last_insert_rowid();
                tracing::debug!(id, "quotation created");
                Ok(id)
            }
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM quotation WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn repo() -> SqliteQuotationRepository {
        let pool = connect("sqlite::memory:", 1).await.expect("connect");
        let repo = SqliteQuotationRepository::new(pool);
        repo.init_schema().await.expect("schema");
        repo
    }

    fn request(date: &str, client: &str) -> SaveQuotationRequest {
        serde_json::from_value(json!({
            "company_name": "Acme",
            "client_name": client,
            "quotation_no": format!("Q-{}", client),
            "date": date,
            "items": [{"name": "Widget", "quantity": 2, "price": 10}],
            "received": 5,
            "deposit_info": "50% upfront"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn save_without_id_creates_rows() {
        let repo = repo().await;
        let first = repo.save(request("2024-01-01", "a")).await.unwrap();
        let second = repo.save(request("2024-01-02", "b")).await.unwrap();
        assert_ne!(first, second);

        let stored = repo.get(first).await.unwrap().expect("row");
        assert_eq!(stored.client_name.as_deref(), Some("a"));
        assert_eq!(stored.received, Some(5.0));
        let items: serde_json::Value =
            serde_json::from_str(stored.items.as_deref().unwrap()).unwrap();
        assert_eq!(items[0]["name"], "Widget");
    }

    #[tokio::test]
    async fn save_with_id_overwrites_in_place() {
        let repo = repo().await;
        let id = repo.save(request("2024-01-01", "a")).await.unwrap();

        let mut update = request("2024-02-01", "renamed");
        update.id = Some(id);
        update.deposit_info = None;
        assert_eq!(repo.save(update).await.unwrap(), id);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].client_name.as_deref(), Some("renamed"));
        assert_eq!(all[0].deposit_info, None);
    }

    #[tokio::test]
    async fn save_with_unknown_id_is_not_found() {
        let repo = repo().await;
        let mut update = request("2024-01-01", "ghost");
        update.id = Some(42);
        assert!(matches!(repo.save(update).await, Err(StoreError::NotFound(42))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_date_first() {
        let repo = repo().await;
        repo.save(request("2024-03-01", "mid")).await.unwrap();
        repo.save(request("2024-05-01", "new")).await.unwrap();
        repo.save(request("2023-12-31", "old")).await.unwrap();

        let clients: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.client_name.unwrap_or_default())
            .collect();
        assert_eq!(clients, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn delete_removes_row_and_reports_unknown_ids() {
        let repo = repo().await;
        let id = repo.save(request("2024-01-01", "a")).await.unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.get(id).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(repo.delete(id).await, Err(StoreError::NotFound(_))));
    }
}

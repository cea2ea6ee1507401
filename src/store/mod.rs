use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Quotation, SaveQuotationRequest};

pub mod memory;
pub mod postgres;
pub mod sqlite;

pub use memory::InMemoryQuotationRepository;
pub use postgres::PgQuotationRepository;
pub use sqlite::SqliteQuotationRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quotation {0} not found")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    /// All quotations, newest date first.
    async fn list(&self) -> StoreResult<Vec<Quotation>>;

    async fn get(&self, id: i64) -> StoreResult<Option<Quotation>>;

    /// Inserts when the request carries no id, otherwise overwrites every
    /// column of the existing row. Returns the row id.
    async fn save(&self, request: SaveQuotationRequest) -> StoreResult<i64>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

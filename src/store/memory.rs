use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{QuotationRepository, StoreError, StoreResult};
use crate::models::{Quotation, SaveQuotationRequest};

/// Map-backed repository with the same ordering and not-found rules as the
/// SQLite one.
#[derive(Default)]
pub struct InMemoryQuotationRepository {
    rows: RwLock<BTreeMap<i64, Quotation>>,
    next_id: AtomicI64,
}

impl InMemoryQuotationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    async fn list(&self) -> StoreResult<Vec<Quotation>> {
        let rows = self.rows.read().await;
        let mut all: Vec<Quotation> = rows.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Quotation>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, request: SaveQuotationRequest) -> StoreResult<i64> {
        let mut rows = self.rows.write().await;
        let id = match request.target_id() {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => return Err(StoreError::NotFound(id)),
            None => self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        rows.insert(id, request.into_record(id));
        Ok(id)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(date: &str) -> SaveQuotationRequest {
        SaveQuotationRequest {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_are_fresh_and_updates_stay_in_place() {
        let repo = InMemoryQuotationRepository::new();
        let a = repo.save(dated("2024-01-01")).await.unwrap();
        let b = repo.save(dated("2024-01-02")).await.unwrap();
        assert_ne!(a, b);

        let mut update = dated("2024-06-01");
        update.id = Some(a);
        assert_eq!(repo.save(update).await.unwrap(), a);
        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert_eq!(repo.list().await.unwrap()[0].id, a);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let repo = InMemoryQuotationRepository::new();
        let mut update = dated("2024-01-01");
        update.id = Some(9);
        assert!(matches!(repo.save(update).await, Err(StoreError::NotFound(9))));
        assert!(matches!(repo.delete(9).await, Err(StoreError::NotFound(9))));
    }
}

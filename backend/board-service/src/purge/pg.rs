/// Postgres-backed [`DocumentStore`] implementation
use crate::db::post_repo;
use crate::purge::{DocumentStore, DocumentStoreError};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_ids(&self) -> Result<Vec<Uuid>, DocumentStoreError> {
        post_repo::list_post_ids(&self.pool)
            .await
            .map_err(|e| DocumentStoreError::Unavailable(e.to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentStoreError> {
        let rows = post_repo::delete_post(&self.pool, id)
            .await
            .map_err(|e| DocumentStoreError::Unavailable(e.to_string()))?;

        if rows == 0 {
            return Err(DocumentStoreError::NotFound { id });
        }

        Ok(())
    }
}

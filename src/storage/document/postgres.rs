//! Document store backed by a PostgreSQL JSONB table.
//!
//! All collections share one table, `<db_name>.documents`, keyed by a serial id so that reads
//! come back in insertion order.

use crate::storage::document::{
    ensure_ident, with_identity, Document, DocumentStore, DocumentStoreError, Projection,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    table: String,
}

impl PgDocumentStore {
    /// Connects and makes sure the schema and the documents table exist.
    pub async fn connect(database_url: &str, db_name: &str) -> Result<Self, DocumentStoreError> {
        ensure_ident(db_name)?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::with_pool(pool, db_name).await
    }

    pub async fn with_pool(pool: PgPool, db_name: &str) -> Result<Self, DocumentStoreError> {
        ensure_ident(db_name)?;

        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", db_name))
            .execute(&pool)
            .await?;

        let table = format!("{}.documents", db_name);
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                collection TEXT NOT NULL,
                body JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            table
        ))
        .execute(&pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS documents_collection_idx ON {} (collection, id)",
            table
        ))
        .execute(&pool)
        .await?;

        info!(table = %table, "document store ready");
        Ok(Self { pool, table })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<(), DocumentStoreError> {
        ensure_ident(collection)?;
        let body = JsonValue::Object(with_identity(document));

        sqlx::query(&format!(
            "INSERT INTO {} (collection, body) VALUES ($1, $2)",
            self.table
        ))
        .bind(collection)
        .bind(Json(body))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Document,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        ensure_ident(collection)?;

        let rows = sqlx::query(&format!(
            "SELECT body FROM {} WHERE collection = $1 AND body @> $2 ORDER BY id LIMIT $3",
            self.table
        ))
        .bind(collection)
        .bind(Json(JsonValue::Object(filter.clone())))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let body: JsonValue = row.try_get("body")?;
            match body {
                JsonValue::Object(doc) => documents.push(projection.apply(doc)),
                other => {
                    return Err(DocumentStoreError::Decode {
                        collection: collection.to_string(),
                        reason: format!("expected an object, found {}", other),
                    })
                }
            }
        }
        Ok(documents)
    }

    async fn ping(&self) -> Result<(), DocumentStoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

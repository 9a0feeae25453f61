//! Document store adapter.
//!
//! Schemaless JSON objects addressed by collection name. The store assigns each document an
//! internal identity field (`_id`) on insert; callers that do not want it exclude it through a
//! [`Projection`].

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::storage::validate_ident;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Field the store adds to every inserted document.
pub const IDENTITY_FIELD: &str = "_id";

pub type Document = Map<String, JsonValue>;

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed document in '{collection}': {reason}")]
    Decode { collection: String, reason: String },

    #[error("invalid collection or database name '{0}'")]
    InvalidName(String),
}

/// Fields removed from every document returned by `find`.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    exclude: Vec<String>,
}

impl Projection {
    pub fn all() -> Self {
        Self::default()
    }

    /// Drops the store's identity field, the usual projection for API output.
    pub fn without_identity() -> Self {
        Self::excluding([IDENTITY_FIELD])
    }

    pub fn excluding<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn apply(&self, mut document: Document) -> Document {
        for field in &self.exclude {
            document.remove(field);
        }
        document
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists one document. Values must already be store-safe primitives (timestamps as text).
    async fn insert(&self, collection: &str, document: Document) -> Result<(), DocumentStoreError>;

    /// Returns up to `limit` documents whose top-level fields equal every entry of `filter`,
    /// in insertion order. An empty filter matches everything.
    async fn find(
        &self,
        collection: &str,
        filter: &Document,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Checks connectivity.
    async fn ping(&self) -> Result<(), DocumentStoreError>;

    /// Releases the underlying connection. Called once on shutdown.
    async fn close(&self) {}
}

/// Adds a generated identity field unless the caller supplied one.
pub(crate) fn with_identity(mut document: Document) -> Document {
    if !document.contains_key(IDENTITY_FIELD) {
        document.insert(
            IDENTITY_FIELD.to_string(),
            JsonValue::from(uuid::Uuid::new_v4().simple().to_string()),
        );
    }
    document
}

pub(crate) fn ensure_ident(ident: &str) -> Result<(), DocumentStoreError> {
    if validate_ident(ident) {
        Ok(())
    } else {
        Err(DocumentStoreError::InvalidName(ident.to_string()))
    }
}

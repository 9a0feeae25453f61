//! In-process document store for tests and local runs without a database.

use crate::storage::document::{
    ensure_ident, with_identity, Document, DocumentStore, DocumentStoreError, Projection,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<(), DocumentStoreError> {
        ensure_ident(collection)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(with_identity(document));
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
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| matches(doc, filter))
            .take(limit)
            .cloned()
            .map(|doc| projection.apply(doc))
            .collect())
    }

    async fn ping(&self) -> Result<(), DocumentStoreError> {
        Ok(())
    }
}

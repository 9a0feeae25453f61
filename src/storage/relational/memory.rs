//! In-process relational store. Enforces unique columns the way the hosted store does and can
//! be told to reject a table outright, which is what the handler tests need.

use crate::storage::relational::{RelationalStore, RelationalStoreError, Row, UNIQUE_VIOLATION};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryRelationalStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    unique: HashMap<String, Vec<String>>,
    failing: RwLock<HashMap<String, String>>,
}

impl MemoryRelationalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `column` of `table` as unique.
    pub fn with_unique(mut self, table: &str, column: &str) -> Self {
        self.unique
            .entry(table.to_string())
            .or_default()
            .push(column.to_string());
        self
    }

    /// Every later insert into `table` fails with `message`.
    pub async fn fail_table(&self, table: &str, message: &str) {
        self.failing
            .write()
            .await
            .insert(table.to_string(), message.to_string());
    }

    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RelationalStore for MemoryRelationalStore {
    async fn insert(&self, table: &str, row: Row) -> Result<(), RelationalStoreError> {
        if let Some(message) = self.failing.read().await.get(table) {
            return Err(RelationalStoreError::Api {
                table: table.to_string(),
                status: 500,
                code: None,
                message: message.clone(),
            });
        }

        let mut tables = self.tables.write().await;
        let existing = tables.entry(table.to_string()).or_default();

        for column in self.unique.get(table).into_iter().flatten() {
            let Some(value) = row.get(column) else { continue };
            if existing.iter().any(|r| r.get(column) == Some(value)) {
                return Err(RelationalStoreError::Api {
                    table: table.to_string(),
                    status: 409,
                    code: Some(UNIQUE_VIOLATION.to_string()),
                    message: format!(
                        "duplicate key value violates unique constraint \"{}_{}_key\"",
                        table, column
                    ),
                });
            }
        }

        existing.push(row);
        Ok(())
    }
}

//! Relational store adapter (hosted Postgres behind a REST insert API).
//!
//! Uniqueness and column constraints are enforced by the store; this side only forwards rows
//! and classifies the failure it gets back.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

pub mod memory;
pub mod supabase;

pub use memory::MemoryRelationalStore;
pub use supabase::SupabaseStore;

/// Postgres SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

pub type Row = Map<String, JsonValue>;

#[derive(Debug, Error)]
pub enum RelationalStoreError {
    /// Credentials were absent at startup; no call was attempted.
    #[error("relational store is not configured")]
    NotConfigured,

    /// The store answered and rejected the row.
    #[error("store rejected insert into '{table}' (status {status}, code {code:?}): {message}")]
    Api {
        table: String,
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The request never got a usable answer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RelationalStoreError {
    /// True for uniqueness-constraint violations. Matches either the SQLSTATE or the word
    /// "duplicate" anywhere in the message, case-insensitively.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            RelationalStoreError::Api { code, message, .. } => {
                code.as_deref() == Some(UNIQUE_VIOLATION)
                    || message.contains(UNIQUE_VIOLATION)
                    || message.to_lowercase().contains("duplicate")
            }
            _ => false,
        }
    }
}

#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Inserts one row into `table`. `row` carries only the fields that are present.
    async fn insert(&self, table: &str, row: Row) -> Result<(), RelationalStoreError>;

    /// Checks connectivity and credentials.
    async fn ping(&self) -> Result<(), RelationalStoreError> {
        Ok(())
    }
}

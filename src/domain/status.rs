//! Status checks: the legacy health-verification records kept in the document store.

use crate::storage::document::{Document, DocumentStoreError};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

pub const STATUS_COLLECTION: &str = "status_checks";

/// Cap on the status listing. There is no paging past it.
pub const STATUS_LIST_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheck {
    /// New record with a generated id and the current time. The timestamp is truncated to
    /// microseconds so it survives the text round-trip through the store unchanged.
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now().trunc_subsecs(6),
        }
    }

    /// Store form: the timestamp becomes ISO-8601 text.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("id".to_string(), JsonValue::from(self.id.clone()));
        doc.insert("client_name".to_string(), JsonValue::from(self.client_name.clone()));
        doc.insert(
            "timestamp".to_string(),
            JsonValue::from(self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)),
        );
        doc
    }

    /// Reverses `to_document`. Unknown fields (the store's `_id`, say) are ignored.
    pub fn from_document(doc: &Document) -> Result<Self, DocumentStoreError> {
        let text = |field: &str| -> Result<String, DocumentStoreError> {
            doc.get(field)
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .ok_or_else(|| decode_error(format!("missing text field '{}'", field)))
        };

        let raw_timestamp = text("timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&raw_timestamp)
            .map_err(|e| decode_error(format!("bad timestamp '{}': {}", raw_timestamp, e)))?
            .with_timezone(&Utc);

        Ok(Self {
            id: text("id")?,
            client_name: text("client_name")?,
            timestamp,
        })
    }
}

fn decode_error(reason: String) -> DocumentStoreError {
    DocumentStoreError::Decode {
        collection: STATUS_COLLECTION.to_string(),
        reason,
    }
}

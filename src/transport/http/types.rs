use crate::storage::document::DocumentStore;
use crate::storage::relational::RelationalStore;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Long-lived store handles, built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentStore>,
    /// `None` when relational-store credentials were absent at startup.
    pub forms: Option<Arc<dyn RelationalStore>>,
}

impl AppState {
    pub fn new(documents: Arc<dyn DocumentStore>, forms: Option<Arc<dyn RelationalStore>>) -> Self {
        Self { documents, forms }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Success envelope for form submissions.
#[derive(Serialize, Debug, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

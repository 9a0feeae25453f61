//! Endpoint logic independent of HTTP: build the record, make the single store call, translate
//! the outcome.
//!
//! Each operation issues at most one call to exactly one store. Nothing is retried.

use crate::app::error::ApiError;
use crate::domain::forms::{FormKind, FormSubmission};
use crate::domain::status::{StatusCheck, StatusCheckCreate, STATUS_COLLECTION, STATUS_LIST_LIMIT};
use crate::storage::document::{Document, DocumentStore, Projection};
use crate::storage::relational::{RelationalStore, RelationalStoreError};
use tracing::{error, info};

pub const NOT_CONFIGURED_MESSAGE: &str = "Supabase not configured";
pub const ALREADY_SUBSCRIBED_MESSAGE: &str = "This email is already subscribed.";
const STATUS_FAILURE_MESSAGE: &str = "Internal server error";

/// The per-endpoint mapping from store failures to client-facing errors.
///
/// Only newsletter signups turn a uniqueness violation into a conflict. Raw store text is
/// logged here and never returned.
pub fn translate_store_error(kind: FormKind, err: &RelationalStoreError) -> ApiError {
    match (kind, err) {
        (_, RelationalStoreError::NotConfigured) => {
            ApiError::NotConfigured(NOT_CONFIGURED_MESSAGE.to_string())
        }
        (FormKind::Newsletter, err) if err.is_unique_violation() => {
            ApiError::Conflict(ALREADY_SUBSCRIBED_MESSAGE.to_string())
        }
        (kind, err) => {
            error!(form = kind.label(), error = %err, "{} submission failed", kind.label());
            ApiError::Internal(kind.failure_message().to_string())
        }
    }
}

/// Stores a validated form submission. Returns the confirmation text on success.
pub async fn submit_form<F: FormSubmission>(
    store: Option<&dyn RelationalStore>,
    submission: F,
) -> Result<&'static str, ApiError> {
    let kind = F::KIND;
    let Some(store) = store else {
        return Err(translate_store_error(kind, &RelationalStoreError::NotConfigured));
    };

    store
        .insert(kind.table(), submission.into_record())
        .await
        .map_err(|e| translate_store_error(kind, &e))?;

    info!(form = kind.label(), table = kind.table(), "submission stored");
    Ok(kind.confirmation())
}

pub async fn create_status_check(
    documents: &dyn DocumentStore,
    input: StatusCheckCreate,
) -> Result<StatusCheck, ApiError> {
    let check = StatusCheck::new(input.client_name);

    documents
        .insert(STATUS_COLLECTION, check.to_document())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to store status check");
            ApiError::Internal(STATUS_FAILURE_MESSAGE.to_string())
        })?;

    Ok(check)
}

pub async fn list_status_checks(documents: &dyn DocumentStore) -> Result<Vec<StatusCheck>, ApiError> {
    let docs = documents
        .find(
            STATUS_COLLECTION,
            &Document::new(),
            &Projection::without_identity(),
            STATUS_LIST_LIMIT,
        )
        .await
        .map_err(|e| {
            error!(error = %e, "failed to list status checks");
            ApiError::Internal(STATUS_FAILURE_MESSAGE.to_string())
        })?;

    docs.iter()
        .map(StatusCheck::from_document)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!(error = %e, "stored status check could not be decoded");
            ApiError::Internal(STATUS_FAILURE_MESSAGE.to_string())
        })
}

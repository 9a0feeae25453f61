use crate::app::submission_service;
use crate::app::ApiError;
use crate::domain::status::{StatusCheck, StatusCheckCreate};
use crate::transport::http::types::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/status",
    request_body = StatusCheckCreate,
    responses(
        (status = 200, description = "Status check recorded", body = StatusCheck),
        (status = 422, description = "Missing or mistyped client_name", body = ErrorResponse),
        (status = 500, description = "Document store failure", body = ErrorResponse)
    )
)]
pub async fn create_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::from_rejection(e, "{ client_name }"))?;
    let check = submission_service::create_status_check(state.documents.as_ref(), input).await?;
    Ok(Json(check))
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Up to 1000 status checks, oldest first", body = Vec<StatusCheck>),
        (status = 500, description = "Document store failure", body = ErrorResponse)
    )
)]
pub async fn list_status_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = submission_service::list_status_checks(state.documents.as_ref()).await?;
    Ok(Json(checks))
}

use crate::app::submission_service;
use crate::app::ApiError;
use crate::domain::forms::{
    ConsultationSubmit, ContactSubmit, CvSubmit, FormSubmission, NewsletterSubmit,
};
use crate::transport::http::types::{AppState, SubmitResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

/// Shared body of the four form endpoints: reject bad payloads with 422 before touching any
/// store, then hand off to the service.
async fn submit<F: FormSubmission>(
    state: AppState,
    payload: Result<Json<F>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let kind = F::KIND;
    let Json(submission) = payload.map_err(|e| {
        let expected = kind.required_fields().join(", ");
        ApiError::from_rejection(e, &format!("{{ {} }}", expected))
    })?;

    let message = submission_service::submit_form(state.forms.as_deref(), submission).await?;
    Ok(Json(SubmitResponse::ok(message)))
}

#[utoipa::path(
    post,
    path = "/api/newsletter",
    request_body = NewsletterSubmit,
    responses(
        (status = 200, description = "Subscribed", body = SubmitResponse),
        (status = 409, description = "Email already subscribed", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped email", body = ErrorResponse),
        (status = 500, description = "Store not configured or insert failed", body = ErrorResponse)
    )
)]
pub async fn newsletter_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewsletterSubmit>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(state, payload).await
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactSubmit,
    responses(
        (status = 200, description = "Contact form stored", body = SubmitResponse),
        (status = 422, description = "Missing or mistyped required field", body = ErrorResponse),
        (status = 500, description = "Store not configured or insert failed", body = ErrorResponse)
    )
)]
pub async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmit>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(state, payload).await
}

#[utoipa::path(
    post,
    path = "/api/cv",
    request_body = CvSubmit,
    responses(
        (status = 200, description = "CV stored", body = SubmitResponse),
        (status = 422, description = "Missing or mistyped required field", body = ErrorResponse),
        (status = 500, description = "Store not configured or insert failed", body = ErrorResponse)
    )
)]
pub async fn cv_handler(
    State(state): State<AppState>,
    payload: Result<Json<CvSubmit>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(state, payload).await
}

#[utoipa::path(
    post,
    path = "/api/consultation",
    request_body = ConsultationSubmit,
    responses(
        (status = 200, description = "Consultation request stored", body = SubmitResponse),
        (status = 422, description = "Missing or mistyped required field", body = ErrorResponse),
        (status = 500, description = "Store not configured or insert failed", body = ErrorResponse)
    )
)]
pub async fn consultation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConsultationSubmit>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(state, payload).await
}

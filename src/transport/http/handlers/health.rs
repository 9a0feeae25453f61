use crate::transport::http::types::MessageResponse;
use axum::Json;

/// Liveness check. Touches no store.
#[utoipa::path(
    get,
    path = "/api/",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

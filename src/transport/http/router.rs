use crate::app::ErrorResponse;
use crate::domain::forms::{ConsultationSubmit, ContactSubmit, CvSubmit, NewsletterSubmit};
use crate::domain::status::{StatusCheck, StatusCheckCreate};
use crate::infra::config::CorsOrigins;
use crate::transport::http::handlers::{forms, health, status};
use crate::transport::http::types::{AppState, MessageResponse, SubmitResponse};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        status::create_status_handler,
        status::list_status_handler,
        forms::newsletter_handler,
        forms::contact_handler,
        forms::cv_handler,
        forms::consultation_handler
    ),
    components(schemas(
        MessageResponse,
        SubmitResponse,
        ErrorResponse,
        StatusCheck,
        StatusCheckCreate,
        NewsletterSubmit,
        ContactSubmit,
        CvSubmit,
        ConsultationSubmit
    ))
)]
pub struct ApiDoc;

/// The `/api` routes, bound to their state.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api", get(health::root_handler))
        .route("/api/", get(health::root_handler))
        .route(
            "/api/status",
            post(status::create_status_handler).get(status::list_status_handler),
        )
        .route("/api/newsletter", post(forms::newsletter_handler))
        .route("/api/contact", post(forms::contact_handler))
        .route("/api/cv", post(forms::cv_handler))
        .route("/api/consultation", post(forms::consultation_handler))
        .with_state(app_state)
}

/// Router plus API docs, CORS and request tracing: what the server actually serves.
pub fn create_app(app_state: AppState, origins: &CorsOrigins) -> Router {
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
}

/// Credentials are allowed, so wildcards are expressed by mirroring the request.
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::mirror_request(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(origin = %origin, "ignoring unusable CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

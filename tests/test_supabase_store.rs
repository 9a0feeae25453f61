//! `SupabaseStore` against a stub PostgREST server, then the whole app on top of it.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use formdesk::infra::config::{CorsOrigins, SupabaseSettings};
use formdesk::storage::relational::RelationalStoreError;
use formdesk::transport::http::{create_app, AppState};
use formdesk::{DocumentStore, MemoryDocumentStore, RelationalStore, SupabaseStore};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

const SERVICE_KEY: &str = "service-role-key";

#[derive(Clone, Default)]
struct Stub {
    rows: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn stub_insert(
    State(stub): State<Stub>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> impl IntoResponse {
    let authorized = headers.get("apikey").map(|v| v == SERVICE_KEY).unwrap_or(false)
        && headers
            .get("authorization")
            .map(|v| v == format!("Bearer {}", SERVICE_KEY).as_str())
            .unwrap_or(false);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "PGRST301", "message": "JWT invalid", "details": null, "hint": null})),
        )
            .into_response();
    }

    if table == "broken_table" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let mut rows = stub.rows.lock().await;
    if table == "newsletter_subscriptions"
        && rows
            .iter()
            .any(|(t, r)| t == &table && r.get("email") == row.get("email"))
    {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "details": "Key (email) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"newsletter_subscriptions_email_key\""
            })),
        )
            .into_response();
    }

    rows.push((table, row));
    StatusCode::CREATED.into_response()
}

async fn spawn_stub() -> (String, Stub) {
    let stub = Stub::default();
    let router = Router::new()
        .route("/rest/v1/", get(|| async { StatusCode::OK }))
        .route("/rest/v1/:table", post(stub_insert))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://127.0.0.1:{}", port), stub)
}

fn settings(url: &str, key: &str) -> SupabaseSettings {
    SupabaseSettings {
        url: url.to_string(),
        service_key: key.to_string(),
    }
}

fn row(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn insert_sends_credentials_and_row() {
    let (url, stub) = spawn_stub().await;
    let store = SupabaseStore::new(&settings(&url, SERVICE_KEY)).unwrap();

    store.ping().await.unwrap();
    store
        .insert("contact_submissions", row(json!({"full_name": "Ada", "email": "ada@example.com"})))
        .await
        .unwrap();

    let rows = stub.rows.lock().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "contact_submissions");
    assert_eq!(rows[0].1, json!({"full_name": "Ada", "email": "ada@example.com"}));
}

#[tokio::test]
async fn duplicate_is_classified_as_unique_violation() {
    let (url, _stub) = spawn_stub().await;
    let store = SupabaseStore::new(&settings(&url, SERVICE_KEY)).unwrap();

    let signup = row(json!({"email": "dup@example.com", "source": "website_footer"}));
    store.insert("newsletter_subscriptions", signup.clone()).await.unwrap();
    let err = store.insert("newsletter_subscriptions", signup).await.unwrap_err();

    assert!(err.is_unique_violation());
    match err {
        RelationalStoreError::Api { status, code, .. } => {
            assert_eq!(status, 409);
            assert_eq!(code.as_deref(), Some("23505"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_credentials_and_raw_failures_are_api_errors() {
    let (url, _stub) = spawn_stub().await;

    let bad_key = SupabaseStore::new(&settings(&url, "wrong")).unwrap();
    let err = bad_key
        .insert("contact_submissions", row(json!({"email": "a@b.c"})))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationalStoreError::Api { status: 401, .. }));
    assert!(!err.is_unique_violation());

    let store = SupabaseStore::new(&settings(&url, SERVICE_KEY)).unwrap();
    let err = store.insert("broken_table", row(json!({}))).await.unwrap_err();
    match err {
        RelationalStoreError::Api { message, .. } => assert_eq!(message, "upstream exploded"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let store = SupabaseStore::new(&settings(&format!("http://127.0.0.1:{}", port), SERVICE_KEY)).unwrap();
    let err = store
        .insert("contact_submissions", row(json!({"email": "a@b.c"})))
        .await
        .unwrap_err();
    assert!(matches!(err, RelationalStoreError::Transport(_)));
}

#[tokio::test]
async fn newsletter_endpoint_maps_store_duplicate_to_409() {
    let (url, stub) = spawn_stub().await;
    let forms: Arc<dyn RelationalStore> = Arc::new(SupabaseStore::new(&settings(&url, SERVICE_KEY)).unwrap());
    let documents: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let app = create_app(AppState::new(documents, Some(forms)), &CorsOrigins::Any);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let endpoint = format!("http://127.0.0.1:{}/api/newsletter", port);

    let first = client
        .post(&endpoint)
        .json(&json!({"email": "repeat@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 200);

    let second = client
        .post(&endpoint)
        .json(&json!({"email": "repeat@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["detail"], "This email is already subscribed.");
    assert!(!body.to_string().contains("23505"));

    assert_eq!(stub.rows.lock().await.len(), 1);
}

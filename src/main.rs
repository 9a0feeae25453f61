// src/main.rs

use formdesk::infra::logging::init_tracing;
use formdesk::infra::shutdown::shutdown_signal;
use formdesk::transport::http::{create_app, AppState};
use formdesk::{Config, DocumentStore, PgDocumentStore, RelationalStore, SupabaseStore};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // --- Document store (status checks) ---
    info!(db_name = %config.db_name, "connecting to document store");
    let documents: Arc<dyn DocumentStore> =
        Arc::new(PgDocumentStore::connect(&config.database_url, &config.db_name).await?);

    // --- Relational store (form submissions); optional ---
    let forms: Option<Arc<dyn RelationalStore>> = match config.supabase() {
        Some(settings) => {
            info!(url = %settings.url, "form submissions go to Supabase");
            let store: Arc<dyn RelationalStore> = Arc::new(SupabaseStore::new(&settings)?);
            Some(store)
        }
        None => {
            warn!("SUPABASE_URL / SUPABASE_SERVICE_KEY not set; form endpoints will answer 500");
            None
        }
    };

    let app = create_app(AppState::new(documents.clone(), forms), &config.cors_origins());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal()?)
        .await?;

    documents.close().await;
    info!("document store closed, shutdown complete");
    Ok(())
}

//! People API server: reads settings from the environment, opens the store, builds routes from the API document.

use people_api::{
    app, ensure_database_exists, load_document, resolve, AppState, MemoryPersonStore, PersonStore,
    PgPersonStore, Settings, StoreKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("people_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = open_store(&settings).await?;

    let doc = load_document(settings.api_doc_path.as_deref()).await?;
    let api = resolve(&doc)?;
    if let Some(path) = api.people_path() {
        tracing::info!(%path, "people routes generated from api document");
    }
    let state = AppState::new(store, api);
    let router = app(state, settings.max_body_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn open_store(settings: &Settings) -> Result<Arc<dyn PersonStore>, Box<dyn std::error::Error>> {
    match settings.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryPersonStore::new()))
        }
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.db_max_connections)
                .connect(&settings.database_url)
                .await?;
            let store = PgPersonStore::new(pool, &settings.people_schema);
            store.ensure_people_table().await?;
            tracing::info!(schema = %settings.people_schema, "postgres store ready");
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

//! Catalog Search Server - Binary Entry Point
//!
//! This is the main entry point for the catalog-server binary.

use std::env;
use std::sync::Arc;

use catalog_search::api::http::create_router;
use catalog_search::api::state::AppState;
use catalog_search::catalog::CatalogService;
use catalog_search::search::SynonymIndex;
use catalog_search::store::MemoryStore;
use catalog_search::types::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    let store = Arc::new(MemoryStore::new());
    eprintln!(
        "[Catalog] Loaded {} products from {}",
        store.len(),
        store.file_path()
    );

    let synonyms = Arc::new(SynonymIndex::new());
    eprintln!(
        "[Search] Synonym index ready ({} terms)",
        synonyms.snapshot().len()
    );

    let catalog = Arc::new(CatalogService::new(store, synonyms));
    let state = Arc::new(AppState::new(catalog));
    let app = create_router(state);

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3900".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    eprintln!("[Server] Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    eprintln!("[Server] Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        eprintln!("[Server] Failed to install Ctrl+C handler");
    }
}

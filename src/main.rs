mod app;
mod errors;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::logging::LoggingConfig;
use crate::state::AppState;
use crate::store::{JsonFileStore, MemoryStore, NullStore, RecordStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init(LoggingConfig::from_env())?;

    // Select record store based on STORE_BACKEND env var (defaults to file)
    let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "file".to_string());

    let store: Arc<dyn RecordStore> = match backend.to_lowercase().as_str() {
        "file" => {
            let path = std::env::var("ROIDASH_DATA_FILE")
                .unwrap_or_else(|_| "data/records.json".to_string());
            tracing::info!("💾 Using file record store at {}", path);
            Arc::new(JsonFileStore::open(path))
        }
        "memory" => {
            tracing::info!("💾 Using in-memory record store");
            Arc::new(MemoryStore::new())
        }
        "none" => {
            tracing::warn!("💾 Running without a record store; saves are dropped and loads are empty");
            Arc::new(NullStore)
        }
        _ => {
            panic!(
                "Invalid STORE_BACKEND: {}. Must be 'file', 'memory', or 'none'",
                backend
            );
        }
    };

    let state = AppState { store };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Roidash backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

//! plantcat store server
//!
//! Serves the plant collection from a single JSON document, importing the
//! legacy XML catalog the first time the document is missing.
//!
//! # Configuration
//!
//! Environment variables:
//! - `PLANTCAT_PORT`: Port to listen on (default: 8080)
//! - `PLANTCAT_DATA_DIR`: Directory holding `plants.json` (default: ~/.local/share/plantcat-server)
//! - `PLANTCAT_IMPORT_FILE`: Legacy XML catalog (default: `<data dir>/plant_catalog.xml`)
//!
//! # Endpoints
//!
//! - `GET /health`: Health check
//! - `GET|POST /api?action=load`: Full collection
//! - `POST /api?action=save` (form field `data`): Overwrite the collection

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantcat::server::{router, AppState, PlantStore};

/// Server configuration
#[derive(Debug, Clone)]
struct ServerConfig {
    /// Port to listen on
    port: u16,
    /// Directory holding the JSON document
    data_dir: PathBuf,
    /// Legacy XML catalog imported on first load
    import_file: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("PLANTCAT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let data_dir = std::env::var("PLANTCAT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("plantcat-server")
            });

        let import_file = std::env::var("PLANTCAT_IMPORT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join(plantcat::server::storage::IMPORT_FILENAME));

        Self {
            port,
            data_dir,
            import_file,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantcat=info,plantcat_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ServerConfig::from_env();

    // Ensure data directory exists
    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        tracing::error!("Failed to create data directory: {}", e);
        std::process::exit(1);
    }

    let store = PlantStore::new(
        config
            .data_dir
            .join(plantcat::server::storage::DOCUMENT_FILENAME),
        &config.import_file,
    );

    tracing::info!("Document: {}", store.path().display());
    tracing::info!("Import source: {}", store.import_path().display());

    let app = router(AppState::new(store));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

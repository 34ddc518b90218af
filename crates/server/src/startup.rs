use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging;
use configs::{AppConfig, StorageBackend, StorageConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::plants::{
    file::FilePlantStore, mongo::MongoPlantStore, service::PlantService, store::PlantStore,
};
use service::runtime;

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging() {
    logging::init_logging();
}

// The original deployment sat behind CORS(app); same posture here.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Construct the persistence collaborator the configuration selected.
async fn build_store(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn PlantStore>> {
    let store: Arc<dyn PlantStore> = match cfg.backend {
        StorageBackend::Mongo => {
            info!(database = %cfg.mongo_database, "using mongodb plant store");
            Arc::new(MongoPlantStore::connect(&cfg.mongo_uri, &cfg.mongo_database).await?)
        }
        StorageBackend::File => {
            info!(path = %cfg.plants_file, "using flat-file plant store");
            FilePlantStore::new(cfg.plants_file.clone()).await?
        }
    };
    Ok(store)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    runtime::ensure_env("data").await?;

    // Configuration is read once here; the store handle lives for the
    // process and is injected, never reached through globals.
    let cfg = AppConfig::load_and_validate()?;
    let store = build_store(&cfg.storage).await?;
    let state = AppState { plants: PlantService::new(store) };

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, "starting plant tracker server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

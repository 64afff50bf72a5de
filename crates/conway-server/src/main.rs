//! Board server binary for the Conway board service.
//!
//! Wires configuration, logging, the board store, and the HTTP API
//! together and serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `conway-config.yaml` (or `CONWAY_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the board store selected by `storage.backend`
//! 4. Build the board service and serve the API
//! 5. On shutdown, persist the store

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use conway_core::config::StorageBackend;
use conway_core::{
    BoardLimits, BoardService, BoardStore, EventLog, FileBoardStore, MemoryBoardStore,
    ServiceConfig, TracingLog,
};
use conway_observer::{AppState, ServerConfig, shutdown_signal, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "conway-config.yaml";

/// Application entry point for the board server.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the snapshot
/// cannot be opened, the server fails, or the final persist fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!(
        source = %config_source,
        host = %config.server.host,
        port = config.server.port,
        min_rows = config.board.min_rows,
        min_cols = config.board.min_cols,
        "conway-server starting"
    );

    // 3. Open the board store.
    let log: Arc<dyn EventLog> = Arc::new(TracingLog);
    let store = open_store(&config, &log)?;
    info!(boards = store.len()?, "Board store ready");

    // 4. Build the service and serve.
    let service = Arc::new(BoardService::new(
        store,
        BoardLimits::from(config.board),
        Arc::clone(&log),
    ));
    let state = Arc::new(AppState::new(Arc::clone(&service)));
    let server_config = ServerConfig::from(&config.server);
    let served = start_server(&server_config, state, shutdown_signal()).await;

    // 5. Persist whatever was accepted, even if serving failed.
    service.persist()?;
    info!(boards = service.board_count()?, "Boards persisted, exiting");

    served?;
    Ok(())
}

/// Load configuration from `CONWAY_CONFIG` or `conway-config.yaml`.
///
/// A missing file falls back to defaults; environment overrides still
/// apply. Returns the config and a description of where it came from.
fn load_config() -> Result<(ServiceConfig, String), AppError> {
    let path = std::env::var_os("CONWAY_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = ServiceConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        let mut config = ServiceConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok((config, String::from("defaults")))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set.
fn init_logging(config: &ServiceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Open the store selected by `storage.backend`.
fn open_store(
    config: &ServiceConfig,
    log: &Arc<dyn EventLog>,
) -> Result<Arc<dyn BoardStore>, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory board store");
            Ok(Arc::new(MemoryBoardStore::new(Arc::clone(log))))
        }
        StorageBackend::File => {
            let store = FileBoardStore::open(
                config.storage.snapshot_path.clone(),
                config.storage.write_through,
                Arc::clone(log),
            )?;
            info!(
                path = %store.path().display(),
                write_through = config.storage.write_through,
                "Using file board store"
            );
            Ok(Arc::new(store))
        }
    }
}

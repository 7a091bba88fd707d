//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging from the loaded configuration
//! - Open storage
//! - Register signal handlers, bind the listener and serve until terminated
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use thiserror::Error;

use crate::config::AppConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::TerminationSignal;
use crate::observability::logging;
use crate::storage::{self, StorageError};

/// Anything that prevents the service from starting or running.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to initialize storage: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to register signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Run the service with an already loaded configuration until SIGINT or
/// SIGTERM, then drain and return.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    logging::init(&config.observability)?;

    tracing::info!(
        env = %config.env,
        address = %config.http_server.address,
        backend = ?config.storage.backend,
        "Configuration loaded"
    );

    let storage = storage::open(&config.storage).await?;
    tracing::info!(env = %config.env, "Storage initialized successfully");

    let signal = TerminationSignal::install().map_err(StartupError::Signal)?;
    let server = HttpServer::new(config, storage);
    let listener = server.bind().await?;

    server.run(listener, signal.recv()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

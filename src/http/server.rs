//! HTTP server and lifecycle control.
//!
//! # Responsibilities
//! - Build the axum Router with handlers and middleware
//! - Bind the configured address
//! - Run the accept loop (connection.rs) on a background task while the
//!   caller's task waits for shutdown
//! - Drain in-flight requests within a fixed deadline, abort the rest, stop
//!
//! # Design Decisions
//! - The accept loop never runs on the task awaiting termination
//! - An accept loop that dies before shutdown is a fatal error, not a drain
//! - Drain errors and deadline overruns are logged; `run` still returns Ok
//! - `Stopped` is only published once no connection task is left running

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinError;

use crate::config::AppConfig;
use crate::http::connection::{serve_connections, ConnectionControl, DrainOutcome};
use crate::lifecycle::{LifecycleState, StateHandle};
use crate::routing;
use crate::storage::Storage;

/// How long in-flight requests may run once draining starts.
pub const DRAIN_DEADLINE: Duration = Duration::from_secs(5);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server stopped unexpectedly: {0}")]
    Serve(#[from] io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] JoinError),
}

/// HTTP server for the users API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    drain_deadline: Duration,
    state: StateHandle,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: AppConfig, storage: Arc<dyn Storage>) -> Self {
        let router = routing::build_router(AppState { storage });
        Self {
            router,
            config,
            drain_deadline: DRAIN_DEADLINE,
            state: StateHandle::new(),
        }
    }

    /// Replace the drain deadline.
    pub fn with_drain_deadline(mut self, deadline: Duration) -> Self {
        self.drain_deadline = deadline;
        self
    }

    /// Bind the address from configuration.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = &self.config.http_server.address;
        TcpListener::bind(address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })
    }

    /// Observe lifecycle transitions.
    pub fn state(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Serve on `listener` until `shutdown` resolves, then drain.
    ///
    /// Returns once the server is stopped: every connection has either
    /// finished or been aborted at the drain deadline. Only an accept loop
    /// that dies before `shutdown` resolves is an error.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future + Send,
    {
        let addr = listener.local_addr()?;
        let (stop_tx, stop) = oneshot::channel();
        let (force_tx, force) = oneshot::channel();

        let mut server = tokio::spawn(serve_connections(
            listener,
            self.router,
            ConnectionControl { stop, force },
        ));

        self.state.advance(LifecycleState::Listening);
        tracing::info!(address = %addr, env = %self.config.env, "Server started");

        tokio::select! {
            _ = shutdown => {}
            result = &mut server => {
                self.state.advance(LifecycleState::Stopped);
                let error = match result {
                    Ok(_) => ServerError::Serve(io::Error::other("accept loop exited")),
                    Err(error) => ServerError::Task(error),
                };
                tracing::error!(%error, "Server failed before shutdown");
                return Err(error);
            }
        }

        self.state.advance(LifecycleState::Draining);
        tracing::info!(deadline = ?self.drain_deadline, "Shutting down the server");
        let _ = stop_tx.send(());

        let outcome = match tokio::time::timeout(self.drain_deadline, &mut server).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    deadline = ?self.drain_deadline,
                    "Drain deadline exceeded, closing remaining connections"
                );
                let _ = force_tx.send(());
                server.await
            }
        };

        match outcome {
            Ok(DrainOutcome::Drained) => tracing::info!("Server shutdown successfully"),
            Ok(DrainOutcome::Forced(open)) => {
                tracing::warn!(aborted = open, "Server shutdown with aborted connections");
            }
            Err(error) => tracing::error!(%error, "Server task failed while draining"),
        }

        self.state.advance(LifecycleState::Stopped);
        Ok(())
    }
}

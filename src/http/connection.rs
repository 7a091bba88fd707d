//! Accept loop and per-connection serving.
//!
//! # Responsibilities
//! - Accept TCP connections until told to stop
//! - Serve each HTTP/1.1 connection on its own task
//! - On drain, stop accepting and let each connection finish its current
//!   request before closing
//! - On force, abort every connection task still running
//!
//! # Design Decisions
//! - Connection tasks live in a `JoinSet` owned by the accept loop
//! - HTTP/1.1 only: handlers are polled on the connection task itself, so
//!   aborting that task also cancels the request it was serving
//! - Accept errors are logged and retried after a short pause

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinSet;

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Control side of a running accept loop.
pub struct ConnectionControl {
    /// Stop accepting and start draining.
    pub stop: oneshot::Receiver<()>,
    /// Abort every connection still open.
    pub force: oneshot::Receiver<()>,
}

/// How the accept loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every connection finished on its own.
    Drained,
    /// Remaining connections were aborted; carries how many.
    Forced(usize),
}

/// Accept connections on `listener` until `control.stop` fires, then drain.
pub async fn serve_connections(
    listener: TcpListener,
    router: Router,
    control: ConnectionControl,
) -> DrainOutcome {
    let ConnectionControl { mut stop, mut force } = control;
    let (drain_tx, drain_rx) = watch::channel(());
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = &mut stop => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    connections.spawn(serve_connection(stream, peer, router.clone(), drain_rx.clone()));
                }
                Err(error) => {
                    tracing::warn!(%error, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    drop(listener);
    let _ = drain_tx.send(());
    tracing::debug!(open = connections.len(), "Listener closed, draining connections");

    let forced = loop {
        tokio::select! {
            joined = connections.join_next() => {
                if joined.is_none() {
                    break false;
                }
            }
            _ = &mut force => break true,
        }
    };

    if forced {
        let open = connections.len();
        connections.shutdown().await;
        DrainOutcome::Forced(open)
    } else {
        DrainOutcome::Drained
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Router,
    mut draining: watch::Receiver<()>,
) {
    if let Err(error) = stream.set_nodelay(true) {
        tracing::debug!(peer = %peer, %error, "Failed to set TCP_NODELAY");
    }

    let connection = http1::Builder::new()
        .serve_connection(TokioIo::new(stream), TowerToHyperService::new(router));
    tokio::pin!(connection);

    let mut closing = false;
    loop {
        tokio::select! {
            result = connection.as_mut() => {
                if let Err(error) = result {
                    tracing::debug!(peer = %peer, %error, "Connection closed with error");
                }
                break;
            }
            _ = draining.changed(), if !closing => {
                closing = true;
                connection.as_mut().graceful_shutdown();
            }
        }
    }
}

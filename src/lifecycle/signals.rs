//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers registered once at startup; the first SIGINT/SIGTERM lands in a
//!   single-slot channel and later ones are dropped
//! - The main task does nothing but wait on that channel

use tokio::sync::mpsc;

/// Which signal asked the process to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationKind {
    Interrupt,
    Terminate,
}

/// Receiving end of the termination notification.
#[derive(Debug)]
pub struct TerminationSignal {
    rx: mpsc::Receiver<TerminationKind>,
}

impl TerminationSignal {
    /// Register SIGINT and SIGTERM handlers. Must be called from within a
    /// Tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel(1);

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut interrupt = signal(SignalKind::interrupt())?;
            let mut terminate = signal(SignalKind::terminate())?;
            tokio::spawn(async move {
                loop {
                    let kind = tokio::select! {
                        Some(()) = interrupt.recv() => TerminationKind::Interrupt,
                        Some(()) = terminate.recv() => TerminationKind::Terminate,
                        else => break,
                    };
                    if tx.try_send(kind).is_err() && tx.is_closed() {
                        break;
                    }
                }
            });
        }

        #[cfg(not(unix))]
        {
            tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    if tx.try_send(TerminationKind::Interrupt).is_err() && tx.is_closed() {
                        break;
                    }
                }
            });
        }

        Ok(Self { rx })
    }

    /// Build a signal fed by the returned sender instead of the OS.
    pub fn channel() -> (mpsc::Sender<TerminationKind>, Self) {
        let (tx, rx) = mpsc::channel(1);
        (tx, Self { rx })
    }

    /// Wait for the first termination request.
    ///
    /// Resolves with `None` if the feeding side went away without sending.
    pub async fn recv(mut self) -> Option<TerminationKind> {
        let kind = self.rx.recv().await;
        if let Some(kind) = kind {
            tracing::info!(signal = ?kind, "Shutdown signal received");
        }
        kind
    }
}

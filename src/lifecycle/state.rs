//! Server lifecycle state machine.

use std::fmt;

use tokio::sync::watch;

/// Where the server is in its life.
///
/// Transitions only move forward:
/// `Created → Listening → Draining → Stopped`. A failed start may jump
/// straight from `Created` or `Listening` to `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Created,
    Listening,
    Draining,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Listening => "listening",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Publishes lifecycle transitions to any number of observers.
#[derive(Debug)]
pub struct StateHandle {
    tx: watch::Sender<LifecycleState>,
}

impl StateHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Created);
        Self { tx }
    }

    /// Current state.
    pub fn current(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// Observe transitions.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }

    /// Move to `next`. Backward moves are ignored and return false.
    pub fn advance(&self, next: LifecycleState) -> bool {
        let moved = self.tx.send_if_modified(|state| {
            if next > *state {
                *state = next;
                true
            } else {
                false
            }
        });
        if moved {
            tracing::debug!(state = %next, "Lifecycle transition");
        }
        moved
    }
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new()
    }
}

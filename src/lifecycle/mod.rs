//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Logging → Storage → Bind listener → Serve in background task
//!
//! Main task:
//!     Wait on TerminationSignal (signals.rs) or Shutdown (shutdown.rs)
//!
//! Drain (http/server.rs):
//!     Stop accepting → wait for in-flight requests (5s max) → abandon rest → exit
//!
//! State (state.rs):
//!     Created → Listening → Draining → Stopped
//! ```
//!
//! # Design Decisions
//! - Fail fast: config, storage or bind errors are fatal, no partial startup
//! - Errors while draining are logged, never escalated
//! - Shutdown has a deadline: remaining connections are abandoned after it

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use shutdown::Shutdown;
pub use signals::{TerminationKind, TerminationSignal};
pub use state::{LifecycleState, StateHandle};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, storage and lifecycle emit tracing events
//!     → logging.rs (subscriber: env filter + fmt layer)
//!     → stdout, pretty or JSON
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through the request span
//! - Logging is advisory: nothing branches on whether an event was recorded

pub mod logging;

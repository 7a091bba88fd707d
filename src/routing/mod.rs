//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (static table lookup)
//!     → matched handler, or axum's default 404/405
//! ```
//!
//! # Design Decisions
//! - Routes fixed at startup, immutable at runtime
//! - Literal segments plus a single `{id}` parameter; no wildcards
//! - Unmatched requests keep the framework's default response

pub mod router;

pub use router::build_router;

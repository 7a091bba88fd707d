//! Users API Library
//!
//! Create/read HTTP service for user records on a pluggable store.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;
pub mod storage;
pub mod users;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::{Storage, StorageError};

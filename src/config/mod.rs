//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), path from --config or CONFIG_PATH
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to logging, storage and the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Loading is all-or-nothing: any error aborts startup
//! - Optional sections have defaults; `env` and `http_server` are required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::HttpServerConfig;
pub use schema::ObservabilityConfig;
pub use schema::StorageConfig;
pub use schema::{LogFormat, StorageBackend};

//! Storage port for user records.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → Arc<dyn Storage> (shared by every request task)
//!     → sqlite.rs (file-backed, sqlx pool)  or  memory.rs (concurrent map)
//!     → Result<_, StorageError>, propagated untouched
//! ```
//!
//! # Design Decisions
//! - One logical unit of work per call; no caching, no retries
//! - The store assigns identifiers; callers never invent them
//! - Listing either returns every user or an error, never a prefix

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};
use crate::users::validation::{AGE_MAX, AGE_MIN};
use crate::users::{User, UserId};

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Errors raised by storage implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No record has the requested identifier.
    #[error("no user found with id {id}")]
    NotFound { id: UserId },

    /// The underlying store failed (I/O, constraint violation, connectivity).
    #[error("{message}")]
    Persistence { message: String },
}

impl StorageError {
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        Self::persistence(error.to_string())
    }
}

/// Persistence capabilities required by the user handlers.
///
/// Implementations must be safe to share across concurrent request tasks,
/// and identifier assignment must never hand out the same id twice.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a user and return the newly assigned identifier (> 0).
    async fn create_user(&self, name: &str, email: &str, age: i64) -> Result<UserId, StorageError>;

    /// Fetch one user.
    async fn get_user_by_id(&self, id: UserId) -> Result<User, StorageError>;

    /// Fetch every user, ordered by identifier ascending.
    async fn get_users(&self) -> Result<Vec<User>, StorageError>;
}

/// Open the backend selected in configuration.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match config.backend {
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStorage::open(&config.path).await?)),
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}

/// Constraints every backend enforces on insert, mirroring the field rules.
pub(crate) fn check_insert(name: &str, email: &str, age: i64) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::persistence("constraint failed: name must not be empty"));
    }
    if email.is_empty() {
        return Err(StorageError::persistence("constraint failed: email must not be empty"));
    }
    if age < AGE_MIN {
        return Err(StorageError::persistence("constraint failed: age must not be negative"));
    }
    if age > AGE_MAX {
        return Err(StorageError::persistence(format!(
            "constraint failed: age must not exceed {AGE_MAX}"
        )));
    }
    Ok(())
}

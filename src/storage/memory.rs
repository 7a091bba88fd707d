//! In-process storage backed by a concurrent map.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::storage::{check_insert, Storage, StorageError};
use crate::users::{User, UserId};

/// A thread-safe, non-durable user store.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    users: Arc<DashMap<UserId, User>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStorage {
    /// Create an empty store. The first identifier handed out is 1.
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, name: &str, email: &str, age: i64) -> Result<UserId, StorageError> {
        check_insert(name, email, age)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                age,
            },
        );
        Ok(id)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, StorageError> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StorageError::NotFound { id })
    }

    async fn get_users(&self) -> Result<Vec<User>, StorageError> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }
}

//! File-backed storage on SQLite.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::storage::{check_insert, Storage, StorageError};
use crate::users::{User, UserId};

const MAX_CONNECTIONS: u32 = 5;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (name <> ''),
    email TEXT NOT NULL CHECK (email <> ''),
    age INTEGER NOT NULL CHECK (age BETWEEN 0 AND 150)
)";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    age: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            age: row.age,
        }
    }
}

/// User store on a pooled SQLite database file.
#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) the database at `path` and ensure the
    /// `users` table exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::persistence(format!(
                    "failed to create storage directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        tracing::info!(path = %path.display(), "SQLite storage ready");
        Ok(Self { pool })
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_user(&self, name: &str, email: &str, age: i64) -> Result<UserId, StorageError> {
        check_insert(name, email, age)?;

        let result = sqlx::query("INSERT INTO users (name, email, age) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, StorageError> {
        sqlx::query_as::<_, UserRow>("SELECT id, name, email, age FROM users WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from)
            .ok_or(StorageError::NotFound { id })
    }

    async fn get_users(&self) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email, age FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_table_rejects_age_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::open(dir.path().join("users.db")).await.unwrap();

        for age in [-1_i64, 151] {
            let inserted = sqlx::query("INSERT INTO users (name, email, age) VALUES (?, ?, ?)")
                .bind("Ada")
                .bind("ada@example.com")
                .bind(age)
                .execute(&storage.pool)
                .await;
            assert!(inserted.is_err(), "age {age} passed the table check");
        }

        let boundary = sqlx::query("INSERT INTO users (name, email, age) VALUES ('Ada', 'ada@example.com', 150)")
            .execute(&storage.pool)
            .await;
        assert!(boundary.is_ok());
    }
}

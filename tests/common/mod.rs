//! Shared utilities for integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use users_api::config::AppConfig;
use users_api::http::{HttpServer, ServerError};
use users_api::lifecycle::{LifecycleState, Shutdown};
use users_api::storage::{MemoryStorage, Storage, StorageError};
use users_api::users::{User, UserId};

/// A server running on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub shutdown: Shutdown,
    pub state: watch::Receiver<LifecycleState>,
    pub handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    /// Trigger shutdown and wait for `run` to return.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        self.handle.await.unwrap()
    }
}

/// Start a server on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(storage: Arc<dyn Storage>) -> TestServer {
    start_server_with_deadline(storage, users_api::http::DRAIN_DEADLINE).await
}

/// Start a server with a custom drain deadline.
pub async fn start_server_with_deadline(
    storage: Arc<dyn Storage>,
    deadline: Duration,
) -> TestServer {
    let server = HttpServer::new(AppConfig::for_address("127.0.0.1:0"), storage)
        .with_drain_deadline(deadline);
    let listener = server.bind().await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let shutdown = Shutdown::new();
    let mut state = server.state();
    let signalled = shutdown.signalled();
    let handle = tokio::spawn(async move { server.run(listener, signalled).await });

    state
        .wait_for(|s| *s == LifecycleState::Listening)
        .await
        .unwrap();

    TestServer {
        base_url,
        shutdown,
        state,
        handle,
    }
}

/// Storage that sleeps before every operation.
#[allow(dead_code)]
pub struct SlowStorage {
    inner: MemoryStorage,
    delay: Duration,
}

#[allow(dead_code)]
impl SlowStorage {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStorage::new(),
            delay,
        }
    }

    /// Handle on the records that actually reached the store.
    pub fn records(&self) -> MemoryStorage {
        self.inner.clone()
    }
}

#[async_trait]
impl Storage for SlowStorage {
    async fn create_user(&self, name: &str, email: &str, age: i64) -> Result<UserId, StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create_user(name, email, age).await
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_user_by_id(id).await
    }

    async fn get_users(&self) -> Result<Vec<User>, StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_users().await
    }
}

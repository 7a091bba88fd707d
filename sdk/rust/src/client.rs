use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status and an error envelope.
    #[error("users API returned {status}: {error}")]
    Api { status: StatusCode, error: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Body(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub struct UsersClient {
    client: Client,
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a user, returning the assigned id.
    pub async fn create_user(&self, user: &NewUser) -> Result<CreatedUser, ClientError> {
        let resp = self
            .client
            .post(format!("{}/api/users", self.base_url))
            .json(user)
            .send()
            .await?;
        decode(resp).await
    }

    /// Send a raw create body, for exercising the decoder.
    pub async fn create_user_raw(&self, body: &str) -> Result<CreatedUser, ClientError> {
        let resp = self
            .client
            .post(format!("{}/api/users", self.base_url))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await?;
        decode(resp).await
    }

    /// Fetch one user. `id` is sent as-is so malformed ids can be tested.
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/users/{}", self.base_url, id))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/users", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let error = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| envelope.error)
            .unwrap_or(text);
        return Err(ClientError::Api { status, error });
    }

    Ok(serde_json::from_str(&text)?)
}

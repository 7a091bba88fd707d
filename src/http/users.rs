//! User handlers.
//!
//! | Method | Path              | Success               |
//! |--------|-------------------|-----------------------|
//! | POST   | `/api/users`      | 201 `{"id": N}`       |
//! | GET    | `/api/users/{id}` | 200 user              |
//! | GET    | `/api/users`      | 200 array of users    |
//!
//! Decode and validation failures are 400. Every storage failure is 500 with
//! the storage error's message, including "no user found".
// TODO: map StorageError::NotFound to 404 once clients stop relying on 500.

use std::num::ParseIntError;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use thiserror::Error;

use crate::http::response::{write_error, write_json, ErrorResponse};
use crate::http::server::AppState;
use crate::users::{validate, CreateUserRequest, CreatedUser, UserId};

/// Request input that never reaches validation. Always a 400.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty body")]
    EmptyBody,

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid user id {raw:?}: {source}")]
    InvalidId {
        raw: String,
        #[source]
        source: ParseIntError,
    },
}

/// Decode a create request body.
///
/// A body holding nothing but whitespace counts as empty.
pub fn decode_create(body: &[u8]) -> Result<CreateUserRequest, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Parse the `{id}` path segment.
pub fn parse_id(raw: &str) -> Result<UserId, DecodeError> {
    raw.parse::<UserId>().map_err(|source| DecodeError::InvalidId {
        raw: raw.to_string(),
        source,
    })
}

/// `POST /api/users`
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Response {
    tracing::info!("Creating user");

    let request = match decode_create(&body) {
        Ok(request) => request,
        Err(error) => {
            tracing::info!(%error, "Rejected create request body");
            return write_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let new_user = match validate(&request) {
        Ok(user) => user,
        Err(errors) => {
            tracing::info!(error = %errors, "Create request failed validation");
            return write_json(StatusCode::BAD_REQUEST, &ErrorResponse::validation(&errors));
        }
    };

    match state
        .storage
        .create_user(&new_user.name, &new_user.email, new_user.age)
        .await
    {
        Ok(id) => {
            tracing::info!(user_id = id, "User created successfully");
            write_json(StatusCode::CREATED, &CreatedUser { id })
        }
        Err(error) => {
            tracing::error!(%error, "Failed to create user");
            write_error(StatusCode::INTERNAL_SERVER_ERROR, error)
        }
    }
}

/// `GET /api/users/{id}`
pub async fn get_user_by_id(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    tracing::info!(id = %raw_id, "Getting a user");

    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(error) => {
            tracing::info!(%error, "Rejected user id");
            return write_error(StatusCode::BAD_REQUEST, error);
        }
    };

    match state.storage.get_user_by_id(id).await {
        Ok(user) => {
            tracing::info!(id, "User fetched");
            write_json(StatusCode::OK, &user)
        }
        Err(error) => {
            tracing::error!(id, %error, "Error getting user");
            write_error(StatusCode::INTERNAL_SERVER_ERROR, error)
        }
    }
}

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> Response {
    tracing::info!("Listing users");

    match state.storage.get_users().await {
        Ok(users) => {
            tracing::info!(count = users.len(), "Users listed");
            write_json(StatusCode::OK, &users)
        }
        Err(error) => {
            tracing::error!(%error, "Error listing users");
            write_error(StatusCode::INTERNAL_SERVER_ERROR, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_and_blank_bodies() {
        for body in [&b""[..], b" \n\t"] {
            let err = decode_create(body).unwrap_err();
            assert!(matches!(err, DecodeError::EmptyBody));
            assert_eq!(err.to_string(), "empty body");
        }
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode_create(b"{\"name\":").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_decode_wrong_type() {
        let err = decode_create(br#"{"name":"Ada","email":"a@b.io","age":"old"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_decode_missing_fields_defaults() {
        let request = decode_create(b"{}").unwrap();
        assert!(request.name.is_empty());
        assert!(request.email.is_empty());
        assert_eq!(request.age, None);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("").is_err());
        assert!(parse_id("1.5").is_err());

        match parse_id("abc") {
            Err(DecodeError::InvalidId { raw, .. }) => assert_eq!(raw, "abc"),
            other => panic!("expected an invalid id error, got {other:?}"),
        }
        assert!(parse_id("abc").unwrap_err().to_string().contains("\"abc\""));
    }
}

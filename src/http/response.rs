//! Response writing.
//!
//! # Responsibilities
//! - Serialize success payloads verbatim as JSON
//! - Wrap failures in the `{"status":"Error","error":...}` envelope
//! - Join validation violations into one message, in rule order
//!
//! # Design Decisions
//! - Every body is `application/json`
//! - A payload that fails to serialize is logged and sent with an empty body;
//!   there is no second attempt

use std::fmt::Display;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::users::ValidationErrors;

/// Outcome marker in the envelope. Only failures carry an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "Error")]
    Error,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub error: String,
}

impl ErrorResponse {
    /// Envelope around any error's message.
    pub fn general(error: impl Display) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: error.to_string(),
        }
    }

    /// Envelope listing every field violation, comma separated.
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::general(errors)
    }
}

/// Serialize `payload` as the body of a response with `status`.
pub fn write_json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, status = %status, "Failed to serialize response body");
            status.into_response()
        }
    }
}

/// Shorthand for an error envelope response.
pub fn write_error(status: StatusCode, error: impl Display) -> Response {
    write_json(status, &ErrorResponse::general(error))
}

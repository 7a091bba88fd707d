//! User data types.

use serde::{Deserialize, Serialize};

/// Store-assigned user identifier. Always > 0 once a user exists.
pub type UserId = i64;

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Body of `POST /api/users` as sent by the client.
///
/// Missing fields decode to their empty form so that the field rules, not
/// the decoder, report them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<i64>,
}

/// A create request that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Response body of a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: UserId,
}

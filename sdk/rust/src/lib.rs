//! Typed client for the users API.

mod client;

pub use client::{ClientError, CreatedUser, NewUser, User, UsersClient};

//! User resource model.
//!
//! # Data Flow
//! ```text
//! POST body
//!     → CreateUserRequest (decoded, unvalidated)
//!     → validation.rs (declared field rules)
//!     → NewUser (validated)
//!     → Storage::create_user → identifier
//!
//! Storage::get_user_by_id / get_users
//!     → User (id assigned by storage)
//! ```

pub mod types;
pub mod validation;

pub use types::{CreateUserRequest, CreatedUser, NewUser, User, UserId};
pub use validation::{validate, FieldViolation, Rule, ValidationErrors};

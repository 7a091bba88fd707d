//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (lifecycle, drain deadline)
//!     → connection.rs (accept loop, one task per connection)
//!     → request.rs (assign / propagate x-request-id)
//!     → routing (method + path → handler)
//!     → users.rs (decode, validate, call storage)
//!     → response.rs (status + JSON body or error envelope)
//!     → Send to client
//! ```

pub mod connection;
pub mod request;
pub mod response;
pub mod server;
pub mod users;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ErrorResponse, ResponseStatus};
pub use users::DecodeError;
pub use server::{AppState, HttpServer, ServerError, DRAIN_DEADLINE};

//! HTTP API.
//!
//! Handlers run the synchronous core on the blocking pool and translate
//! [`netscaff_core::error::ScaffError`] into JSON error bodies.

pub mod error;
mod handlers;
mod routes;
mod state;
mod workspace;

pub use error::{ApiError, ApiJson, ApiResult};
pub use routes::router;
pub use state::AppState;
pub use workspace::Workspace;

/// Response header set on a download whose scaffold had failed steps.
pub const PARTIAL_HEADER: &str = "x-scaffold-partial";

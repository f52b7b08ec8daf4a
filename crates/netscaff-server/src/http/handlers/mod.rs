//! API route handlers

pub mod dev;
pub mod dotnet;
pub mod health;
pub mod project;

use netscaff_core::error::ScaffResult;

use super::error::ApiResult;

/// Run a synchronous core call on the blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> ScaffResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}

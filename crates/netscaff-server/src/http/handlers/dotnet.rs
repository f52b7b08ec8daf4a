//! SDK status endpoint

use axum::{Json, extract::State};
use tracing::instrument;

use netscaff_core::application::SdkStatus;

use super::blocking;
use crate::http::{ApiResult, AppState};

/// `GET /api/dotnet/status`. A missing SDK is `installed: false`, not an
/// error.
#[instrument(skip_all)]
pub async fn status(State(state): State<AppState>) -> ApiResult<Json<SdkStatus>> {
    let service = state.sdk_service();
    let status = blocking(move || service.status()).await?;
    Ok(Json(status))
}

//! Scaffold download and request validation.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::Response,
    Json,
};
use tokio_util::io::ReaderStream;
use tracing::{info, instrument};

use netscaff_core::{
    application::{ArchivedProject, ValidationReport},
    domain::ScaffoldRequest,
};

use super::blocking;
use crate::http::{ApiError, ApiJson, ApiResult, AppState, PARTIAL_HEADER, Workspace};

/// `POST /api/project/scaffold-download`: scaffold into a fresh workspace
/// and stream back `{Name}.zip`.
#[instrument(skip_all, fields(project = %request.project.name))]
pub async fn scaffold_download(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScaffoldRequest>,
) -> ApiResult<Response> {
    let workspace = Workspace::create(&state.config.workspace.temp_root).await?;

    let service = state.scaffold_service();
    let workdir = workspace.path().to_path_buf();
    let archived = match blocking(move || service.scaffold_archive(&request, &workdir)).await {
        Ok(archived) => archived,
        Err(e) => {
            workspace.discard().await;
            return Err(e);
        }
    };

    let response = match zip_response(&archived).await {
        Ok(response) => response,
        Err(e) => {
            workspace.discard().await;
            return Err(e);
        }
    };

    info!(
        file = %archived.file_name,
        bytes = archived.archive.bytes,
        partial = !archived.report.success,
        "Streaming archive"
    );
    workspace.schedule_cleanup(state.cleanup_delay());
    Ok(response)
}

async fn zip_response(archived: &ArchivedProject) -> ApiResult<Response> {
    let file = tokio::fs::File::open(&archived.archive.path).await?;
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        archived.file_name
    ))
    .map_err(ApiError::internal)?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, archived.archive.bytes);
    if !archived.report.success {
        builder = builder.header(PARTIAL_HEADER, "true");
    }

    builder
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(ApiError::internal)
}

/// `POST /api/project/validate`: every violation, without touching disk.
pub async fn validate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScaffoldRequest>,
) -> Json<ValidationReport> {
    Json(state.scaffold_service().validate(&request))
}

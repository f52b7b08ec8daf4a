//! Development routes that write straight into `project.outputPath`.
//!
//! Only mounted when `server.dev_endpoints` is on.

use axum::{Json, extract::State};
use tracing::instrument;

use netscaff_core::{
    application::{GeneratorKind, ScaffoldReport, StepResult},
    domain::{DomainError, EntityRequest, ScaffoldRequest},
    error::ScaffError,
};

use super::blocking;
use crate::http::{ApiJson, ApiResult, AppState};

pub async fn entity(
    state: State<AppState>,
    request: ApiJson<EntityRequest>,
) -> ApiResult<Json<StepResult>> {
    generate(GeneratorKind::Entity, state, request).await
}

pub async fn command(
    state: State<AppState>,
    request: ApiJson<EntityRequest>,
) -> ApiResult<Json<StepResult>> {
    generate(GeneratorKind::Command, state, request).await
}

pub async fn handler(
    state: State<AppState>,
    request: ApiJson<EntityRequest>,
) -> ApiResult<Json<StepResult>> {
    generate(GeneratorKind::Handler, state, request).await
}

pub async fn repository(
    state: State<AppState>,
    request: ApiJson<EntityRequest>,
) -> ApiResult<Json<StepResult>> {
    generate(GeneratorKind::Repository, state, request).await
}

#[instrument(skip_all, fields(kind = %kind, entity = %request.entity.name))]
async fn generate(
    kind: GeneratorKind,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EntityRequest>,
) -> ApiResult<Json<StepResult>> {
    let service = state.scaffold_service();
    let step = blocking(move || service.generate(kind, &request)).await?;
    Ok(Json(step))
}

/// `POST /api/dev/scaffold`: full scaffold under `project.outputPath`.
#[instrument(skip_all, fields(project = %request.project.name))]
pub async fn scaffold(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScaffoldRequest>,
) -> ApiResult<Json<ScaffoldReport>> {
    let service = state.scaffold_service();
    let report = blocking(move || {
        let parent = request
            .project
            .output_path
            .clone()
            .ok_or(ScaffError::from(DomainError::MissingRequiredField {
                field: "project.outputPath",
            }))?;
        service.scaffold(&request, parent)
    })
    .await?;
    Ok(Json(report))
}

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::export::{ExportError, ExportFormat};
use crate::models::*;
use crate::report::{OutlineSnapshot, ReportError};
use crate::state::{AppState, Projections};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side; clients only see a generic message.
pub(super) fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Outline state conflicts are safe to expose as-is.
pub(super) fn report_error(e: ReportError) -> (StatusCode, String) {
    tracing::warn!("Report conflict: {}", e);
    (StatusCode::CONFLICT, e.to_string())
}

fn export_error(e: ExportError) -> (StatusCode, String) {
    match e {
        ExportError::UnknownFormat(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        e => internal_error(e),
    }
}

pub(super) fn project_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Project not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Project
// ============================================================

pub async fn get_project(
    State(state): State<AppState>,
) -> Result<Json<Submission>, (StatusCode, String)> {
    state.submission().map(Json).ok_or_else(project_not_found)
}

pub async fn submit_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> Result<(StatusCode, Json<Submission>), (StatusCode, Json<ValidationErrors>)> {
    match input.validate() {
        Ok(project) => Ok((StatusCode::CREATED, Json(state.submit(project)))),
        Err(errors) => {
            tracing::warn!("Rejected project submission: {}", errors);
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(errors)))
        }
    }
}

pub async fn get_projections(
    State(state): State<AppState>,
) -> Result<Json<Projections>, (StatusCode, String)> {
    state.projections().map(Json).ok_or_else(project_not_found)
}

// ============================================================
// Report
// ============================================================

pub async fn get_report(State(state): State<AppState>) -> Json<OutlineSnapshot> {
    Json(state.outline().snapshot())
}

pub async fn generate_report(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<OutlineSnapshot>), (StatusCode, String)> {
    state.outline().generate().map_err(report_error)?;
    Ok((StatusCode::CREATED, Json(state.outline().snapshot())))
}

/// Run a full expansion and respond once it has been committed.
///
/// The expansion runs on its own task, so a client that disconnects early
/// does not cut it short.
pub async fn expand_report(
    State(state): State<AppState>,
) -> Result<Json<OutlineSnapshot>, (StatusCode, String)> {
    let expansion = state.outline().begin_expansion().map_err(report_error)?;
    tokio::spawn(expansion.run())
        .await
        .map_err(internal_error)?;
    Ok(Json(state.outline().snapshot()))
}

pub async fn reset_report(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.outline().reset().map_err(report_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Download the outline as a PDF or DOCX attachment.
pub async fn export_report(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let format: ExportFormat = format.parse().map_err(export_error)?;
    let project = state.project().ok_or_else(project_not_found)?;

    let snapshot = state.outline().snapshot();
    if snapshot.sections.is_empty() {
        return Err(report_error(ReportError::NotGenerated));
    }

    let artifact = tokio::task::spawn_blocking(move || {
        format.export(&project.project_name, &snapshot.sections)
    })
    .await
    .map_err(internal_error)?
    .map_err(export_error)?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (header::CONTENT_DISPOSITION, artifact.content_disposition()),
    ];
    Ok((headers, artifact.bytes).into_response())
}

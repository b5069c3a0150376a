use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::models::job::{JobListItem, JobStatus, JobStatusView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartAnalysisRequest {
    pub cv_id: String,
    pub job_description_text: String,
}

#[derive(Debug, Serialize)]
pub struct StartAnalysisResponse {
    pub task_id: Uuid,
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobListItem>,
}

/// POST /api/v1/analysis/start
pub async fn handle_start_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<StartAnalysisRequest>,
) -> Result<(StatusCode, Json<StartAnalysisResponse>), AppError> {
    let job = state
        .orchestrator
        .start(user.id, &req.cv_id, &req.job_description_text)
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(StartAnalysisResponse {
            task_id: job.id,
            status: job.status(),
        }),
    ))
}

/// GET /api/v1/analysis
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs = state.orchestrator.list(user.id).await?;
    Ok(Json(JobListResponse { jobs }))
}

/// GET /api/v1/analysis/status/:task_id
pub async fn handle_analysis_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<String>,
) -> Result<Json<JobStatusView>, AppError> {
    let task_id = Uuid::parse_str(&task_id)
        .map_err(|_| AppError::NotFound(format!("Analysis task {task_id} not found")))?;
    let view = state.orchestrator.status(task_id, user.id).await?;
    Ok(Json(view))
}

/// DELETE /api/v1/analysis/:task_id
/// Always 204, whether or not the task existed.
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Ok(task_id) = Uuid::parse_str(&task_id) {
        state.orchestrator.delete(task_id, user.id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

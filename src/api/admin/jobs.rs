use axum::{
    extract::State,
    routing::put,
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::api::extract::{AppJson, AppPath};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::JobStatus;
use crate::services::JobService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:id/status", put(update_job_status))
}

#[derive(Debug, Deserialize)]
pub struct JobStatusRequest {
    pub status: Option<String>,
}

async fn update_job_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(job_id): AppPath<i32>,
    AppJson(payload): AppJson<JobStatusRequest>,
) -> Result<Json<serde_json::Value>> {
    current_user.require(current_user.can_manage_jobs())?;

    let raw = payload
        .status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;
    let status = JobStatus::parse(&raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid status '{}'. Accepted values: {}",
            raw.trim(),
            JobStatus::accepted()
        ))
    })?;

    JobService::new(state.db.clone())
        .update_status(job_id, status)
        .await?;

    tracing::info!("Job {} set to {} by {}", job_id, status, current_user.username);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Job status updated to {}", status),
    })))
}

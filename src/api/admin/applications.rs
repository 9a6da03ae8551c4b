use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{Application, ApplicationFilter, ApplicationStatus, StatusChange, StatusHistoryEntry};
use crate::services::{resume_content_type, ApplicationService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applications))
        .route("/:id", get(get_application).put(update_application_status))
        .route("/:id/history", get(get_application_history))
        .route("/:id/resume", get(download_resume))
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub success: bool,
    pub applications: Vec<Application>,
    pub count: usize,
}

async fn list_applications(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppQuery(filter): AppQuery<ApplicationFilter>,
) -> Result<Json<ApplicationListResponse>> {
    let scope = current_user.company_scope()?;

    let applications = ApplicationService::new(state.db.clone())
        .list(&filter, scope)
        .await?;

    Ok(Json(ApplicationListResponse {
        success: true,
        count: applications.len(),
        applications,
    }))
}

#[derive(Debug, Serialize)]
pub struct ApplicationDetailResponse {
    pub success: bool,
    pub application: Application,
    pub history: Vec<StatusHistoryEntry>,
}

async fn get_application(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(application_id): AppPath<i32>,
) -> Result<Json<ApplicationDetailResponse>> {
    let service = ApplicationService::new(state.db.clone());
    let application = service
        .get(application_id, current_user.company_scope()?)
        .await?;
    let history = service.history(application_id).await?;

    Ok(Json(ApplicationDetailResponse {
        success: true,
        application,
        history,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
}

impl StatusUpdateRequest {
    pub fn into_change(self, changed_by: &str) -> Result<StatusChange> {
        let raw = self
            .status
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;

        let status = ApplicationStatus::parse(&raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid status '{}'. Accepted values: {}",
                raw.trim(),
                ApplicationStatus::accepted()
            ))
        })?;

        Ok(StatusChange {
            status,
            notes: self.notes.unwrap_or_default(),
            rating: self.rating,
            changed_by: changed_by.to_string(),
        })
    }
}

async fn update_application_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(application_id): AppPath<i32>,
    AppJson(payload): AppJson<StatusUpdateRequest>,
) -> Result<Json<serde_json::Value>> {
    let change = payload.into_change(&current_user.username)?;

    let old_status = ApplicationService::new(state.db.clone())
        .update_status(application_id, &change, current_user.company_scope()?)
        .await?;

    tracing::info!(
        "Application {} status {} -> {} by {}",
        application_id,
        old_status,
        change.status,
        current_user.username
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Application status updated",
        "old_status": old_status,
        "new_status": change.status,
    })))
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<StatusHistoryEntry>,
}

async fn get_application_history(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(application_id): AppPath<i32>,
) -> Result<Json<HistoryResponse>> {
    let service = ApplicationService::new(state.db.clone());
    // Existence and company scope
    service
        .get(application_id, current_user.company_scope()?)
        .await?;
    let history = service.history(application_id).await?;

    Ok(Json(HistoryResponse {
        success: true,
        history,
    }))
}

async fn download_resume(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(application_id): AppPath<i32>,
) -> Result<impl IntoResponse> {
    let application = ApplicationService::new(state.db.clone())
        .get(application_id, current_user.company_scope()?)
        .await?;

    let stored_name = application
        .resume_filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::NotFound("No resume on file for this application".to_string()))?;

    let bytes = state.storage.read(&stored_name).await?;

    let headers = [
        (CONTENT_TYPE, resume_content_type(&stored_name)),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", stored_name),
        ),
    ];

    Ok((headers, bytes))
}

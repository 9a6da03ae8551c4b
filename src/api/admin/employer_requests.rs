use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{EmployerRequest, RequestFilter, RequestPriority, RequestStatus, RequestUpdate};
use crate::services::EmployerRequestService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests))
        .route("/:id", put(update_request))
        .route("/:id/assign", put(assign_request))
}

#[derive(Debug, Serialize)]
pub struct RequestListResponse {
    pub success: bool,
    pub requests: Vec<EmployerRequest>,
    pub count: usize,
    pub filters: RequestFilter,
}

async fn list_requests(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppQuery(filter): AppQuery<RequestFilter>,
) -> Result<Json<RequestListResponse>> {
    let requests = EmployerRequestService::new(state.db.clone())
        .list(&filter, current_user.company_scope()?)
        .await?;

    Ok(Json(RequestListResponse {
        success: true,
        count: requests.len(),
        requests,
        filters: filter,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub staff_id: Option<i32>,
    pub notes: Option<String>,
}

async fn assign_request(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(request_id): AppPath<i32>,
    AppJson(payload): AppJson<AssignRequest>,
) -> Result<Json<serde_json::Value>> {
    current_user.require(current_user.can_assign_requests())?;

    let staff_id = payload
        .staff_id
        .ok_or_else(|| AppError::BadRequest("Staff ID is required".to_string()))?;

    let assignee = EmployerRequestService::new(state.db.clone())
        .assign(request_id, staff_id, payload.notes.as_deref().unwrap_or_default())
        .await?;

    tracing::info!(
        "Employer request {} assigned to staff {} by {}",
        request_id,
        staff_id,
        current_user.username
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Request assigned to {}", assignee),
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequestBody {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

impl UpdateRequestBody {
    pub fn into_update(self) -> Result<RequestUpdate> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(RequestStatus::parse(raw).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid status '{}'. Accepted values: {}",
                    raw,
                    RequestStatus::accepted()
                ))
            })?),
        };

        let priority = match self.priority.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(RequestPriority::parse(raw).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid priority '{}'. Accepted values: {}",
                    raw,
                    RequestPriority::accepted()
                ))
            })?),
        };

        Ok(RequestUpdate {
            status,
            priority,
            notes: self.notes,
        })
    }
}

async fn update_request(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(request_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateRequestBody>,
) -> Result<Json<serde_json::Value>> {
    current_user.require(current_user.can_update_requests())?;

    let update = payload.into_update()?;
    EmployerRequestService::new(state.db.clone())
        .update(request_id, &update)
        .await?;

    tracing::info!(
        "Employer request {} updated by {}",
        request_id,
        current_user.username
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Employer request updated",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(status: Option<&str>, priority: Option<&str>) -> UpdateRequestBody {
        UpdateRequestBody {
            status: status.map(String::from),
            priority: priority.map(String::from),
            notes: None,
        }
    }

    #[test]
    fn parses_known_values() {
        let update = body(Some("contacted"), Some("high")).into_update().unwrap();
        assert_eq!(update.status, Some(RequestStatus::Contacted));
        assert_eq!(update.priority, Some(RequestPriority::High));
    }

    #[test]
    fn blank_values_are_ignored() {
        let update = body(Some(""), None).into_update().unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn rejects_unknown_priority() {
        match body(None, Some("critical")).into_update() {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(
                    msg,
                    "Invalid priority 'critical'. Accepted values: low, medium, high, urgent"
                )
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}

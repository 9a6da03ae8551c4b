use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Serialize;

use crate::api::extract::{AppJson, AppPath};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{Staff, StaffInput};
use crate::services::StaffService;
use crate::utils::is_valid_email;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", put(update_staff).delete(delete_staff))
}

fn check_email(input: &StaffInput) -> Result<()> {
    let email = input.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        return Err(AppError::BadRequest(
            "email must be a valid email address".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct StaffListResponse {
    pub success: bool,
    pub staff: Vec<Staff>,
    pub count: usize,
}

async fn list_staff(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<StaffListResponse>> {
    current_user.require(current_user.can_manage_staff())?;

    let staff = StaffService::new(state.db.clone()).list().await?;

    Ok(Json(StaffListResponse {
        success: true,
        count: staff.len(),
        staff,
    }))
}

async fn create_staff(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppJson(input): AppJson<StaffInput>,
) -> Result<Json<serde_json::Value>> {
    current_user.require(current_user.can_manage_staff())?;
    check_email(&input)?;

    let staff_id = StaffService::new(state.db.clone()).create(&input).await?;

    tracing::info!(
        "Staff member {} created by {} (login account: {})",
        staff_id,
        current_user.username,
        input.create_login_account
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Staff member created successfully",
        "staff_id": staff_id,
    })))
}

async fn update_staff(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(staff_id): AppPath<i32>,
    AppJson(input): AppJson<StaffInput>,
) -> Result<Json<serde_json::Value>> {
    current_user.require(current_user.can_manage_staff())?;
    check_email(&input)?;

    StaffService::new(state.db.clone())
        .update(staff_id, &input)
        .await?;

    tracing::info!("Staff member {} updated by {}", staff_id, current_user.username);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Staff member updated successfully",
    })))
}

async fn delete_staff(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(staff_id): AppPath<i32>,
) -> Result<Json<serde_json::Value>> {
    current_user.require(current_user.can_manage_staff())?;

    StaffService::new(state.db.clone()).delete(staff_id).await?;

    tracing::info!("Staff member {} deleted by {}", staff_id, current_user.username);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Staff member deleted successfully",
    })))
}

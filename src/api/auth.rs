use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::extract::AppJson;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::UserProfile;
use crate::services::AuthService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

async fn login(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ))
        }
    };

    let auth_service = AuthService::new(state.db.clone(), state.config.clone());
    let (user, token) = auth_service.authenticate(&username, &password).await?;

    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    tracing::info!("User {} ({}) logged in from {}", user.id, user.role, client);

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
        token,
    }))
}

#[derive(Debug, Serialize)]
pub struct CurrentUserInfo {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub staff_id: Option<i32>,
    pub is_admin: bool,
    pub can_assign_requests: bool,
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: CurrentUserInfo,
}

async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<CurrentUserResponse>> {
    Ok(Json(CurrentUserResponse {
        success: true,
        user: CurrentUserInfo {
            id: current_user.id,
            role: current_user.role.as_str().to_string(),
            is_admin: current_user.is_administrator(),
            can_assign_requests: current_user.can_assign_requests(),
            username: current_user.username,
            staff_id: current_user.staff_id,
            company_name: current_user.company_name,
        },
    }))
}

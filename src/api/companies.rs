use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::Result;
use crate::models::{Company, PlatformStats};
use crate::services::CompanyService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies))
        .route("/stats", get(platform_stats))
        .route("/test", get(test_connection))
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub success: bool,
    pub companies: Vec<Company>,
}

async fn list_companies(State(state): State<AppState>) -> Result<Json<CompanyListResponse>> {
    let companies = CompanyService::new(state.db.clone()).list_companies().await?;

    Ok(Json(CompanyListResponse {
        success: true,
        companies,
    }))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: PlatformStats,
}

async fn platform_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = CompanyService::new(state.db.clone()).platform_stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

#[derive(Debug, Serialize)]
pub struct ConnectionCheck {
    pub success: bool,
    pub message: String,
    pub active_jobs: i64,
}

async fn test_connection(State(state): State<AppState>) -> Result<Json<ConnectionCheck>> {
    let active_jobs = CompanyService::new(state.db.clone()).active_job_count().await?;

    Ok(Json(ConnectionCheck {
        success: true,
        message: "Database connection working".to_string(),
        active_jobs,
    }))
}

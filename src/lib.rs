// Flexi-Careers job board service

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, Result};

use crate::config::Config;
use crate::db::Database;
use crate::services::ResumeStorage;

/// Room for the text fields of a multipart form on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub storage: ResumeStorage,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let storage = ResumeStorage::from_config(&config.uploads);
        Self {
            db,
            config,
            storage,
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    match config.cors.allowed_origins() {
        None => layer.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
    }
}

/// The full application router: public API, admin API and health checks.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.uploads.max_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health_check))
        .nest("/api", api::public_routes())
        .nest("/admin/api", api::admin_routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn api_info() -> Json<Value> {
    Json(json!({
        "success": true,
        "name": "Flexi-Careers API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "jobs": "/api/jobs",
            "companies": "/api/companies",
            "stats": "/api/stats",
            "employer_request": "/api/employer-request",
            "login": "/api/login",
            "admin": "/admin/api",
            "health": "/health",
        },
    }))
}

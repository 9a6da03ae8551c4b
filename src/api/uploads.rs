use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::api::jobs::INVALID_RESUME_TYPE;
use crate::error::{AppError, Result};
use crate::services::ResumeStorage;
use crate::utils::is_allowed_resume;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/resume", post(upload_resume))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub stored_filename: String,
    pub file_path: String,
    pub file_size: u64,
}

async fn upload_resume(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    // Anything that is not a form upload carries no file.
    let mut multipart =
        multipart.map_err(|_| AppError::BadRequest("No file uploaded".to_string()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::BadRequest("No file selected".to_string()));
        }
        if !is_allowed_resume(&filename) {
            return Err(AppError::BadRequest(INVALID_RESUME_TYPE.to_string()));
        }

        let stored_filename = ResumeStorage::upload_file_name(&filename);
        let file_size = state.storage.write(&stored_filename, field).await?;
        let file_path = state.storage.path_of(&stored_filename)?;

        tracing::info!("Resume uploaded: {} ({} bytes)", stored_filename, file_size);

        return Ok(Json(UploadResponse {
            success: true,
            filename,
            stored_filename,
            file_path: file_path.display().to_string(),
            file_size,
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::extract::AppJson;
use crate::error::{AppError, Result};
use crate::models::NewEmployerRequest;
use crate::services::EmployerRequestService;
use crate::utils::is_valid_email;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit_request))
}

/// Talent request as posted by the "hire talent" form.
#[derive(Debug, Default, Deserialize)]
pub struct TalentRequestForm {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_type: Option<String>,
    pub role_title: Option<String>,
    pub time_commitment: Option<String>,
    pub timeline: Option<String>,
    pub requirements: Option<String>,
    pub budget_range: Option<String>,
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl TalentRequestForm {
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("company_name", &self.company_name),
            ("contact_name", &self.contact_name),
            ("email", &self.email),
            ("role_type", &self.role_type),
            ("requirements", &self.requirements),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map(str::trim).unwrap_or_default().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn into_request(self) -> Result<NewEmployerRequest> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            tracing::warn!("Employer request missing fields: {:?}", missing);
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let email = text(self.email);
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest(
                "email must be a valid email address".to_string(),
            ));
        }

        Ok(NewEmployerRequest {
            company_name: text(self.company_name),
            contact_name: text(self.contact_name),
            email,
            phone: text(self.phone),
            role_type: text(self.role_type),
            role_title: text(self.role_title),
            time_commitment: text(self.time_commitment),
            timeline: text(self.timeline),
            requirements: text(self.requirements),
            budget_range: text(self.budget_range),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RequestCreated {
    pub success: bool,
    pub message: String,
    pub request_id: i32,
}

async fn submit_request(
    State(state): State<AppState>,
    AppJson(form): AppJson<TalentRequestForm>,
) -> Result<Json<RequestCreated>> {
    let request = form.into_request()?;

    let request_id = EmployerRequestService::new(state.db.clone())
        .submit(&request)
        .await?;

    tracing::info!("New employer request submitted: ID {}", request_id);

    Ok(Json(RequestCreated {
        success: true,
        message: "Talent request submitted successfully".to_string(),
        request_id,
    }))
}

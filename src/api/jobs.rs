use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::error::{AppError, Result};
use crate::models::{Job, JobDetail, JobFilter, NewApplication, StoredResume};
use crate::services::{ApplicationService, JobService, ResumeStorage};
use crate::utils::{is_allowed_resume, is_valid_email};
use crate::AppState;

pub const INVALID_RESUME_TYPE: &str =
    "Invalid file type. Only PDF, DOC, and DOCX files are allowed";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs))
        .route("/:id", get(get_job))
        .route("/:id/apply", post(apply_for_job))
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<Job>,
    pub count: usize,
}

async fn list_jobs(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<JobFilter>,
) -> Result<Json<JobListResponse>> {
    let jobs = JobService::new(state.db.clone()).list_jobs(&filter).await?;

    Ok(Json(JobListResponse {
        success: true,
        count: jobs.len(),
        jobs,
    }))
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub success: bool,
    pub job: JobDetail,
}

async fn get_job(
    State(state): State<AppState>,
    AppPath(job_id): AppPath<i32>,
) -> Result<Json<JobDetailResponse>> {
    let job = JobService::new(state.db.clone()).get_job(job_id).await?;

    Ok(Json(JobDetailResponse { success: true, job }))
}

/// Applicant details, from a JSON body or the website's multipart form.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
}

impl ApplicationForm {
    fn field(value: &Option<String>) -> String {
        value.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    /// Checks required fields in order, then the email format.
    pub fn into_application(self, resume: Option<StoredResume>) -> Result<NewApplication> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ];
        for (name, value) in required {
            if Self::field(value).is_empty() {
                return Err(AppError::BadRequest(format!("{} is required", name)));
            }
        }

        if !is_valid_email(&Self::field(&self.email)) {
            return Err(AppError::BadRequest(
                "email must be a valid email address".to_string(),
            ));
        }

        Ok(NewApplication {
            first_name: Self::field(&self.first_name),
            last_name: Self::field(&self.last_name),
            email: Self::field(&self.email),
            phone: Self::field(&self.phone),
            cover_letter: Self::field(&self.cover_letter),
            resume,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationCreated {
    pub success: bool,
    pub message: String,
    pub application_id: i32,
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

async fn apply_for_job(
    State(state): State<AppState>,
    AppPath(job_id): AppPath<i32>,
    request: Request,
) -> Result<Json<ApplicationCreated>> {
    let (form, resume) = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        read_application_form(&state.storage, multipart).await?
    } else {
        let AppJson(form) = AppJson::<ApplicationForm>::from_request(request, &state).await?;
        (form, None)
    };

    let stored_name = resume.as_ref().map(|r| r.stored_filename.clone());
    let outcome = submit_application(&state, job_id, form, resume).await;

    if outcome.is_err() {
        if let Some(name) = &stored_name {
            state.storage.remove(name).await;
        }
    }
    let application_id = outcome?;

    tracing::info!(
        "New application submitted: ID {} for job {}",
        application_id,
        job_id
    );

    Ok(Json(ApplicationCreated {
        success: true,
        message: "Application submitted successfully".to_string(),
        application_id,
    }))
}

async fn submit_application(
    state: &AppState,
    job_id: i32,
    form: ApplicationForm,
    resume: Option<StoredResume>,
) -> Result<i32> {
    let application = form.into_application(resume)?;

    let accepting = JobService::new(state.db.clone())
        .is_accepting_applications(job_id)
        .await?;
    if !accepting {
        return Err(AppError::NotFound(
            "Job not found or no longer active".to_string(),
        ));
    }

    ApplicationService::new(state.db.clone())
        .submit(job_id, &application)
        .await
}

/// Reads the website form. A resume is written to storage as soon as its
/// field arrives and removed again if the rest of the form fails to parse.
async fn read_application_form(
    storage: &ResumeStorage,
    multipart: Multipart,
) -> Result<(ApplicationForm, Option<StoredResume>)> {
    let mut resume: Option<StoredResume> = None;
    let mut form = ApplicationForm::default();

    match read_fields(storage, multipart, &mut form, &mut resume).await {
        Ok(()) => Ok((form, resume)),
        Err(e) => {
            if let Some(stored) = &resume {
                storage.remove(&stored.stored_filename).await;
            }
            Err(e)
        }
    }
}

async fn read_fields(
    storage: &ResumeStorage,
    mut multipart: Multipart,
    form: &mut ApplicationForm,
    resume: &mut Option<StoredResume>,
) -> Result<()> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "resume" => {
                let original = field.file_name().unwrap_or_default().to_string();
                if original.is_empty() {
                    continue;
                }
                if !is_allowed_resume(&original) {
                    return Err(AppError::BadRequest(INVALID_RESUME_TYPE.to_string()));
                }

                if let Some(previous) = resume.take() {
                    storage.remove(&previous.stored_filename).await;
                }

                let stored_filename = ResumeStorage::application_file_name(&original);
                let file_size = storage.write(&stored_filename, field).await?;
                *resume = Some(StoredResume {
                    stored_filename,
                    file_size,
                });
            }
            "firstName" | "first_name" => form.first_name = Some(field.text().await?),
            "lastName" | "last_name" => form.last_name = Some(field.text().await?),
            "email" => form.email = Some(field.text().await?),
            "phone" => form.phone = Some(field.text().await?),
            "coverLetter" | "cover_letter" => form.cover_letter = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    ApplicationStatus {
        Submitted => "submitted",
        Reviewed => "reviewed",
        Interviewing => "interviewing",
        Shortlisted => "shortlisted",
        Rejected => "rejected",
        Hired => "hired",
    }
}

/// Application as listed in the admin panel, with job and company names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: i32,
    pub job_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_filename: Option<String>,
    pub resume_file_size: Option<i32>,
    pub status: String,
    pub rating: Option<i32>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
    pub company_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume: Option<StoredResume>,
}

/// A resume already written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredResume {
    pub stored_filename: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusHistoryEntry {
    pub id: i32,
    pub application_id: i32,
    pub old_status: Option<String>,
    pub new_status: String,
    pub changed_by: Option<String>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: ApplicationStatus,
    pub notes: String,
    pub rating: Option<i32>,
    pub changed_by: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<String>,
    pub job_id: Option<i32>,
    pub company_id: Option<i32>,
}

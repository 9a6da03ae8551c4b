use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Company row with the number of its active jobs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub founded_year: Option<i32>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IndustryCount {
    pub industry: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub active_jobs: i64,
    pub companies: i64,
    pub total_applications: i64,
    pub recent_applications: i64,
    pub top_industries: Vec<IndustryCount>,
}

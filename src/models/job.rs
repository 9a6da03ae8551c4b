use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::parse_skills;

text_enum! {
    JobStatus {
        Active => "active",
        Paused => "paused",
        Closed => "closed",
    }
}

/// A job joined with its company and application count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: String,
    pub salary_type: String,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub experience_level: Option<String>,
    pub hours_per_week: Option<String>,
    pub duration: Option<String>,
    #[serde(skip_serializing)]
    pub skills: Option<String>,
    pub benefits: Option<String>,
    pub status: String,
    pub posted_date: NaiveDate,
    pub application_deadline: Option<NaiveDate>,
    pub company_id: i32,
    pub company_name: String,
    pub company_description: Option<String>,
    pub industry: Option<String>,
    pub company_website: Option<String>,
    pub company_logo: Option<String>,
    pub company_size: Option<String>,
    pub company_location: Option<String>,
    pub founded_year: Option<i32>,
    pub application_count: i64,
}

/// API shape of a job: the row with `skills` decoded from its JSON text.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    #[serde(flatten)]
    pub row: JobRow,
    pub skills: Vec<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        let skills = parse_skills(row.skills.as_deref());
        Self { row, skills }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobSkill {
    pub skill_name: String,
    pub is_required: bool,
    pub proficiency_level: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub required_skills: Vec<JobSkill>,
}

/// Optional filters for the public job listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub is_remote: Option<String>,
    pub search: Option<String>,
    pub company_id: Option<i32>,
}

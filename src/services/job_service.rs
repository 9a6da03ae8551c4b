// Job service - public job listing and detail queries
use sqlx::{Postgres, QueryBuilder};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Job, JobDetail, JobFilter, JobRow, JobSkill, JobStatus};
use crate::utils::{like_pattern, non_blank};

pub struct JobService {
    db: Database,
}

const JOB_SELECT: &str = r#"
    SELECT
        j.id,
        j.title,
        j.description,
        j.requirements,
        j.responsibilities,
        j.salary_min,
        j.salary_max,
        j.salary_currency,
        j.salary_type,
        j.job_type,
        j.location,
        j.is_remote,
        j.experience_level,
        j.hours_per_week,
        j.duration,
        j.skills,
        j.benefits,
        j.status,
        j.posted_date,
        j.application_deadline,
        c.id AS company_id,
        c.name AS company_name,
        c.description AS company_description,
        c.industry,
        c.website AS company_website,
        c.logo_url AS company_logo,
        c.size AS company_size,
        c.location AS company_location,
        c.founded_year,
        (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id) AS application_count
    FROM jobs j
    JOIN companies c ON j.company_id = c.id
"#;

/// Builds the active-job listing query. Every filter value is bound, never inlined.
pub fn job_list_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(JOB_SELECT);
    qb.push(" WHERE j.status = ");
    qb.push_bind(JobStatus::Active.as_str());

    if let Some(location) = non_blank(&filter.location) {
        qb.push(" AND (j.location ILIKE ");
        qb.push_bind(like_pattern(location));
        qb.push(" OR j.is_remote = true)");
    }

    if let Some(job_type) = non_blank(&filter.job_type) {
        qb.push(" AND j.job_type = ");
        qb.push_bind(job_type.to_string());
    }

    if let Some(level) = non_blank(&filter.experience_level) {
        qb.push(" AND j.experience_level = ");
        qb.push_bind(level.to_string());
    }

    if non_blank(&filter.is_remote).is_some_and(|v| v.eq_ignore_ascii_case("true")) {
        qb.push(" AND j.is_remote = true");
    }

    if let Some(search) = non_blank(&filter.search) {
        let pattern = like_pattern(search);
        qb.push(" AND (j.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR j.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    if let Some(company_id) = filter.company_id {
        qb.push(" AND j.company_id = ");
        qb.push_bind(company_id);
    }

    qb.push(" ORDER BY j.posted_date DESC, j.id DESC");
    qb
}

impl JobService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Active jobs matching `filter`, newest first
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let rows: Vec<JobRow> = job_list_query(filter)
            .build_query_as()
            .fetch_all(&self.db.pg)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    /// One active job with its skill requirements
    pub async fn get_job(&self, job_id: i32) -> Result<JobDetail> {
        let mut qb = QueryBuilder::<Postgres>::new(JOB_SELECT);
        qb.push(" WHERE j.id = ");
        qb.push_bind(job_id);
        qb.push(" AND j.status = ");
        qb.push_bind(JobStatus::Active.as_str());

        let row: JobRow = qb
            .build_query_as()
            .fetch_optional(&self.db.pg)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        let required_skills: Vec<JobSkill> = sqlx::query_as(
            r#"
            SELECT skill_name, is_required, proficiency_level
            FROM job_skills
            WHERE job_id = $1
            ORDER BY is_required DESC, skill_name
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(JobDetail {
            job: Job::from(row),
            required_skills,
        })
    }

    /// Whether new applications may be submitted for the job
    pub async fn is_accepting_applications(&self, job_id: i32) -> Result<bool> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 AND status = $2")
                .bind(job_id)
                .bind(JobStatus::Active.as_str())
                .fetch_optional(&self.db.pg)
                .await?;

        Ok(found.is_some())
    }

    pub async fn update_status(&self, job_id: i32, status: JobStatus) -> Result<()> {
        let result = sqlx::query("UPDATE jobs SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status.as_str())
            .bind(job_id)
            .execute(&self.db.pg)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Job not found".to_string()));
        }

        Ok(())
    }
}

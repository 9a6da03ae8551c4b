// Application service - submission, admin listing and status history
use sqlx::{Postgres, QueryBuilder};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{
    Application, ApplicationFilter, ApplicationStatus, NewApplication, StatusChange,
    StatusHistoryEntry,
};
use crate::utils::non_blank;

pub struct ApplicationService {
    db: Database,
}

/// `changed_by` recorded for the first history row of every application.
pub const SYSTEM_ACTOR: &str = "system";
pub const SUBMITTED_NOTE: &str = "Application submitted via website";

const APPLICATION_SELECT: &str = r#"
    SELECT
        a.id,
        a.job_id,
        a.first_name,
        a.last_name,
        a.email,
        a.phone,
        a.cover_letter,
        a.resume_filename,
        a.resume_file_size,
        a.status,
        a.rating,
        a.applied_at,
        a.updated_at,
        j.title AS job_title,
        c.name AS company_name,
        c.id AS company_id
    FROM applications a
    JOIN jobs j ON a.job_id = j.id
    JOIN companies c ON j.company_id = c.id
    WHERE 1=1
"#;

/// Builds the admin listing query. `company_scope` restricts rows to one
/// company name, for employer accounts.
pub fn application_list_query(
    filter: &ApplicationFilter,
    company_scope: Option<&str>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(APPLICATION_SELECT);

    if let Some(status) = non_blank(&filter.status) {
        qb.push(" AND a.status = ");
        qb.push_bind(status.to_string());
    }

    if let Some(job_id) = filter.job_id {
        qb.push(" AND a.job_id = ");
        qb.push_bind(job_id);
    }

    if let Some(company_id) = filter.company_id {
        qb.push(" AND c.id = ");
        qb.push_bind(company_id);
    }

    if let Some(company) = company_scope {
        qb.push(" AND c.name = ");
        qb.push_bind(company.to_string());
    }

    qb.push(" ORDER BY a.applied_at DESC, a.id DESC");
    qb
}

impl ApplicationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts the application and its first history row atomically.
    pub async fn submit(&self, job_id: i32, application: &NewApplication) -> Result<i32> {
        let mut tx = self.db.pg.begin().await?;

        let (resume_filename, resume_size) = match &application.resume {
            Some(resume) => (
                Some(resume.stored_filename.clone()),
                Some(i32::try_from(resume.file_size).unwrap_or(i32::MAX)),
            ),
            None => (None, None),
        };

        let application_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO applications (
                job_id, first_name, last_name, email, phone,
                cover_letter, resume_filename, resume_file_size, status, applied_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING id
            "#,
        )
        .bind(job_id)
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.cover_letter)
        .bind(resume_filename)
        .bind(resume_size)
        .bind(ApplicationStatus::Submitted.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO application_status_history (
                application_id, old_status, new_status, changed_by, notes, changed_at
            )
            VALUES ($1, NULL, $2, $3, $4, NOW())
            "#,
        )
        .bind(application_id)
        .bind(ApplicationStatus::Submitted.as_str())
        .bind(SYSTEM_ACTOR)
        .bind(SUBMITTED_NOTE)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(application_id)
    }

    pub async fn list(
        &self,
        filter: &ApplicationFilter,
        company_scope: Option<&str>,
    ) -> Result<Vec<Application>> {
        let applications = application_list_query(filter, company_scope)
            .build_query_as()
            .fetch_all(&self.db.pg)
            .await?;

        Ok(applications)
    }

    pub async fn get(&self, application_id: i32, company_scope: Option<&str>) -> Result<Application> {
        let mut qb = QueryBuilder::<Postgres>::new(APPLICATION_SELECT);
        qb.push(" AND a.id = ");
        qb.push_bind(application_id);
        if let Some(company) = company_scope {
            qb.push(" AND c.name = ");
            qb.push_bind(company.to_string());
        }

        qb.build_query_as()
            .fetch_optional(&self.db.pg)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
    }

    /// Status changes of an application, oldest first
    pub async fn history(&self, application_id: i32) -> Result<Vec<StatusHistoryEntry>> {
        let entries = sqlx::query_as(
            r#"
            SELECT id, application_id, old_status, new_status, changed_by, notes, changed_at
            FROM application_status_history
            WHERE application_id = $1
            ORDER BY changed_at ASC, id ASC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(entries)
    }

    /// Moves the application to a new status and records the transition.
    /// Returns the previous status.
    pub async fn update_status(
        &self,
        application_id: i32,
        change: &StatusChange,
        company_scope: Option<&str>,
    ) -> Result<String> {
        if let Some(rating) = change.rating {
            if !(1..=5).contains(&rating) {
                return Err(AppError::BadRequest("Rating must be between 1 and 5".to_string()));
            }
        }

        let mut tx = self.db.pg.begin().await?;

        let old_status: String = sqlx::query_scalar(
            r#"
            SELECT a.status
            FROM applications a
            JOIN jobs j ON a.job_id = j.id
            JOIN companies c ON j.company_id = c.id
            WHERE a.id = $1 AND ($2::TEXT IS NULL OR c.name = $2)
            FOR UPDATE OF a
            "#,
        )
        .bind(application_id)
        .bind(company_scope)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        sqlx::query(
            r#"
            UPDATE applications
            SET status = $1, rating = COALESCE($2, rating), updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(change.status.as_str())
        .bind(change.rating)
        .bind(application_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO application_status_history
                (application_id, old_status, new_status, changed_by, notes, changed_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(application_id)
        .bind(&old_status)
        .bind(change.status.as_str())
        .bind(&change.changed_by)
        .bind(&change.notes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(old_status)
    }
}

// Employer request service - talent requests from companies and their assignment
use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{
    EmployerRequest, NewEmployerRequest, RequestFilter, RequestPriority, RequestStatus,
    RequestUpdate, UNASSIGNED,
};
use crate::utils::display_name;

pub struct EmployerRequestService {
    db: Database,
}

const REQUEST_SELECT: &str = r#"
    SELECT
        er.id,
        er.company_name,
        er.contact_name,
        er.email,
        er.phone,
        er.role_type,
        er.role_title,
        er.time_commitment,
        er.timeline,
        er.requirements,
        er.budget_range,
        er.status,
        er.priority,
        er.assigned_to,
        er.notes,
        er.created_at,
        er.updated_at,
        s.id AS staff_id,
        s.first_name AS staff_first_name,
        s.last_name AS staff_last_name
    FROM employer_requests er
    LEFT JOIN LATERAL (
        SELECT id, first_name, last_name
        FROM staff
        WHERE er.assigned_to = (first_name || ' ' || last_name)
        ORDER BY id
        LIMIT 1
    ) s ON TRUE
    WHERE 1=1
"#;

/// Builds the admin listing query for employer requests.
pub fn request_list_query(
    filter: &RequestFilter,
    company_scope: Option<&str>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(REQUEST_SELECT);

    match filter.assigned_staff.trim() {
        "" => {}
        UNASSIGNED => {
            qb.push(" AND (er.assigned_to IS NULL OR er.assigned_to = '')");
        }
        staff_name => {
            qb.push(" AND er.assigned_to = ");
            qb.push_bind(staff_name.to_string());
        }
    }

    let status = filter.status.trim();
    if !status.is_empty() {
        qb.push(" AND er.status = ");
        qb.push_bind(status.to_string());
    }

    let priority = filter.priority.trim();
    if !priority.is_empty() {
        qb.push(" AND er.priority = ");
        qb.push_bind(priority.to_string());
    }

    if let Some(company) = company_scope {
        qb.push(" AND er.company_name = ");
        qb.push_bind(company.to_string());
    }

    qb.push(" ORDER BY er.created_at DESC, er.id DESC");
    qb
}

impl EmployerRequestService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a new talent request with status `new` and priority `medium`
    pub async fn submit(&self, request: &NewEmployerRequest) -> Result<i32> {
        let request_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO employer_requests (
                company_name, contact_name, email, phone, role_type, role_title,
                time_commitment, timeline, requirements, budget_range,
                status, priority, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
            RETURNING id
            "#,
        )
        .bind(&request.company_name)
        .bind(&request.contact_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.role_type)
        .bind(&request.role_title)
        .bind(&request.time_commitment)
        .bind(&request.timeline)
        .bind(&request.requirements)
        .bind(&request.budget_range)
        .bind(RequestStatus::New.as_str())
        .bind(RequestPriority::Medium.as_str())
        .fetch_one(&self.db.pg)
        .await?;

        Ok(request_id)
    }

    pub async fn list(
        &self,
        filter: &RequestFilter,
        company_scope: Option<&str>,
    ) -> Result<Vec<EmployerRequest>> {
        let rows: Vec<EmployerRequest> = request_list_query(filter, company_scope)
            .build_query_as()
            .fetch_all(&self.db.pg)
            .await?;

        Ok(rows.into_iter().map(EmployerRequest::with_staff_info).collect())
    }

    /// Assigns the request to an active staff member. Returns the assignee's
    /// display name.
    pub async fn assign(&self, request_id: i32, staff_id: i32, notes: &str) -> Result<String> {
        let staff: (String, String) = sqlx::query_as(
            "SELECT first_name, last_name FROM staff WHERE id = $1 AND status = 'active'",
        )
        .bind(staff_id)
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;

        let assignee = display_name(&staff.0, &staff.1);

        let result = sqlx::query(
            r#"
            UPDATE employer_requests
            SET assigned_to = $1, notes = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&assignee)
        .bind(notes)
        .bind(request_id)
        .execute(&self.db.pg)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Employer request not found".to_string()));
        }

        Ok(assignee)
    }

    /// Applies the fields present in `update`
    pub async fn update(&self, request_id: i32, update: &RequestUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(AppError::BadRequest(
                "Nothing to update: provide status, priority or notes".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            UPDATE employer_requests
            SET status = COALESCE($1, status),
                priority = COALESCE($2, priority),
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.priority.map(|p| p.as_str()))
        .bind(update.notes.as_deref())
        .bind(request_id)
        .execute(&self.db.pg)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Employer request not found".to_string()));
        }

        Ok(())
    }
}

/// Number of requests assigned to the given display name.
pub async fn count_assigned_to<'e, E>(executor: E, assignee: &str) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employer_requests WHERE assigned_to = $1")
            .bind(assignee)
            .fetch_one(executor)
            .await?;

    Ok(count)
}

/// Points every request assigned to `from` at `to`. Returns the number moved.
pub async fn rename_assignee<'e, E>(executor: E, from: &str, to: &str) -> Result<u64>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE employer_requests SET assigned_to = $1, updated_at = NOW() WHERE assigned_to = $2",
    )
    .bind(to)
    .bind(from)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

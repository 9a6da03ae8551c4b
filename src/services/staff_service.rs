// Staff service - staff records and their optional login accounts
use chrono::Utc;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::middleware::UserRole;
use crate::models::{Staff, StaffInput};
use crate::services::employer_request_service::{count_assigned_to, rename_assignee};
use crate::utils::{display_name, hash_password};

pub struct StaffService {
    db: Database,
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

fn validate(input: &StaffInput) -> Result<()> {
    if let Some(field) = input.missing_required().first() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

impl StaffService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All staff, administrators first
    pub async fn list(&self) -> Result<Vec<Staff>> {
        let staff = sqlx::query_as(
            r#"
            SELECT s.id, s.first_name, s.last_name, s.email, s.phone, s.role, s.department,
                   s.hire_date, s.status, s.can_assign_requests, s.is_admin, s.user_id,
                   au.username, s.created_at, s.updated_at
            FROM staff s
            LEFT JOIN admin_users au ON s.user_id = au.id
            ORDER BY s.is_admin DESC, s.first_name, s.last_name
            "#,
        )
        .fetch_all(&self.db.pg)
        .await?;

        Ok(staff)
    }

    /// Creates a staff member, and a `staff` login account when requested.
    pub async fn create(&self, input: &StaffInput) -> Result<i32> {
        validate(input)?;
        let hire_date = input
            .hire_date_or(Utc::now().date_naive())
            .map_err(AppError::BadRequest)?;

        let mut tx = self.db.pg.begin().await?;

        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM staff WHERE email = $1")
            .bind(input.email.trim())
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AppError::BadRequest(
                "Staff member with this email already exists".to_string(),
            ));
        }

        let mut user_id: Option<i32> = None;
        if input.create_login_account {
            let username = input.login_username();

            let taken: Option<i32> =
                sqlx::query_scalar("SELECT id FROM admin_users WHERE username = $1 OR email = $2")
                    .bind(&username)
                    .bind(input.email.trim())
                    .fetch_optional(&mut *tx)
                    .await?;
            if taken.is_some() {
                return Err(AppError::BadRequest(
                    "Username or email already exists in admin users".to_string(),
                ));
            }

            let id: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO admin_users (username, email, password_hash, first_name, last_name, role)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
            )
            .bind(&username)
            .bind(input.email.trim())
            .bind(hash_password(input.login_password()))
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(UserRole::Staff.as_str())
            .fetch_one(&mut *tx)
            .await?;

            user_id = Some(id);
        }

        let staff_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO staff (
                first_name, last_name, email, phone, role, department, hire_date,
                can_assign_requests, is_admin, user_id, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'active')
            RETURNING id
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.email.trim())
        .bind(&input.phone)
        .bind(input.role.trim())
        .bind(&input.department)
        .bind(hire_date)
        .bind(input.can_assign_requests)
        .bind(input.is_admin)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest("Staff member with this email already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        tx.commit().await?;

        Ok(staff_id)
    }

    /// Replaces a staff record and mirrors name and email onto its login account.
    /// A rename carries the member's request assignments along.
    pub async fn update(&self, staff_id: i32, input: &StaffInput) -> Result<()> {
        validate(input)?;
        let hire_date = input
            .hire_date_or(Utc::now().date_naive())
            .map_err(AppError::BadRequest)?;
        let status = input
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("active");

        let mut tx = self.db.pg.begin().await?;

        let (user_id, old_first, old_last): (Option<i32>, String, String) = sqlx::query_as(
            "SELECT user_id, first_name, last_name FROM staff WHERE id = $1 FOR UPDATE",
        )
        .bind(staff_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;

        sqlx::query(
            r#"
            UPDATE staff SET
                first_name = $1, last_name = $2, email = $3, phone = $4, role = $5,
                department = $6, hire_date = $7, can_assign_requests = $8, is_admin = $9,
                status = $10, updated_at = NOW()
            WHERE id = $11
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.email.trim())
        .bind(&input.phone)
        .bind(input.role.trim())
        .bind(&input.department)
        .bind(hire_date)
        .bind(input.can_assign_requests)
        .bind(input.is_admin)
        .bind(status)
        .bind(staff_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest("Another staff member already uses this email".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        // Assignments are stored by display name
        let old_name = display_name(&old_first, &old_last);
        let new_name = display_name(input.first_name.trim(), input.last_name.trim());
        if old_name != new_name {
            let moved = rename_assignee(&mut *tx, &old_name, &new_name).await?;
            if moved > 0 {
                tracing::info!("Moved {} requests from '{}' to '{}'", moved, old_name, new_name);
            }
        }

        if let Some(user_id) = user_id {
            sqlx::query(
                r#"
                UPDATE admin_users SET
                    email = $1, first_name = $2, last_name = $3, updated_at = NOW()
                WHERE id = $4
                "#,
            )
            .bind(input.email.trim())
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::BadRequest("Email already exists in admin users".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Deletes a staff member and its login account. Refused for
    /// administrators and for staff that still hold assigned requests.
    pub async fn delete(&self, staff_id: i32) -> Result<()> {
        let mut tx = self.db.pg.begin().await?;

        let record: (Option<i32>, String, String, bool) = sqlx::query_as(
            "SELECT user_id, first_name, last_name, is_admin FROM staff WHERE id = $1 FOR UPDATE",
        )
        .bind(staff_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;

        let (user_id, first_name, last_name, is_admin) = record;

        if is_admin {
            return Err(AppError::BadRequest(
                "Cannot delete an administrator staff member".to_string(),
            ));
        }

        let assigned = count_assigned_to(&mut *tx, &display_name(&first_name, &last_name)).await?;

        if assigned > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete staff member with {} assigned requests. Please reassign them first.",
                assigned
            )));
        }

        sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(staff_id)
            .execute(&mut *tx)
            .await?;

        if let Some(user_id) = user_id {
            sqlx::query("DELETE FROM employer_access WHERE admin_user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM admin_users WHERE id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

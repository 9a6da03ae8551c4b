// Auth service - credential check and token issuance for the admin panel
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::config::Config;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::middleware::Claims;
use crate::models::{LoginRecord, UserProfile};
use crate::utils::verify_password;

pub struct AuthService {
    db: Database,
    config: Config,
}

impl AuthService {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }

    /// Checks `login` (username or email) and `password` against an active
    /// account. Returns the profile and a signed access token.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<(UserProfile, String)> {
        let record: LoginRecord = sqlx::query_as(
            r#"
            SELECT
                au.id, au.username, au.email, au.password_hash,
                au.first_name, au.last_name, au.role,
                s.id AS staff_id, s.can_assign_requests, s.is_admin,
                ea.company_name, ea.access_level
            FROM admin_users au
            LEFT JOIN staff s ON s.user_id = au.id
            LEFT JOIN employer_access ea ON ea.admin_user_id = au.id AND ea.is_active = TRUE
            WHERE (au.username = $1 OR au.email = $1) AND au.is_active = TRUE
            ORDER BY au.id
            LIMIT 1
            "#,
        )
        .bind(login.trim())
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &record.password_hash) {
            tracing::warn!("Failed login for user {}", record.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.generate_access_token(&record)?;

        sqlx::query("UPDATE admin_users SET last_login = NOW() WHERE id = $1")
            .bind(record.id)
            .execute(&self.db.pg)
            .await?;

        Ok((UserProfile::from(record), token))
    }

    pub fn generate_access_token(&self, record: &LoginRecord) -> Result<String> {
        let claims = self.claims_for(record);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    fn claims_for(&self, record: &LoginRecord) -> Claims {
        let now = Utc::now();
        let exp = now + Duration::hours(self.config.jwt.expiry_hours as i64);

        Claims {
            sub: record.id.to_string(),
            username: record.username.clone(),
            role: record.role(),
            staff_id: record.staff_id,
            is_admin: record.is_admin.unwrap_or(false),
            can_assign_requests: record.can_assign_requests.unwrap_or(false),
            company_name: record.company_name.clone(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default password for login accounts created alongside a staff record.
pub const DEFAULT_STAFF_PASSWORD: &str = "password123";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Staff {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: String,
    pub can_assign_requests: bool,
    pub is_admin: bool,
    pub user_id: Option<i32>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of staff create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
    pub hire_date: Option<String>,
    #[serde(default)]
    pub can_assign_requests: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub status: Option<String>,
    #[serde(default)]
    pub create_login_account: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl StaffInput {
    /// Names of required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("role", &self.role),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// `hire_date` as sent, or `today` when absent or blank.
    pub fn hire_date_or(&self, today: NaiveDate) -> Result<NaiveDate, String> {
        match self.hire_date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| format!("Invalid hire_date '{}', expected YYYY-MM-DD", text)),
            _ => Ok(today),
        }
    }

    /// Login name for a new account: explicit username or the email local part.
    pub fn login_username(&self) -> String {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn login_password(&self) -> &str {
        match self.password.as_deref() {
            Some(password) if !password.is_empty() => password,
            _ => DEFAULT_STAFF_PASSWORD,
        }
    }
}

use serde::Serialize;
use sqlx::FromRow;

use crate::middleware::UserRole;

/// An active account joined with its staff and employer access rows.
#[derive(Debug, Clone, FromRow)]
pub struct LoginRecord {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub staff_id: Option<i32>,
    pub can_assign_requests: Option<bool>,
    pub is_admin: Option<bool>,
    pub company_name: Option<String>,
    pub access_level: Option<String>,
}

impl LoginRecord {
    pub fn role(&self) -> UserRole {
        UserRole::from_db(&self.role)
    }
}

/// Profile returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub staff_id: Option<i32>,
    pub can_assign_requests: bool,
    pub is_admin: bool,
    pub company_name: Option<String>,
    pub access_level: String,
}

impl From<LoginRecord> for UserProfile {
    fn from(record: LoginRecord) -> Self {
        let access_level = record
            .access_level
            .clone()
            .unwrap_or_else(|| record.role.clone());

        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            role: record.role,
            staff_id: record.staff_id,
            can_assign_requests: record.can_assign_requests.unwrap_or(false),
            is_admin: record.is_admin.unwrap_or(false),
            company_name: record.company_name,
            access_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_level_falls_back_to_role() {
        let record = LoginRecord {
            id: 1,
            username: "admin".to_string(),
            email: "admin@flexi-careers.com".to_string(),
            password_hash: String::new(),
            first_name: Some("System".to_string()),
            last_name: Some("Administrator".to_string()),
            role: "admin".to_string(),
            staff_id: Some(1),
            can_assign_requests: Some(true),
            is_admin: None,
            company_name: None,
            access_level: None,
        };
        assert_eq!(record.role(), UserRole::Admin);

        let profile = UserProfile::from(record);
        assert_eq!(profile.access_level, "admin");
        assert!(profile.can_assign_requests);
        assert!(!profile.is_admin);
    }
}

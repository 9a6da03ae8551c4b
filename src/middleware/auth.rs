use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,       // admin_users.id
    pub username: String,
    pub role: UserRole,
    pub staff_id: Option<i32>,
    pub is_admin: bool,
    pub can_assign_requests: bool,
    pub company_name: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    Employer,
}

impl UserRole {
    pub fn from_db(role: &str) -> Self {
        match role {
            "admin" => UserRole::Admin,
            "employer" => UserRole::Employer,
            _ => UserRole::Staff,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Employer => "employer",
        }
    }
}

/// The authenticated caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub staff_id: Option<i32>,
    pub is_admin: bool,
    pub can_assign_requests: bool,
    pub company_name: Option<String>,
}

impl CurrentUser {
    pub fn from_claims(claims: Claims) -> Result<Self> {
        Ok(Self {
            id: claims.sub.parse().map_err(|_| AppError::Unauthorized)?,
            username: claims.username,
            role: claims.role,
            staff_id: claims.staff_id,
            is_admin: claims.is_admin,
            can_assign_requests: claims.can_assign_requests,
            company_name: claims.company_name,
        })
    }

    /// Admin role, or a staff member flagged `is_admin`.
    pub fn is_administrator(&self) -> bool {
        self.role == UserRole::Admin || (self.role == UserRole::Staff && self.is_admin)
    }

    pub fn can_manage_staff(&self) -> bool {
        self.is_administrator()
    }

    pub fn can_assign_requests(&self) -> bool {
        self.is_administrator() || (self.role == UserRole::Staff && self.can_assign_requests)
    }

    pub fn can_update_requests(&self) -> bool {
        self.role != UserRole::Employer
    }

    pub fn can_manage_jobs(&self) -> bool {
        self.role != UserRole::Employer
    }

    /// Company an employer is restricted to. `None` for staff and admins.
    pub fn company_scope(&self) -> Result<Option<&str>> {
        match self.role {
            UserRole::Employer => self
                .company_name
                .as_deref()
                .map(Some)
                .ok_or(AppError::Forbidden),
            _ => Ok(None),
        }
    }

    pub fn require(&self, allowed: bool) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let claims = decode_token(token, &state.config.jwt.secret)?;
    let current_user = CurrentUser::from_claims(claims)?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

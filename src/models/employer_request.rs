use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    RequestStatus {
        New => "new",
        Contacted => "contacted",
        InProgress => "in_progress",
        Matched => "matched",
        Closed => "closed",
    }
}

text_enum! {
    RequestPriority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

/// Filter value for requests with no assignee.
pub const UNASSIGNED: &str = "unassigned";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployerRequest {
    pub id: i32,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role_type: String,
    pub role_title: Option<String>,
    pub time_commitment: Option<String>,
    pub timeline: Option<String>,
    pub requirements: String,
    pub budget_range: Option<String>,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub staff_id: Option<i32>,
    #[serde(skip)]
    pub staff_first_name: Option<String>,
    #[serde(skip)]
    pub staff_last_name: Option<String>,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_staff_info: Option<AssignedStaffInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignedStaffInfo {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl EmployerRequest {
    /// Folds the joined staff columns into `assigned_staff_info`.
    pub fn with_staff_info(mut self) -> Self {
        if let Some(id) = self.staff_id {
            self.assigned_staff_info = Some(AssignedStaffInfo {
                id,
                first_name: self.staff_first_name.take().unwrap_or_default(),
                last_name: self.staff_last_name.take().unwrap_or_default(),
            });
        }
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewEmployerRequest {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub role_type: String,
    pub role_title: String,
    pub time_commitment: String,
    pub timeline: String,
    pub requirements: String,
    pub budget_range: String,
}

/// Listing filters, echoed back to the client as received.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RequestFilter {
    #[serde(default)]
    pub assigned_staff: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, Default)]
pub struct RequestUpdate {
    pub status: Option<RequestStatus>,
    pub priority: Option<RequestPriority>,
    pub notes: Option<String>,
}

impl RequestUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.notes.is_none()
    }
}

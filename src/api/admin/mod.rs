mod applications;
mod employer_requests;
mod jobs;
mod staff;

use axum::Router;

use crate::AppState;

/// Panel routes. Mounted behind `require_auth`, so every handler can take
/// `Extension<CurrentUser>`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(super::auth::admin_routes())
        .nest("/applications", applications::routes())
        .nest("/employer-requests", employer_requests::routes())
        .nest("/staff", staff::routes())
        .nest("/jobs", jobs::routes())
}

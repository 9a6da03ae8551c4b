mod admin;
mod auth;
mod companies;
mod employer_requests;
mod extract;
mod jobs;
mod uploads;

use axum::{middleware, Router};

use crate::middleware::require_auth;
use crate::AppState;

/// Public website API, mounted at `/api`.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(companies::routes())
        .nest("/jobs", jobs::routes())
        .nest("/employer-request", employer_requests::routes())
        .nest("/upload", uploads::routes())
}

/// Admin panel API, mounted at `/admin/api`. Every route requires a bearer token.
pub fn admin_routes(state: AppState) -> Router<AppState> {
    admin::routes().layer(middleware::from_fn_with_state(state, require_auth))
}

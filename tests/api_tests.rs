//! Router-level tests for the public and admin APIs.
//!
//! The state uses a lazily connected pool, so every test here stops before
//! touching the database. Tests marked `#[ignore]` need a migrated and seeded
//! PostgreSQL database:
//! DATABASE_URL="postgres://localhost/flexi_careers_test" cargo test -- --ignored

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use flexi_careers::config::Config;
use flexi_careers::db::Database;
use flexi_careers::middleware::{Claims, UserRole};
use flexi_careers::{build_router, AppState};

const TEST_SECRET: &str = "test-secret-for-router-tests";
const BOUNDARY: &str = "flexi-test-boundary";

struct TestApp {
    router: Router,
    uploads: TempDir,
}

fn test_config(uploads: &TempDir) -> Config {
    let mut config = Config::from_defaults().unwrap();
    config.jwt.secret = TEST_SECRET.to_string();
    config.uploads.resume_dir = uploads.path().to_string_lossy().into_owned();
    config.uploads.max_bytes = 64 * 1024;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }
    config
}

fn lazy_app() -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let config = test_config(&uploads);
    let db = Database::connect_lazy(&config.database.url).unwrap();
    TestApp {
        router: build_router(AppState::new(db, config)),
        uploads,
    }
}

fn token(role: UserRole, is_admin: bool, can_assign: bool, company: Option<&str>) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: "1".to_string(),
        username: format!("test-{}", role.as_str()),
        role,
        staff_id: None,
        is_admin,
        can_assign_requests: can_assign,
        company_name: company.map(String::from),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn admin_token() -> String {
    token(UserRole::Admin, true, true, None)
}

fn employer_token() -> String {
    token(UserRole::Employer, false, false, Some("TechStart Inc."))
}

fn json_request(method: &str, uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_request(uri: &str, parts: &[Part]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn stored_files(app: &TestApp) -> Vec<String> {
    std::fs::read_dir(app.uploads.path())
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

// ── Health and info ────────────────────────────────────────────

#[tokio::test]
async fn health_reports_healthy() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["jobs"], "/api/jobs");
}

// ── Authentication ─────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_require_token() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/admin/api/applications", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let app = lazy_app();
    let forged = encode(
        &Header::default(),
        &json!({"sub": "1", "username": "x", "role": "admin", "is_admin": true,
                "can_assign_requests": true, "exp": 4_000_000_000u64, "iat": 0}),
        &EncodingKey::from_secret(b"not-the-secret"),
    )
    .unwrap();

    let (status, _) = send(&app, get("/admin/api/me", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_echoes_token_claims() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/admin/api/me", Some(&employer_token()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "employer");
    assert_eq!(body["user"]["company_name"], "TechStart Inc.");
    assert_eq!(body["user"]["can_assign_requests"], false);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request("POST", "/api/login", json!({"username": "admin"}), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username and password are required");
}

// ── Extractor rejections ───────────────────────────────────────

#[tokio::test]
async fn malformed_json_uses_error_body() {
    let app = lazy_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{username: admin"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn json_without_content_type_uses_error_body() {
    let app = lazy_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/login")
        .body(Body::from(r#"{"username":"admin","password":"admin123"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_job_id_uses_error_body() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/api/jobs/abc", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid path parameter"));
}

#[tokio::test]
async fn bad_query_value_uses_error_body() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/api/jobs?company_id=x", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));
}

// ── Public submissions ─────────────────────────────────────────

#[tokio::test]
async fn apply_reports_first_missing_field() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/jobs/1/apply",
            json!({"first_name": "Ada", "email": "ada@example.com"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "last_name is required");
}

#[tokio::test]
async fn apply_form_with_bad_resume_type_is_rejected() {
    let app = lazy_app();
    let request = multipart_request(
        "/api/jobs/1/apply",
        &[
            Part::Text("firstName", "Ada"),
            Part::Text("lastName", "Lovelace"),
            Part::Text("email", "ada@example.com"),
            Part::File("resume", "cv.exe", b"MZ"),
        ],
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid file type. Only PDF, DOC, and DOCX files are allowed"
    );
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn rejected_application_leaves_no_resume_behind() {
    let app = lazy_app();
    let request = multipart_request(
        "/api/jobs/1/apply",
        &[
            Part::File("resume", "cv.pdf", b"%PDF-1.4 test"),
            Part::Text("lastName", "Lovelace"),
            Part::Text("email", "ada@example.com"),
        ],
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "first_name is required");
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn employer_request_lists_missing_fields() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/employer-request",
            json!({"company_name": "TechStart Inc.", "email": "john@techstart.com"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required fields: contact_name, role_type, requirements"
    );
}

// ── Resume upload ──────────────────────────────────────────────

#[tokio::test]
async fn upload_without_form_has_no_file() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request("POST", "/api/upload/resume", json!({}), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn upload_with_empty_filename_has_no_selection() {
    let app = lazy_app();
    let request = multipart_request("/api/upload/resume", &[Part::File("file", "", b"")]);
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file selected");
}

#[tokio::test]
async fn upload_stores_file_under_unique_name() {
    let app = lazy_app();
    let request = multipart_request(
        "/api/upload/resume",
        &[Part::File("file", "Ada Lovelace CV.pdf", b"%PDF-1.4 resume")],
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "Ada Lovelace CV.pdf");
    assert_eq!(body["file_size"], 15);

    let stored = body["stored_filename"].as_str().unwrap();
    assert!(stored.ends_with("_Ada_Lovelace_CV.pdf"));
    assert_eq!(stored_files(&app), vec![stored.to_string()]);
}

#[tokio::test]
async fn oversized_upload_is_refused() {
    let app = lazy_app();
    let big = vec![b'x'; 64 * 1024 + 1];
    let request = multipart_request("/api/upload/resume", &[Part::File("file", "cv.pdf", &big)]);
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert!(stored_files(&app).is_empty());
}

// ── Admin permissions and validation ───────────────────────────

#[tokio::test]
async fn employers_cannot_manage_staff() {
    let app = lazy_app();
    let (status, body) = send(&app, get("/admin/api/staff", Some(&employer_token()))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn staff_without_flag_cannot_assign() {
    let app = lazy_app();
    let staff = token(UserRole::Staff, false, false, None);
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/admin/api/employer-requests/1/assign",
            json!({"staff_id": 2}),
            Some(&staff),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn assign_requires_staff_id() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/admin/api/employer-requests/1/assign",
            json!({"notes": "call back"}),
            Some(&admin_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Staff ID is required");
}

#[tokio::test]
async fn application_update_validates_status() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/admin/api/applications/1",
            json!({"status": "ghosted"}),
            Some(&admin_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid status"));
}

#[tokio::test]
async fn employers_cannot_change_job_status() {
    let app = lazy_app();
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/admin/api/jobs/1/status",
            json!({"status": "paused"}),
            Some(&employer_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn staff_create_names_missing_field() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/api/staff",
            json!({"first_name": "Lisa", "last_name": "Wang", "email": "lisa.wang@flexicareers.com"}),
            Some(&admin_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "role is required");
}

// ── Database-backed flows ──────────────────────────────────────

async fn database_app() -> (TestApp, PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let config = test_config(&uploads);
    let db = Database::connect(&config).await.unwrap();
    db.run_migrations().await.unwrap();
    let pool = db.pg.clone();
    let app = TestApp {
        router: build_router(AppState::new(db, config)),
        uploads,
    };
    (app, pool)
}

fn unique(prefix: &str) -> String {
    format!("{} {}", prefix, uuid::Uuid::new_v4().simple())
}

/// Active job at a freshly created company. Returns (job id, company name).
async fn insert_job(pool: &PgPool) -> (i32, String) {
    let company = unique("Acme Fractional");
    let company_id: i32 =
        sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
            .bind(&company)
            .fetch_one(pool)
            .await
            .unwrap();
    let job_id: i32 = sqlx::query_scalar(
        "INSERT INTO jobs (company_id, title, status) VALUES ($1, 'Fractional CTO', 'active') RETURNING id",
    )
    .bind(company_id)
    .fetch_one(pool)
    .await
    .unwrap();
    (job_id, company)
}

async fn insert_staff(pool: &PgPool, first_name: &str, last_name: &str, is_admin: bool) -> i32 {
    let email = format!("{}@flexicareers.test", uuid::Uuid::new_v4().simple());
    sqlx::query_scalar(
        r#"
        INSERT INTO staff (first_name, last_name, email, role, is_admin)
        VALUES ($1, $2, $3, 'Recruiter', $4)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_assigned_request(pool: &PgPool, assignee: &str) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO employer_requests (company_name, contact_name, email, role_type, requirements, assigned_to)
        VALUES ('TechStart Inc.', 'John Doe', 'john@techstart.com', 'Technology', 'Fractional CTO', $1)
        RETURNING id
        "#,
    )
    .bind(assignee)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn submit_application(app: &TestApp, job_id: i32) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["application_id"].as_i64().unwrap()
}

#[tokio::test]
#[ignore]
async fn seeded_admin_can_log_in() {
    let (app, _) = database_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/login",
            json!({"username": "admin", "password": "admin123"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["is_admin"], true);
    assert!(body["token"].is_string());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/login",
            json!({"username": "admin", "password": "wrong"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
#[ignore]
async fn apply_to_missing_job_is_not_found() {
    let (app, _) = database_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/jobs/999999/apply",
            json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found or no longer active");
}

#[tokio::test]
#[ignore]
async fn unassigned_filter_is_echoed() {
    let (app, _) = database_app().await;
    let (status, body) = send(
        &app,
        get(
            "/admin/api/employer-requests?assigned_staff=unassigned",
            Some(&admin_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filters"]["assigned_staff"], "unassigned");
    for request in body["requests"].as_array().unwrap() {
        let assignee = request["assigned_to"].as_str().unwrap_or_default();
        assert!(assignee.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn submitted_application_has_one_history_row() {
    let (app, pool) = database_app().await;
    let (job_id, _) = insert_job(&pool).await;
    let application_id = submit_application(&app, job_id).await;

    let rows: Vec<(Option<String>, String, Option<String>)> = sqlx::query_as(
        "SELECT old_status, new_status, changed_by FROM application_status_history WHERE application_id = $1",
    )
    .bind(application_id as i32)
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(
        rows,
        vec![(None, "submitted".to_string(), Some("system".to_string()))]
    );
}

#[tokio::test]
#[ignore]
async fn status_changes_append_history_oldest_first() {
    let (app, pool) = database_app().await;
    let (job_id, _) = insert_job(&pool).await;
    let application_id = submit_application(&app, job_id).await;
    let uri = format!("/admin/api/applications/{}", application_id);

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, json!({"status": "reviewed"}), Some(&admin_token())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["old_status"], "submitted");
    assert_eq!(body["new_status"], "reviewed");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            json!({"status": "interviewing", "notes": "phone screen booked"}),
            Some(&admin_token()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get(&format!("{}/history", uri), Some(&admin_token()))).await;
    assert_eq!(status, StatusCode::OK);

    let history = body["history"].as_array().unwrap();
    let transitions: Vec<(Value, Value, Value)> = history
        .iter()
        .map(|h| (h["old_status"].clone(), h["new_status"].clone(), h["changed_by"].clone()))
        .collect();
    assert_eq!(
        transitions,
        vec![
            (Value::Null, json!("submitted"), json!("system")),
            (json!("submitted"), json!("reviewed"), json!("test-admin")),
            (json!("reviewed"), json!("interviewing"), json!("test-admin")),
        ]
    );
    assert_eq!(history[2]["notes"], "phone screen booked");
}

#[tokio::test]
#[ignore]
async fn employer_cannot_see_other_company_application() {
    let (app, pool) = database_app().await;
    let (job_id, company) = insert_job(&pool).await;
    assert_ne!(company, "TechStart Inc.");
    let application_id = submit_application(&app, job_id).await;
    let uri = format!("/admin/api/applications/{}", application_id);

    let (status, _) = send(&app, get(&uri, Some(&employer_token()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request("PUT", &uri, json!({"status": "rejected"}), Some(&employer_token())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let own = token(UserRole::Employer, false, false, Some(company.as_str()));
    let (status, body) = send(&app, get(&uri, Some(&own))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["status"], "submitted");
}

#[tokio::test]
#[ignore]
async fn administrator_staff_cannot_be_deleted() {
    let (app, pool) = database_app().await;
    let staff_id = insert_staff(&pool, "Root", &unique("Admin"), true).await;

    let (status, body) = send(&app, delete_staff_request(staff_id)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot delete an administrator staff member");
}

fn delete_staff_request(staff_id: i32) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/admin/api/staff/{}", staff_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn staff_with_assigned_requests_cannot_be_deleted() {
    let (app, pool) = database_app().await;
    let last_name = unique("Recruiter");
    let staff_id = insert_staff(&pool, "Quinn", &last_name, false).await;
    insert_assigned_request(&pool, &format!("Quinn {}", last_name)).await;

    let (status, body) = send(&app, delete_staff_request(staff_id)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot delete staff member with 1 assigned requests. Please reassign them first."
    );
}

#[tokio::test]
#[ignore]
async fn renamed_staff_keeps_assignments() {
    let (app, pool) = database_app().await;
    let last_name = unique("Johnson");
    let staff_id = insert_staff(&pool, "Sarah", &last_name, false).await;
    let request_id = insert_assigned_request(&pool, &format!("Sarah {}", last_name)).await;
    let email: String = sqlx::query_scalar("SELECT email FROM staff WHERE id = $1")
        .bind(staff_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/admin/api/staff/{}", staff_id),
            json!({"first_name": "Sara", "last_name": &last_name, "email": &email, "role": "Recruiter"}),
            Some(&admin_token()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let assigned_to: Option<String> =
        sqlx::query_scalar("SELECT assigned_to FROM employer_requests WHERE id = $1")
            .bind(request_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(assigned_to, Some(format!("Sara {}", last_name)));

    let (status, _) = send(&app, delete_staff_request(staff_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

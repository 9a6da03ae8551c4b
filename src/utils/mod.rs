// Shared helpers for handlers and services

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use validator::Validate;

/// Extensions accepted for resume uploads.
pub const ALLOWED_RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Hex encoded SHA-256 of the password, as stored in `admin_users.password_hash`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-time comparison against the stored hex digest.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let computed = hash_password(password);
    let stored = stored_hash.trim().to_ascii_lowercase();
    computed.as_bytes().ct_eq(stored.as_bytes()).into()
}

/// Lowercased extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn is_allowed_resume(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| ALLOWED_RESUME_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Strips directory components and anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

/// Parses the JSON text stored in `jobs.skills`. Anything unparseable is an empty list.
pub fn parse_skills(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => serde_json::from_str(text).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// `%text%` for ILIKE, with the pattern metacharacters in `text` escaped.
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// "First Last", the form stored in `employer_requests.assigned_to`.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

#[derive(Validate)]
struct EmailCheck {
    #[validate(email)]
    email: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EmailCheck {
        email: email.trim().to_string(),
    }
    .validate()
    .is_ok()
}

/// Treats `None`, empty and whitespace-only strings alike.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

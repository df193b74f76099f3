use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::api::middleware::{has_session, SESSION_COOKIE, SESSION_VALUE};
use crate::models::*;
use crate::store::{Store, UploadEntry};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
///
/// Some errors are validation errors that should be exposed to the client
/// (e.g., "Version v1.2.0 already exists"). These are returned as-is with
/// a BAD_REQUEST status.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();

    // Known validation errors that are safe to expose
    if msg.contains("already exists") || msg.contains("not found") {
        tracing::warn!("Validation error: {}", msg);
        return (StatusCode::BAD_REQUEST, msg);
    }

    tracing::error!("Internal error: {}", msg);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Versions
// ============================================================

/// Query parameters for listing versions.
#[derive(Debug, Deserialize)]
pub struct ListVersionsQuery {
    /// Limit the list to one product tag.
    pub product: Option<String>,
    /// Include drafts. Honored only for requests carrying an admin session;
    /// anonymous callers always get published versions only.
    #[serde(default)]
    pub include_drafts: bool,
}

pub async fn list_versions(
    State(store): State<Store>,
    jar: CookieJar,
    Query(query): Query<ListVersionsQuery>,
) -> Result<Json<Vec<Version>>, (StatusCode, String)> {
    if query.include_drafts && has_session(&jar) {
        return store.all_versions().map(Json).map_err(internal_error);
    }

    store
        .published_versions(query.product.as_deref())
        .map(Json)
        .map_err(internal_error)
}

pub async fn get_version(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Version>, (StatusCode, String)> {
    store
        .version(&id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Version not found".to_string()))
}

/// Query parameters for the latest-version lookup.
#[derive(Debug, Deserialize)]
pub struct LatestVersionQuery {
    pub product: String,
}

pub async fn latest_version(
    State(store): State<Store>,
    Query(query): Query<LatestVersionQuery>,
) -> Result<Json<LatestVersion>, (StatusCode, String)> {
    store
        .latest_version(&query.product)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_version(
    State(store): State<Store>,
    Json(input): Json<CreateVersionInput>,
) -> Result<(StatusCode, Json<Version>), (StatusCode, String)> {
    validate_product(&store, &input.product)?;

    store
        .create_version(input)
        .map(|v| (StatusCode::CREATED, Json(v)))
        .map_err(internal_error)
}

pub async fn update_version(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(input): Json<UpdateVersionInput>,
) -> Result<Json<Version>, (StatusCode, String)> {
    if let Some(product) = &input.product {
        validate_product(&store, product)?;
    }

    store
        .update_version(&id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Version not found".to_string()))
}

pub async fn delete_version(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    if store.delete_version(&id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Version not found".to_string()))
    }
}

/// Reject product tags not present in the configured product list.
fn validate_product(store: &Store, product: &str) -> Result<(), (StatusCode, String)> {
    let config = store.config().map_err(internal_error)?;
    if config.is_valid_product(product) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("Invalid product tag: {}", product),
        ))
    }
}

// ============================================================
// Auth
// ============================================================

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(store): State<Store>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<serde_json::Value>), (StatusCode, String)> {
    let config = store.config().map_err(internal_error)?;

    let Some(admin) = config.admin else {
        tracing::warn!("Login attempt but no admin credentials are configured");
        return Err((
            StatusCode::UNAUTHORIZED,
            "Admin credentials are not configured".to_string(),
        ));
    };

    if input.username != admin.username || input.password != admin.password {
        tracing::warn!("Failed login for username {}", input.username);
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".to_string(),
        ));
    }

    let cookie = Cookie::build((SESSION_COOKIE, SESSION_VALUE))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");

    tracing::info!("Admin login for username {}", input.username);
    Ok((
        jar.add(cookie),
        Json(serde_json::json!({ "authenticated": true })),
    ))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(serde_json::json!({ "authenticated": false })))
}

pub async fn auth_check(jar: CookieJar) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "authenticated": has_session(&jar) }))
}

// ============================================================
// Configuration
// ============================================================

pub async fn get_config(
    State(store): State<Store>,
) -> Result<Json<AppConfig>, (StatusCode, String)> {
    store.config().map(Json).map_err(internal_error)
}

pub async fn put_config(
    State(store): State<Store>,
    Json(config): Json<AppConfig>,
) -> Result<Json<AppConfig>, (StatusCode, String)> {
    store.save_config(&config).map_err(internal_error)?;
    Ok(Json(config))
}

// ============================================================
// Uploads
// ============================================================

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_UPLOAD_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
];

pub async fn upload_file(
    State(store): State<Store>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadEntry>), (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_UPLOAD_TYPES.contains(&content_type.as_str()) {
            return Err((
                StatusCode::BAD_REQUEST,
                "Unsupported file type. Only JPEG, PNG, GIF, WebP images and MP4, WebM videos are accepted.".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                "File size exceeds the 10 MB limit".to_string(),
            ));
        }

        let entry = store
            .save_upload(&file_name, &bytes)
            .map_err(internal_error)?;
        return Ok((StatusCode::CREATED, Json(entry)));
    }

    Err((
        StatusCode::BAD_REQUEST,
        "Missing file field in upload".to_string(),
    ))
}

pub async fn list_uploads(
    State(store): State<Store>,
) -> Result<Json<Vec<UploadEntry>>, (StatusCode, String)> {
    store.list_uploads().map(Json).map_err(internal_error)
}

//! Admin dashboard handlers for media uploads and deletes.
//!
//! Uploads arrive as `multipart/form-data` with a single `file` part.

use acfruit_core::error::CoreError;
use acfruit_core::media::MediaKind;
use acfruit_store::{StoredMedia, Upload, YoutubeVideo};
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Read the `file` part of a multipart body.
///
/// A body cut off by the route's size limit is reported as an oversized
/// file of `kind`.
async fn read_upload(kind: MediaKind, mut multipart: Multipart) -> AppResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(kind, e, "Invalid multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(kind, e, "Failed to read upload"))?;
        return Ok(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::BadRequest("Missing 'file' field".into()))
}

fn multipart_error(kind: MediaKind, err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(kind = kind.label(), "Upload rejected by body limit");
        return AppError::Core(kind.too_large());
    }
    AppError::BadRequest(format!("{context}: {err}"))
}

fn created(stored: StoredMedia) -> impl IntoResponse {
    (StatusCode::CREATED, Json(DataResponse::new(stored)))
}

/// POST /api/v1/admin/dashboard/media/images
///
/// Compressed to JPEG before upload.
pub async fn upload_image(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(MediaKind::Image, multipart).await?;
    Ok(created(state.stores.media.upload_image(upload).await?))
}

/// POST /api/v1/admin/dashboard/media/pdfs
pub async fn upload_pdf(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(MediaKind::Pdf, multipart).await?;
    Ok(created(state.stores.media.upload_pdf(upload).await?))
}

/// POST /api/v1/admin/dashboard/media/videos
pub async fn upload_video(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(MediaKind::Video, multipart).await?;
    Ok(created(state.stores.media.upload_video(upload).await?))
}

#[derive(Debug, Deserialize)]
pub struct YoutubeRequest {
    pub url: String,
}

/// POST /api/v1/admin/dashboard/media/youtube
///
/// Validate a YouTube link and return its embed form. Nothing is stored.
pub async fn resolve_youtube(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<YoutubeRequest>,
) -> AppResult<Json<DataResponse<YoutubeVideo>>> {
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please enter a YouTube URL".into(),
        )));
    }
    Ok(Json(DataResponse::new(state.stores.media.youtube(&input.url)?)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteMediaRequest {
    pub url: String,
    /// Bucket hint for URLs that do not name one.
    #[serde(default)]
    pub bucket: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteMediaResponse {
    pub deleted: bool,
}

/// DELETE /api/v1/admin/dashboard/media
///
/// Best effort: a failed delete is logged and reported as `deleted: false`,
/// never as an error.
pub async fn delete_media(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<DeleteMediaRequest>,
) -> Json<DataResponse<DeleteMediaResponse>> {
    let deleted = state
        .stores
        .media
        .delete(&input.url, input.bucket.as_deref())
        .await;
    Json(DataResponse::new(DeleteMediaResponse { deleted }))
}

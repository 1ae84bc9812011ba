//! File upload routes.
//!
//! Three paths, matching the public contract:
//!
//! - `POST /upload` stores the file on local disk.
//! - `POST /uploadmulters3` streams the file into object storage without
//!   touching local disk; keys are timestamped.
//! - `POST /uploadsawssdk` stages the file on disk, pushes it to object
//!   storage under an untimestamped key, then deletes the staged copy
//!   best-effort.

use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::AppState;
use depot_core::storage::remote;

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_local))
        .route("/uploadmulters3", post(upload_streaming))
        .route("/uploadsawssdk", post(upload_staged))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One file pulled out of a multipart form.
#[derive(Debug)]
struct UploadedFile {
    field_name: String,
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

/// Response for a local disk upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalUploadResponse {
    message: &'static str,
    file_path: String,
}

/// Response for a streamed remote upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamingUploadResponse {
    url: String,
    secure_url: String,
    file_name: String,
    etag: String,
    key: String,
    file: FileSummary,
}

/// Summary of the uploaded multipart field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileSummary {
    field_name: String,
    original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    size: usize,
}

/// Response for a staged remote upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StagedUploadResponse {
    url: String,
    secure_url: String,
    file_name: String,
    etag: String,
    bucket: String,
    key: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Pull the `file` field out of a multipart form.
///
/// Other fields are metadata and are skipped. Returns `Ok(None)` when the
/// form carries no file.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let field_name = field.name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await?;
        return Ok(Some(UploadedFile {
            field_name,
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}

/// Last segment of an object key.
fn key_basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

fn missing_file_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "upload_failed",
            "message": "File upload failed"
        })),
    )
        .into_response()
}

fn invalid_multipart_response(err: &MultipartError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_multipart",
            "message": err.to_string()
        })),
    )
        .into_response()
}

fn storage_failure_response(err: &depot_core::storage::StorageError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "storage_error",
            "message": err.to_string()
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload`
/// Store one uploaded file on local disk under a timestamped name.
async fn upload_local(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let file = match read_upload(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return missing_file_response(),
        Err(e) => return invalid_multipart_response(&e),
    };

    match state.local.store(&file.file_name, &file.data).await {
        Ok(stored) => {
            info!(name = %stored.name, size = file.data.len(), "File stored locally");
            (
                StatusCode::OK,
                Json(LocalUploadResponse {
                    message: "File uploaded successfully",
                    file_path: format!("/uploads/{}", stored.name),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to store file locally");
            storage_failure_response(&e)
        }
    }
}

/// POST `/uploadmulters3`
/// Stream one uploaded file straight into object storage. Local disk is
/// never touched on this path.
async fn upload_streaming(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let file = match read_upload(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return missing_file_response(),
        Err(e) => return invalid_multipart_response(&e),
    };

    let UploadedFile {
        field_name,
        file_name,
        content_type,
        data,
    } = file;
    let size = data.len();
    let key = remote::timestamped_key(&file_name);

    match state.remote.put(&key, data).await {
        Ok(object) => {
            info!(key = %object.key, size, "File streamed to object storage");
            let response = StreamingUploadResponse {
                url: object.url,
                secure_url: object.secure_url,
                file_name: key_basename(&object.key).to_string(),
                etag: object.etag,
                key: object.key,
                file: FileSummary {
                    field_name,
                    original_name: file_name,
                    content_type,
                    size,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, key = %key, "Failed to stream file to object storage");
            storage_failure_response(&e)
        }
    }
}

/// POST `/uploadsawssdk`
/// Stage one uploaded file on local disk, push it to object storage, then
/// delete the staged copy. The remote key carries no timestamp, so repeated
/// uploads of a same-named file overwrite the object.
async fn upload_staged(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let file = match read_upload(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return missing_file_response(),
        Err(e) => return invalid_multipart_response(&e),
    };

    let staged = match state.local.store(&file.file_name, &file.data).await {
        Ok(staged) => staged,
        Err(e) => {
            error!(error = %e, "Failed to stage file locally");
            return storage_failure_response(&e);
        }
    };

    let key = remote::named_key(&file.file_name);

    match state.remote.put_file(&key, &staged.path).await {
        Ok(object) => {
            // Cleanup is best-effort; a failed delete never fails the request.
            if let Err(e) = state.local.remove(&staged.name).await {
                warn!(error = %e, name = %staged.name, "Failed to delete staged file");
            }
            info!(key = %object.key, "File uploaded to object storage via staging");
            let response = StagedUploadResponse {
                url: object.url,
                secure_url: object.secure_url,
                file_name: key_basename(&object.key).to_string(),
                etag: object.etag,
                bucket: state.remote.bucket().to_string(),
                key: object.key,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            // The staged copy stays on disk on this path.
            error!(error = %e, staged = %staged.path.display(), "Failed to upload staged file");
            storage_failure_response(&e)
        }
    }
}

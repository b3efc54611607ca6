//! Upload area API — area creation, file registration, validation.
//!
//! These handlers only do identifier generation and enqueueing; all
//! deferred work happens in `runtime::validator`.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/area/:uuid
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn create_upload_area(
    State(state): State<AppState>,
    Path(submission_uuid): Path<String>,
) -> impl IntoResponse {
    tracing::info!(submission_uuid = %submission_uuid, "upload area creation requested");

    let area_uuid = Uuid::new_v4();
    let uri = format!("s3://{}/{}/", state.config.storage.upload_bucket, area_uuid);

    (
        StatusCode::CREATED,
        [(header::LOCATION, uri.clone())],
        Json(serde_json::json!({ "uri": uri })),
    )
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PUT /v1/area/:area_uuid/:file_name/validate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn validate_file(
    State(state): State<AppState>,
    Path((area_uuid, file_name)): Path<(String, String)>,
) -> impl IntoResponse {
    tracing::info!(
        area_uuid = %area_uuid,
        file_name = %file_name,
        "file validation requested"
    );

    let job_id = Uuid::new_v4().to_string();
    state.validator.enqueue(&job_id, &file_name);

    Json(serde_json::json!({ "validation_id": job_id }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PUT /v1/area/:area_uuid/files
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub file_name: String,
    pub content_type: String,
}

pub async fn upload_file(
    State(state): State<AppState>,
    Path(area_uuid): Path<String>,
    Json(file): Json<FileMetadata>,
) -> impl IntoResponse {
    tracing::info!(
        area_uuid = %area_uuid,
        file_name = %file.file_name,
        content_type = %file.content_type,
        "file registered to upload area"
    );

    // Fire-and-forget: the response must not wait on the ingest API.
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier
            .file_staged(&area_uuid, &file.file_name, &file.content_type)
            .await
        {
            tracing::warn!(
                area_uuid = %area_uuid,
                file_name = %file.file_name,
                error = %e,
                "file-staged notification failed"
            );
        }
    });

    StatusCode::OK
}

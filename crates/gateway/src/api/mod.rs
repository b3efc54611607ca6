pub mod areas;
pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
///
/// The `/v1/area` routes mirror the ingestion contract the mock stands
/// in for; `/v1/health` is a probe endpoint for the test harness.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/health", get(health::health))
        .route("/v1/area/:area_uuid", post(areas::create_upload_area))
        .route(
            "/v1/area/:area_uuid/:file_name/validate",
            put(areas::validate_file),
        )
        .route("/v1/area/:area_uuid/files", put(areas::upload_file))
}

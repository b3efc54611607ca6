//! Health probe used by integration-test harnesses to wait for readiness.

use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "queued_jobs": state.validator.queued_jobs(),
    }))
}

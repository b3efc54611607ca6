//! Validation job model.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A unit of deferred work representing "pretend to validate this file".
///
/// Created by the request-handling surface, held by the job queue until
/// `release_at` has passed, then dispatched exactly once and discarded.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationJob {
    pub job_id: String,
    /// Informational only; plays no part in scheduling.
    pub file_name: String,
    pub release_at: DateTime<Utc>,
}

impl ValidationJob {
    /// New job with a caller-supplied id, due `delay` from now. Handlers
    /// generate the id up front so they can return it before the job runs.
    pub fn with_id(job_id: impl Into<String>, file_name: impl Into<String>, delay: Duration) -> Self {
        Self {
            job_id: job_id.into(),
            file_name: file_name.into(),
            release_at: Utc::now() + delay,
        }
    }
}

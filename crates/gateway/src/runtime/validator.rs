//! Mock file validator — releases due jobs and reports synthetic results.
//!
//! A single background task ticks on a fixed interval; each tick drains
//! the job queue and reports every released job via the notifier, in
//! drain order. The tick body is awaited inside the interval loop, so
//! two drains can never overlap. Notification failures are logged and
//! the job is dropped: fire-and-forget, no retry. A disposable test
//! double has no delivery guarantees to uphold.

use std::sync::Arc;

use chrono::{Duration, Utc};

use ums_domain::job::ValidationJob;

use crate::notify::Notifier;
use crate::runtime::jobs::JobQueue;

/// Fixed pretend-validation duration, matching the tick interval.
const JOB_DURATION_MS: i64 = 1_000;

pub struct FileValidator {
    queue: Arc<JobQueue>,
    notifier: Arc<dyn Notifier>,
    delay: Duration,
}

impl FileValidator {
    pub fn new(queue: Arc<JobQueue>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            queue,
            notifier,
            delay: Duration::milliseconds(JOB_DURATION_MS),
        }
    }

    /// Override the pretend-validation delay (tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Accept a validation job; it becomes due `delay` from now.
    /// Non-blocking — the HTTP handler returns before anything runs.
    pub fn enqueue(&self, job_id: &str, file_name: &str) {
        let job = ValidationJob::with_id(job_id, file_name, self.delay);
        tracing::debug!(
            job_id = %job.job_id,
            file_name = %job.file_name,
            release_at = %job.release_at,
            "validation job queued"
        );
        self.queue.push(job);
    }

    pub fn queued_jobs(&self) -> usize {
        self.queue.len()
    }

    /// Called every tick. Drains all due jobs, then reports each one
    /// exactly once, in release order.
    pub async fn tick(&self) {
        let due = self.queue.drain_due(Utc::now());
        if due.is_empty() {
            return;
        }
        tracing::info!(count = due.len(), "releasing due validation jobs");

        for job in due {
            match self.notifier.validation_result(&job.job_id).await {
                Ok(()) => {
                    tracing::info!(
                        job_id = %job.job_id,
                        file_name = %job.file_name,
                        "validation result reported"
                    );
                }
                Err(e) => {
                    // Dropped, not re-queued.
                    tracing::warn!(
                        job_id = %job.job_id,
                        error = %e,
                        "validation result notification failed, job dropped"
                    );
                }
            }
        }
    }
}

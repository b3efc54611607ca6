//! AppState construction and background-task spawning.

use std::sync::Arc;

use ums_domain::config::Config;

use crate::notify::HttpNotifier;
use crate::runtime::jobs::JobQueue;
use crate::runtime::validator::FileValidator;
use crate::state::AppState;

/// Validation tick period. The original contract promises a result
/// roughly one period after the job delay elapses; jitter up to one
/// period is acceptable for a test double.
const TICK_INTERVAL_MS: u64 = 1_000;

/// Initialize every subsystem and return a fully-wired [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> AppState {
    let notifier = Arc::new(HttpNotifier::new(&config));
    tracing::info!(
        ingest_url = %config.ingest.base_url(),
        "notifier ready"
    );

    let queue = Arc::new(JobQueue::new());
    let validator = Arc::new(FileValidator::new(queue, notifier.clone()));
    tracing::info!("file validator ready");

    AppState {
        config,
        validator,
        notifier,
    }
}

/// Spawn the long-running background tokio tasks.
///
/// Call this **after** [`build_app_state`] when running the HTTP server.
pub fn spawn_background_tasks(state: &AppState) {
    // ── Validation runner (tick every 1s, release due jobs) ──────────
    {
        let validator = state.validator.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(
                std::time::Duration::from_millis(TICK_INTERVAL_MS),
            );
            loop {
                interval.tick().await;
                // Awaited inline: the next tick cannot start a drain
                // while the previous batch is still being reported.
                validator.tick().await;
            }
        });
    }
    tracing::info!("background tasks spawned");
}

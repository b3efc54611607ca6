use std::sync::Arc;

use ums_domain::config::Config;

use crate::notify::Notifier;
use crate::runtime::validator::FileValidator;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Enqueues jobs; drained by the background tick.
    pub validator: Arc<FileValidator>,
    /// Outbound notifications to the ingest API.
    pub notifier: Arc<dyn Notifier>,
}

//! Outbound notifications toward the ingest API.
//!
//! Two domain events leave the mock: "file staged" (sent when a file is
//! registered to an upload area) and "validation result" (sent when a
//! queued validation job is released). Both are fire-and-forget: callers
//! log failures and move on, nothing is retried.

use async_trait::async_trait;
use serde::Serialize;

use ums_domain::config::Config;
use ums_domain::{Error, Result};

/// Fixed output reported for every validation job. The mock always
/// reports success.
pub const DEFAULT_VALIDATION_OUTPUT: &str =
    "{\"validation_errors\": [], \"validation_state\": \"VALID\"}";

const FILE_STAGED_PATH: &str = "/messaging/fileUploadInfo";
const VALIDATION_RESULT_PATH: &str = "/messaging/fileValidationResult";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Payloads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Serialize)]
pub struct FileStagedEvent {
    pub url: String,
    pub name: String,
    pub upload_area_id: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub validation_id: String,
    pub stdout: String,
}

impl ValidationResult {
    pub fn for_job(job_id: &str) -> Self {
        Self {
            validation_id: job_id.to_string(),
            stdout: DEFAULT_VALIDATION_OUTPUT.to_string(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Notifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Seam for outbound notifications, so the validator can be exercised
/// in tests without a live ingest API.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Report a file landing in an upload area.
    async fn file_staged(
        &self,
        area_uuid: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<()>;

    /// Report the (always successful) outcome of a validation job.
    async fn validation_result(&self, job_id: &str) -> Result<()>;
}

/// HTTP notifier posting JSON to the configured ingest base address.
pub struct HttpNotifier {
    client: reqwest::Client,
    file_staged_url: String,
    validation_result_url: String,
    staging_bucket: String,
}

impl HttpNotifier {
    pub fn new(config: &Config) -> Self {
        let base = config.ingest.base_url();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            file_staged_url: format!("{base}{FILE_STAGED_PATH}"),
            validation_result_url: format!("{base}{VALIDATION_RESULT_PATH}"),
            staging_bucket: config.storage.staging_bucket.clone(),
        }
    }

    async fn post_json<T: Serialize>(&self, url: &str, payload: &T) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Http(format!("POST {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("POST {url}: status {status}")));
        }
        tracing::debug!(url = %url, status = %status, "notification delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn file_staged(
        &self,
        area_uuid: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<()> {
        let event = FileStagedEvent {
            url: format!("s3://{}/{}/{}", self.staging_bucket, area_uuid, file_name),
            name: file_name.to_string(),
            upload_area_id: area_uuid.to_string(),
            content_type: content_type.to_string(),
        };
        self.post_json(&self.file_staged_url, &event).await
    }

    async fn validation_result(&self, job_id: &str) -> Result<()> {
        let result = ValidationResult::for_job(job_id);
        self.post_json(&self.validation_result_url, &result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_derive_from_ingest_config() {
        let config = Config::from_lookup(|key| match key {
            "INGEST_API_SCHEME" => Some("https".to_string()),
            "INGEST_API_HOST" => Some("ingest.dev".to_string()),
            "INGEST_API_PORT" => Some("9443".to_string()),
            _ => None,
        })
        .unwrap();
        let notifier = HttpNotifier::new(&config);
        assert_eq!(
            notifier.file_staged_url,
            "https://ingest.dev:9443/messaging/fileUploadInfo"
        );
        assert_eq!(
            notifier.validation_result_url,
            "https://ingest.dev:9443/messaging/fileValidationResult"
        );
    }

    #[test]
    fn validation_result_payload_shape() {
        let result = ValidationResult::for_job("job-1");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["validation_id"], "job-1");
        assert_eq!(
            value["stdout"],
            "{\"validation_errors\": [], \"validation_state\": \"VALID\"}"
        );
    }

    #[test]
    fn file_staged_payload_shape() {
        let event = FileStagedEvent {
            url: "s3://sample-bucket/area-1/data.csv".to_string(),
            name: "data.csv".to_string(),
            upload_area_id: "area-1".to_string(),
            content_type: "text/csv".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["url"], "s3://sample-bucket/area-1/data.csv");
        assert_eq!(value["name"], "data.csv");
        assert_eq!(value["upload_area_id"], "area-1");
        assert_eq!(value["content_type"], "text/csv");
    }
}

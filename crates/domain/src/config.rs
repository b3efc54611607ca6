//! Service configuration, resolved once at startup from the environment.
//!
//! The original ingest contract exposes three variables (`INGEST_API_SCHEME`,
//! `INGEST_API_HOST`, `INGEST_API_PORT`); the rest control the mock itself.
//! No ambient globals: the resolved [`Config`] is passed by `Arc` to every
//! component that needs it.

use serde::Serialize;

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Where outbound notifications go (the ingest API under test).
#[derive(Debug, Clone, Serialize)]
pub struct IngestConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl IngestConfig {
    /// Base address for outbound notifications, derived once at startup.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// Where the mock itself listens.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5100,
        }
    }
}

/// Synthetic bucket names used in generated storage-location strings.
#[derive(Debug, Clone, Serialize)]
pub struct StorageConfig {
    /// Bucket in the `uri` returned on upload-area creation.
    pub upload_bucket: String,
    /// Bucket in the `url` of file-staged notifications.
    pub staging_bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_bucket: "org-upload-dev".to_string(),
            staging_bucket: "sample-bucket".to_string(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

impl Config {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// Keeps config construction testable without mutating the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            ingest: IngestConfig {
                scheme: lookup("INGEST_API_SCHEME").unwrap_or(defaults.ingest.scheme),
                host: lookup("INGEST_API_HOST").unwrap_or(defaults.ingest.host),
                port: parse_port(&lookup, "INGEST_API_PORT", defaults.ingest.port)?,
            },
            server: ServerConfig {
                host: lookup("UPLOAD_MOCK_HOST").unwrap_or(defaults.server.host),
                port: parse_port(&lookup, "UPLOAD_MOCK_PORT", defaults.server.port)?,
            },
            storage: StorageConfig {
                upload_bucket: lookup("UPLOAD_MOCK_BUCKET")
                    .unwrap_or(defaults.storage.upload_bucket),
                staging_bucket: lookup("UPLOAD_MOCK_STAGING_BUCKET")
                    .unwrap_or(defaults.storage.staging_bucket),
            },
        })
    }
}

fn parse_port<F>(lookup: &F, key: &str, default: u16) -> Result<u16>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| Error::Config(format!("{key} must be a port number, got {raw:?}"))),
    }
}

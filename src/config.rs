//! Configuration loading and validation.

use crate::error::{ConfigError, Result};
use anyhow::Context as _;
use std::time::Duration;

/// Zapbot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory path (credentials, bridge socket).
    pub data_dir: std::path::PathBuf,

    /// Unix socket path of the transport bridge sidecar.
    pub socket_path: std::path::PathBuf,

    /// Generation backend configuration.
    pub backend: BackendConfig,

    /// Message pipeline behavior settings.
    pub pipeline: PipelineConfig,
}

/// Generation backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend API key (required).
    pub api_key: String,

    /// Model name used in the request path.
    pub model: String,

    /// API base URL. Overridable so tests can point at a local stub.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Message pipeline behavior configuration.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Maximum characters per delivered segment.
    pub chunk_limit: usize,

    /// Cooldown before a served sender may be admitted again.
    pub cooldown: Duration,

    /// Pacing delay bounds before a reply is produced.
    pub pacing_min: Duration,
    pub pacing_max: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_limit: 600,
            cooldown: crate::gate::DEFAULT_COOLDOWN,
            pacing_min: Duration::from_millis(3_000),
            pacing_max: Duration::from_millis(7_000),
        }
    }
}

const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const BACKEND_TIMEOUT: Duration = Duration::from_secs(15);

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing `GEMINI_API_KEY` is fatal: without it the process can only
    /// ever answer with fallbacks, which is worse than not starting.
    pub fn load() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingKey("GEMINI_API_KEY"))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("GEMINI_API_KEY").into());
        }

        let data_dir = match std::env::var_os("ZAPBOT_DATA_DIR") {
            Some(dir) => std::path::PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("zapbot"))
                .unwrap_or_else(|| std::path::PathBuf::from("./data")),
        };

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory: {}", data_dir.display()))
            .map_err(ConfigError::Other)?;

        let socket_path = match std::env::var_os("ZAPBOT_SOCKET") {
            Some(path) => std::path::PathBuf::from(path),
            None => data_dir.join("bridge.sock"),
        };

        let backend = BackendConfig {
            api_key,
            model: std::env::var("ZAPBOT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("ZAPBOT_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: BACKEND_TIMEOUT,
        };

        Ok(Self {
            data_dir,
            socket_path,
            backend,
            pipeline: PipelineConfig::default(),
        })
    }

    /// Path of the persisted credential blob.
    pub fn credentials_path(&self) -> std::path::PathBuf {
        self.data_dir.join("credentials.json")
    }
}

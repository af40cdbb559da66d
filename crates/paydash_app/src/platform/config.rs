use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use paydash_core::format::{DEFAULT_LONG_TEXT_MARKERS, DEFAULT_TRUNCATE_AT};
use paydash_core::FormatRules;
use paydash_engine::{EngineConfig, FetchSettings, DEFAULT_CREDENTIAL_PARAM};
use paydash_logging::dash_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "paydash.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub credential_store: PathBuf,
    pub log_destination: LogDestination,
    pub long_text_markers: Vec<String>,
    pub truncate_at: usize,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001".to_string(),
            poll_interval_ms: 10_000,
            credential_store: PathBuf::from(".paydash_session.ron"),
            log_destination: LogDestination::default(),
            long_text_markers: DEFAULT_LONG_TEXT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
            truncate_at: DEFAULT_TRUNCATE_AT,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        dash_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".into()));
        }
        Ok(())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
            credential_param: DEFAULT_CREDENTIAL_PARAM.to_string(),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            base_url: self.base_url.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            fetch: self.fetch_settings(),
        }
    }

    pub fn format_rules(&self) -> FormatRules {
        FormatRules {
            long_text_markers: self.long_text_markers.clone(),
            truncate_at: self.truncate_at,
            ..FormatRules::default()
        }
    }
}

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

/// Backend the console talks to when `ADMIN_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://driving-backend-stmb.onrender.com";

/// Distinguishes runtime behavior for different stages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ADMIN_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("ADMIN_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let base_url = ApiConfig::parse_base_url(&base_url)?;

        let timeout = match env::var("ADMIN_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let log_level = env::var("ADMIN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let session_file = env::var("ADMIN_SESSION_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let download_dir = env::var("ADMIN_DOWNLOAD_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            environment,
            api: ApiConfig { base_url, timeout },
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig {
                session_file,
                download_dir,
            },
        })
    }
}

/// Where the admin API lives and how long a single call may take.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    /// Parse and check a base URL; only `http` and `https` are accepted.
    pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidBaseUrl {
                value: raw.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Local files the console reads and writes.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Session file override; the console falls back to its platform data directory.
    pub session_file: Option<PathBuf>,
    pub download_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { value: String, reason: String },
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { value, reason } => {
                write!(
                    f,
                    "ADMIN_API_BASE_URL '{}' is not a usable http(s) URL: {}",
                    value, reason
                )
            }
            ConfigError::InvalidTimeout { value } => {
                write!(
                    f,
                    "ADMIN_REQUEST_TIMEOUT_SECS '{}' must be a whole number of seconds",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

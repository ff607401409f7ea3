//! Application configuration
//!
//! Sources, lowest precedence first: built-in defaults, the optional
//! `waterops.toml` in the working directory (or an explicit file), and
//! environment variables prefixed with `WATEROPS_` using `__` between
//! nested keys (e.g. `WATEROPS_API__BASE_URL`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use application::{ApplicationError, DEFAULT_DASHBOARD_TIMEOUT_SECS, DEFAULT_IDLE_TIMEOUT_MINUTES};
use integration_api::ApiConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "waterops";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "WATEROPS";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API
    #[serde(default)]
    pub api: ApiConfig,

    /// Persisted session
    #[serde(default)]
    pub session: SessionConfig,

    /// Dashboard aggregate
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how long the session is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file; defaults to `<config dir>/waterops/session.json`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Minutes without activity after which a stored session is dropped
    #[serde(default = "default_idle_timeout_minutes")]
    pub idle_timeout_minutes: u64,
}

const fn default_idle_timeout_minutes() -> u64 {
    DEFAULT_IDLE_TIMEOUT_MINUTES.unsigned_abs()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: None,
            idle_timeout_minutes: default_idle_timeout_minutes(),
        }
    }
}

impl SessionConfig {
    /// Configured session file, or the per-user default
    ///
    /// `None` when no path is configured and the platform has no
    /// configuration directory.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("waterops").join("session.json"))
        })
    }

    /// Idle timeout as a chrono duration
    pub fn idle_timeout(&self) -> chrono::Duration {
        i64::try_from(self.idle_timeout_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .unwrap_or(chrono::Duration::MAX)
    }
}

/// Dashboard aggregate settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Deadline for all seven fetches together
    #[serde(default = "default_dashboard_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_dashboard_timeout_secs() -> u64 {
    DEFAULT_DASHBOARD_TIMEOUT_SECS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_dashboard_timeout_secs(),
        }
    }
}

impl DashboardConfig {
    /// Deadline as a duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `integration_api=debug,info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment
    ///
    /// With `path` the file must exist; without it `waterops.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. WATEROPS_API__TIMEOUT_SECS
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.api
            .validate()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        if self.session.idle_timeout_minutes == 0 {
            return Err(ApplicationError::Configuration(
                "session.idle_timeout_minutes must be greater than zero".to_string(),
            ));
        }
        if self.session.path.as_deref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ApplicationError::Configuration(
                "session.path must not be empty".to_string(),
            ));
        }
        if self.dashboard.timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "dashboard.timeout_secs must be greater than zero".to_string(),
            ));
        }
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ApplicationError::Configuration(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            ))
        })?;
        Ok(())
    }
}

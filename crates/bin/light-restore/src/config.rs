//! Configuration loading — TOML file with environment variable overrides.
//!
//! Reads the file named by `LIGHT_RESTORE_CONFIG`, or `light-restore.toml`
//! in the working directory. Every field has a default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::BTreeSet;
use std::time::Duration;

use light_restore_adapter_hass::HassConfig;
use light_restore_app::settings::{DEFAULT_HISTORY_DAYS, DEFAULT_UPTIME_SENSOR, RestoreSettings};
use light_restore_domain::night_window::NightWindow;
use serde::Deserialize;
use url::Url;

/// Config file read when `LIGHT_RESTORE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "light-restore.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Home Assistant connection.
    pub hass: HassConfig,
    /// What to restore and how.
    pub restore: RestoreConfig,
    /// Readiness probe before the run.
    pub startup: StartupConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Restore behaviour.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Lights the restore never touches.
    #[serde(alias = "ignored_entites")]
    pub ignored_entities: Vec<String>,
    /// History lookback in days.
    pub days: u32,
    /// Sensor reporting the hub uptime.
    pub uptime_sensor: String,
    /// Optional window forcing every light off.
    pub night_range: Option<NightRangeConfig>,
}

/// Raw night-range bounds, validated in [`Config::restore_settings`].
#[derive(Debug, Default, Deserialize)]
pub struct NightRangeConfig {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Readiness probe settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Probes sent before giving up.
    pub max_attempts: u32,
    /// Pause between probes, in seconds.
    pub retry_delay_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// override is invalid, or if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("LIGHT_RESTORE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("HASS_URL") {
            self.hass.url = Url::parse(&val)
                .map_err(|err| ConfigError::Validation(format!("HASS_URL {val:?}: {err}")))?;
        }
        if let Some(val) = var("LIGHT_RESTORE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.restore.days == 0 {
            return Err(ConfigError::Validation(
                "restore.days must be at least 1".to_string(),
            ));
        }
        if self.hass.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "hass.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.startup.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "startup.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Pause between readiness probes.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.startup.retry_delay_secs)
    }

    /// Build the settings handed to the restore service.
    ///
    /// A malformed night range is logged and disables night mode rather than
    /// failing the run.
    #[must_use]
    pub fn restore_settings(&self) -> RestoreSettings {
        let night_window = self.restore.night_range.as_ref().and_then(|range| {
            match NightWindow::parse(range.start_time.as_deref(), range.end_time.as_deref()) {
                Ok(window) => {
                    tracing::info!(%window, "night mode configured");
                    Some(window)
                }
                Err(err) => {
                    tracing::error!(error = %err, "invalid night_range, night mode disabled");
                    None
                }
            }
        });

        RestoreSettings {
            ignored_entities: self
                .restore
                .ignored_entities
                .iter()
                .cloned()
                .collect::<BTreeSet<_>>(),
            history_days: self.restore.days,
            uptime_sensor: self.restore.uptime_sensor.clone(),
            night_window,
        }
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            ignored_entities: Vec::new(),
            days: DEFAULT_HISTORY_DAYS,
            uptime_sensor: DEFAULT_UPTIME_SENSOR.to_string(),
            night_range: None,
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            retry_delay_secs: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "light_restore=info,light_restore_app=info,light_restore_adapter_hass=info"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

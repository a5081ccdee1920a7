//! Restore settings — the explicit configuration value passed into the
//! use-cases. Built once at startup by the composition root.

use std::collections::BTreeSet;

use light_restore_domain::error::ValidationError;
use light_restore_domain::night_window::NightWindow;

/// Uptime sensor read when none is configured.
pub const DEFAULT_UPTIME_SENSOR: &str = "sensor.time_online";

/// Days of history searched when none is configured.
pub const DEFAULT_HISTORY_DAYS: u32 = 1;

/// Inputs of a restore run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSettings {
    /// Lights never touched by the restore.
    pub ignored_entities: BTreeSet<String>,
    /// Lookback window of each history query, in days.
    pub history_days: u32,
    /// Sensor reporting how long the hub has been online.
    pub uptime_sensor: String,
    /// When set, runs starting inside this window force every light off.
    pub night_window: Option<NightWindow>,
}

impl Default for RestoreSettings {
    fn default() -> Self {
        Self {
            ignored_entities: BTreeSet::new(),
            history_days: DEFAULT_HISTORY_DAYS,
            uptime_sensor: DEFAULT_UPTIME_SENSOR.to_string(),
            night_window: None,
        }
    }
}

impl RestoreSettings {
    /// Check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHistoryWindow`] when `history_days` is 0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_days == 0 {
            return Err(ValidationError::EmptyHistoryWindow);
        }
        Ok(())
    }
}

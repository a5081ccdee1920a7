//! Uptime readings and the restart instant derived from them.
//!
//! The hub exposes how long it has been online through a sensor whose state
//! is a number and whose `unit_of_measurement` names the unit. Subtracting
//! that duration from "now" yields the instant the hub last came up.

use chrono::TimeDelta;

use crate::error::ValidationError;
use crate::time::Timestamp;

/// Current state of a sensor entity, reduced to what uptime parsing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorState {
    pub entity_id: String,
    pub state: String,
    pub unit_of_measurement: Option<String>,
}

/// Unit an uptime sensor reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UptimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl UptimeUnit {
    /// Parse a unit tag, accepting long names and Home Assistant abbreviations.
    ///
    /// Returns `None` for anything else; callers decide on the fallback.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "seconds" | "s" => Some(Self::Seconds),
            "minutes" | "min" => Some(Self::Minutes),
            "hours" | "h" => Some(Self::Hours),
            "days" | "d" => Some(Self::Days),
            _ => None,
        }
    }

    /// Number of seconds in one unit.
    #[must_use]
    pub fn seconds(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3_600.0,
            Self::Days => 86_400.0,
        }
    }

    /// Whether readings in this unit lose precision compared to seconds.
    #[must_use]
    pub fn is_coarse(self) -> bool {
        !matches!(self, Self::Seconds)
    }
}

impl std::fmt::Display for UptimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds => f.write_str("seconds"),
            Self::Minutes => f.write_str("minutes"),
            Self::Hours => f.write_str("hours"),
            Self::Days => f.write_str("days"),
        }
    }
}

/// A numeric uptime value with its unit.
///
/// `unit` is `None` when the sensor's unit tag was missing or unrecognised;
/// such readings are scaled as seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UptimeReading {
    value: f64,
    unit: Option<UptimeUnit>,
}

impl UptimeReading {
    /// Build a reading from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UptimeOutOfRange`] when `value` is negative
    /// or not finite.
    pub fn new(value: f64, unit: Option<UptimeUnit>) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::UptimeOutOfRange(value.to_string()));
        }
        Ok(Self { value, unit })
    }

    /// Parse the state and unit of an uptime sensor.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UptimeNotNumeric`] when the state is not a
    /// number (e.g. `"unavailable"`), or [`ValidationError::UptimeOutOfRange`]
    /// when it is negative or not finite.
    pub fn from_sensor(sensor: &SensorState) -> Result<Self, ValidationError> {
        let raw = sensor.state.trim();
        let value: f64 = raw
            .parse()
            .map_err(|_| ValidationError::UptimeNotNumeric(raw.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::UptimeOutOfRange(raw.to_string()));
        }
        let unit = sensor
            .unit_of_measurement
            .as_deref()
            .and_then(UptimeUnit::from_tag);
        Ok(Self { value, unit })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The recognised unit, if any.
    #[must_use]
    pub fn unit(&self) -> Option<UptimeUnit> {
        self.unit
    }

    /// The unit actually used for scaling.
    #[must_use]
    pub fn effective_unit(&self) -> UptimeUnit {
        self.unit.unwrap_or(UptimeUnit::Seconds)
    }

    /// Uptime rounded to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UptimeOutOfRange`] when the duration does
    /// not fit in a [`TimeDelta`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn offset(&self) -> Result<TimeDelta, ValidationError> {
        let seconds = (self.value * self.effective_unit().seconds()).round();
        if seconds > i64::MAX as f64 {
            return Err(ValidationError::UptimeOutOfRange(self.value.to_string()));
        }
        TimeDelta::try_seconds(seconds as i64)
            .ok_or_else(|| ValidationError::UptimeOutOfRange(self.value.to_string()))
    }
}

/// Estimate the instant the hub last started: `now - uptime`.
///
/// # Errors
///
/// Returns [`ValidationError::UptimeOutOfRange`] when the uptime reaches
/// further back than a timestamp can represent.
pub fn estimate_restart(
    reading: &UptimeReading,
    now: Timestamp,
) -> Result<Timestamp, ValidationError> {
    let offset = reading.offset()?;
    now.checked_sub_signed(offset)
        .ok_or_else(|| ValidationError::UptimeOutOfRange(reading.value.to_string()))
}

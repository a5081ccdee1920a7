//! Night window — a recurring daily interval during which lights are forced
//! off instead of being restored.

use crate::error::ValidationError;
use crate::time::{TimeOfDay, Timestamp};

/// Daily time-of-day interval, inclusive at both ends.
///
/// When `start` is later than `end` the window spans midnight
/// (e.g. `22:00..06:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl NightWindow {
    #[must_use]
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Build a window from optional `HH:MM[:SS]` bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingNightBound`] when either bound is
    /// absent and [`ValidationError::InvalidTimeOfDay`] when one does not
    /// parse.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        let start = start.ok_or(ValidationError::MissingNightBound("start_time"))?;
        let end = end.ok_or(ValidationError::MissingNightBound("end_time"))?;
        Ok(Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?))
    }

    #[must_use]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether the window crosses midnight.
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Whether the time of day of `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.contains_time(at.time())
    }

    #[must_use]
    pub fn contains_time(&self, time: TimeOfDay) -> bool {
        if self.wraps_midnight() {
            time >= self.start || time <= self.end
        } else {
            time >= self.start && time <= self.end
        }
    }
}

impl std::fmt::Display for NightWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%H:%M:%S"),
            self.end.format("%H:%M:%S")
        )
    }
}

/// Parse `HH:MM:SS` or `HH:MM`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeOfDay`] for anything else.
pub fn parse_time_of_day(raw: &str) -> Result<TimeOfDay, ValidationError> {
    let trimmed = raw.trim();
    TimeOfDay::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| TimeOfDay::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTimeOfDay(raw.to_string()))
}

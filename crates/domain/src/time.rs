//! Time and timestamp helpers.
//!
//! Timestamps are naive local wall-clock times. The restart instant, history
//! record times and "now" all use this convention so they stay comparable
//! with one another; adapters convert to and from zoned times at the edge.

use chrono::{Local, NaiveDateTime, NaiveTime};

/// Naive local timestamp.
pub type Timestamp = NaiveDateTime;

/// Naive time of day, used for the night window bounds.
pub type TimeOfDay = NaiveTime;

/// Return the current local time without zone information.
#[must_use]
pub fn now() -> Timestamp {
    Local::now().naive_local()
}

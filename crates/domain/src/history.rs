//! History records — past states of an entity as kept by the platform recorder.

use crate::time::Timestamp;

/// State string the platform records while a device cannot be reached.
pub const UNAVAILABLE: &str = "unavailable";

/// A single recorded state of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub state: String,
    pub last_changed: Timestamp,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(state: impl Into<String>, last_changed: Timestamp) -> Self {
        Self {
            state: state.into(),
            last_changed,
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.state == UNAVAILABLE
    }
}

/// The chronologically last record.
///
/// Records sharing the latest timestamp resolve to the one appearing later in
/// the slice, matching the order the recorder returns them in.
#[must_use]
pub fn latest(records: &[HistoryRecord]) -> Option<&HistoryRecord> {
    records.iter().max_by_key(|record| record.last_changed)
}

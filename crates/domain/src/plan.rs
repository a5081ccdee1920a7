//! Restoration plan — the per-light target state computed for one run.

use std::collections::BTreeMap;

use crate::history::{HistoryRecord, latest};

/// State a light is driven to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetState {
    On,
    Off,
}

impl TargetState {
    /// Home Assistant service that drives a light to this state.
    #[must_use]
    pub fn service(self) -> &'static str {
        match self {
            Self::On => "turn_on",
            Self::Off => "turn_off",
        }
    }
}

impl std::fmt::Display for TargetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Why a light ended up with its target state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanReason {
    /// The run started inside the night window.
    NightMode,
    /// The last recorded state, verbatim.
    History(String),
    /// The last recorded state was `unavailable`.
    Unavailable,
    /// The history window held no records.
    NoHistory,
    /// The history query failed.
    LookupFailed,
}

impl std::fmt::Display for PlanReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NightMode => f.write_str("night mode"),
            Self::History(state) => write!(f, "history: {state}"),
            Self::Unavailable => f.write_str("history: unavailable"),
            Self::NoHistory => f.write_str("no history"),
            Self::LookupFailed => f.write_str("history lookup failed"),
        }
    }
}

/// Target state of a single light plus the reason for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub target: TargetState,
    pub reason: PlanReason,
}

impl PlanEntry {
    #[must_use]
    pub fn off(reason: PlanReason) -> Self {
        Self {
            target: TargetState::Off,
            reason,
        }
    }

    /// Map a light's history to its target state.
    ///
    /// Only an exact `"on"` restores the light on; `"unavailable"`, an empty
    /// history and every other state string turn it off.
    #[must_use]
    pub fn from_history(records: &[HistoryRecord]) -> Self {
        match latest(records) {
            None => Self::off(PlanReason::NoHistory),
            Some(record) if record.is_unavailable() => Self::off(PlanReason::Unavailable),
            Some(record) if record.state == "on" => Self {
                target: TargetState::On,
                reason: PlanReason::History(record.state.clone()),
            },
            Some(record) => Self::off(PlanReason::History(record.state.clone())),
        }
    }
}

/// Light id → target state, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorationPlan {
    entries: BTreeMap<String, PlanEntry>,
}

impl RestorationPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every light off because of the night window.
    #[must_use]
    pub fn all_off<'a>(entity_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let entries = entity_ids
            .into_iter()
            .map(|id| (id.to_string(), PlanEntry::off(PlanReason::NightMode)))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, entry: PlanEntry) {
        self.entries.insert(entity_id.into(), entry);
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&PlanEntry> {
        self.entries.get(entity_id)
    }

    #[must_use]
    pub fn target(&self, entity_id: &str) -> Option<TargetState> {
        self.get(entity_id).map(|entry| entry.target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlanEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every entry targets [`TargetState::Off`].
    #[must_use]
    pub fn is_all_off(&self) -> bool {
        self.entries
            .values()
            .all(|entry| entry.target == TargetState::Off)
    }
}

/// A command that could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCommand {
    pub entity_id: String,
    pub target: TargetState,
    pub error: String,
}

/// Outcome of applying a [`RestorationPlan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub night_mode: bool,
    pub turned_on: Vec<String>,
    pub turned_off: Vec<String>,
    pub failed: Vec<FailedCommand>,
}

impl RestoreReport {
    /// Number of lights a command was attempted for.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.turned_on.len() + self.turned_off.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

//! Home Assistant REST payloads and their mapping to domain types.

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Deserialize;
use serde_json::{Map, Value};

use light_restore_domain::history::HistoryRecord;
use light_restore_domain::light::{GroupMarkers, LightEntity};
use light_restore_domain::time::Timestamp;
use light_restore_domain::uptime::SensorState;

/// An entry of `GET /api/states` or the body of `GET /api/states/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct HassState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl HassState {
    #[must_use]
    pub fn into_light(self) -> LightEntity {
        LightEntity {
            group: GroupMarkers::from_attributes(&self.attributes),
            entity_id: self.entity_id,
        }
    }

    #[must_use]
    pub fn into_sensor(self) -> SensorState {
        let unit_of_measurement = self
            .attributes
            .get("unit_of_measurement")
            .and_then(Value::as_str)
            .map(str::to_string);
        SensorState {
            entity_id: self.entity_id,
            state: self.state,
            unit_of_measurement,
        }
    }
}

/// One state change of `GET /api/history/period`.
///
/// With `minimal_response` only the first entry carries the entity id and
/// attributes, so only `state` and `last_changed` are read.
#[derive(Clone, Debug, Deserialize)]
pub struct HassHistoryEntry {
    pub state: String,
    pub last_changed: DateTime<FixedOffset>,
}

impl From<HassHistoryEntry> for HistoryRecord {
    fn from(entry: HassHistoryEntry) -> Self {
        Self::new(entry.state, entry.last_changed.with_timezone(&Local).naive_local())
    }
}

/// Response of `GET /api/history/period`: one list per filtered entity.
pub type HassHistory = Vec<Vec<HassHistoryEntry>>;

/// Attach the local zone to a naive local timestamp.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times
/// skipped by a DST jump are read as UTC.
#[must_use]
pub fn to_local(timestamp: Timestamp) -> DateTime<Local> {
    Local
        .from_local_datetime(&timestamp)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&timestamp))
}

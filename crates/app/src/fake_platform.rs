//! In-memory [`HomePlatform`] used by the service tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use light_restore_domain::error::{LightRestoreError, NotFoundError};
use light_restore_domain::history::HistoryRecord;
use light_restore_domain::light::{GroupMarkers, LightEntity};
use light_restore_domain::plan::TargetState;
use light_restore_domain::time::Timestamp;
use light_restore_domain::uptime::SensorState;

use crate::ports::HomePlatform;

pub fn at(h: u32, m: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 11, 3)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn platform_error(message: &str) -> LightRestoreError {
    LightRestoreError::Platform(message.into())
}

pub struct FakePlatform {
    now: Timestamp,
    lights: BTreeMap<String, GroupMarkers>,
    sensors: HashMap<String, SensorState>,
    history: HashMap<String, Vec<HistoryRecord>>,
    failing_history: HashSet<String>,
    failing_lookups: HashSet<String>,
    failing_commands: HashSet<String>,
    list_fails: bool,
    pub history_calls: AtomicUsize,
    pub history_queries: Mutex<Vec<(String, Timestamp, u32)>>,
    pub light_calls: AtomicUsize,
    pub commands: Mutex<Vec<(String, TargetState)>>,
}

impl FakePlatform {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            lights: BTreeMap::new(),
            sensors: HashMap::new(),
            history: HashMap::new(),
            failing_history: HashSet::new(),
            failing_lookups: HashSet::new(),
            failing_commands: HashSet::new(),
            list_fails: false,
            history_calls: AtomicUsize::new(0),
            history_queries: Mutex::new(Vec::new()),
            light_calls: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn with_light(mut self, entity_id: &str) -> Self {
        self.lights
            .insert(entity_id.to_string(), GroupMarkers::default());
        self
    }

    pub fn with_group(mut self, entity_id: &str, markers: GroupMarkers) -> Self {
        self.lights.insert(entity_id.to_string(), markers);
        self
    }

    pub fn with_uptime(mut self, entity_id: &str, state: &str, unit: Option<&str>) -> Self {
        self.sensors.insert(
            entity_id.to_string(),
            SensorState {
                entity_id: entity_id.to_string(),
                state: state.to_string(),
                unit_of_measurement: unit.map(str::to_string),
            },
        );
        self
    }

    pub fn with_history(mut self, entity_id: &str, records: Vec<HistoryRecord>) -> Self {
        self.history.insert(entity_id.to_string(), records);
        self
    }

    pub fn with_failing_history(mut self, entity_id: &str) -> Self {
        self.failing_history.insert(entity_id.to_string());
        self
    }

    pub fn with_failing_lookup(mut self, entity_id: &str) -> Self {
        self.failing_lookups.insert(entity_id.to_string());
        self
    }

    pub fn with_failing_command(mut self, entity_id: &str) -> Self {
        self.failing_commands.insert(entity_id.to_string());
        self
    }

    pub fn with_failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn history_call_count(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn light_call_count(&self) -> usize {
        self.light_calls.load(Ordering::SeqCst)
    }

    pub fn sent_commands(&self) -> Vec<(String, TargetState)> {
        self.commands.lock().unwrap().clone()
    }

    fn command(&self, entity_id: &str, target: TargetState) -> Result<(), LightRestoreError> {
        if self.failing_commands.contains(entity_id) {
            return Err(platform_error("command rejected"));
        }
        self.commands
            .lock()
            .unwrap()
            .push((entity_id.to_string(), target));
        Ok(())
    }
}

impl HomePlatform for FakePlatform {
    fn list_lights(&self) -> impl Future<Output = Result<Vec<String>, LightRestoreError>> + Send {
        let result = if self.list_fails {
            Err(platform_error("hub offline"))
        } else {
            Ok(self.lights.keys().cloned().collect())
        };
        async { result }
    }

    fn light(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<LightEntity, LightRestoreError>> + Send {
        self.light_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.failing_lookups.contains(entity_id) {
            Err(platform_error("attributes unavailable"))
        } else {
            self.lights
                .get(entity_id)
                .map(|group| LightEntity {
                    entity_id: entity_id.to_string(),
                    group: *group,
                })
                .ok_or_else(|| {
                    NotFoundError {
                        entity: "Entity",
                        id: entity_id.to_string(),
                    }
                    .into()
                })
        };
        async { result }
    }

    fn sensor_state(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<SensorState, LightRestoreError>> + Send {
        let result = self.sensors.get(entity_id).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Entity",
                id: entity_id.to_string(),
            }
            .into()
        });
        async { result }
    }

    fn history(
        &self,
        entity_id: &str,
        end: Timestamp,
        days: u32,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, LightRestoreError>> + Send {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_queries
            .lock()
            .unwrap()
            .push((entity_id.to_string(), end, days));
        let result = if self.failing_history.contains(entity_id) {
            Err(platform_error("recorder query failed"))
        } else {
            Ok(self.history.get(entity_id).cloned().unwrap_or_default())
        };
        async { result }
    }

    fn turn_on(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<(), LightRestoreError>> + Send {
        let result = self.command(entity_id, TargetState::On);
        async { result }
    }

    fn turn_off(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<(), LightRestoreError>> + Send {
        let result = self.command(entity_id, TargetState::Off);
        async { result }
    }

    fn now(&self) -> Timestamp {
        self.now
    }
}

//! Home platform port — everything the restore logic needs from the hub.
//!
//! The core never references a concrete hub API. Adapters (e.g. the Home
//! Assistant REST client) implement this trait and reduce raw platform data
//! to domain types before handing it over.

use std::future::Future;

use light_restore_domain::error::LightRestoreError;
use light_restore_domain::history::HistoryRecord;
use light_restore_domain::light::LightEntity;
use light_restore_domain::plan::TargetState;
use light_restore_domain::time::Timestamp;
use light_restore_domain::uptime::SensorState;

/// Query and control surface of a home-automation hub.
pub trait HomePlatform: Send + Sync {
    /// Identifiers of every entity in the light domain.
    fn list_lights(&self) -> impl Future<Output = Result<Vec<String>, LightRestoreError>> + Send;

    /// Snapshot of a single light, with its group markers.
    fn light(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<LightEntity, LightRestoreError>> + Send;

    /// Current state and unit of a sensor.
    fn sensor_state(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<SensorState, LightRestoreError>> + Send;

    /// Recorded states of an entity in the `days` days ending at `end`.
    fn history(
        &self,
        entity_id: &str,
        end: Timestamp,
        days: u32,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, LightRestoreError>> + Send;

    /// Switch a light on.
    fn turn_on(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<(), LightRestoreError>> + Send;

    /// Switch a light off.
    fn turn_off(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<(), LightRestoreError>> + Send;

    /// Current naive local time as seen by the hub.
    fn now(&self) -> Timestamp;

    /// Drive a light to `target` through [`turn_on`](Self::turn_on) or
    /// [`turn_off`](Self::turn_off).
    fn set_state(
        &self,
        entity_id: &str,
        target: TargetState,
    ) -> impl Future<Output = Result<(), LightRestoreError>> + Send {
        async move {
            match target {
                TargetState::On => self.turn_on(entity_id).await,
                TargetState::Off => self.turn_off(entity_id).await,
            }
        }
    }
}

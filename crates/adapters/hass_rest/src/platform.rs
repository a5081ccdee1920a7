//! [`HomePlatform`] implementation backed by [`HassClient`].

use light_restore_app::ports::HomePlatform;
use light_restore_domain::error::LightRestoreError;
use light_restore_domain::history::HistoryRecord;
use light_restore_domain::light::{LightEntity, is_light_entity_id};
use light_restore_domain::time::{self, Timestamp};
use light_restore_domain::uptime::SensorState;

use crate::client::HassClient;
use crate::error::HassError;

/// Split `light.kitchen` into its domain, `light`.
fn domain_of(entity_id: &str) -> Result<&str, HassError> {
    entity_id
        .split_once('.')
        .map(|(domain, _)| domain)
        .filter(|domain| !domain.is_empty())
        .ok_or_else(|| HassError::InvalidEntityId(entity_id.to_string()))
}

impl HassClient {
    async fn command(&self, entity_id: &str, service: &str) -> Result<(), HassError> {
        let domain = domain_of(entity_id)?;
        self.call_service(domain, service, entity_id).await
    }
}

impl HomePlatform for HassClient {
    async fn list_lights(&self) -> Result<Vec<String>, LightRestoreError> {
        let states = self.get_states().await?;
        Ok(states
            .into_iter()
            .map(|state| state.entity_id)
            .filter(|id| is_light_entity_id(id))
            .collect())
    }

    async fn light(&self, entity_id: &str) -> Result<LightEntity, LightRestoreError> {
        Ok(self.get_state(entity_id).await?.into_light())
    }

    async fn sensor_state(&self, entity_id: &str) -> Result<SensorState, LightRestoreError> {
        Ok(self.get_state(entity_id).await?.into_sensor())
    }

    async fn history(
        &self,
        entity_id: &str,
        end: Timestamp,
        days: u32,
    ) -> Result<Vec<HistoryRecord>, LightRestoreError> {
        let history = self.get_history(entity_id, end, days).await?;
        Ok(history
            .into_iter()
            .flatten()
            .map(HistoryRecord::from)
            .collect())
    }

    async fn turn_on(&self, entity_id: &str) -> Result<(), LightRestoreError> {
        Ok(self.command(entity_id, "turn_on").await?)
    }

    async fn turn_off(&self, entity_id: &str) -> Result<(), LightRestoreError> {
        Ok(self.command(entity_id, "turn_off").await?)
    }

    fn now(&self) -> Timestamp {
        time::now()
    }
}

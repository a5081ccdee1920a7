//! Light set resolver — narrows every light on the hub down to the
//! individually controllable, non-ignored ones.

use std::collections::BTreeSet;

use light_restore_domain::error::LightRestoreError;
use light_restore_domain::light::LightEntity;

use crate::ports::HomePlatform;

/// Resolve the lights to restore from the platform's full light list.
///
/// # Errors
///
/// Returns the platform error when the light list itself cannot be read.
/// Per-light attribute failures never abort the run.
pub async fn resolve_lights<P: HomePlatform>(
    platform: &P,
    ignored: &BTreeSet<String>,
) -> Result<BTreeSet<LightEntity>, LightRestoreError> {
    let all = platform
        .list_lights()
        .await?
        .into_iter()
        .collect::<BTreeSet<_>>();
    Ok(resolve(platform, &all, ignored).await)
}

/// Remove ignored ids, then remove lights whose attributes mark them as
/// groups.
///
/// A light whose attributes cannot be fetched is kept and treated as an
/// individual fixture.
pub async fn resolve<P: HomePlatform>(
    platform: &P,
    all_lights: &BTreeSet<String>,
    ignored: &BTreeSet<String>,
) -> BTreeSet<LightEntity> {
    let mut resolved = BTreeSet::new();

    for entity_id in all_lights.difference(ignored) {
        let light = match platform.light(entity_id).await {
            Ok(light) => light,
            Err(err) => {
                tracing::warn!(
                    entity_id = %entity_id,
                    error = %err,
                    "could not read light attributes, assuming it is not a group"
                );
                LightEntity::fixture(entity_id.clone())
            }
        };

        if light.group.has_member_list {
            tracing::debug!(entity_id = %entity_id, "skipping light group");
            continue;
        }
        if light.group.is_vendor_aggregate {
            tracing::debug!(entity_id = %entity_id, "skipping hue group");
            continue;
        }
        resolved.insert(light);
    }

    tracing::info!(count = resolved.len(), "resolved lights to restore");
    resolved
}

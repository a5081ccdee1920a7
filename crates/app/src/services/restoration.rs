//! State restoration — decides each light's target state and applies it.

use std::collections::BTreeSet;

use light_restore_domain::light::{LightEntity, object_id};
use light_restore_domain::night_window::NightWindow;
use light_restore_domain::plan::{
    FailedCommand, PlanEntry, PlanReason, RestorationPlan, RestoreReport, TargetState,
};
use light_restore_domain::time::Timestamp;

use crate::ports::HomePlatform;

/// The all-off plan, if `now` falls inside the night window.
#[must_use]
pub fn night_override(
    lights: &BTreeSet<LightEntity>,
    night_window: Option<&NightWindow>,
    now: Timestamp,
) -> Option<RestorationPlan> {
    let window = night_window?;
    if !window.contains(now) {
        return None;
    }
    tracing::info!(
        %window,
        %now,
        "current time is within the night range, turning all lights off"
    );
    Some(RestorationPlan::all_off(
        lights.iter().map(|light| light.entity_id.as_str()),
    ))
}

/// Build the restoration plan.
///
/// Inside the night window every light is planned off and no history is
/// queried. Otherwise each light's history over the `history_days` days
/// ending at `restart` decides its state; lookup failures and empty histories
/// fall back to off.
pub async fn decide<P: HomePlatform>(
    platform: &P,
    lights: &BTreeSet<LightEntity>,
    restart: Timestamp,
    history_days: u32,
    night_window: Option<&NightWindow>,
    now: Timestamp,
) -> RestorationPlan {
    if let Some(plan) = night_override(lights, night_window, now) {
        return plan;
    }

    let mut plan = RestorationPlan::new();
    for light in lights {
        let entity_id = light.entity_id.as_str();
        let entry = match platform.history(entity_id, restart, history_days).await {
            Ok(records) => {
                let entry = PlanEntry::from_history(&records);
                if entry.reason == PlanReason::NoHistory {
                    tracing::warn!(
                        entity_id,
                        "could not get state info, defaulting to off"
                    );
                } else {
                    tracing::debug!(entity_id, reason = %entry.reason, "last recorded state");
                }
                entry
            }
            Err(err) => {
                tracing::warn!(
                    entity_id,
                    error = %err,
                    "history lookup failed, defaulting to off"
                );
                PlanEntry::off(PlanReason::LookupFailed)
            }
        };
        plan.insert(entity_id, entry);
    }
    plan
}

/// Send one command per planned light, in plan order.
///
/// A failed command is logged and recorded; the remaining lights are still
/// processed and nothing is rolled back.
pub async fn apply<P: HomePlatform>(platform: &P, plan: &RestorationPlan) -> RestoreReport {
    let mut report = RestoreReport::default();

    for (entity_id, entry) in plan.iter() {
        match platform.set_state(entity_id, entry.target).await {
            Ok(()) => {
                tracing::info!(
                    entity_id,
                    name = object_id(entity_id),
                    state = %entry.target,
                    reason = %entry.reason,
                    "light restored"
                );
                match entry.target {
                    TargetState::On => report.turned_on.push(entity_id.to_string()),
                    TargetState::Off => report.turned_off.push(entity_id.to_string()),
                }
            }
            Err(err) => {
                tracing::error!(
                    entity_id,
                    service = entry.target.service(),
                    error = %err,
                    "failed to restore light"
                );
                report.failed.push(FailedCommand {
                    entity_id: entity_id.to_string(),
                    target: entry.target,
                    error: err.to_string(),
                });
            }
        }
    }

    report
}

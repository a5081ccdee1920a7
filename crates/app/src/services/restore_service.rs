//! Restore service — runs one complete restore after a hub restart.
//!
//! `Start → {ForceOff | Restore} → Done`: resolve the lights, force them off
//! when inside the night window, otherwise estimate the restart instant and
//! restore each light from history, then apply the plan.

use light_restore_domain::error::LightRestoreError;
use light_restore_domain::plan::{RestorationPlan, RestoreReport};

use crate::ports::HomePlatform;
use crate::services::light_set_resolver::resolve_lights;
use crate::services::restart_estimator::estimate_restart_instant;
use crate::services::restoration::{apply, decide, night_override};
use crate::settings::RestoreSettings;

/// Application service orchestrating a restore run.
pub struct RestoreService<P> {
    platform: P,
    settings: RestoreSettings,
}

impl<P: HomePlatform> RestoreService<P> {
    /// Create a new service over the given platform and settings.
    pub fn new(platform: P, settings: RestoreSettings) -> Self {
        Self { platform, settings }
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Compute the restoration plan without sending any command.
    ///
    /// The night window is checked before the uptime sensor is read, so a
    /// broken uptime sensor never prevents the all-off override.
    ///
    /// # Errors
    ///
    /// Returns a platform error if the lights cannot be listed, or an
    /// uptime error (missing sensor, non-numeric value) when restoring from
    /// history.
    pub async fn plan(&self) -> Result<RestorationPlan, LightRestoreError> {
        self.prepare().await.map(|(plan, _)| plan)
    }

    /// Run the restore: plan, then send one command per light.
    ///
    /// # Errors
    ///
    /// See [`plan`](Self::plan). Command failures do not abort the run; they
    /// are reported in [`RestoreReport::failed`].
    pub async fn run(&self) -> Result<RestoreReport, LightRestoreError> {
        tracing::info!("restoring previous light states");
        let (plan, night_mode) = self.prepare().await?;
        let mut report = apply(&self.platform, &plan).await;
        report.night_mode = night_mode;
        tracing::info!(
            on = report.turned_on.len(),
            off = report.turned_off.len(),
            failed = report.failed.len(),
            night_mode,
            "light restore finished"
        );
        Ok(report)
    }

    async fn prepare(&self) -> Result<(RestorationPlan, bool), LightRestoreError> {
        let lights = resolve_lights(&self.platform, &self.settings.ignored_entities).await?;
        let night_window = self.settings.night_window.as_ref();
        let now = self.platform.now();
        tracing::debug!(%now, "current time");

        if let Some(plan) = night_override(&lights, night_window, now) {
            return Ok((plan, true));
        }

        let restart =
            estimate_restart_instant(&self.platform, &self.settings.uptime_sensor, now).await?;
        let plan = decide(
            &self.platform,
            &lights,
            restart,
            self.settings.history_days,
            night_window,
            now,
        )
        .await;
        Ok((plan, false))
    }
}

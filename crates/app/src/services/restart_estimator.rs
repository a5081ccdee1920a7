//! Restart time estimator — turns the hub's uptime sensor into the instant
//! the hub last came online.

use light_restore_domain::error::LightRestoreError;
use light_restore_domain::time::Timestamp;
use light_restore_domain::uptime::{UptimeReading, estimate_restart};

use crate::ports::HomePlatform;

/// Read `uptime_sensor` and subtract its value from `now`.
///
/// Units other than seconds are accepted with a precision warning; an
/// unrecognised or missing unit is scaled as seconds with a louder one.
///
/// # Errors
///
/// Returns the platform error if the sensor cannot be read, or
/// [`LightRestoreError::Validation`] if its state is not a usable uptime.
pub async fn estimate_restart_instant<P: HomePlatform>(
    platform: &P,
    uptime_sensor: &str,
    now: Timestamp,
) -> Result<Timestamp, LightRestoreError> {
    let sensor = platform.sensor_state(uptime_sensor).await?;
    let reading = UptimeReading::from_sensor(&sensor)?;
    let unit_tag = sensor.unit_of_measurement.as_deref().unwrap_or("");

    match reading.unit() {
        None => tracing::warn!(
            sensor = uptime_sensor,
            unit = unit_tag,
            "unrecognised uptime unit, treating value as seconds; restart time may be wrong"
        ),
        Some(unit) if unit.is_coarse() => tracing::warn!(
            sensor = uptime_sensor,
            %unit,
            "uptime measured in {unit}, this may produce inaccurate results"
        ),
        Some(unit) => tracing::debug!(sensor = uptime_sensor, %unit, "uptime unit"),
    }

    let offset = reading.offset()?;
    let restart = estimate_restart(&reading, now)?;
    tracing::info!(
        offset_secs = offset.num_seconds(),
        %now,
        %restart,
        "calculated hub start time"
    );
    Ok(restart)
}

//! # light-restore — restore lights after a hub restart
//!
//! Composition root, launched when Home Assistant starts.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Build the Home Assistant REST client (adapter)
//! - Wait for the REST API to answer
//! - Run the restore service once and exit
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use light_restore_adapter_hass::HassClient;
use light_restore_app::services::restore_service::RestoreService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let settings = config.restore_settings();
    settings.validate()?;

    // Adapter
    let client = HassClient::from_env(&config.hass)?;
    tracing::info!(url = %client.base_url(), "waiting for Home Assistant");
    client
        .wait_until_ready(config.startup.max_attempts, config.retry_delay())
        .await
        .inspect_err(|err| tracing::error!(error = %err, "Home Assistant unreachable"))?;

    // Service
    let service = RestoreService::new(client, settings);
    let report = service
        .run()
        .await
        .inspect_err(|err| tracing::error!(error = %err, "light restore aborted"))?;

    for failure in &report.failed {
        tracing::warn!(
            entity_id = %failure.entity_id,
            target = %failure.target,
            error = %failure.error,
            "light left unrestored"
        );
    }

    Ok(())
}

//! # light-restore-app
//!
//! Application layer — use-cases and the **platform port** (trait).
//!
//! ## Responsibilities
//! - Define the [`HomePlatform`](ports::HomePlatform) port that adapters
//!   implement: list lights, read attributes and sensor states, query history,
//!   send `turn_on` / `turn_off`, read the clock
//! - Estimate the restart instant from the uptime sensor
//! - Resolve the set of individually controllable lights
//! - Decide each light's target state and apply the resulting plan
//! - Orchestrate one restore run through [`RestoreService`](services::restore_service::RestoreService)
//!
//! ## Dependency rule
//! Depends on `light-restore-domain` only (plus `tracing` for diagnostics).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod settings;

#[cfg(test)]
mod fake_platform;

//! # light-restore-domain
//!
//! Pure domain model for restoring light states after a hub restart.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, naive local timestamps
//! - **Uptime readings** and the restart-instant estimate derived from them
//! - **Lights** reduced to the group markers needed to tell fixtures from groups
//! - **History records** of a light's past states
//! - The recurring **night window** that overrides restoration
//! - The **restoration plan**: one target state per light
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod history;
pub mod light;
pub mod night_window;
pub mod plan;
pub mod uptime;

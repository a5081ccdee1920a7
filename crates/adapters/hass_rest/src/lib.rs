//! # light-restore-adapter-hass
//!
//! Home Assistant adapter — implements the
//! [`HomePlatform`](light_restore_app::ports::HomePlatform) port over the
//! Home Assistant REST API.
//!
//! ## Endpoints used
//!
//! | Port operation | Endpoint |
//! |----------------|----------|
//! | readiness | `GET /api/` |
//! | `list_lights` | `GET /api/states` (filtered to `light.*`) |
//! | `light`, `sensor_state` | `GET /api/states/{entity_id}` |
//! | `history` | `GET /api/history/period/{start}` |
//! | `turn_on`, `turn_off` | `POST /api/services/{domain}/{service}` |
//!
//! Raw attribute maps are reduced to domain views here; the application
//! layer never sees JSON.
//!
//! ## Dependency rule
//!
//! Depends on `light-restore-app` (port traits) and `light-restore-domain` only.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
mod platform;

pub use client::HassClient;
pub use config::HassConfig;
pub use error::HassError;

//! Application services — use-case implementations.
//!
//! Each use-case accepts a [`HomePlatform`](crate::ports::HomePlatform)
//! implementation through a generic parameter, keeping this layer decoupled
//! from concrete adapters.

pub mod light_set_resolver;
pub mod restart_estimator;
pub mod restoration;
pub mod restore_service;

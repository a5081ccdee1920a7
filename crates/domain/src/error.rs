//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`LightRestoreError`] via `From` at the port boundary.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum LightRestoreError {
    /// A value failed a domain invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist on the platform.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The home-automation platform (or the transport to it) failed.
    #[error("platform error: {0}")]
    Platform(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The uptime sensor state is not a number.
    #[error("uptime value {0:?} is not a number")]
    UptimeNotNumeric(String),

    /// The uptime sensor reported a negative or non-finite value.
    #[error("uptime value {0:?} must be a finite, non-negative number")]
    UptimeOutOfRange(String),

    /// A night-range bound is not a valid time of day.
    #[error("invalid time of day {0:?}, expected HH:MM or HH:MM:SS")]
    InvalidTimeOfDay(String),

    /// A night-range bound was not configured.
    #[error("night range is missing `{0}`")]
    MissingNightBound(&'static str),

    /// The history lookback window must cover at least one day.
    #[error("history window must be at least one day")]
    EmptyHistoryWindow,
}

/// An entity lookup came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

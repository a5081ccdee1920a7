//! Home Assistant adapter error types.

use light_restore_domain::error::{LightRestoreError, NotFoundError};

/// Errors specific to the Home Assistant REST adapter.
#[derive(Debug, thiserror::Error)]
pub enum HassError {
    /// The HTTP request could not be sent or its body not decoded.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("invalid Home Assistant URL")]
    Url(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments.
    #[error("Home Assistant URL {0} cannot be used as a base")]
    CannotBeABase(String),

    /// The access token environment variable is unset or empty.
    #[error("missing Home Assistant token in env var {0}")]
    MissingToken(String),

    /// Home Assistant rejected the access token.
    #[error("Home Assistant unauthorized during {0}, verify the access token")]
    Unauthorized(String),

    /// The requested entity does not exist.
    #[error("entity {0} not found")]
    EntityNotFound(String),

    /// Any other non-success response.
    #[error("Home Assistant error during {action}: {details}")]
    Status { action: String, details: String },

    /// The API never answered the readiness probe.
    #[error("Home Assistant API not ready after {0} attempts")]
    NotReady(u32),

    /// The history window reaches past the representable date range.
    #[error("history window of {0} days is out of range")]
    HistoryWindowOutOfRange(u32),

    /// An entity id without a `domain.` prefix.
    #[error("invalid entity id {0:?}")]
    InvalidEntityId(String),
}

impl HassError {
    /// Convert into a [`LightRestoreError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> LightRestoreError {
        match self {
            Self::EntityNotFound(id) => NotFoundError {
                entity: "Entity",
                id,
            }
            .into(),
            other => LightRestoreError::Platform(Box::new(other)),
        }
    }
}

impl From<HassError> for LightRestoreError {
    fn from(err: HassError) -> Self {
        err.into_domain()
    }
}

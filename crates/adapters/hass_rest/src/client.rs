//! Thin client over the Home Assistant REST API.

use std::time::Duration;

use chrono::TimeDelta;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use light_restore_domain::time::Timestamp;

use crate::config::HassConfig;
use crate::error::HassError;
use crate::model::{HassHistory, HassState, to_local};

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

/// Authenticated Home Assistant REST client.
pub struct HassClient {
    base_url: Url,
    http: reqwest::Client,
    token: String,
}

impl HassClient {
    /// Build a client with an explicit access token.
    ///
    /// # Errors
    ///
    /// Returns [`HassError::MissingToken`] for a blank token, or
    /// [`HassError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &HassConfig, token: impl Into<String>) -> Result<Self, HassError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(HassError::MissingToken(config.token_env.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.url.clone(),
            http,
            token,
        })
    }

    /// Build a client reading the token from `config.token_env`.
    ///
    /// # Errors
    ///
    /// Returns [`HassError::MissingToken`] when the variable is unset or blank.
    pub fn from_env(config: &HassConfig) -> Result<Self, HassError> {
        let token = std::env::var(&config.token_env)
            .map_err(|_| HassError::MissingToken(config.token_env.clone()))?;
        Self::new(config, token)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, HassError> {
        let base = if self.base_url.path().ends_with('/') {
            self.base_url.clone()
        } else {
            Url::parse(&format!("{}/", self.base_url))?
        };
        Ok(base.join(endpoint.trim_start_matches('/'))?)
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response, HassError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(HassError::Unauthorized(action.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let details = if body.is_empty() {
            status.to_string()
        } else {
            format!("{status}: {body}")
        };
        Err(HassError::Status {
            action: action.to_string(),
            details,
        })
    }

    /// `GET /api/` — succeeds once the API is up and the token accepted.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the probe.
    pub async fn ping(&self) -> Result<(), HassError> {
        let url = self.endpoint_url("/api/")?;
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let response = self.check_status(response, "GET /api/").await?;
        let status: ApiStatus = response.json().await?;
        tracing::debug!(message = %status.message, "Home Assistant API answered");
        Ok(())
    }

    /// Probe the API until it answers, at most `max_attempts` times with
    /// `delay` between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`HassError::Unauthorized`] straight away (retrying cannot fix
    /// a bad token) and [`HassError::NotReady`] once attempts are exhausted.
    pub async fn wait_until_ready(
        &self,
        max_attempts: u32,
        delay: Duration,
    ) -> Result<(), HassError> {
        for attempt in 1..=max_attempts {
            match self.ping().await {
                Ok(()) => {
                    tracing::info!(attempt, url = %self.base_url, "Home Assistant API is ready");
                    return Ok(());
                }
                Err(err @ HassError::Unauthorized(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "Home Assistant API not ready yet"
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
        Err(HassError::NotReady(max_attempts))
    }

    /// `GET /api/states`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decoding error.
    pub async fn get_states(&self) -> Result<Vec<HassState>, HassError> {
        let url = self.endpoint_url("/api/states")?;
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let response = self.check_status(response, "GET /api/states").await?;
        Ok(response.json().await?)
    }

    /// `GET /api/states/{entity_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HassError::EntityNotFound`] on 404, otherwise the transport,
    /// status or decoding error.
    pub async fn get_state(&self, entity_id: &str) -> Result<HassState, HassError> {
        let mut url = self.endpoint_url("/api/states")?;
        self.push_segment(&mut url, entity_id)?;
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(HassError::EntityNotFound(entity_id.to_string()));
        }
        let response = self
            .check_status(response, &format!("GET /api/states/{entity_id}"))
            .await?;
        Ok(response.json().await?)
    }

    /// `GET /api/history/period/{end - days}?filter_entity_id=…&end_time=…`
    ///
    /// # Errors
    ///
    /// Returns [`HassError::HistoryWindowOutOfRange`] when the window start
    /// is not representable, otherwise the transport, status or decoding
    /// error.
    pub async fn get_history(
        &self,
        entity_id: &str,
        end: Timestamp,
        days: u32,
    ) -> Result<HassHistory, HassError> {
        let start = end
            .checked_sub_signed(TimeDelta::days(i64::from(days)))
            .ok_or(HassError::HistoryWindowOutOfRange(days))?;
        let mut url = self.endpoint_url("/api/history/period")?;
        self.push_segment(&mut url, &to_local(start).to_rfc3339())?;
        url.query_pairs_mut()
            .append_pair("filter_entity_id", entity_id)
            .append_pair("end_time", &to_local(end).to_rfc3339())
            .append_key_only("minimal_response")
            .append_key_only("no_attributes");

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let response = self
            .check_status(response, &format!("GET /api/history/period ({entity_id})"))
            .await?;
        Ok(response.json().await?)
    }

    /// `POST /api/services/{domain}/{service}` targeting one entity.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
    ) -> Result<(), HassError> {
        let url = self.endpoint_url(&format!("/api/services/{domain}/{service}"))?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "entity_id": entity_id }))
            .send()
            .await?;
        self.check_status(response, &format!("POST /api/services/{domain}/{service}"))
            .await?;
        Ok(())
    }

    fn push_segment(&self, url: &mut Url, segment: &str) -> Result<(), HassError> {
        url.path_segments_mut()
            .map_err(|()| HassError::CannotBeABase(self.base_url.to_string()))?
            .push(segment);
        Ok(())
    }
}

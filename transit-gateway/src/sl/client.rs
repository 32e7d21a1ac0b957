//! SL HTTP client.
//!
//! Provides async methods for the real-time departures and station
//! typeahead endpoints. Each endpoint authenticates with its own API key,
//! passed as the `key` query parameter.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::SiteId;

use super::error::SlError;
use super::types::{Envelope, ResponseData, StationInfo, StopLookupResult, StopResponse};

/// Departures window requested from SL, in minutes.
const TIME_WINDOW_MINS: u16 = 60;

/// Maximum stations returned by a typeahead search.
const MAX_LOOKUP_RESULTS: u8 = 10;

/// Characters of an upstream body kept in an error.
const MAX_BODY_EXCERPT: usize = 500;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SL client.
#[derive(Debug, Clone)]
pub struct SlConfig {
    /// Base URL the endpoint names are appended to
    pub base_url: String,
    /// Key for `realtimedeparturesV4.json`
    pub api_key: String,
    /// Key for `typeahead.json`
    pub stop_lookup_api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl SlConfig {
    /// Create a new config with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        stop_lookup_api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            stop_lookup_api_key: stop_lookup_api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// SL API client.
#[derive(Debug, Clone)]
pub struct SlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    stop_lookup_api_key: String,
}

impl SlClient {
    /// Create a new SL client with the given configuration.
    pub fn new(config: SlConfig) -> Result<Self, SlError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            stop_lookup_api_key: config.stop_lookup_api_key,
        })
    }

    /// Get real-time departures for a site over the next hour.
    pub async fn get_departures(&self, site_id: &SiteId) -> Result<ResponseData, SlError> {
        let url = format!("{}/realtimedeparturesV4.json", self.base_url);

        let info: StationInfo = self
            .get_json(
                &url,
                &[
                    ("key", self.api_key.clone()),
                    ("siteid", site_id.to_string()),
                    ("timewindow", TIME_WINDOW_MINS.to_string()),
                ],
            )
            .await?;

        info.into_data()?.ok_or(SlError::MissingData)
    }

    /// Search for stations whose name matches `query`.
    ///
    /// A successful response with no payload is an empty result list.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<StopLookupResult>, SlError> {
        let url = format!("{}/typeahead.json", self.base_url);

        let response: StopResponse = self
            .get_json(
                &url,
                &[
                    ("key", self.stop_lookup_api_key.clone()),
                    ("searchstring", query.to_string()),
                    ("stationsonly", "true".to_string()),
                    ("maxresults", MAX_LOOKUP_RESULTS.to_string()),
                ],
            )
            .await?;

        Ok(response.into_data()?.unwrap_or_default())
    }

    /// Issue a GET and decode the response envelope.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, SlError> {
        tracing::debug!(url, "requesting SL endpoint");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SlError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlError::Api {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SlError::Json {
            message: e.to_string(),
            body: Some(excerpt(&body)),
        })
    }
}

/// First part of an upstream body, for error messages.
fn excerpt(body: &str) -> String {
    body.chars().take(MAX_BODY_EXCERPT).collect()
}

//! HTTP client for the recommendation service.

use crate::domain::{
    ErrorBody, LocationsResponse, RecommendationItem, RecommendationRequest,
    RecommendationsResponse, SectorsResponse, SubmitError,
};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const RECOMMENDATIONS_PATH: &str = "/api/recommendations";
pub const SECTORS_PATH: &str = "/api/sectors";
pub const LOCATIONS_PATH: &str = "/api/locations";

/// Upper bound for the startup catalog lookups. Recommendation requests have none.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(5);

/// The backend the form talks to.
///
/// The terminal front end and tests both go through this seam, so a test
/// double can stand in for the network.
pub trait RecommendationService {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<RecommendationItem>, SubmitError>;

    fn sectors(&self) -> Result<Vec<String>, SubmitError>;

    fn locations(&self) -> Result<Vec<String>, SubmitError>;
}

/// Blocking client. One request at a time, no timeout, no retries.
#[derive(Debug, Clone)]
pub struct HttpRecommendationClient {
    client: Client,
    base_url: String,
    catalog_timeout: Duration,
}

impl HttpRecommendationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            catalog_timeout: CATALOG_TIMEOUT,
        })
    }

    pub fn with_catalog_timeout(mut self, timeout: Duration) -> Self {
        self.catalog_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SubmitError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .timeout(self.catalog_timeout)
            .send()
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "catalog request failed");
                SubmitError::network()
            })?;
        read_body(response)
    }
}

impl RecommendationService for HttpRecommendationClient {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<RecommendationItem>, SubmitError> {
        let url = self.url(RECOMMENDATIONS_PATH);
        tracing::debug!(%url, skills = request.skills.len(), "posting recommendation request");

        // .json() also sets Content-Type: application/json
        let response = self.client.post(&url).json(request).send().map_err(|e| {
            tracing::error!(%url, error = %e, "recommendation request failed");
            SubmitError::network()
        })?;

        let body: RecommendationsResponse = read_body(response)?;
        tracing::info!(count = body.recommendations.len(), "received recommendations");
        Ok(body.recommendations)
    }

    fn sectors(&self) -> Result<Vec<String>, SubmitError> {
        self.get_json::<SectorsResponse>(SECTORS_PATH).map(|body| body.sectors)
    }

    fn locations(&self) -> Result<Vec<String>, SubmitError> {
        self.get_json::<LocationsResponse>(LOCATIONS_PATH).map(|body| body.locations)
    }
}

/// Parses the body as JSON before looking at the status, as the web form does.
fn read_body<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, SubmitError> {
    let status = response.status();
    let text = response.text().map_err(|e| {
        tracing::error!(error = %e, "failed to read response body");
        SubmitError::network()
    })?;

    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        tracing::error!(%status, error = %e, "response body is not JSON");
        SubmitError::network()
    })?;

    if !status.is_success() {
        let ErrorBody { error } = serde_json::from_value(value).unwrap_or_default();
        tracing::error!(%status, error = %error, "service rejected request");
        return Err(SubmitError::request(Some(error)));
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::error!(error = %e, "unexpected response shape");
        SubmitError::network()
    })
}

//! Routing backend HTTP adapter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::candidates::RouteCandidate;
use crate::congestion::HeatmapRecord;
use crate::dashboard::DashboardStats;
use crate::traits::{DashboardProvider, RouteProvider};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug)]
pub enum BackendError {
    Http(reqwest::Error),
    /// Failure raised by a non-HTTP provider implementation.
    Unavailable(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Http(err)
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Http(err) => write!(f, "backend request failed: {}", err),
            BackendError::Unavailable(reason) => write!(f, "backend unavailable: {}", reason),
        }
    }
}

impl std::error::Error for BackendError {}

#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct RouteRequestBody<'a> {
    source: &'a str,
    destination: &'a str,
}

#[derive(Debug, Deserialize)]
struct MultipleRoutesResponse {
    #[serde(default)]
    routes: Vec<RouteCandidate>,
}

#[derive(Debug, Deserialize)]
struct HeatmapResponse {
    #[serde(default)]
    heatmap: Vec<HeatmapRecord>,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        source: &str,
        destination: &str,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.config.base_url, path);
        let body = RouteRequestBody { source, destination };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json::<T>()?;
        Ok(response)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<T>()?;
        Ok(response)
    }
}

impl RouteProvider for BackendClient {
    fn single_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<RouteCandidate, BackendError> {
        self.post_json("/route", source, destination)
    }

    fn multiple_routes(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<RouteCandidate>, BackendError> {
        let response: MultipleRoutesResponse =
            self.post_json("/routes/multiple", source, destination)?;
        Ok(response.routes)
    }
}

impl DashboardProvider for BackendClient {
    fn dashboard_stats(&self) -> Result<DashboardStats, BackendError> {
        self.get_json("/dashboard")
    }

    fn heatmap_records(&self) -> Result<Vec<HeatmapRecord>, BackendError> {
        let response: HeatmapResponse = self.get_json("/heatmap")?;
        Ok(response.heatmap)
    }
}

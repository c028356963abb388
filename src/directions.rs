//! Directions provider HTTP adapter (Mapbox-compatible API).
//!
//! One round trip per selection change: given the endpoints of the selected
//! candidate, returns the best driving path as road-following coordinates.

use std::fmt;

use serde::Deserialize;

use crate::geometry::LngLat;
use crate::traits::DirectionsProvider;

pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com";

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_DIRECTIONS_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug)]
pub enum DirectionsError {
    Http(reqwest::Error),
    /// The provider answered but returned no usable geometry.
    NoRoute,
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(err) => write!(f, "directions request failed: {}", err),
            DirectionsError::NoRoute => write!(f, "directions provider returned no route"),
        }
    }
}

impl std::error::Error for DirectionsError {}

#[derive(Debug, Clone)]
pub struct MapboxDirections {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl MapboxDirections {
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DirectionsProvider for MapboxDirections {
    fn driving_path(&self, from: LngLat, to: LngLat) -> Result<Vec<LngLat>, DirectionsError> {
        let url = format!(
            "{}/directions/v5/mapbox/driving/{:.6},{:.6};{:.6},{:.6}?geometries=geojson&overview=full&access_token={}",
            self.config.base_url, from.0, from.1, to.0, to.1, self.config.access_token
        );

        let response = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        let coordinates = response
            .routes
            .into_iter()
            .next()
            .map(|route| route.geometry.coordinates)
            .unwrap_or_default();

        if coordinates.is_empty() {
            return Err(DirectionsError::NoRoute);
        }
        Ok(coordinates)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: RouteGeometryBody,
}

#[derive(Debug, Deserialize)]
struct RouteGeometryBody {
    #[serde(default)]
    coordinates: Vec<LngLat>,
}

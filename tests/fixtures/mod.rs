//! Test fixtures for fluxora-view.
//!
//! Provides a recording in-memory map surface plus fake backend and
//! directions providers so the engines can be driven without any network.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use fluxora_view::backend::BackendError;
use fluxora_view::candidates::{RouteCandidate, RouteStrategy};
use fluxora_view::directions::DirectionsError;
use fluxora_view::geometry::{Bounds, LngLat};
use fluxora_view::surface::{
    FitOptions, LayerSpec, MapSurface, Marker, MarkerId, SourceData,
};
use fluxora_view::traits::{DirectionsProvider, RouteProvider};

/// In-memory map surface that records every mutation.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub sources: HashMap<String, SourceData>,
    pub layers: Vec<LayerSpec>,
    pub markers: HashMap<u64, Marker>,
    pub fits: Vec<(Bounds, FitOptions)>,
    next_marker: u64,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates currently attached to the route source, if any.
    pub fn route_line(&self) -> Option<&[LngLat]> {
        match self.sources.get(fluxora_view::map_sync::ROUTE_SOURCE_ID)? {
            SourceData::Line { coordinates } => Some(coordinates),
            SourceData::Edges { .. } => None,
        }
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.id.as_str()).collect()
    }

    pub fn marker_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> =
            self.markers.values().map(|marker| marker.title.as_str()).collect();
        titles.sort();
        titles
    }
}

impl MapSurface for FakeSurface {
    fn add_source(&mut self, id: &str, data: SourceData) {
        self.sources.insert(id.to_string(), data);
    }

    fn set_source_data(&mut self, id: &str, data: SourceData) {
        self.sources.insert(id.to_string(), data);
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn remove_source(&mut self, id: &str) -> bool {
        self.sources.remove(id).is_some()
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.layers.push(layer);
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|layer| layer.id == id)
    }

    fn remove_layer(&mut self, id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.layers.len() != before
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        self.next_marker += 1;
        self.markers.insert(self.next_marker, marker);
        MarkerId(self.next_marker)
    }

    fn remove_marker(&mut self, id: MarkerId) -> bool {
        self.markers.remove(&id.0).is_some()
    }

    fn fit_bounds(&mut self, bounds: Bounds, fit: FitOptions) {
        self.fits.push((bounds, fit));
    }
}

/// Canned routing backend.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub candidates: Vec<RouteCandidate>,
    pub fail_with: Option<String>,
}

impl FakeBackend {
    pub fn returning(candidates: Vec<RouteCandidate>) -> Self {
        Self { candidates, fail_with: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self { candidates: Vec::new(), fail_with: Some(reason.to_string()) }
    }
}

impl RouteProvider for FakeBackend {
    fn single_route(
        &self,
        _source: &str,
        _destination: &str,
    ) -> Result<RouteCandidate, BackendError> {
        if let Some(reason) = &self.fail_with {
            return Err(BackendError::Unavailable(reason.clone()));
        }
        Ok(self.candidates.first().cloned().unwrap_or_else(RouteCandidate::empty))
    }

    fn multiple_routes(
        &self,
        _source: &str,
        _destination: &str,
    ) -> Result<Vec<RouteCandidate>, BackendError> {
        match &self.fail_with {
            Some(reason) => Err(BackendError::Unavailable(reason.clone())),
            None => Ok(self.candidates.clone()),
        }
    }
}

/// Directions provider that records each requested endpoint pair.
#[derive(Debug, Default)]
pub struct FakeDirections {
    pub fail: bool,
    pub calls: RefCell<Vec<(LngLat, LngLat)>>,
}

impl FakeDirections {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, calls: RefCell::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl DirectionsProvider for FakeDirections {
    fn driving_path(&self, from: LngLat, to: LngLat) -> Result<Vec<LngLat>, DirectionsError> {
        self.calls.borrow_mut().push((from, to));
        if self.fail {
            return Err(DirectionsError::NoRoute);
        }
        // A plausible road path: endpoints plus a midpoint detour.
        let mid = ((from.0 + to.0) / 2.0 + 0.001, (from.1 + to.1) / 2.0);
        Ok(vec![from, mid, to])
    }
}

pub fn candidate(strategy: RouteStrategy, route: &[&str], congestion: f64) -> RouteCandidate {
    let mut c = RouteCandidate::empty();
    c.strategy = Some(strategy);
    c.route = route.iter().map(|id| id.to_string()).collect();
    c.total_time = 15.0;
    c.congestion_score = congestion;
    c
}

pub fn rewarded(mut c: RouteCandidate, points: u32) -> RouteCandidate {
    c.reward_points = Some(points);
    c
}

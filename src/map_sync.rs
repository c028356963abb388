//! Map synchronization engine.
//!
//! Reconciles the selected route candidate with real road geometry and
//! keeps the on-screen route persistent. The display-authoritative geometry
//! is only replaced by a newer successful resolution: a re-render, a stale
//! response, or a failed resolution never regresses it to empty.
//!
//! Resolution is split into `selection_changed` (which issues at most one
//! tagged request) and `apply_resolution` (which applies or discards the
//! arriving response), so arrival order is explicit. Selection changes that
//! land before the map style has loaded are deferred and replayed on load,
//! never dropped.

use tracing::{debug, error, warn};

use crate::candidates::RouteCandidate;
use crate::directions::DirectionsError;
use crate::geometry::{LngLat, RouteGeometry};
use crate::locations::{Location, LocationDirectory};
use crate::surface::{
    FitOptions, LayerSpec, LineColor, MapSurface, Marker, MarkerId, MarkerKind, SourceData,
};
use crate::traits::DirectionsProvider;

pub const ROUTE_SOURCE_ID: &str = "route";
pub const ROUTE_LAYER_ID: &str = "route-main";

const ROUTE_COLOR: &str = "#3b82f6";
const ROUTE_FIT: FitOptions = FitOptions { padding: 80, duration_ms: 1000 };

/// Engine lifecycle and per-selection resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Map style not loaded yet; surface mutations are deferred.
    Uninitialized,
    /// Style loaded, route source and layer installed, nothing resolving.
    Ready,
    /// A directions request for the current selection is outstanding.
    Resolving,
    /// The current selection's geometry is on screen.
    Resolved,
    /// The last resolution failed; the previous geometry is retained.
    ResolutionFailed,
}

/// A tagged directions request for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionRequest {
    pub token: u64,
    pub from: LngLat,
    pub to: LngLat,
}

#[derive(Debug, Clone)]
struct Endpoints {
    start: Location,
    end: Location,
}

#[derive(Debug)]
pub struct MapSyncEngine {
    state: SyncState,
    generation: u64,
    geometry: Option<RouteGeometry>,
    markers: Vec<MarkerId>,
    /// Endpoints of the in-flight or deferred selection.
    inflight: Option<Endpoints>,
    /// Selection that arrived before the style loaded.
    deferred: Option<Endpoints>,
}

impl Default for MapSyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSyncEngine {
    pub fn new() -> Self {
        Self {
            state: SyncState::Uninitialized,
            generation: 0,
            geometry: None,
            markers: Vec::new(),
            inflight: None,
            deferred: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The display-authoritative geometry, if any resolution has ever
    /// succeeded this mount cycle.
    pub fn geometry(&self) -> Option<&RouteGeometry> {
        self.geometry.as_ref()
    }

    pub fn latest_token(&self) -> u64 {
        self.generation
    }

    /// Install the route source and layer once the map style has loaded,
    /// then replay a deferred selection change if one arrived early.
    pub fn style_loaded<M: MapSurface>(&mut self, surface: &mut M) -> Option<ResolutionRequest> {
        if self.state != SyncState::Uninitialized {
            return None;
        }

        surface.add_source(ROUTE_SOURCE_ID, SourceData::empty_line());
        surface.add_layer(LayerSpec {
            id: ROUTE_LAYER_ID.to_string(),
            source: ROUTE_SOURCE_ID.to_string(),
            color: LineColor::Solid(ROUTE_COLOR),
            width: 6.0,
            opacity: 0.9,
            round_caps: true,
        });
        self.state = SyncState::Ready;

        let endpoints = self.deferred.take()?;
        Some(self.issue(endpoints))
    }

    /// React to a selection change.
    ///
    /// Candidates whose path has fewer than two locations, or whose
    /// endpoints are unknown, leave the current display untouched. Otherwise
    /// exactly one tagged request is issued (or deferred until the style
    /// loads), using only the first and last location of the path.
    pub fn selection_changed(
        &mut self,
        candidate: &RouteCandidate,
        directory: &LocationDirectory,
    ) -> Option<ResolutionRequest> {
        let (start_id, end_id) = match candidate.endpoints() {
            Some(endpoints) => endpoints,
            None => {
                debug!("selection path too short to resolve; display unchanged");
                return None;
            }
        };

        let (start, end) = match (directory.get(start_id), directory.get(end_id)) {
            (Some(start), Some(end)) => (start.clone(), end.clone()),
            _ => {
                error!(start_id, end_id, "selection references unknown locations");
                return None;
            }
        };
        let endpoints = Endpoints { start, end };

        if self.state == SyncState::Uninitialized {
            debug!("style not loaded; deferring selection change");
            self.deferred = Some(endpoints);
            return None;
        }

        Some(self.issue(endpoints))
    }

    fn issue(&mut self, endpoints: Endpoints) -> ResolutionRequest {
        self.generation += 1;
        self.state = SyncState::Resolving;
        let request = ResolutionRequest {
            token: self.generation,
            from: endpoints.start.coordinates,
            to: endpoints.end.coordinates,
        };
        self.inflight = Some(endpoints);
        request
    }

    /// Apply an arriving directions response.
    ///
    /// Responses tagged with anything but the latest token are discarded.
    /// A failure (or empty geometry) logs and leaves every piece of display
    /// state unchanged.
    pub fn apply_resolution<M: MapSurface>(
        &mut self,
        surface: &mut M,
        token: u64,
        outcome: Result<Vec<LngLat>, DirectionsError>,
    ) {
        if token != self.generation {
            debug!(token, latest = self.generation, "discarding stale resolution");
            return;
        }

        match outcome {
            Ok(coordinates) if !coordinates.is_empty() => {
                let endpoints = match self.inflight.take() {
                    Some(endpoints) => endpoints,
                    None => {
                        warn!(token, "resolution arrived with no selection in flight");
                        return;
                    }
                };
                self.display(surface, coordinates, &endpoints);
                self.state = SyncState::Resolved;
            }
            Ok(_) => {
                warn!(token, "directions returned empty geometry; keeping previous route");
                self.state = SyncState::ResolutionFailed;
            }
            Err(err) => {
                warn!(token, error = %err, "resolution failed; keeping previous route");
                self.state = SyncState::ResolutionFailed;
            }
        }
    }

    /// Blocking convenience: issue the selection's request against
    /// `provider` and apply the result immediately.
    pub fn resolve_with<M, D>(
        &mut self,
        surface: &mut M,
        provider: &D,
        candidate: &RouteCandidate,
        directory: &LocationDirectory,
    ) where
        M: MapSurface,
        D: DirectionsProvider,
    {
        if let Some(request) = self.selection_changed(candidate, directory) {
            let outcome = provider.driving_path(request.from, request.to);
            self.apply_resolution(surface, request.token, outcome);
        }
    }

    fn display<M: MapSurface>(
        &mut self,
        surface: &mut M,
        coordinates: Vec<LngLat>,
        endpoints: &Endpoints,
    ) {
        let geometry = RouteGeometry::new(coordinates);
        surface.set_source_data(
            ROUTE_SOURCE_ID,
            SourceData::Line { coordinates: geometry.coordinates().to_vec() },
        );

        // Old markers go before the new pair arrives.
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
        self.markers.push(surface.add_marker(Marker {
            lng_lat: endpoints.start.coordinates,
            title: endpoints.start.name.clone(),
            kind: MarkerKind::Start,
        }));
        self.markers.push(surface.add_marker(Marker {
            lng_lat: endpoints.end.coordinates,
            title: endpoints.end.name.clone(),
            kind: MarkerKind::End,
        }));

        if let Some(bounds) = geometry.bounds() {
            surface.fit_bounds(bounds, ROUTE_FIT);
        }
        self.geometry = Some(geometry);
    }

    /// Re-assert the persistent geometry after an unrelated re-render.
    pub fn refresh<M: MapSurface>(&self, surface: &mut M) {
        if let Some(geometry) = &self.geometry {
            if !geometry.is_empty() {
                surface.set_source_data(
                    ROUTE_SOURCE_ID,
                    SourceData::Line { coordinates: geometry.coordinates().to_vec() },
                );
            }
        }
    }

    /// Remove every layer, source, and marker this engine registered.
    /// Safe on every exit path, including before the style ever loaded.
    pub fn teardown<M: MapSurface>(&mut self, surface: &mut M) {
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
        surface.remove_layer(ROUTE_LAYER_ID);
        surface.remove_source(ROUTE_SOURCE_ID);
        self.geometry = None;
        self.inflight = None;
        self.deferred = None;
        self.state = SyncState::Uninitialized;
    }
}

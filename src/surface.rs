//! Map surface abstraction.
//!
//! The actual renderer (Mapbox GL in the original demo) is an external
//! collaborator; the engines only need the small mutation surface below.
//! Layer, source, and marker ids are chosen by the callers, so the two
//! engines sharing one surface must keep their id namespaces disjoint.

use serde::Serialize;

use crate::geometry::{Bounds, LngLat};

/// Opaque handle for a marker added to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Marker role, which determines its visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerKind::Start => "#34d399",
            MarkerKind::End => "#fb7185",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lng_lat: LngLat,
    pub title: String,
    pub kind: MarkerKind,
}

/// One congestion edge prepared for display, colored at build time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeFeature {
    pub road: String,
    pub congestion: f64,
    pub color: &'static str,
    pub coordinates: [LngLat; 2],
}

/// Data attached to a GeoJSON source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SourceData {
    /// A single LineString, used for the resolved route.
    Line { coordinates: Vec<LngLat> },
    /// A feature collection of colored edges, used for the overlay.
    Edges { features: Vec<EdgeFeature> },
}

impl SourceData {
    pub fn empty_line() -> Self {
        SourceData::Line { coordinates: Vec::new() }
    }
}

/// How a line layer is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineColor {
    Solid(&'static str),
    /// Use the per-feature `color` carried by [`EdgeFeature`].
    PerFeature,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub color: LineColor,
    pub width: f64,
    pub opacity: f64,
    pub round_caps: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitOptions {
    pub padding: u32,
    pub duration_ms: u32,
}

/// Mutation interface of the single map instance.
///
/// Removal of an absent layer, source, or marker is a no-op returning
/// `false`, never an error; adapters must uphold that so toggling logic
/// stays idempotent.
pub trait MapSurface {
    fn add_source(&mut self, id: &str, data: SourceData);
    fn set_source_data(&mut self, id: &str, data: SourceData);
    fn has_source(&self, id: &str) -> bool;
    fn remove_source(&mut self, id: &str) -> bool;

    fn add_layer(&mut self, layer: LayerSpec);
    fn has_layer(&self, id: &str) -> bool;
    fn remove_layer(&mut self, id: &str) -> bool;

    fn add_marker(&mut self, marker: Marker) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId) -> bool;

    fn fit_bounds(&mut self, bounds: Bounds, fit: FitOptions);
}

//! Congestion overlay.
//!
//! A static set of demo road segments annotated with congestion
//! multipliers, displayed as a single toggleable colored layer. The overlay
//! is independent of route selection and shares the map surface with the
//! route display, so it keeps its own layer/source id namespace.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidates::Confidence;
use crate::geometry::Bounds;
use crate::locations::LocationDirectory;
use crate::surface::{EdgeFeature, FitOptions, LayerSpec, LineColor, MapSurface, SourceData};

pub const OVERLAY_SOURCE_ID: &str = "congestion-source";
pub const OVERLAY_LAYER_ID: &str = "congestion-layer";

const OVERLAY_FIT: FitOptions = FitOptions { padding: 50, duration_ms: 1000 };

/// Congestion severity band used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CongestionBand {
    Low,
    Moderate,
    High,
}

impl CongestionBand {
    pub fn from_score(score: f64) -> Self {
        if score < 1.3 {
            CongestionBand::Low
        } else if score < 1.6 {
            CongestionBand::Moderate
        } else {
            CongestionBand::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CongestionBand::Low => "#22c55e",
            CongestionBand::Moderate => "#eab308",
            CongestionBand::High => "#f97373",
        }
    }
}

/// A demo road segment between two locations with its congestion multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionEdge {
    pub road: String,
    pub from: String,
    pub to: String,
    pub congestion: f64,
}

impl CongestionEdge {
    pub fn new(road: &str, from: &str, to: &str, congestion: f64) -> Self {
        Self {
            road: road.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            congestion,
        }
    }

    pub fn band(&self) -> CongestionBand {
        CongestionBand::from_score(self.congestion)
    }
}

/// The static demo edge set.
pub fn demo_edges() -> Vec<CongestionEdge> {
    vec![
        CongestionEdge::new("A-B", "A", "B", 1.24),
        CongestionEdge::new("A-C", "A", "C", 1.73),
        CongestionEdge::new("B-D", "B", "D", 1.94),
        CongestionEdge::new("C-D", "C", "D", 1.50),
        CongestionEdge::new("B-C", "B", "C", 1.59),
        CongestionEdge::new("A-D", "A", "D", 1.37),
    ]
}

/// One `GET /heatmap` record; consumed read-only for the info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRecord {
    pub road: String,
    pub congestion: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

/// Toggleable congestion-colored edge overlay.
///
/// Show/hide is idempotent: repeated toggling ends with zero residual
/// layers after any final hide, and hiding an absent layer is a no-op.
#[derive(Debug, Default)]
pub struct CongestionOverlayEngine {
    visible: bool,
}

impl CongestionOverlayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip overlay visibility, returning the new state.
    pub fn toggle<M: MapSurface>(
        &mut self,
        surface: &mut M,
        edges: &[CongestionEdge],
        directory: &LocationDirectory,
    ) -> bool {
        if self.visible {
            self.hide(surface);
        } else {
            self.show(surface, edges, directory);
        }
        self.visible
    }

    pub fn show<M: MapSurface>(
        &mut self,
        surface: &mut M,
        edges: &[CongestionEdge],
        directory: &LocationDirectory,
    ) {
        let features = build_features(edges, directory);
        let data = SourceData::Edges { features: features.clone() };

        if surface.has_source(OVERLAY_SOURCE_ID) {
            surface.set_source_data(OVERLAY_SOURCE_ID, data);
        } else {
            surface.add_source(OVERLAY_SOURCE_ID, data);
        }

        if !surface.has_layer(OVERLAY_LAYER_ID) {
            surface.add_layer(LayerSpec {
                id: OVERLAY_LAYER_ID.to_string(),
                source: OVERLAY_SOURCE_ID.to_string(),
                color: LineColor::PerFeature,
                width: 6.0,
                opacity: 0.8,
                round_caps: false,
            });
        }

        if let Some(bounds) = edge_bounds(&features) {
            surface.fit_bounds(bounds, OVERLAY_FIT);
        }

        self.visible = true;
    }

    pub fn hide<M: MapSurface>(&mut self, surface: &mut M) {
        if !surface.remove_layer(OVERLAY_LAYER_ID) {
            debug!("congestion layer already absent");
        }
        self.visible = false;
    }

    /// Remove everything this engine registered on the surface.
    pub fn teardown<M: MapSurface>(&mut self, surface: &mut M) {
        surface.remove_layer(OVERLAY_LAYER_ID);
        surface.remove_source(OVERLAY_SOURCE_ID);
        self.visible = false;
    }
}

fn build_features(edges: &[CongestionEdge], directory: &LocationDirectory) -> Vec<EdgeFeature> {
    edges
        .iter()
        .filter_map(|edge| {
            let from = directory.get(&edge.from)?;
            let to = directory.get(&edge.to)?;
            Some(EdgeFeature {
                road: edge.road.clone(),
                congestion: edge.congestion,
                color: edge.band().color(),
                coordinates: [from.coordinates, to.coordinates],
            })
        })
        .collect()
}

fn edge_bounds(features: &[EdgeFeature]) -> Option<Bounds> {
    let mut coords = features.iter().flat_map(|feature| feature.coordinates);
    let mut bounds = Bounds::point(coords.next()?);
    for coord in coords {
        bounds.extend(coord);
    }
    Some(bounds)
}

//! Coordinate and geometry types for map display.
//!
//! Coordinates are stored as `(lng, lat)` tuples throughout, matching the
//! order used by the directions provider and by GeoJSON. Decoding from the
//! provider's wire format happens at the API boundary, not here.

use serde::{Deserialize, Serialize};

/// A geographic coordinate as a `(longitude, latitude)` pair.
pub type LngLat = (f64, f64);

/// Road-following geometry for a resolved route, as an ordered
/// coordinate sequence.
///
/// This is the display-authoritative path: it is only ever replaced by a
/// newer successful resolution, never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    coordinates: Vec<LngLat>,
}

impl RouteGeometry {
    pub fn new(coordinates: Vec<LngLat>) -> Self {
        Self { coordinates }
    }

    pub fn coordinates(&self) -> &[LngLat] {
        &self.coordinates
    }

    pub fn into_coordinates(self) -> Vec<LngLat> {
        self.coordinates
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Bounding box of the geometry, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_coords(&self.coordinates)
    }
}

/// Axis-aligned bounding box in (lng, lat) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl Bounds {
    /// A degenerate box containing a single point.
    pub fn point(coord: LngLat) -> Self {
        Self {
            south_west: coord,
            north_east: coord,
        }
    }

    /// Grow the box to contain `coord`.
    pub fn extend(&mut self, coord: LngLat) {
        let (lng, lat) = coord;
        if lng < self.south_west.0 {
            self.south_west.0 = lng;
        }
        if lat < self.south_west.1 {
            self.south_west.1 = lat;
        }
        if lng > self.north_east.0 {
            self.north_east.0 = lng;
        }
        if lat > self.north_east.1 {
            self.north_east.1 = lat;
        }
    }

    /// Smallest box containing every coordinate, `None` for an empty slice.
    pub fn from_coords(coords: &[LngLat]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut bounds = Self::point(*first);
        for coord in rest {
            bounds.extend(*coord);
        }
        Some(bounds)
    }

    pub fn center(&self) -> LngLat {
        (
            (self.south_west.0 + self.north_east.0) / 2.0,
            (self.south_west.1 + self.north_east.1) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn geometry_holds_coordinates() {
        let coords = vec![(80.21, 13.08), (80.23, 13.04), (80.22, 13.00)];
        let geometry = RouteGeometry::new(coords.clone());
        assert_eq!(geometry.coordinates(), &coords[..]);
        assert!(!geometry.is_empty());
        assert_eq!(geometry.into_coordinates(), coords);
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        let geometry = RouteGeometry::new(vec![]);
        assert!(geometry.is_empty());
        assert!(geometry.bounds().is_none());
    }

    #[test]
    fn bounds_from_single_point_are_degenerate() {
        let bounds = Bounds::from_coords(&[(80.2185, 13.0878)]).unwrap();
        assert_eq!(bounds.south_west, bounds.north_east);
    }

    #[test]
    fn bounds_contain_all_coordinates() {
        let coords = vec![(80.2185, 13.0878), (80.2341, 13.0418), (80.2180, 12.9791)];
        let bounds = Bounds::from_coords(&coords).unwrap();
        assert_relative_eq!(bounds.south_west.0, 80.2180);
        assert_relative_eq!(bounds.south_west.1, 12.9791);
        assert_relative_eq!(bounds.north_east.0, 80.2341);
        assert_relative_eq!(bounds.north_east.1, 13.0878);
    }

    #[test]
    fn extend_is_monotonic() {
        let mut bounds = Bounds::point((80.22, 13.00));
        bounds.extend((80.20, 13.10));
        bounds.extend((80.25, 12.95));
        assert_relative_eq!(bounds.south_west.0, 80.20);
        assert_relative_eq!(bounds.north_east.1, 13.10);
        let (lng, lat) = bounds.center();
        assert!(lng > 80.20 && lng < 80.25);
        assert!(lat > 12.95 && lat < 13.10);
    }
}

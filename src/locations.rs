//! Fixed prototype location set.
//!
//! The demo restricts routing to a small immutable set of smart-city
//! locations (A through D). Keeping the set fixed makes the prototype
//! predictable and easy to explain.

use serde::{Deserialize, Serialize};

use crate::geometry::LngLat;

/// A named routable location with real coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub coordinates: LngLat,
}

impl Location {
    pub fn new(id: &str, name: &str, coordinates: LngLat) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            coordinates,
        }
    }
}

/// Lookup table over the fixed location set.
#[derive(Debug, Clone)]
pub struct LocationDirectory {
    locations: Vec<Location>,
}

impl LocationDirectory {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// The prototype Chennai locations used throughout the demo.
    pub fn prototype() -> Self {
        Self::new(vec![
            Location::new("A", "Anna Nagar", (80.2185, 13.0878)),
            Location::new("B", "T Nagar", (80.2341, 13.0418)),
            Location::new("C", "Guindy", (80.2209, 13.0067)),
            Location::new("D", "Velachery", (80.2180, 12.9791)),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }
}

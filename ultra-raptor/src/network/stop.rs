//! Stop type.

use serde::{Deserialize, Serialize};

/// WGS84 position of a stop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// A boarding and alighting location.
///
/// Stops are identified by their rank in [`TransitData`](super::TransitData);
/// this type only carries their attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Display name
    pub name: String,

    /// Position of the stop
    pub coordinates: Coordinates,

    /// Minimum time needed to change vehicles at this stop (seconds).
    ///
    /// Informational: stop-event times are expected to already include
    /// any buffer, the planner applies none of its own.
    pub min_transfer_time: u32,
}

impl Stop {
    /// Create a stop at the origin of the coordinate system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::default(),
            min_transfer_time: 0,
        }
    }

    /// Set the stop position.
    pub fn with_coordinates(mut self, longitude: f64, latitude: f64) -> Self {
        self.coordinates = Coordinates {
            longitude,
            latitude,
        };
        self
    }

    /// Set the minimum transfer time (seconds).
    pub fn with_min_transfer_time(mut self, seconds: u32) -> Self {
        self.min_transfer_time = seconds;
        self
    }
}

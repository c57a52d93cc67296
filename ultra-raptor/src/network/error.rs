//! Network data contract violations.
//!
//! These errors mean the tables handed to the planner are corrupt or
//! inconsistent. They are raised once, when the network is assembled,
//! and are never recovered from mid-query.

use crate::domain::{RouteId, StopId};

/// Errors raised while assembling network tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A route lists a stop that doesn't exist
    #[error("route {route} visits unknown stop {stop}")]
    RouteUnknownStop { route: RouteId, stop: StopId },

    /// A route must visit at least two stops
    #[error("route {0} visits fewer than two stops")]
    RouteTooShort(RouteId),

    /// A route has no trips
    #[error("route {0} has no trips")]
    RouteWithoutTrips(RouteId),

    /// A trip's stop events don't line up with the route's stop sequence
    #[error("trip {trip} of route {route} has {actual} stop events, expected {expected}")]
    TripLengthMismatch {
        route: RouteId,
        trip: usize,
        expected: usize,
        actual: usize,
    },

    /// A trip goes back in time
    #[error("trip {trip} of route {route} goes back in time at stop index {stop_index}")]
    TripTimesDecreasing {
        route: RouteId,
        trip: usize,
        stop_index: usize,
    },

    /// An earlier trip arrives or departs later than a later trip
    #[error("trips of route {route} overtake each other at stop index {stop_index}")]
    OvertakingTrips { route: RouteId, stop_index: usize },

    /// A transfer edge touches a stop that doesn't exist
    #[error("transfer {from} -> {to} touches an unknown stop")]
    TransferUnknownStop { from: StopId, to: StopId },

    /// A walking graph edge touches a vertex that doesn't exist
    #[error("walking graph edge touches vertex {vertex}, graph has {vertices} vertices")]
    UnknownVertex { vertex: u32, vertices: usize },

    /// The walking graph must contain every stop as a vertex
    #[error("walking graph has {vertices} vertices but the network has {stops} stops")]
    TooFewVertices { stops: usize, vertices: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NetworkError::RouteUnknownStop {
            route: RouteId(2),
            stop: StopId(99),
        };
        assert_eq!(err.to_string(), "route 2 visits unknown stop 99");

        let err = NetworkError::TripLengthMismatch {
            route: RouteId(0),
            trip: 1,
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "trip 1 of route 0 has 2 stop events, expected 3"
        );

        let err = NetworkError::OvertakingTrips {
            route: RouteId(5),
            stop_index: 4,
        };
        assert_eq!(
            err.to_string(),
            "trips of route 5 overtake each other at stop index 4"
        );

        let err = NetworkError::TooFewVertices {
            stops: 10,
            vertices: 4,
        };
        assert_eq!(
            err.to_string(),
            "walking graph has 4 vertices but the network has 10 stops"
        );
    }
}

//! Per-round stop labels.

use crate::domain::{EdgeId, RouteId, StopId, StopIndex, Time};

/// How a label's stop was reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boarding {
    /// The query source, seeded at the departure time
    Source,
    /// Riding `route`, boarded at position `boarded_at` and left at
    /// position `alighted_at` of its stop sequence
    Route {
        route: RouteId,
        boarded_at: StopIndex,
        alighted_at: StopIndex,
    },
    /// Walking along a transfer graph edge
    Edge(EdgeId),
    /// Walking a distance answered by the transfer index
    Shortcut,
}

/// Earliest known arrival at one stop in one round, and how it was reached.
///
/// `parent` is the stop the last leg started from; for route labels its
/// label lives in the previous round, for walking labels in the same round.
/// The seeded source label is its own parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub arrival_time: Time,
    pub parent: StopId,
    pub parent_departure_time: Time,
    pub boarding: Boarding,
}

impl Label {
    /// A stop not reached in this round. Fields other than the arrival
    /// time are meaningless.
    pub const UNREACHED: Label = Label {
        arrival_time: Time::NEVER,
        parent: StopId(u32::MAX),
        parent_departure_time: Time::NEVER,
        boarding: Boarding::Source,
    };

    /// Returns true if the stop was reached in this round.
    pub fn is_reached(&self) -> bool {
        !self.arrival_time.is_never()
    }

    /// Returns true if the last leg was a ride.
    pub fn uses_route(&self) -> bool {
        matches!(self.boarding, Boarding::Route { .. })
    }
}

/// Labels of every stop for one round, indexed by stop.
pub type Round = Vec<Label>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreached_label() {
        assert!(!Label::UNREACHED.is_reached());
        assert!(!Label::UNREACHED.uses_route());
    }

    #[test]
    fn uses_route_only_for_rides() {
        let ride = Label {
            arrival_time: Time::hms(8, 0, 0),
            parent: StopId(0),
            parent_departure_time: Time::hms(7, 50, 0),
            boarding: Boarding::Route {
                route: RouteId(1),
                boarded_at: StopIndex(0),
                alighted_at: StopIndex(2),
            },
        };
        assert!(ride.is_reached());
        assert!(ride.uses_route());

        let walk = Label {
            boarding: Boarding::Edge(EdgeId(3)),
            ..ride
        };
        assert!(!walk.uses_route());

        let shortcut = Label {
            boarding: Boarding::Shortcut,
            ..ride
        };
        assert!(!shortcut.uses_route());
    }
}

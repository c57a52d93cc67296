//! Scientific routes and their trip tables.

use serde::{Deserialize, Serialize};

use crate::domain::{RouteId, StopId, StopIndex, Time};

/// Arrival and departure of one trip at one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEvent {
    pub arrival_time: Time,
    pub departure_time: Time,
}

impl StopEvent {
    /// Create a stop event.
    pub fn new(arrival_time: Time, departure_time: Time) -> Self {
        Self {
            arrival_time,
            departure_time,
        }
    }

    /// Create a stop event without dwell time.
    pub fn at(time: Time) -> Self {
        Self::new(time, time)
    }
}

/// A route serving a stop, with the stop's position in the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteSegment {
    pub route: RouteId,
    pub stop_index: StopIndex,
}

/// A maximal set of trips sharing one stop sequence.
///
/// Trips are stored trip-major in a single table, ordered by descending
/// departure at the first stop: trip 0 is the latest trip of the day and
/// each following trip departs no later than the one before it. Trips
/// never overtake each other, so an earlier catchable trip always arrives
/// no later than a later one at every following stop.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    stops: Vec<StopId>,
    stop_events: Vec<StopEvent>,
}

impl Route {
    /// Assemble a route from validated, descending-ordered trips.
    pub(super) fn new(name: String, stops: Vec<StopId>, trips: Vec<Vec<StopEvent>>) -> Self {
        let stop_events = trips.into_iter().flatten().collect();
        Self {
            name,
            stops,
            stop_events,
        }
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stop sequence.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Returns the stop at a position of the sequence.
    pub fn stop_at(&self, index: StopIndex) -> StopId {
        self.stops[index.0]
    }

    pub fn number_of_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn number_of_trips(&self) -> usize {
        self.stop_events.len() / self.stops.len()
    }

    /// Returns true if `index` is the final stop of the sequence.
    pub fn is_last_stop(&self, index: StopIndex) -> bool {
        index.0 + 1 == self.stops.len()
    }

    /// Returns the stop events of one trip, aligned to the stop sequence.
    ///
    /// Trip 0 is the latest trip; higher indices depart earlier.
    pub fn trip(&self, trip: usize) -> &[StopEvent] {
        let size = self.stops.len();
        &self.stop_events[trip * size..(trip + 1) * size]
    }

    /// Returns the latest trip of the day.
    pub fn latest_trip(&self) -> &[StopEvent] {
        self.trip(0)
    }

    /// Iterates over trips from latest to earliest.
    pub fn trips(&self) -> impl Iterator<Item = &[StopEvent]> {
        self.stop_events.chunks(self.stops.len())
    }
}

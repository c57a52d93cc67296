//! Network tables and their builder.

use tracing::debug;

use super::error::NetworkError;
use super::route::{Route, RouteSegment, StopEvent};
use super::stop::Stop;
use super::transfer_graph::TransferGraph;
use crate::domain::{RouteId, StopId, StopIndex, Time};

/// The transit network the planner runs on.
///
/// All tables are immutable once built, so one `TransitData` can be shared
/// by reference (or `Arc`) between any number of planners.
///
/// Stop-event times are taken as-is: any boarding buffer or dwell time
/// must already be folded into them.
#[derive(Debug, Clone)]
pub struct TransitData {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    /// For each stop, the routes serving it, by route id then stop index.
    routes_serving_stop: Vec<Vec<RouteSegment>>,
    transfer_graph: TransferGraph,
}

impl TransitData {
    pub fn number_of_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn number_of_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if `stop` is a valid stop id.
    pub fn is_stop(&self, stop: StopId) -> bool {
        stop.index() < self.stops.len()
    }

    /// Returns a stop's attributes.
    pub fn stop(&self, stop: StopId) -> Option<&Stop> {
        self.stops.get(stop.index())
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns a route. Panics on an id not issued by this network.
    pub fn route(&self, route: RouteId) -> &Route {
        &self.routes[route.index()]
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the stop sequence of a route.
    pub fn stops_of_route(&self, route: RouteId) -> &[StopId] {
        self.route(route).stops()
    }

    /// Returns every (route, position) pair serving a stop.
    pub fn routes_serving_stop(&self, stop: StopId) -> &[RouteSegment] {
        self.routes_serving_stop
            .get(stop.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn transfer_graph(&self) -> &TransferGraph {
        &self.transfer_graph
    }
}

/// A route as handed to the builder, before validation.
#[derive(Debug)]
struct RawRoute {
    name: String,
    stops: Vec<StopId>,
    trips: Vec<Vec<StopEvent>>,
}

/// Builder for [`TransitData`].
///
/// # Examples
///
/// ```
/// use ultra_raptor::domain::Time;
/// use ultra_raptor::network::{Stop, StopEvent, TransitDataBuilder};
///
/// let mut builder = TransitDataBuilder::new();
/// let a = builder.add_stop(Stop::new("A"));
/// let b = builder.add_stop(Stop::new("B"));
/// builder.add_route(
///     "A-B",
///     vec![a, b],
///     vec![vec![
///         StopEvent::at(Time::hms(8, 0, 0)),
///         StopEvent::at(Time::hms(8, 10, 0)),
///     ]],
/// );
/// builder.add_symmetric_transfer(a, b, 900);
///
/// let data = builder.build().unwrap();
/// assert_eq!(data.number_of_stops(), 2);
/// assert_eq!(data.routes_serving_stop(b).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TransitDataBuilder {
    stops: Vec<Stop>,
    routes: Vec<RawRoute>,
    transfers: Vec<(StopId, StopId, u32)>,
}

impl TransitDataBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop, returning its id.
    pub fn add_stop(&mut self, stop: Stop) -> StopId {
        self.stops.push(stop);
        StopId::from(self.stops.len() - 1)
    }

    /// Add a route with its trips, returning its id.
    ///
    /// Trips may be given in any order; each trip lists one stop event per
    /// stop of `stops`. Validation happens in [`build`](Self::build).
    pub fn add_route(
        &mut self,
        name: impl Into<String>,
        stops: Vec<StopId>,
        trips: Vec<Vec<StopEvent>>,
    ) -> RouteId {
        self.routes.push(RawRoute {
            name: name.into(),
            stops,
            trips,
        });
        RouteId::from(self.routes.len() - 1)
    }

    /// Add a directed transfer edge (walking time in seconds).
    pub fn add_transfer(&mut self, from: StopId, to: StopId, travel_time: u32) -> &mut Self {
        self.transfers.push((from, to, travel_time));
        self
    }

    /// Add a transfer edge in both directions.
    pub fn add_symmetric_transfer(&mut self, a: StopId, b: StopId, travel_time: u32) -> &mut Self {
        self.add_transfer(a, b, travel_time);
        self.add_transfer(b, a, travel_time)
    }

    /// Validate the collected tables and assemble the network.
    ///
    /// # Errors
    ///
    /// Returns the first data contract violation found: unknown stops,
    /// routes with fewer than two stops or no trips, trips misaligned with
    /// their route, trips going back in time, or trips overtaking each
    /// other.
    pub fn build(self) -> Result<TransitData, NetworkError> {
        let number_of_stops = self.stops.len();
        let is_stop = |stop: StopId| stop.index() < number_of_stops;

        let mut routes = Vec::with_capacity(self.routes.len());
        for (index, raw) in self.routes.into_iter().enumerate() {
            routes.push(validate_route(RouteId::from(index), raw, &is_stop)?);
        }

        for &(from, to, _) in &self.transfers {
            if !is_stop(from) || !is_stop(to) {
                return Err(NetworkError::TransferUnknownStop { from, to });
            }
        }

        let mut routes_serving_stop = vec![Vec::new(); number_of_stops];
        for (index, route) in routes.iter().enumerate() {
            for (position, stop) in route.stops().iter().enumerate() {
                routes_serving_stop[stop.index()].push(RouteSegment {
                    route: RouteId::from(index),
                    stop_index: StopIndex(position),
                });
            }
        }

        let transfer_graph = TransferGraph::from_edges(number_of_stops, self.transfers);

        debug!(
            stops = number_of_stops,
            routes = routes.len(),
            transfers = transfer_graph.number_of_edges(),
            "Transit data built"
        );

        Ok(TransitData {
            stops: self.stops,
            routes,
            routes_serving_stop,
            transfer_graph,
        })
    }
}

/// Check one route's contracts and sort its trips latest-first.
fn validate_route(
    id: RouteId,
    raw: RawRoute,
    is_stop: &impl Fn(StopId) -> bool,
) -> Result<Route, NetworkError> {
    let RawRoute {
        name,
        stops,
        mut trips,
    } = raw;

    if stops.len() < 2 {
        return Err(NetworkError::RouteTooShort(id));
    }
    if let Some(&stop) = stops.iter().find(|&&stop| !is_stop(stop)) {
        return Err(NetworkError::RouteUnknownStop { route: id, stop });
    }
    if trips.is_empty() {
        return Err(NetworkError::RouteWithoutTrips(id));
    }

    for (trip_index, trip) in trips.iter().enumerate() {
        if trip.len() != stops.len() {
            return Err(NetworkError::TripLengthMismatch {
                route: id,
                trip: trip_index,
                expected: stops.len(),
                actual: trip.len(),
            });
        }
        if let Some(stop_index) = first_time_travel(trip) {
            return Err(NetworkError::TripTimesDecreasing {
                route: id,
                trip: trip_index,
                stop_index,
            });
        }
    }

    // Latest trip first; equal first departures are ordered by the rest of
    // the trip so that a slower trip counts as the later one
    trips.sort_by(|a, b| trip_key(b).cmp(trip_key(a)));

    for pair in trips.windows(2) {
        let (later, earlier) = (&pair[0], &pair[1]);
        let overtaken = earlier.iter().zip(later.iter()).position(|(e, l)| {
            e.arrival_time > l.arrival_time || e.departure_time > l.departure_time
        });
        if let Some(stop_index) = overtaken {
            return Err(NetworkError::OvertakingTrips {
                route: id,
                stop_index,
            });
        }
    }

    Ok(Route::new(name, stops, trips))
}

/// Event times of a trip in stop order, for lexicographic comparison.
fn trip_key(trip: &[StopEvent]) -> impl Iterator<Item = (Time, Time)> + '_ {
    trip.iter().map(|event| (event.departure_time, event.arrival_time))
}

/// Returns the first stop index at which a trip goes back in time.
fn first_time_travel(trip: &[StopEvent]) -> Option<usize> {
    for (index, event) in trip.iter().enumerate() {
        if event.departure_time < event.arrival_time {
            return Some(index);
        }
        if let Some(next) = trip.get(index + 1) {
            if next.arrival_time < event.departure_time {
                return Some(index + 1);
            }
        }
    }
    None
}

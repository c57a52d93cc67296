//! The round-based search.

use tracing::{debug, trace, warn};

use super::config::RaptorConfig;
use super::indexed::{RouteStarts, StopSet};
use super::label::{Boarding, Label, Round};
use super::observer::{NoopObserver, SearchObserver};
use super::reconstruct::build_legs;
use crate::domain::{Leg, StopId, Time};
use crate::network::TransitData;
use crate::transfers::{TransferIndex, TransferQuery};

/// Earliest-arrival planner over one transit network.
///
/// A planner borrows the network and the transfer index and owns all
/// per-query state, so it can answer many queries in sequence without
/// reallocating. Use one planner per thread; the network and the index
/// can be shared.
///
/// # Examples
///
/// ```
/// use ultra_raptor::domain::{StopId, Time};
/// use ultra_raptor::network::{Stop, StopEvent, TransitDataBuilder};
/// use ultra_raptor::raptor::{Raptor, RaptorConfig};
/// use ultra_raptor::transfers::{WalkingGraph, WalkingIndex};
///
/// let mut builder = TransitDataBuilder::new();
/// let a = builder.add_stop(Stop::new("A"));
/// let b = builder.add_stop(Stop::new("B"));
/// builder.add_route(
///     "A-B",
///     vec![a, b],
///     vec![vec![
///         StopEvent::at(Time::hms(8, 0, 0)),
///         StopEvent::at(Time::hms(8, 20, 0)),
///     ]],
/// );
/// let data = builder.build().unwrap();
/// let index = WalkingIndex::new(WalkingGraph::from_transfer_graph(
///     data.transfer_graph(),
///     data.number_of_stops(),
/// ));
///
/// let mut raptor = Raptor::new(&data, &index, RaptorConfig::default());
/// let legs = raptor.plan(a, Time::hms(7, 55, 0), b);
/// assert_eq!(legs.len(), 1);
/// assert_eq!(legs[0].arrival_time(), Time::hms(8, 20, 0));
/// ```
pub struct Raptor<'a, I: ?Sized, O = NoopObserver> {
    data: &'a TransitData,
    index: &'a I,
    config: RaptorConfig,
    observer: O,

    transfers: TransferQuery,
    rounds: Vec<Round>,
    earliest_arrival: Vec<Time>,
    stops_updated_by_route: StopSet,
    stops_updated_by_transfer: StopSet,
    routes_serving_updated_stops: RouteStarts,

    source: StopId,
    target: StopId,
    departure_time: Time,
    round_cap_reached: bool,
}

impl<'a, I: TransferIndex + ?Sized> Raptor<'a, I> {
    pub fn new(data: &'a TransitData, index: &'a I, config: RaptorConfig) -> Self {
        Self {
            data,
            index,
            config,
            observer: NoopObserver,
            transfers: TransferQuery::default(),
            rounds: Vec::new(),
            earliest_arrival: vec![Time::NEVER; data.number_of_stops()],
            stops_updated_by_route: StopSet::new(data.number_of_stops()),
            stops_updated_by_transfer: StopSet::new(data.number_of_stops()),
            routes_serving_updated_stops: RouteStarts::new(data.number_of_routes()),
            source: StopId::default(),
            target: StopId::default(),
            departure_time: Time::NEVER,
            round_cap_reached: false,
        }
    }
}

impl<'a, I: TransferIndex + ?Sized, O: SearchObserver> Raptor<'a, I, O> {
    /// Replace the observer receiving search events.
    pub fn with_observer<P: SearchObserver>(self, observer: P) -> Raptor<'a, I, P> {
        Raptor {
            data: self.data,
            index: self.index,
            config: self.config,
            observer,
            transfers: self.transfers,
            rounds: self.rounds,
            earliest_arrival: self.earliest_arrival,
            stops_updated_by_route: self.stops_updated_by_route,
            stops_updated_by_transfer: self.stops_updated_by_transfer,
            routes_serving_updated_stops: self.routes_serving_updated_stops,
            source: self.source,
            target: self.target,
            departure_time: self.departure_time,
            round_cap_reached: self.round_cap_reached,
        }
    }

    pub fn config(&self) -> &RaptorConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Plan a journey using the configured round cap.
    pub fn plan(&mut self, source: StopId, departure_time: Time, target: StopId) -> Vec<Leg> {
        self.run(source, departure_time, target, self.config.max_rounds)
    }

    /// Find the earliest arrival at `target` leaving `source` no earlier
    /// than `departure_time`, boarding at most `max_rounds` vehicles.
    ///
    /// Returns the legs of one optimal itinerary, or an empty list if the
    /// target cannot be reached or either endpoint is not a stop.
    pub fn run(
        &mut self,
        source: StopId,
        departure_time: Time,
        target: StopId,
        max_rounds: usize,
    ) -> Vec<Leg> {
        self.clear();
        if !self.data.is_stop(source) || !self.data.is_stop(target) {
            warn!(
                source = %source,
                target = %target,
                stops = self.data.number_of_stops(),
                "Query endpoint is not a stop"
            );
            return Vec::new();
        }
        debug!(
            source = %source,
            target = %target,
            departure = %departure_time,
            max_rounds,
            "Starting search"
        );

        self.initialize(source, departure_time, target);
        self.relax_initial_transfers();

        let mut still_improving = false;
        for _ in 0..max_rounds {
            self.start_new_round();
            self.observer.round_started(self.rounds.len() - 1);
            self.collect_routes_serving_updated_stops();
            self.scan_routes();
            trace!(
                round = self.rounds.len() - 1,
                routes = self.routes_serving_updated_stops.len(),
                stops = self.stops_updated_by_route.len(),
                "Routes scanned"
            );
            still_improving = !self.stops_updated_by_route.is_empty();
            if !still_improving {
                break;
            }
            self.relax_intermediate_transfers();
        }

        self.round_cap_reached = still_improving;
        let rounds = self.rounds.len() - 1;
        if self.round_cap_reached {
            warn!(max_rounds, "Round cap reached before the search converged");
        }
        self.observer.search_finished(rounds, self.round_cap_reached);

        let legs = build_legs(
            &self.rounds,
            self.data,
            &self.transfers,
            self.source,
            self.departure_time,
            self.target,
        );
        debug!(
            rounds,
            legs = legs.len(),
            arrival = %legs.last().map_or(Time::NEVER, Leg::arrival_time),
            "Search finished"
        );
        legs
    }

    /// Per-round labels of the last query, round 0 first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Earliest arrival at `stop` found by the last query, over all rounds.
    pub fn earliest_arrival(&self, stop: StopId) -> Time {
        self.earliest_arrival
            .get(stop.index())
            .copied()
            .unwrap_or(Time::NEVER)
    }

    /// Returns true if the last query stopped at the round cap while
    /// still improving arrivals.
    pub fn round_cap_reached(&self) -> bool {
        self.round_cap_reached
    }

    fn clear(&mut self) {
        let stops = self.data.number_of_stops();
        self.rounds.clear();
        self.earliest_arrival.clear();
        self.earliest_arrival.resize(stops, Time::NEVER);
        self.stops_updated_by_route.clear();
        self.stops_updated_by_transfer.clear();
        self.routes_serving_updated_stops.clear();
        self.transfers = TransferQuery::default();
        self.round_cap_reached = false;
    }

    fn initialize(&mut self, source: StopId, departure_time: Time, target: StopId) {
        self.source = source;
        self.target = target;
        self.departure_time = departure_time;

        self.start_new_round();
        self.rounds[0][source.index()] = Label {
            arrival_time: departure_time,
            parent: source,
            parent_departure_time: departure_time,
            boarding: Boarding::Source,
        };
        self.earliest_arrival[source.index()] = departure_time;
        self.stops_updated_by_transfer.insert(source);
    }

    /// Walk from the source to every stop the transfer index reaches, and
    /// straight to the target.
    fn relax_initial_transfers(&mut self) {
        let transfers = self.index.query(self.source, self.target);
        for &(stop, distance) in transfers.forward_pois() {
            if stop == self.target {
                continue;
            }
            debug_assert!(self.data.is_stop(stop), "transfer index returned non-stop {stop}");
            self.arrival_by_transfer(stop, self.walk_from_source(distance));
        }
        if let Some(distance) = transfers.distance() {
            self.arrival_by_transfer(self.target, self.walk_from_source(distance));
        }
        self.transfers = transfers;
    }

    fn walk_from_source(&self, distance: u32) -> Label {
        Label {
            arrival_time: self.departure_time + distance,
            parent: self.source,
            parent_departure_time: self.departure_time,
            boarding: Boarding::Shortcut,
        }
    }

    /// Find, for every route serving a stop improved by the last walks,
    /// the earliest position from which a trip can still be caught.
    fn collect_routes_serving_updated_stops(&mut self) {
        let data = self.data;
        self.routes_serving_updated_stops.clear();
        let previous = &self.rounds[self.rounds.len() - 2];

        for stop in self.stops_updated_by_transfer.iter() {
            let arrival = previous[stop.index()].arrival_time;
            debug_assert!(!arrival.is_never(), "updated stop {stop} has no label");

            for segment in data.routes_serving_stop(stop) {
                let route = data.route(segment.route);
                debug_assert_eq!(route.stop_at(segment.stop_index), stop);
                if route.is_last_stop(segment.stop_index) {
                    continue;
                }
                if route.latest_trip()[segment.stop_index.0].departure_time < arrival {
                    continue;
                }
                self.routes_serving_updated_stops
                    .insert_min(segment.route, segment.stop_index);
            }
        }
    }

    /// Scan every collected route once, riding the earliest catchable trip
    /// and switching to an earlier one whenever a stop allows it.
    fn scan_routes(&mut self) {
        let data = self.data;
        self.stops_updated_by_route.clear();
        let routes = std::mem::take(&mut self.routes_serving_updated_stops);

        for (route_id, start) in routes.iter() {
            self.observer.route_scanned(route_id, start);
            let route = data.route(route_id);
            let last_index = route.number_of_stops() - 1;
            let last_trip = route.number_of_trips() - 1;
            debug_assert!(start.0 < last_index);

            // Trips are ordered latest first; the latest is catchable at
            // `start` by construction of the collected routes.
            let mut trip = 0;
            let mut stop_index = start;
            let mut parent_index = start;
            while stop_index.0 < last_index {
                let stop = route.stop_at(stop_index);
                let reached = self.rounds[self.rounds.len() - 2][stop.index()].arrival_time;
                while trip < last_trip && route.trip(trip + 1)[stop_index.0].departure_time >= reached
                {
                    trip += 1;
                    parent_index = stop_index;
                }

                stop_index = stop_index.next();
                let events = route.trip(trip);
                let label = Label {
                    arrival_time: events[stop_index.0].arrival_time,
                    parent: route.stop_at(parent_index),
                    parent_departure_time: events[parent_index.0].departure_time,
                    boarding: Boarding::Route {
                        route: route_id,
                        boarded_at: parent_index,
                        alighted_at: stop_index,
                    },
                };
                self.arrival_by_route(route.stop_at(stop_index), label);
            }
        }

        self.routes_serving_updated_stops = routes;
    }

    /// Walk from every stop a ride improved this round: along the transfer
    /// graph, and to the target through the backward search.
    fn relax_intermediate_transfers(&mut self) {
        let data = self.data;
        let target = self.target;
        self.stops_updated_by_transfer.clear();
        let updated = std::mem::take(&mut self.stops_updated_by_route);

        for stop in updated.iter() {
            let arrival = self.current_round()[stop.index()].arrival_time;
            let to_target = self.transfers.backward_distance(stop);
            for edge in data.transfer_graph().edges_from(stop) {
                // The backward distance below covers this edge, unless the
                // index could not reach the target from here.
                if edge.to == target && to_target.is_some() {
                    continue;
                }
                let label = Label {
                    arrival_time: arrival + edge.travel_time,
                    parent: stop,
                    parent_departure_time: arrival,
                    boarding: Boarding::Edge(edge.id),
                };
                self.arrival_by_transfer(edge.to, label);
            }
            if let Some(distance) = to_target {
                let label = Label {
                    arrival_time: arrival + distance,
                    parent: stop,
                    parent_departure_time: arrival,
                    boarding: Boarding::Shortcut,
                };
                self.arrival_by_transfer(target, label);
            }
            self.stops_updated_by_transfer.insert(stop);
            self.observer.stop_settled(stop);
        }

        self.stops_updated_by_route = updated;
    }

    fn start_new_round(&mut self) {
        self.rounds
            .push(vec![Label::UNREACHED; self.data.number_of_stops()]);
    }

    fn current_round(&self) -> &Round {
        &self.rounds[self.rounds.len() - 1]
    }

    /// An arrival is only worth keeping if it beats both the stop's and the
    /// target's earliest arrival.
    fn improves(&self, stop: StopId, arrival_time: Time) -> bool {
        arrival_time < self.earliest_arrival[self.target.index()]
            && arrival_time < self.earliest_arrival[stop.index()]
    }

    fn record(&mut self, stop: StopId, label: Label) {
        self.earliest_arrival[stop.index()] = label.arrival_time;
        let round = self.rounds.len() - 1;
        self.rounds[round][stop.index()] = label;
    }

    fn arrival_by_route(&mut self, stop: StopId, label: Label) -> bool {
        if !self.improves(stop, label.arrival_time) {
            return false;
        }
        self.record(stop, label);
        self.stops_updated_by_route.insert(stop);
        self.observer.stop_updated_by_route(stop, label.arrival_time);
        true
    }

    fn arrival_by_transfer(&mut self, stop: StopId, label: Label) -> bool {
        if !self.improves(stop, label.arrival_time) {
            return false;
        }
        self.record(stop, label);
        self.stops_updated_by_transfer.insert(stop);
        self.observer
            .stop_updated_by_transfer(stop, label.arrival_time);
        true
    }
}

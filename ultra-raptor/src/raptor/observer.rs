//! Search instrumentation hooks.

use tracing::trace;

use crate::domain::{RouteId, StopId, StopIndex, Time};

/// Receives events as the planner runs.
///
/// Every method defaults to doing nothing; implement only the ones you
/// need. Events are delivered synchronously and in search order.
pub trait SearchObserver {
    /// A new round started. Rounds are numbered from 1.
    fn round_started(&mut self, _round: usize) {}

    /// A route is about to be scanned from `start`.
    fn route_scanned(&mut self, _route: RouteId, _start: StopIndex) {}

    /// A ride improved the arrival time at `stop`.
    fn stop_updated_by_route(&mut self, _stop: StopId, _arrival: Time) {}

    /// A walk improved the arrival time at `stop`.
    fn stop_updated_by_transfer(&mut self, _stop: StopId, _arrival: Time) {}

    /// Transfers out of `stop` were relaxed for the current round.
    fn stop_settled(&mut self, _stop: StopId) {}

    /// The search ended after `rounds` rounds.
    fn search_finished(&mut self, _rounds: usize, _cap_reached: bool) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Forwards every event to `tracing` at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn round_started(&mut self, round: usize) {
        trace!(round, "Round started");
    }

    fn route_scanned(&mut self, route: RouteId, start: StopIndex) {
        trace!(route = %route, start = start.0, "Scanning route");
    }

    fn stop_updated_by_route(&mut self, stop: StopId, arrival: Time) {
        trace!(stop = %stop, arrival = %arrival, "Stop improved by route");
    }

    fn stop_updated_by_transfer(&mut self, stop: StopId, arrival: Time) {
        trace!(stop = %stop, arrival = %arrival, "Stop improved by transfer");
    }

    fn stop_settled(&mut self, stop: StopId) {
        trace!(stop = %stop, "Stop settled");
    }

    fn search_finished(&mut self, rounds: usize, cap_reached: bool) {
        trace!(rounds, cap_reached, "Search finished");
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn round_started(&mut self, round: usize) {
        (**self).round_started(round);
    }

    fn route_scanned(&mut self, route: RouteId, start: StopIndex) {
        (**self).route_scanned(route, start);
    }

    fn stop_updated_by_route(&mut self, stop: StopId, arrival: Time) {
        (**self).stop_updated_by_route(stop, arrival);
    }

    fn stop_updated_by_transfer(&mut self, stop: StopId, arrival: Time) {
        (**self).stop_updated_by_transfer(stop, arrival);
    }

    fn stop_settled(&mut self, stop: StopId) {
        (**self).stop_settled(stop);
    }

    fn search_finished(&mut self, rounds: usize, cap_reached: bool) {
        (**self).search_finished(rounds, cap_reached);
    }
}

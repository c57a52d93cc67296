//! Journey leg type.
//!
//! A `Leg` is one uninterrupted segment of an itinerary: either a single
//! ride on one trip of a route, or a single walk.

use std::fmt;

use chrono::Duration;
use serde::Serialize;

use super::{DomainError, RouteId, StopId, Time};

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LegKind {
    /// Walking, either along a transfer edge or an index shortcut
    Walk,
    /// Riding a trip of the given route
    Transit { route: RouteId },
}

/// A leg of a journey.
///
/// A leg carries three times. `start_time` is when the traveller is ready
/// to begin the leg (the journey departure, or the previous leg's arrival),
/// `departure_time` is when travel actually begins, and `arrival_time` is
/// when the arrival stop is reached. The gap between the first two is
/// waiting at the departure stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    #[serde(flatten)]
    kind: LegKind,
    departure_stop: StopId,
    arrival_stop: StopId,
    start_time: Time,
    departure_time: Time,
    arrival_time: Time,
    stops: Vec<StopId>,
}

impl Leg {
    /// Create a walking leg. The start time defaults to the departure time.
    pub fn walk(from: StopId, to: StopId, departure_time: Time, arrival_time: Time) -> Self {
        Self {
            kind: LegKind::Walk,
            departure_stop: from,
            arrival_stop: to,
            start_time: departure_time,
            departure_time,
            arrival_time,
            stops: Vec::new(),
        }
    }

    /// Create a transit leg riding `route` from `from` to `to`.
    ///
    /// `stops` lists the stops passed between boarding and alighting,
    /// excluding both. The start time defaults to the departure time.
    pub fn transit(
        route: RouteId,
        from: StopId,
        to: StopId,
        departure_time: Time,
        arrival_time: Time,
        stops: Vec<StopId>,
    ) -> Self {
        Self {
            kind: LegKind::Transit { route },
            departure_stop: from,
            arrival_stop: to,
            start_time: departure_time,
            departure_time,
            arrival_time,
            stops,
        }
    }

    /// Returns this leg with the given start time.
    pub fn with_start_time(mut self, start_time: Time) -> Self {
        self.start_time = start_time;
        self
    }

    /// Check that start <= departure <= arrival.
    ///
    /// # Examples
    ///
    /// ```
    /// use ultra_raptor::domain::{Leg, StopId, Time};
    ///
    /// let leg = Leg::walk(StopId(0), StopId(1), Time::hms(8, 0, 0), Time::hms(8, 5, 0));
    /// assert!(leg.validate().is_ok());
    ///
    /// let late = leg.with_start_time(Time::hms(8, 1, 0));
    /// assert!(late.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_time <= self.departure_time && self.departure_time <= self.arrival_time {
            Ok(())
        } else {
            Err(DomainError::InconsistentLegTimes {
                start: self.start_time,
                departure: self.departure_time,
                arrival: self.arrival_time,
            })
        }
    }

    /// Returns how the leg is travelled.
    pub fn kind(&self) -> LegKind {
        self.kind
    }

    /// Returns true for walking legs.
    pub fn is_walk(&self) -> bool {
        matches!(self.kind, LegKind::Walk)
    }

    /// Returns the route ridden, for transit legs.
    pub fn route(&self) -> Option<RouteId> {
        match self.kind {
            LegKind::Transit { route } => Some(route),
            LegKind::Walk => None,
        }
    }

    pub fn departure_stop(&self) -> StopId {
        self.departure_stop
    }

    pub fn arrival_stop(&self) -> StopId {
        self.arrival_stop
    }

    pub fn start_time(&self) -> Time {
        self.start_time
    }

    pub fn departure_time(&self) -> Time {
        self.departure_time
    }

    pub fn arrival_time(&self) -> Time {
        self.arrival_time
    }

    /// Returns the stops passed while riding (empty for walks).
    pub fn intermediate_stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Waiting plus travelling.
    pub fn full_duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.start_time)
    }

    /// Time spent at the departure stop before travel begins.
    pub fn waiting_duration(&self) -> Duration {
        self.departure_time.signed_duration_since(self.start_time)
    }

    /// Time spent moving.
    pub fn traveling_duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LegKind::Walk => f.write_str("[walk]")?,
            LegKind::Transit { route } => write!(f, "[route {}]", route)?,
        }
        write!(
            f,
            " {} -> {} (start {}, depart {}, arrive {})",
            self.departure_stop,
            self.arrival_stop,
            self.start_time,
            self.departure_time,
            self.arrival_time
        )
    }
}

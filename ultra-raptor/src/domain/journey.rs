//! Journey type.
//!
//! A `Journey` is a complete itinerary from origin to destination: the
//! planner's leg sequence, checked for connectivity and chronology.

use std::fmt;

use chrono::Duration;
use serde::Serialize;

use super::{DomainError, Leg, StopId, Time};

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - Every leg satisfies start <= departure <= arrival
/// - Consecutive legs connect (arrival stop = next departure stop)
/// - Each leg starts exactly when the previous one arrives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Journey {
    legs: Vec<Leg>,
}

impl Journey {
    /// Constructs a journey from planner legs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the legs are empty, a leg's own times are
    /// inconsistent, or consecutive legs don't connect in place and time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ultra_raptor::domain::{Journey, Leg, RouteId, StopId, Time};
    ///
    /// let ride = Leg::transit(
    ///     RouteId(0),
    ///     StopId(0),
    ///     StopId(1),
    ///     Time::hms(8, 0, 0),
    ///     Time::hms(8, 20, 0),
    ///     vec![],
    /// );
    /// let walk = Leg::walk(StopId(1), StopId(2), Time::hms(8, 20, 0), Time::hms(8, 25, 0));
    ///
    /// let journey = Journey::new(vec![ride, walk]).unwrap();
    /// assert_eq!(journey.arrival_time(), Time::hms(8, 25, 0));
    /// assert_eq!(journey.transfer_count(), 0);
    /// ```
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        for leg in &legs {
            leg.validate()?;
        }

        for (index, pair) in legs.windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            if previous.arrival_stop() != next.departure_stop() {
                return Err(DomainError::LegsNotConnected(
                    previous.arrival_stop(),
                    next.departure_stop(),
                ));
            }
            if previous.arrival_time() != next.start_time() {
                return Err(DomainError::LegsNotChronological(index + 1));
            }
        }

        Ok(Self { legs })
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the origin stop.
    pub fn origin(&self) -> StopId {
        self.legs[0].departure_stop()
    }

    /// Returns the destination stop.
    pub fn destination(&self) -> StopId {
        self.legs[self.legs.len() - 1].arrival_stop()
    }

    /// Returns the time the traveller is ready at the origin.
    pub fn departure_time(&self) -> Time {
        self.legs[0].start_time()
    }

    /// Returns the arrival time at the destination.
    pub fn arrival_time(&self) -> Time {
        self.legs[self.legs.len() - 1].arrival_time()
    }

    /// Returns the total journey duration, including initial waiting.
    pub fn duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Returns the number of transit rides.
    pub fn transit_leg_count(&self) -> usize {
        self.legs.iter().filter(|leg| !leg.is_walk()).count()
    }

    /// Returns the number of vehicle changes.
    pub fn transfer_count(&self) -> usize {
        self.transit_leg_count().saturating_sub(1)
    }

    /// Returns the total time spent walking.
    pub fn walking_duration(&self) -> Duration {
        self.legs
            .iter()
            .filter(|leg| leg.is_walk())
            .map(Leg::traveling_duration)
            .fold(Duration::zero(), |acc, d| acc + d)
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leg in &self.legs {
            writeln!(f, "{}", leg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    fn t(s: &str) -> Time {
        Time::parse(s).unwrap()
    }

    fn ride(route: u32, from: u32, to: u32, dep: &str, arr: &str) -> Leg {
        Leg::transit(
            RouteId(route),
            StopId(from),
            StopId(to),
            t(dep),
            t(arr),
            Vec::new(),
        )
    }

    fn two_rides_and_walk() -> Vec<Leg> {
        vec![
            ride(0, 0, 1, "08:05", "08:30").with_start_time(t("08:00")),
            Leg::walk(StopId(1), StopId(2), t("08:30"), t("08:34")),
            ride(1, 2, 3, "08:40", "09:10").with_start_time(t("08:34")),
        ]
    }

    #[test]
    fn summary_values() {
        let journey = Journey::new(two_rides_and_walk()).unwrap();

        assert_eq!(journey.leg_count(), 3);
        assert_eq!(journey.origin(), StopId(0));
        assert_eq!(journey.destination(), StopId(3));
        assert_eq!(journey.departure_time(), t("08:00"));
        assert_eq!(journey.arrival_time(), t("09:10"));
        assert_eq!(journey.duration(), Duration::minutes(70));
        assert_eq!(journey.transit_leg_count(), 2);
        assert_eq!(journey.transfer_count(), 1);
        assert_eq!(journey.walking_duration(), Duration::minutes(4));
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(Journey::new(vec![]), Err(DomainError::EmptyJourney));
    }

    #[test]
    fn disconnected_legs_are_rejected() {
        let legs = vec![
            ride(0, 0, 1, "08:05", "08:30"),
            ride(1, 2, 3, "08:30", "09:10"),
        ];
        assert_eq!(
            Journey::new(legs),
            Err(DomainError::LegsNotConnected(StopId(1), StopId(2)))
        );
    }

    #[test]
    fn start_must_match_previous_arrival() {
        let legs = vec![
            ride(0, 0, 1, "08:05", "08:30"),
            ride(1, 1, 3, "08:40", "09:10"),
        ];
        assert_eq!(
            Journey::new(legs),
            Err(DomainError::LegsNotChronological(1))
        );
    }

    #[test]
    fn walk_only_journey_has_no_transfers() {
        let journey =
            Journey::new(vec![Leg::walk(StopId(0), StopId(1), t("07:00"), t("07:20"))]).unwrap();
        assert_eq!(journey.transit_leg_count(), 0);
        assert_eq!(journey.transfer_count(), 0);
    }

    #[test]
    fn display_one_line_per_leg() {
        let journey = Journey::new(two_rides_and_walk()).unwrap();
        let printed = journey.to_string();
        assert_eq!(printed.lines().count(), 3);
        assert!(printed.lines().nth(1).unwrap().starts_with("[walk] 1 -> 2"));
    }
}

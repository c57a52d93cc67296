//! Rebuilding an itinerary from per-round labels.

use tracing::warn;

use super::label::{Boarding, Label, Round};
use crate::domain::{Leg, StopId, Time};
use crate::network::TransitData;
use crate::transfers::TransferQuery;

/// Where the itinerary ends before any final walk to the target.
#[derive(Debug, Clone, Copy)]
struct Terminus {
    stop: StopId,
    round: usize,
    /// Arrival at the target, including the final walk.
    arrival_time: Time,
}

/// Build the legs of the best itinerary found, in travel order.
///
/// The itinerary ends at the stop minimising arrival plus backward walking
/// distance; the target's own label wins ties. Stops reached only by
/// walking from the source are not candidates. Returns an empty list if
/// the target was not reached.
pub(super) fn build_legs(
    rounds: &[Round],
    data: &TransitData,
    transfers: &TransferQuery,
    source: StopId,
    departure_time: Time,
    target: StopId,
) -> Vec<Leg> {
    let Some(terminus) = find_terminus(rounds, transfers, target) else {
        return Vec::new();
    };

    let Some(mut legs) = walk_back(rounds, data, terminus) else {
        return Vec::new();
    };
    legs.reverse();

    if terminus.stop != target {
        let reached = rounds[terminus.round][terminus.stop.index()].arrival_time;
        legs.push(Leg::walk(terminus.stop, target, reached, terminus.arrival_time));
    }
    if legs.is_empty() {
        debug_assert_eq!(source, target);
        legs.push(Leg::walk(source, target, departure_time, departure_time));
    }

    assign_start_times(legs, departure_time)
}

/// The latest round in which `stop` was reached holds its best label.
fn best_label(rounds: &[Round], stop: StopId) -> Option<(usize, &Label)> {
    rounds
        .iter()
        .enumerate()
        .rev()
        .map(|(round, labels)| (round, &labels[stop.index()]))
        .find(|(_, label)| label.is_reached())
}

fn find_terminus(rounds: &[Round], transfers: &TransferQuery, target: StopId) -> Option<Terminus> {
    let number_of_stops = rounds.first().map_or(0, Vec::len);
    let mut best = best_label(rounds, target).map(|(round, label)| Terminus {
        stop: target,
        round,
        arrival_time: label.arrival_time,
    });

    for stop in (0..number_of_stops).map(StopId::from) {
        if stop == target {
            continue;
        }
        let Some(walk) = transfers.backward_distance(stop) else {
            continue;
        };
        let Some((round, label)) = best_label(rounds, stop) else {
            continue;
        };
        // Round 0 holds only the source and walks from it.
        if round == 0 {
            continue;
        }
        let arrival_time = label.arrival_time + walk;
        if best.is_none_or(|b| arrival_time < b.arrival_time) {
            best = Some(Terminus {
                stop,
                round,
                arrival_time,
            });
        }
    }

    best.filter(|t| !t.arrival_time.is_never())
}

/// Follow parent pointers from the terminus back to the source, returning
/// the legs in reverse travel order.
fn walk_back(rounds: &[Round], data: &TransitData, terminus: Terminus) -> Option<Vec<Leg>> {
    let max_steps = rounds.len() * rounds.first().map_or(0, Vec::len) + 1;
    let mut legs = Vec::new();
    let mut stop = terminus.stop;
    let mut round = terminus.round;

    for _ in 0..max_steps {
        let label = rounds[round][stop.index()];
        if !label.is_reached() {
            warn!(stop = %stop, round, "Parent chain reaches an unlabelled stop");
            return None;
        }

        match label.boarding {
            Boarding::Source => return Some(legs),
            Boarding::Route {
                route,
                boarded_at,
                alighted_at,
            } => {
                let stops = data.stops_of_route(route)[boarded_at.0 + 1..alighted_at.0].to_vec();
                legs.push(Leg::transit(
                    route,
                    label.parent,
                    stop,
                    label.parent_departure_time,
                    label.arrival_time,
                    stops,
                ));
                round = round.checked_sub(1)?;
            }
            Boarding::Edge(_) | Boarding::Shortcut => {
                legs.push(Leg::walk(
                    label.parent,
                    stop,
                    label.parent_departure_time,
                    label.arrival_time,
                ));
            }
        }
        stop = label.parent;
    }

    warn!(terminus = %terminus.stop, "Parent chain does not reach the source");
    None
}

/// The first leg starts at the query's departure time, every other leg
/// when the previous one arrives.
fn assign_start_times(legs: Vec<Leg>, departure_time: Time) -> Vec<Leg> {
    let mut start = departure_time;
    legs.into_iter()
        .map(|leg| {
            let leg = leg.with_start_time(start);
            start = leg.arrival_time();
            leg
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, StopIndex};
    use crate::network::{Stop, StopEvent, TransitDataBuilder};

    fn time(s: &str) -> Time {
        Time::parse(s).unwrap()
    }

    /// Stops 0..4 with one route 0 -> 1 -> 2 -> 3.
    fn line() -> TransitData {
        let mut builder = TransitDataBuilder::new();
        let stops: Vec<StopId> = (0..4)
            .map(|i| builder.add_stop(Stop::new(format!("S{i}"))))
            .collect();
        builder.add_route(
            "line",
            stops,
            vec![vec![
                StopEvent::at(time("08:00")),
                StopEvent::at(time("08:10")),
                StopEvent::at(time("08:20")),
                StopEvent::at(time("08:30")),
            ]],
        );
        builder.build().unwrap()
    }

    fn unreached_round(stops: usize) -> Round {
        vec![Label::UNREACHED; stops]
    }

    fn seeded(source: StopId, departure: Time) -> Round {
        let mut round = unreached_round(4);
        round[source.index()] = Label {
            arrival_time: departure,
            parent: source,
            parent_departure_time: departure,
            boarding: Boarding::Source,
        };
        round
    }

    fn ride(from: StopIndex, to: StopIndex, departure: &str, arrival: &str) -> Label {
        Label {
            arrival_time: time(arrival),
            parent: StopId::from(from.0),
            parent_departure_time: time(departure),
            boarding: Boarding::Route {
                route: RouteId(0),
                boarded_at: from,
                alighted_at: to,
            },
        }
    }

    #[test]
    fn unreached_target_yields_nothing() {
        let data = line();
        let rounds = vec![seeded(StopId(0), time("07:55"))];
        let legs = build_legs(
            &rounds,
            &data,
            &TransferQuery::unreachable(),
            StopId(0),
            time("07:55"),
            StopId(3),
        );
        assert!(legs.is_empty());
    }

    #[test]
    fn ride_with_intermediate_stops() {
        let data = line();
        let mut round1 = unreached_round(4);
        round1[3] = ride(StopIndex(0), StopIndex(3), "08:00", "08:30");
        let rounds = vec![seeded(StopId(0), time("07:55")), round1];

        let legs = build_legs(
            &rounds,
            &data,
            &TransferQuery::unreachable(),
            StopId(0),
            time("07:55"),
            StopId(3),
        );

        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].route(), Some(RouteId(0)));
        assert_eq!(legs[0].intermediate_stops(), &[StopId(1), StopId(2)]);
        assert_eq!(legs[0].start_time(), time("07:55"));
        assert_eq!(legs[0].departure_time(), time("08:00"));
        assert_eq!(legs[0].arrival_time(), time("08:30"));
    }

    #[test]
    fn final_walk_from_better_terminus() {
        let data = line();
        let mut round1 = unreached_round(4);
        round1[2] = ride(StopIndex(0), StopIndex(2), "08:00", "08:20");
        let rounds = vec![seeded(StopId(0), time("07:55")), round1];
        // Walking from stop 2 to stop 3 takes 5 minutes.
        let transfers = TransferQuery::new(vec![], None, vec![u32::MAX, u32::MAX, 300, 0]);

        let legs = build_legs(
            &rounds,
            &data,
            &transfers,
            StopId(0),
            time("07:55"),
            StopId(3),
        );

        assert_eq!(legs.len(), 2);
        assert!(!legs[0].is_walk());
        assert!(legs[1].is_walk());
        assert_eq!(legs[1].departure_stop(), StopId(2));
        assert_eq!(legs[1].arrival_stop(), StopId(3));
        assert_eq!(legs[1].start_time(), time("08:20"));
        assert_eq!(legs[1].arrival_time(), time("08:25"));
    }

    #[test]
    fn target_label_wins_ties() {
        let data = line();
        let mut round1 = unreached_round(4);
        round1[2] = ride(StopIndex(0), StopIndex(2), "08:00", "08:20");
        round1[3] = Label {
            arrival_time: time("08:25"),
            parent: StopId(2),
            parent_departure_time: time("08:20"),
            boarding: Boarding::Shortcut,
        };
        let rounds = vec![seeded(StopId(0), time("07:55")), round1];
        let transfers = TransferQuery::new(vec![], None, vec![u32::MAX, u32::MAX, 300, 0]);

        let legs = build_legs(
            &rounds,
            &data,
            &transfers,
            StopId(0),
            time("07:55"),
            StopId(3),
        );

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1].arrival_time(), time("08:25"));
        assert_eq!(legs[1].departure_time(), time("08:20"));
    }

    #[test]
    fn walk_is_never_chained_onto_a_walk() {
        let data = line();
        let mut round0 = seeded(StopId(0), time("07:55"));
        round0[1] = Label {
            arrival_time: time("08:00"),
            parent: StopId(0),
            parent_departure_time: time("07:55"),
            boarding: Boarding::Shortcut,
        };
        let rounds = vec![round0, unreached_round(4)];
        // Stop 1 is 5 minutes on foot from the target, which is out of reach
        // from the source.
        let transfers = TransferQuery::new(
            vec![(StopId(1), 300)],
            None,
            vec![u32::MAX, 300, u32::MAX, 0],
        );

        let legs = build_legs(
            &rounds,
            &data,
            &transfers,
            StopId(0),
            time("07:55"),
            StopId(3),
        );
        assert!(legs.is_empty());
    }

    #[test]
    fn source_equals_target_is_a_zero_walk() {
        let data = line();
        let rounds = vec![seeded(StopId(1), time("09:00"))];
        let legs = build_legs(
            &rounds,
            &data,
            &TransferQuery::unreachable(),
            StopId(1),
            time("09:00"),
            StopId(1),
        );

        assert_eq!(legs, vec![Leg::walk(StopId(1), StopId(1), time("09:00"), time("09:00"))]);
    }

    #[test]
    fn broken_parent_chain_yields_nothing() {
        let data = line();
        let mut round1 = unreached_round(4);
        // Boarded at stop 1, which round 0 never reached.
        round1[3] = ride(StopIndex(1), StopIndex(3), "08:10", "08:30");
        let rounds = vec![seeded(StopId(0), time("07:55")), round1];

        let legs = build_legs(
            &rounds,
            &data,
            &TransferQuery::unreachable(),
            StopId(0),
            time("07:55"),
            StopId(3),
        );
        assert!(legs.is_empty());
    }

    #[test]
    fn waiting_is_folded_into_start_times() {
        let legs = assign_start_times(
            vec![
                Leg::walk(StopId(0), StopId(1), time("08:00"), time("08:05")),
                Leg::transit(RouteId(0), StopId(1), StopId(2), time("08:15"), time("08:40"), vec![]),
            ],
            time("07:50"),
        );

        assert_eq!(legs[0].start_time(), time("07:50"));
        assert_eq!(legs[1].start_time(), time("08:05"));
        assert!(legs.iter().all(|leg| leg.validate().is_ok()));
    }
}

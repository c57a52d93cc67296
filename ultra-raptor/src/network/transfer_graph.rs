//! Transfer graph between stops.
//!
//! The transfer graph holds the walking connections relaxed between
//! rounds. It is directed: a connection A -> B says nothing about B -> A.
//! Edges are stored in adjacency-array form, grouped by tail stop, and
//! identified by their position in that array.

use crate::domain::{EdgeId, StopId};

/// An outgoing transfer edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferEdge {
    pub id: EdgeId,
    pub to: StopId,
    /// Walking time in seconds.
    pub travel_time: u32,
}

/// Directed, weighted graph over stops.
#[derive(Debug, Clone, Default)]
pub struct TransferGraph {
    /// `first_edge[s]..first_edge[s + 1]` are the edges leaving stop `s`.
    first_edge: Vec<usize>,
    heads: Vec<StopId>,
    travel_times: Vec<u32>,
}

impl TransferGraph {
    /// Build the adjacency array from an edge list over known stops.
    ///
    /// Edges leaving the same stop keep their insertion order.
    pub(super) fn from_edges(number_of_stops: usize, mut edges: Vec<(StopId, StopId, u32)>) -> Self {
        edges.sort_by_key(|(from, _, _)| *from);

        let mut first_edge = vec![0; number_of_stops + 1];
        for (from, _, _) in &edges {
            first_edge[from.index() + 1] += 1;
        }
        for stop in 0..number_of_stops {
            first_edge[stop + 1] += first_edge[stop];
        }

        let (heads, travel_times): (Vec<StopId>, Vec<u32>) =
            edges.into_iter().map(|(_, to, time)| (to, time)).unzip();

        Self {
            first_edge,
            heads,
            travel_times,
        }
    }

    /// Returns the edges leaving `stop`.
    pub fn edges_from(&self, stop: StopId) -> impl Iterator<Item = TransferEdge> + '_ {
        let range = self
            .first_edge
            .get(stop.index()..=stop.index() + 1)
            .map_or(0..0, |bounds| bounds[0]..bounds[1]);
        range.map(|edge| TransferEdge {
            id: EdgeId(edge as u32),
            to: self.heads[edge],
            travel_time: self.travel_times[edge],
        })
    }

    /// Iterates over all edges as (from, to, travel time).
    pub fn edge_list(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.first_edge.windows(2).enumerate().flat_map(move |(stop, bounds)| {
            (bounds[0]..bounds[1]).map(move |edge| {
                (
                    StopId::from(stop),
                    self.heads[edge],
                    self.travel_times[edge],
                )
            })
        })
    }

    /// Returns the head and walking time of an edge.
    pub fn edge(&self, id: EdgeId) -> Option<(StopId, u32)> {
        let index = id.index();
        Some((*self.heads.get(index)?, self.travel_times[index]))
    }

    pub fn number_of_edges(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> TransferGraph {
        TransferGraph::from_edges(
            4,
            vec![
                (StopId(2), StopId(3), 30),
                (StopId(0), StopId(1), 60),
                (StopId(0), StopId(2), 90),
                (StopId(1), StopId(0), 60),
            ],
        )
    }

    #[test]
    fn edges_grouped_by_tail() {
        let graph = graph();

        let from_zero: Vec<_> = graph.edges_from(StopId(0)).collect();
        assert_eq!(from_zero.len(), 2);
        assert_eq!(from_zero[0].to, StopId(1));
        assert_eq!(from_zero[0].travel_time, 60);
        assert_eq!(from_zero[1].to, StopId(2));

        assert_eq!(graph.edges_from(StopId(3)).count(), 0);
        assert_eq!(graph.number_of_edges(), 4);
    }

    #[test]
    fn edge_ids_resolve() {
        let graph = graph();
        for edge in graph.edges_from(StopId(2)) {
            assert_eq!(graph.edge(edge.id), Some((StopId(3), 30)));
        }
        assert_eq!(graph.edge(EdgeId(40)), None);
    }

    #[test]
    fn unknown_stop_has_no_edges() {
        assert_eq!(graph().edges_from(StopId(17)).count(), 0);
    }

    #[test]
    fn edge_list_roundtrips() {
        let list: Vec<_> = graph().edge_list().collect();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0], (StopId(0), StopId(1), 60));
        assert_eq!(list[3], (StopId(2), StopId(3), 30));
    }

    #[test]
    fn empty_graph() {
        let graph = TransferGraph::from_edges(3, vec![]);
        assert!(graph.is_empty());
        assert_eq!(graph.edges_from(StopId(1)).count(), 0);
    }
}

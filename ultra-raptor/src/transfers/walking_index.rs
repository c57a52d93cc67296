//! Transfer index backed by bounded walking-graph searches.

use tracing::trace;

use super::dijkstra::bounded_dijkstra;
use super::{INFINITY, TransferIndex, TransferQuery, Weight, WalkingGraph};
use crate::domain::StopId;

/// A [`TransferIndex`] running one forward and one backward Dijkstra on a
/// walking graph, both pruned at a maximum walking time.
///
/// This answers exactly what a contracted bucket index answers, without
/// the preprocessing.
///
/// # Examples
///
/// ```
/// use ultra_raptor::domain::{StopId, Vertex};
/// use ultra_raptor::transfers::{TransferIndex, WalkingGraph, WalkingIndex};
///
/// let graph = WalkingGraph::new(2, 2, vec![(Vertex(0), Vertex(1), 300)]).unwrap();
/// let index = WalkingIndex::new(graph).with_max_walk(600);
///
/// let query = index.query(StopId(0), StopId(1));
/// assert_eq!(query.distance(), Some(300));
/// assert_eq!(query.backward_distance(StopId(0)), Some(300));
/// ```
#[derive(Debug, Clone)]
pub struct WalkingIndex {
    graph: WalkingGraph,
    max_walk: Weight,
}

impl WalkingIndex {
    /// Create an index without a walking limit.
    pub fn new(graph: WalkingGraph) -> Self {
        Self {
            graph,
            max_walk: INFINITY,
        }
    }

    /// Limit walks to `seconds`; longer walks count as unreachable.
    pub fn with_max_walk(mut self, seconds: Weight) -> Self {
        self.max_walk = seconds;
        self
    }

    /// Returns the walking limit, if any.
    pub fn max_walk(&self) -> Option<Weight> {
        (self.max_walk != INFINITY).then_some(self.max_walk)
    }

    pub fn graph(&self) -> &WalkingGraph {
        &self.graph
    }
}

impl TransferIndex for WalkingIndex {
    fn query(&self, source: StopId, target: StopId) -> TransferQuery {
        let stops = self.graph.number_of_stops();
        if source.index() >= stops || target.index() >= stops {
            return TransferQuery::unreachable();
        }

        let forward = bounded_dijkstra(&self.graph.forward, source.0, self.max_walk);
        let backward = bounded_dijkstra(&self.graph.backward, target.0, self.max_walk);

        let forward_pois: Vec<(StopId, Weight)> = forward[..stops]
            .iter()
            .enumerate()
            .filter(|&(stop, &d)| stop != source.index() && d != INFINITY)
            .map(|(stop, &d)| (StopId::from(stop), d))
            .collect();
        let distance = Some(forward[target.index()]).filter(|&d| d != INFINITY);

        trace!(
            source = %source,
            target = %target,
            pois = forward_pois.len(),
            distance = ?distance,
            "Transfer index queried"
        );

        TransferQuery::new(forward_pois, distance, backward[..stops].to_vec())
    }
}

//! Pruned walking-distance index.
//!
//! The planner never runs a full walking-graph search per query. Walks
//! leaving the source and walks reaching the target are answered by a
//! [`TransferIndex`]: one forward search from the source and one backward
//! search from the target, whose results are kept in a [`TransferQuery`].
//!
//! The index itself is immutable and can be shared between planners; all
//! per-query state lives in the returned `TransferQuery`.

mod dijkstra;
mod graph;
mod walking_index;

pub use graph::WalkingGraph;
pub use walking_index::WalkingIndex;

use crate::domain::StopId;

/// Walking time in seconds.
pub type Weight = u32;

/// Distance of an unreached vertex.
pub const INFINITY: Weight = Weight::MAX;

/// A precomputed walking-distance structure queried once per journey.
pub trait TransferIndex {
    /// Run the forward search from `source` and the backward search from
    /// `target`.
    fn query(&self, source: StopId, target: StopId) -> TransferQuery;
}

/// Results of one [`TransferIndex::query`].
#[derive(Debug, Clone, Default)]
pub struct TransferQuery {
    forward_pois: Vec<(StopId, Weight)>,
    distance: Option<Weight>,
    /// Backward distance to the target, per stop.
    backward: Vec<Weight>,
}

impl TransferQuery {
    /// Assemble query results.
    ///
    /// `backward` holds one entry per stop, [`INFINITY`] where the target
    /// is not reachable on foot.
    pub fn new(
        forward_pois: Vec<(StopId, Weight)>,
        distance: Option<Weight>,
        backward: Vec<Weight>,
    ) -> Self {
        Self {
            forward_pois,
            distance,
            backward,
        }
    }

    /// A query in which nothing is reachable on foot.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Stops reached by the forward search, with their walking distance
    /// from the source.
    pub fn forward_pois(&self) -> &[(StopId, Weight)] {
        &self.forward_pois
    }

    /// Walking distance from the source straight to the target.
    pub fn distance(&self) -> Option<Weight> {
        self.distance
    }

    /// Walking distance from `stop` to the target.
    pub fn backward_distance(&self, stop: StopId) -> Option<Weight> {
        self.backward
            .get(stop.index())
            .copied()
            .filter(|&d| d != INFINITY)
    }
}

//! Walking graph.
//!
//! The graph the transfer index searches. Its first `number_of_stops`
//! vertices are the stops; any further vertices are plain walking-graph
//! nodes (street intersections and the like).

use super::Weight;
use crate::domain::Vertex;
use crate::network::{NetworkError, TransferGraph};

/// Adjacency array of one search direction.
#[derive(Debug, Clone)]
pub(super) struct Adjacency {
    first_edge: Vec<usize>,
    heads: Vec<u32>,
    weights: Vec<Weight>,
}

impl Adjacency {
    fn from_edges(number_of_vertices: usize, mut edges: Vec<(u32, u32, Weight)>) -> Self {
        edges.sort_by_key(|(tail, _, _)| *tail);

        let mut first_edge = vec![0; number_of_vertices + 1];
        for (tail, _, _) in &edges {
            first_edge[*tail as usize + 1] += 1;
        }
        for vertex in 0..number_of_vertices {
            first_edge[vertex + 1] += first_edge[vertex];
        }

        let (heads, weights): (Vec<u32>, Vec<Weight>) =
            edges.into_iter().map(|(_, head, w)| (head, w)).unzip();

        Self {
            first_edge,
            heads,
            weights,
        }
    }

    pub(super) fn number_of_vertices(&self) -> usize {
        self.first_edge.len() - 1
    }

    pub(super) fn neighbors(&self, vertex: u32) -> impl Iterator<Item = (u32, Weight)> + '_ {
        let v = vertex as usize;
        (self.first_edge[v]..self.first_edge[v + 1]).map(|e| (self.heads[e], self.weights[e]))
    }
}

/// Directed walking graph, searchable in both directions.
#[derive(Debug, Clone)]
pub struct WalkingGraph {
    number_of_stops: usize,
    pub(super) forward: Adjacency,
    pub(super) backward: Adjacency,
}

impl WalkingGraph {
    /// Build a walking graph from an edge list (weights in seconds).
    ///
    /// # Errors
    ///
    /// Fails if the graph has fewer vertices than the network has stops,
    /// or if an edge touches a vertex outside `[0, number_of_vertices)`.
    pub fn new(
        number_of_vertices: usize,
        number_of_stops: usize,
        edges: Vec<(Vertex, Vertex, Weight)>,
    ) -> Result<Self, NetworkError> {
        if number_of_vertices < number_of_stops {
            return Err(NetworkError::TooFewVertices {
                stops: number_of_stops,
                vertices: number_of_vertices,
            });
        }

        let mut forward_edges = Vec::with_capacity(edges.len());
        for (tail, head, weight) in edges {
            for vertex in [tail, head] {
                if vertex.index() >= number_of_vertices {
                    return Err(NetworkError::UnknownVertex {
                        vertex: vertex.0,
                        vertices: number_of_vertices,
                    });
                }
            }
            forward_edges.push((tail.0, head.0, weight));
        }

        Ok(Self::from_raw(number_of_vertices, number_of_stops, forward_edges))
    }

    /// Use the stop-to-stop transfer graph as the walking graph.
    pub fn from_transfer_graph(graph: &TransferGraph, number_of_stops: usize) -> Self {
        let edges = graph
            .edge_list()
            .map(|(from, to, time)| (from.0, to.0, time))
            .collect();
        Self::from_raw(number_of_stops, number_of_stops, edges)
    }

    fn from_raw(
        number_of_vertices: usize,
        number_of_stops: usize,
        forward_edges: Vec<(u32, u32, Weight)>,
    ) -> Self {
        let backward_edges = forward_edges
            .iter()
            .map(|&(tail, head, weight)| (head, tail, weight))
            .collect();
        Self {
            number_of_stops,
            forward: Adjacency::from_edges(number_of_vertices, forward_edges),
            backward: Adjacency::from_edges(number_of_vertices, backward_edges),
        }
    }

    pub fn number_of_stops(&self) -> usize {
        self.number_of_stops
    }

    pub fn number_of_vertices(&self) -> usize {
        self.forward.number_of_vertices()
    }

    pub fn number_of_edges(&self) -> usize {
        self.forward.heads.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Stop, TransitDataBuilder};

    #[test]
    fn backward_graph_reverses_edges() {
        let graph = WalkingGraph::new(3, 2, vec![(Vertex(0), Vertex(2), 10), (Vertex(2), Vertex(1), 20)])
            .unwrap();

        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.number_of_stops(), 2);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.forward.neighbors(0).collect::<Vec<_>>(), vec![(2, 10)]);
        assert_eq!(graph.backward.neighbors(1).collect::<Vec<_>>(), vec![(2, 20)]);
        assert_eq!(graph.backward.neighbors(0).count(), 0);
    }

    #[test]
    fn rejects_out_of_range_vertex() {
        let err = WalkingGraph::new(2, 2, vec![(Vertex(0), Vertex(5), 10)]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::UnknownVertex {
                vertex: 5,
                vertices: 2
            }
        );
    }

    #[test]
    fn rejects_missing_stop_vertices() {
        let err = WalkingGraph::new(1, 3, vec![]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::TooFewVertices {
                stops: 3,
                vertices: 1
            }
        );
    }

    #[test]
    fn from_transfer_graph_copies_edges() {
        let mut builder = TransitDataBuilder::new();
        let a = builder.add_stop(Stop::new("A"));
        let b = builder.add_stop(Stop::new("B"));
        builder.add_transfer(a, b, 45);
        let data = builder.build().unwrap();

        let graph = WalkingGraph::from_transfer_graph(data.transfer_graph(), data.number_of_stops());
        assert_eq!(graph.number_of_vertices(), 2);
        assert_eq!(graph.forward.neighbors(0).collect::<Vec<_>>(), vec![(1, 45)]);
        assert_eq!(graph.backward.neighbors(1).collect::<Vec<_>>(), vec![(0, 45)]);
    }
}

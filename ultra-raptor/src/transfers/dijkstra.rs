//! Radius-bounded Dijkstra over one direction of the walking graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::graph::Adjacency;
use super::{INFINITY, Weight};

/// Compute walking distances from `source` to every vertex within
/// `radius`. Vertices further away, or unreachable, stay at [`INFINITY`].
pub(super) fn bounded_dijkstra(graph: &Adjacency, source: u32, radius: Weight) -> Vec<Weight> {
    let mut distance = vec![INFINITY; graph.number_of_vertices()];
    if source as usize >= distance.len() {
        return distance;
    }

    // Min-heap on (distance, vertex); the vertex breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(Weight, u32)>> = BinaryHeap::new();
    distance[source as usize] = 0;
    heap.push(Reverse((0, source)));

    while let Some(Reverse((dist, vertex))) = heap.pop() {
        // Stale heap entry
        if dist > distance[vertex as usize] {
            continue;
        }

        for (head, weight) in graph.neighbors(vertex) {
            let candidate = dist.saturating_add(weight);
            if candidate > radius {
                continue;
            }
            if candidate < distance[head as usize] {
                distance[head as usize] = candidate;
                heap.push(Reverse((candidate, head)));
            }
        }
    }

    distance
}

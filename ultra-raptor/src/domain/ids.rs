//! Dense integer identifiers.
//!
//! Stops, routes and transfer edges are identified by their rank in the
//! network tables. The newtypes keep the different index spaces apart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stop, identified by its dense rank in `[0, number_of_stops)`.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StopId(pub u32);

impl StopId {
    /// Returns the id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for StopId {
    fn from(index: usize) -> Self {
        StopId(index as u32)
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scientific route (all trips share one stop sequence).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl RouteId {
    /// Returns the id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for RouteId {
    fn from(index: usize) -> Self {
        RouteId(index as u32)
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An edge of the transfer graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Returns the id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vertex of the walking graph.
///
/// The first `number_of_stops` vertices are the stops themselves, so every
/// `StopId` converts losslessly into a `Vertex`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vertex(pub u32);

impl Vertex {
    /// Returns the id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<StopId> for Vertex {
    fn from(stop: StopId) -> Self {
        Vertex(stop.0)
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

/// Position of a stop inside a route's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next position along the route.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_rank() {
        assert_eq!(StopId(12).to_string(), "12");
        assert_eq!(RouteId(3).to_string(), "3");
        assert_eq!(EdgeId(0).to_string(), "0");
    }

    #[test]
    fn debug_names_the_index_space() {
        assert_eq!(format!("{:?}", StopId(4)), "StopId(4)");
        assert_eq!(format!("{:?}", Vertex(4)), "Vertex(4)");
    }

    #[test]
    fn stop_converts_to_same_vertex() {
        assert_eq!(Vertex::from(StopId(9)), Vertex(9));
        assert_eq!(StopId::from(9usize).index(), 9);
    }

    #[test]
    fn stop_index_next() {
        assert_eq!(StopIndex(2).next(), StopIndex(3));
    }
}

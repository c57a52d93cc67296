//! Insertion-ordered containers keyed by dense ids.
//!
//! Iteration order follows insertion order, never hashing, so repeated
//! queries visit stops and routes in the same order and break ties the
//! same way. Clearing is proportional to the number of inserted
//! elements, not to the id space.

use crate::domain::{RouteId, StopId, StopIndex};

const ABSENT: usize = usize::MAX;

/// Set of stops.
#[derive(Debug, Clone, Default)]
pub(super) struct StopSet {
    position: Vec<usize>,
    items: Vec<StopId>,
}

impl StopSet {
    pub(super) fn new(number_of_stops: usize) -> Self {
        Self {
            position: vec![ABSENT; number_of_stops],
            items: Vec::new(),
        }
    }

    /// Insert a stop, returning false if it was already present.
    pub(super) fn insert(&mut self, stop: StopId) -> bool {
        let slot = &mut self.position[stop.index()];
        if *slot != ABSENT {
            return false;
        }
        *slot = self.items.len();
        self.items.push(stop);
        true
    }

    pub(super) fn clear(&mut self) {
        for stop in self.items.drain(..) {
            self.position[stop.index()] = ABSENT;
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = StopId> + '_ {
        self.items.iter().copied()
    }
}

/// Map from route to the earliest position to start scanning it from.
#[derive(Debug, Clone, Default)]
pub(super) struct RouteStarts {
    position: Vec<usize>,
    items: Vec<(RouteId, StopIndex)>,
}

impl RouteStarts {
    pub(super) fn new(number_of_routes: usize) -> Self {
        Self {
            position: vec![ABSENT; number_of_routes],
            items: Vec::new(),
        }
    }

    /// Record `index` for `route`, keeping the minimum seen so far.
    pub(super) fn insert_min(&mut self, route: RouteId, index: StopIndex) {
        let slot = self.position[route.index()];
        if slot == ABSENT {
            self.position[route.index()] = self.items.len();
            self.items.push((route, index));
        } else if index < self.items[slot].1 {
            self.items[slot].1 = index;
        }
    }

    pub(super) fn clear(&mut self) {
        for (route, _) in self.items.drain(..) {
            self.position[route.index()] = ABSENT;
        }
    }

    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = (RouteId, StopIndex)> + '_ {
        self.items.iter().copied()
    }
}

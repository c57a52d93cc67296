//! Earliest-arrival public transit journey planner.
//!
//! Answers: "leaving stop A at time t, when is the earliest I can be at
//! stop B, and how do I get there?" The search is a round-based RAPTOR
//! whose first and last walking legs are answered by a pruned transfer
//! index instead of full walking-graph searches (ULTRA).

pub mod domain;
pub mod network;
pub mod raptor;
pub mod transfers;

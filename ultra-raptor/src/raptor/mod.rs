//! Round-based earliest-arrival planner (RAPTOR with ULTRA transfers).
//!
//! Round `k` finds the earliest arrival at every stop using at most `k`
//! vehicles. Each round collects the routes serving stops improved by the
//! previous round's walks, scans them once, and relaxes walking transfers
//! from the stops the scans improved. Walks leaving the source and walks
//! reaching the target come from a [`TransferIndex`](crate::transfers::TransferIndex)
//! instead of the transfer graph.
//!
//! After the last round the itinerary is rebuilt from per-round parent
//! pointers.

mod config;
mod indexed;
mod label;
mod observer;
mod reconstruct;
mod search;


pub use config::RaptorConfig;
pub use label::{Boarding, Label, Round};
pub use observer::{NoopObserver, SearchObserver, TracingObserver};
pub use search::Raptor;

//! Read-only transit network tables.
//!
//! `TransitData` holds the stops, the scientific routes with their trip
//! tables, the stop-to-route reverse index and the transfer graph used for
//! walking between rounds. It is assembled once through
//! [`TransitDataBuilder`], which checks the data contracts the planner
//! relies on, and is immutable afterwards.

mod data;
mod error;
mod route;
mod stop;
mod transfer_graph;

pub use data::{TransitData, TransitDataBuilder};
pub use error::NetworkError;
pub use route::{Route, RouteSegment, StopEvent};
pub use stop::{Coordinates, Stop};
pub use transfer_graph::{TransferEdge, TransferGraph};

//! Domain types for the journey planner.
//!
//! This module contains the value types shared by the network tables,
//! the transfer index and the planner. Validated types enforce their
//! invariants at construction time.

mod error;
mod ids;
mod journey;
mod leg;
mod time;

pub use error::DomainError;
pub use ids::{EdgeId, RouteId, StopId, StopIndex, Vertex};
pub use journey::Journey;
pub use leg::{Leg, LegKind};
pub use time::{Time, TimeError, format_duration};

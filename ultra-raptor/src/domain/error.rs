//! Domain error types.
//!
//! These errors represent validation failures of planner output types.
//! They are distinct from network-data contract violations.

use super::{StopId, Time};

/// Domain-level errors for leg and journey validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Leg times are not ordered start <= departure <= arrival
    #[error("inconsistent leg times: start {start}, departure {departure}, arrival {arrival}")]
    InconsistentLegTimes {
        start: Time,
        departure: Time,
        arrival: Time,
    },

    /// Consecutive legs don't share a stop
    #[error("legs are not connected: arrival at stop {0}, next departure from stop {1}")]
    LegsNotConnected(StopId, StopId),

    /// A leg does not start when the previous one arrives
    #[error("leg {0} does not start when the previous leg arrives")]
    LegsNotChronological(usize),

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,
}

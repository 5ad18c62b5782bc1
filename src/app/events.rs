//! Outbound application events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. The production adapter
//! renders them as the human-readable serial status stream; they are
//! observational only and not part of the data contract.

use crate::error::{RadioError, SensorError};
use crate::sensors::Sample;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeEvent {
    /// The service has started.
    Started,

    /// An operational cycle was triggered (tick threshold reached).
    CycleStarted { cycle: u64 },

    /// The sensor produced a valid reading this cycle.
    SampleTaken(Sample),

    /// The sensor read failed; the cycle aborts with no transmission.
    SampleFailed(SensorError),

    /// The packet was acknowledged by the gateway.
    Delivered { attempts: u8 },

    /// Delivery failed after the software retry budget.
    DeliveryFailed(RadioError),

    /// The node is about to re-enter deep sleep (always the last event of
    /// a wake, success or failure).
    EnteringSleep,
}

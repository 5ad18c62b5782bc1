//! System configuration parameters
//!
//! All tunable parameters for a node deployment. Values are build-time
//! constants for the node's lifetime; the serde derives define the
//! provisioning format used when flashing a deployment batch.

use serde::{Deserialize, Serialize};

/// Gateway RX pipe address (40-bit), shared by every node in a deployment.
pub const GATEWAY_PIPE: [u8; 5] = [0xAC, 0xAC, 0xAC, 0xAC, 0xAC];

/// nRF24 transmit power level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaLevel {
    Min,
    Low,
    High,
    Max,
}

/// Radio link parameters. Constant for the node's lifetime, but re-applied
/// every cycle: the radio is fully unpowered between cycles and loses its
/// register state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// RF channel (0–125).
    pub channel: u8,
    /// Destination (gateway) pipe address, 40-bit.
    pub dest_addr: [u8; 5],
    /// Transmit power level.
    pub pa_level: PaLevel,
    /// Hardware auto-retry delay in microseconds (multiple of 250).
    pub hw_retry_delay_us: u16,
    /// Hardware auto-retry count (0–15).
    pub hw_retry_count: u8,
    /// Software attempt ceiling per cycle.
    pub max_attempts: u8,
}

/// Core node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node identifier, unique per deployment (wire packet byte 0).
    pub node_id: u8,
    /// Watchdog tick period (milliseconds).
    pub tick_period_ms: u32,
    /// Number of watchdog ticks that make up one sleep interval.
    /// The effective duty cycle is `tick_period_ms * tick_threshold`.
    pub tick_threshold: u32,
    /// Radio link parameters.
    pub link: LinkConfig,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            channel: 76,
            dest_addr: GATEWAY_PIPE,
            pa_level: PaLevel::Low,
            hw_retry_delay_us: 1500,
            hw_retry_count: 5,
            max_attempts: 5,
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: 1,
            // 8 s is the longest watchdog period the sleep hardware offers;
            // one tick per wake keeps sleep current minimal.
            tick_period_ms: 8_000,
            tick_threshold: 1,
            link: LinkConfig::default(),
        }
    }
}

//! Port traits — the hexagonal boundary between domain logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (sensor driver, radio driver, sleep primitive, event
//! sinks) implement these traits. The
//! [`NodeService`](super::service::NodeService) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::config::PaLevel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the environmental sensor.
///
/// A reading of `NaN` is the defined failure signal (hardware fault or bus
/// timeout) — implementations must return `f32::NAN` rather than panic or
/// fabricate a value.
pub trait SensorPort {
    /// Temperature in degrees Celsius, or `NaN` on fault.
    fn read_temperature(&mut self) -> f32;

    /// Relative humidity in percent, or `NaN` on fault.
    fn read_humidity(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: domain → radio hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the nRF24L01+ radio.
///
/// The method set mirrors the radio driver's native surface so the
/// [`RadioLinkManager`](crate::link::RadioLinkManager) can replay the full
/// bring-up sequence each cycle.
pub trait RadioPort {
    /// Power up and probe the radio. `false` means the hardware did not
    /// respond — the cycle is skipped.
    fn begin(&mut self) -> bool;

    /// RF channel, 0–125.
    fn set_channel(&mut self, channel: u8);

    /// Transmit power level.
    fn set_pa_level(&mut self, level: PaLevel);

    /// Hardware auto-retransmit: delay between retries (µs, multiple of
    /// 250) and retry count (0–15). Distinct from the software retry loop.
    fn set_auto_retry(&mut self, delay_us: u16, count: u8);

    /// Destination (gateway) pipe address, 40-bit.
    fn open_writing_pipe(&mut self, addr: [u8; 5]);

    /// Transmit one payload. Returns `true` iff a hardware acknowledgment
    /// was received (after the radio's own auto-retries).
    fn write(&mut self, payload: &[u8]) -> bool;

    /// Remove radio power entirely. Register state is lost.
    fn power_down(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: domain → CPU sleep hardware)
// ───────────────────────────────────────────────────────────────

/// The sole suspension point in the system.
pub trait PowerPort {
    /// Flush diagnostics, drop into the lowest sleep mode still wakeable by
    /// the watchdog tick, and block until an interrupt fires. Implementations
    /// must disarm sleep mode again before returning.
    fn enter_deep_sleep(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostics)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`NodeEvent`](super::events::NodeEvent)s
/// through this port. Adapters decide where they go — the serial log in
/// production, a recording vec in tests.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::NodeEvent);
}

//! Radio link manager — per-cycle initialisation and bounded-retry delivery.
//!
//! The radio is fully unpowered between cycles to minimise sleep current,
//! so every cycle starts with a complete re-initialisation: `begin`,
//! channel, PA level, hardware auto-ack retry, writing pipe. Two retry
//! layers exist and must not be confused:
//!
//! * the radio's own auto-retransmit (short, fast, per `write()` call),
//!   configured via [`LinkConfig::hw_retry_delay_us`] / `hw_retry_count`;
//! * the software loop here, up to [`LinkConfig::max_attempts`] calls to
//!   `write()`, stopping on the first hardware acknowledgment.
//!
//! No software inter-attempt backoff is inserted — a deliberate
//! low-latency/low-power tradeoff for the current single-node-per-channel
//! deployments.

use log::{debug, warn};

use crate::app::ports::RadioPort;
use crate::config::LinkConfig;
use crate::error::RadioError;

/// Upper bound on software attempts; sizes the attempt record.
pub const MAX_ATTEMPTS_CAP: usize = 5;

/// Outcome of a delivered transmission: one entry per `write()` call,
/// `true` when the hardware ack arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitReport {
    pub attempts: heapless::Vec<bool, MAX_ATTEMPTS_CAP>,
}

impl TransmitReport {
    /// Number of `write()` calls made (the last one acked).
    pub fn attempts_used(&self) -> u8 {
        self.attempts.len() as u8
    }
}

/// Drives one radio cycle: bring-up, bounded-retry transmit, power-down.
pub struct RadioLinkManager {
    cfg: LinkConfig,
}

impl RadioLinkManager {
    pub fn new(cfg: LinkConfig) -> Self {
        Self { cfg }
    }

    /// Bring the radio up for this cycle and re-apply the full link
    /// configuration (lost at power-down).
    pub fn begin_cycle(&self, radio: &mut impl RadioPort) -> Result<(), RadioError> {
        if !radio.begin() {
            warn!("radio: begin() failed, skipping cycle");
            return Err(RadioError::InitFailed);
        }
        radio.set_channel(self.cfg.channel);
        radio.set_pa_level(self.cfg.pa_level);
        radio.set_auto_retry(self.cfg.hw_retry_delay_us, self.cfg.hw_retry_count);
        radio.open_writing_pipe(self.cfg.dest_addr);
        debug!(
            "radio: up on channel {} -> {:02X?}",
            self.cfg.channel, self.cfg.dest_addr
        );
        Ok(())
    }

    /// Attempt delivery of `payload`, stopping on the first hardware ack.
    ///
    /// Returns the per-attempt record on success, or
    /// [`RadioError::RetriesExhausted`] after `max_attempts` unacknowledged
    /// writes.
    pub fn transmit(
        &self,
        radio: &mut impl RadioPort,
        payload: &[u8],
    ) -> Result<TransmitReport, RadioError> {
        let max = (self.cfg.max_attempts as usize).clamp(1, MAX_ATTEMPTS_CAP);
        let mut attempts: heapless::Vec<bool, MAX_ATTEMPTS_CAP> = heapless::Vec::new();

        for n in 1..=max {
            let acked = radio.write(payload);
            let _ = attempts.push(acked);
            if acked {
                debug!("radio: ack on attempt {n}/{max}");
                return Ok(TransmitReport { attempts });
            }
            debug!("radio: no ack on attempt {n}/{max}");
        }

        warn!("radio: all {max} attempts unacknowledged");
        Err(RadioError::RetriesExhausted {
            attempts: attempts.len() as u8,
        })
    }

    /// Remove radio power at cycle end. Always called, success or failure.
    pub fn end_cycle(&self, radio: &mut impl RadioPort) {
        radio.power_down();
    }
}

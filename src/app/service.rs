//! Node service — the hexagonal core.
//!
//! [`NodeService`] owns the duty-cycle FSM, the cycle context, and the
//! radio link manager. It exposes a clean, hardware-agnostic API; all I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                 │        NodeService        │
//!   RadioPort ◀── │  FSM · Sampling · Link    │ ──▶ PowerPort
//!                 └───────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::NodeConfig;
use crate::error::{Error, RadioError};
use crate::fsm::context::CycleContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::link::{RadioLinkManager, TransmitReport};
use crate::packet::TelemetryPacket;
use crate::sensors;
use crate::ticks::WakeCycleCounter;

use super::events::NodeEvent;
use super::ports::{EventSink, PowerPort, RadioPort, SensorPort};

/// How the last operational cycle ended. Diagnostic only — outcomes are
/// never carried across cycles. Failures carry the unified
/// [`Error`] so every subsystem's faults surface through one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Delivered { attempts: u8 },
    Failed(Error),
}

/// The application service orchestrates one wake at a time.
pub struct NodeService<'a> {
    fsm: Fsm,
    ctx: CycleContext<'a>,
    link: RadioLinkManager,
    node_id: u8,
    last_outcome: Option<CycleOutcome>,
}

impl<'a> NodeService<'a> {
    /// Construct the service from configuration and the wake-cycle counter
    /// the watchdog ISR feeds.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: &NodeConfig, counter: &'a WakeCycleCounter) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Asleep),
            ctx: CycleContext::new(counter, config.tick_threshold),
            link: RadioLinkManager::new(config.link.clone()),
            node_id: config.node_id,
            last_outcome: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Asleep).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&NodeEvent::Started);
        info!("NodeService started, node_id={}", self.node_id);
    }

    // ── Per-wake orchestration ────────────────────────────────

    /// One full wake: poll the tick counter, run a cycle if the threshold
    /// was reached, then enter deep sleep **exactly once** — regardless of
    /// what the cycle did.
    ///
    /// The `hw` parameter satisfies both [`SensorPort`] and [`RadioPort`];
    /// both peripherals belong exclusively to the active cycle.
    pub fn run_wake(
        &mut self,
        hw: &mut (impl SensorPort + RadioPort),
        power: &mut impl PowerPort,
        sink: &mut impl EventSink,
    ) {
        let _ = self.poll(hw, sink);
        sink.emit(&NodeEvent::EnteringSleep);
        power.enter_deep_sleep();
    }

    /// Observe the counter and advance the FSM; runs the operational cycle
    /// when one is due. Returns `true` if a cycle ran.
    pub fn poll(
        &mut self,
        hw: &mut (impl SensorPort + RadioPort),
        sink: &mut impl EventSink,
    ) -> bool {
        self.ctx.pending_ticks = self.ctx.counter.pending();
        self.fsm.tick(&mut self.ctx);

        if !self.ctx.take_cycle_pending() {
            return false;
        }

        self.run_cycle(hw, sink);

        // Unconditional AwakeProcessing → Asleep, whatever the outcome.
        self.fsm.tick(&mut self.ctx);
        debug_assert_eq!(self.fsm.current_state(), StateId::Asleep);
        true
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Cycles triggered since startup.
    pub fn cycle_count(&self) -> u64 {
        self.ctx.cycles_started
    }

    /// Outcome of the most recent cycle, if any ran yet.
    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    // ── Internal ──────────────────────────────────────────────

    /// One operational cycle: sample → transmit → radio power-down.
    /// Every failure is handled here; nothing propagates past the cycle.
    fn run_cycle(&mut self, hw: &mut (impl SensorPort + RadioPort), sink: &mut impl EventSink) {
        sink.emit(&NodeEvent::CycleStarted {
            cycle: self.ctx.cycles_started,
        });

        // 1. Sample and validate. A NaN aborts before the radio is touched:
        //    zero transmission attempts, nothing on the air.
        let sample = match sensors::sample(hw) {
            Ok(s) => s,
            Err(e) => {
                warn!("cycle {}: sensor read failed: {e}", self.ctx.cycles_started);
                self.last_outcome = Some(CycleOutcome::Failed(e.into()));
                sink.emit(&NodeEvent::SampleFailed(e));
                return;
            }
        };
        sink.emit(&NodeEvent::SampleTaken(sample));

        // 2. Fresh packet for this cycle; discarded if undelivered.
        let packet = TelemetryPacket::new(self.node_id, sample.encode());

        // 3. Radio bring-up and bounded-retry delivery.
        let result = self.deliver(hw, &packet);

        // 4. Power-gate the radio before sleeping, success or failure.
        self.link.end_cycle(hw);

        match result {
            Ok(report) => {
                let attempts = report.attempts_used();
                info!(
                    "cycle {}: delivered in {attempts} attempt(s)",
                    self.ctx.cycles_started
                );
                self.last_outcome = Some(CycleOutcome::Delivered { attempts });
                sink.emit(&NodeEvent::Delivered { attempts });
            }
            Err(e) => {
                warn!("cycle {}: delivery failed: {e}", self.ctx.cycles_started);
                self.last_outcome = Some(CycleOutcome::Failed(e.into()));
                sink.emit(&NodeEvent::DeliveryFailed(e));
            }
        }
    }

    fn deliver(
        &mut self,
        hw: &mut impl RadioPort,
        packet: &TelemetryPacket,
    ) -> Result<TransmitReport, RadioError> {
        self.link.begin_cycle(hw)?;
        self.link.transmit(hw, &packet.to_bytes())
    }
}

//! Shared mutable context threaded through every FSM handler.
//!
//! `CycleContext` is the single struct that state handlers read from and
//! write to: the latest wake-tick snapshot, the configured threshold, and
//! the flag telling the service that an operational cycle must run.

use crate::ticks::WakeCycleCounter;

/// The shared context passed to every state handler function.
pub struct CycleContext<'a> {
    /// The wake-cycle counter (ISR-incremented). Handlers only ever reset it.
    pub counter: &'a WakeCycleCounter,
    /// Snapshot of `counter.pending()` taken by the service before each
    /// FSM tick, so one tick of the machine sees one coherent value.
    pub pending_ticks: u32,
    /// Ticks required to trigger a cycle (one or more ticks = one sleep
    /// interval).
    pub tick_threshold: u32,
    /// Set on entry to `AwakeProcessing`; consumed by the service, which
    /// then runs sample → transmit → power-down.
    pub cycle_pending: bool,
    /// Total operational cycles triggered since boot.
    pub cycles_started: u64,
}

impl<'a> CycleContext<'a> {
    pub fn new(counter: &'a WakeCycleCounter, tick_threshold: u32) -> Self {
        Self {
            counter,
            pending_ticks: 0,
            tick_threshold,
            cycle_pending: false,
            cycles_started: 0,
        }
    }

    /// Consume the cycle-pending flag, returning whether it was set.
    pub fn take_cycle_pending(&mut self) -> bool {
        core::mem::take(&mut self.cycle_pending)
    }
}

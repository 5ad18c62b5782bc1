//! Wake-cycle counter shared between the watchdog tick ISR and the main flow.
//!
//! The counter is the only state crossing the interrupt boundary. The ISR
//! performs a single atomic increment and returns — no other work is
//! permitted in tick context. The main flow reads and resets it between
//! operational cycles.
//!
//! Happens-before: the `Release` increment in the ISR pairs with the
//! `Acquire` load in [`WakeCycleCounter::pending`], so a tick observed by
//! the main flow is fully ordered before the cycle it triggers. On targets
//! without a native atomic RMW the increment/reset pair must instead be
//! wrapped in interrupt masking; every ESP32 variant has one.

use core::sync::atomic::{AtomicU32, Ordering};

/// Counter of watchdog ticks since the last cycle. Never decremented except
/// by an explicit [`reset`](WakeCycleCounter::reset) to zero.
pub struct WakeCycleCounter(AtomicU32);

/// Global instance incremented by the watchdog tick callback
/// (see `drivers::watchdog`).
pub static WAKE_TICKS: WakeCycleCounter = WakeCycleCounter::new();

impl WakeCycleCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Record one tick. Safe to call from ISR/timer-callback context.
    /// Increments by exactly one per call.
    pub fn increment_from_isr(&self) {
        self.0.fetch_add(1, Ordering::Release);
    }

    /// Ticks accumulated since the last reset.
    pub fn pending(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }

    /// Reset to zero. Called exactly once per triggered cycle, before the
    /// cycle runs, so ticks arriving mid-cycle count toward the next one.
    pub fn reset(&self) {
        self.0.store(0, Ordering::Release);
    }
}

impl Default for WakeCycleCounter {
    fn default() -> Self {
        Self::new()
    }
}

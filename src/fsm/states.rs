//! Concrete state handler functions and table builder.
//!
//! Two states only. The node spends its life in `Asleep`; a wake where the
//! tick threshold has been reached passes through `AwakeProcessing` for one
//! sample-and-transmit cycle and drops straight back.

use super::context::CycleContext;
use super::{StateDescriptor, StateId};
use log::{debug, info};

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Asleep
        StateDescriptor {
            id: StateId::Asleep,
            name: "Asleep",
            on_enter: Some(asleep_enter),
            on_exit: None,
            on_update: asleep_update,
        },
        // Index 1 — AwakeProcessing
        StateDescriptor {
            id: StateId::AwakeProcessing,
            name: "AwakeProcessing",
            on_enter: Some(awake_enter),
            on_exit: None,
            on_update: awake_update,
        },
    ]
}

// ───────────────────────────────────────────────────────────────
//  ASLEEP
// ───────────────────────────────────────────────────────────────

fn asleep_enter(_ctx: &mut CycleContext<'_>) {
    debug!("ASLEEP: peripherals gated, waiting for watchdog ticks");
}

fn asleep_update(ctx: &mut CycleContext<'_>) -> Option<StateId> {
    if ctx.pending_ticks >= ctx.tick_threshold {
        return Some(StateId::AwakeProcessing);
    }
    None
}

// ───────────────────────────────────────────────────────────────
//  AWAKE_PROCESSING
// ───────────────────────────────────────────────────────────────

fn awake_enter(ctx: &mut CycleContext<'_>) {
    // Reset-before-run: ticks that land while the cycle is processing
    // count toward the next cycle, never the current one.
    ctx.counter.reset();
    ctx.pending_ticks = 0;
    ctx.cycle_pending = true;
    ctx.cycles_started += 1;
    info!("AWAKE: cycle #{} triggered", ctx.cycles_started);
}

fn awake_update(_ctx: &mut CycleContext<'_>) -> Option<StateId> {
    // Unconditional: sampling or transmission failures never keep the node
    // out of low power.
    Some(StateId::Asleep)
}

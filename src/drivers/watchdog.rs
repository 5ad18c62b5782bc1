//! Watchdog tick timer.
//!
//! A periodic hardware timer stands in for an external watchdog: its
//! callback runs in ISR-adjacent context and does nothing but bump the
//! global [`WAKE_TICKS`](crate::ticks::WAKE_TICKS) counter. The main loop
//! observes the counter after each wake and decides whether a full
//! operational cycle is due.
//!
//! On the host this is a no-op shim; tests drive the counter directly.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

use crate::ticks::WAKE_TICKS;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// Clear any stale reset/interrupt cause left over from the previous boot
/// so the first wake is not misread as a pending tick. Called once in
/// `main()` before the timer starts.
#[cfg(target_os = "espidf")]
pub fn clear_stale_reset_flag() {
    // SAFETY: esp_reset_reason() and esp_sleep_get_wakeup_cause() are
    // read-only queries of boot ROM state.
    let reset = unsafe { esp_reset_reason() };
    let wakeup = unsafe { esp_sleep_get_wakeup_cause() };
    info!("boot: reset_reason={reset} wakeup_cause={wakeup}");
    WAKE_TICKS.reset();
}

#[cfg(not(target_os = "espidf"))]
pub fn clear_stale_reset_flag() {
    WAKE_TICKS.reset();
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn on_tick(_arg: *mut core::ffi::c_void) {
    // Timer callback context: keep it to one atomic increment.
    WAKE_TICKS.increment_from_isr();
}

/// Start the periodic tick timer with the given period.
///
/// Returns `false` if the timer could not be created or armed; the caller
/// logs and carries on — a node with no ticks simply never cycles, which
/// is observable on the serial stream.
#[cfg(target_os = "espidf")]
pub fn start(period_ms: u32) -> bool {
    let args = esp_timer_create_args_t {
        callback: Some(on_tick),
        arg: core::ptr::null_mut(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: c"wake_tick".as_ptr(),
        skip_unhandled_events: true,
    };

    // SAFETY: TICK_TIMER is written once here, before the wake loop starts.
    let ret = unsafe { esp_timer_create(&args, &raw mut TICK_TIMER) };
    if ret != ESP_OK as i32 {
        return false;
    }
    let ret = unsafe { esp_timer_start_periodic(TICK_TIMER, u64::from(period_ms) * 1_000) };
    if ret != ESP_OK as i32 {
        return false;
    }

    info!("watchdog: tick timer armed, period {period_ms} ms");
    true
}

#[cfg(not(target_os = "espidf"))]
pub fn start(period_ms: u32) -> bool {
    info!("watchdog(sim): tick timer armed, period {period_ms} ms");
    true
}

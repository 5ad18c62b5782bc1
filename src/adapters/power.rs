//! Sleep adapter: the node's single suspension point.
//!
//! Uses timer-wakeable light sleep rather than full deep sleep: the ESP32
//! deep-sleep path resets the CPU on wake, which would discard the FSM and
//! force a full reboot every cycle. Light sleep preserves RAM and resumes
//! execution after the sleeping call, at tens of microamps — the dominant
//! power cost is the radio, which is hard-gated per cycle anyway.
//!
//! Brown-out detection during the sleep window: the ESP32 has no direct
//! "BOD off" call; the detector sits in the RTC peripheral power domain,
//! and it keeps drawing current through sleep only while that domain stays
//! powered. Gating `ESP_PD_DOMAIN_RTC_PERIPH` below is therefore how this
//! platform removes the detector's sleep draw; the domain (and with it
//! brown-out protection) comes back automatically on wake.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::debug;

use crate::app::ports::PowerPort;

pub struct SleepAdapter {
    sleep_duration_us: u64,
}

impl SleepAdapter {
    /// `tick_period_ms` bounds each suspension: the node must be awake to
    /// observe the counter at least once per watchdog tick.
    pub fn new(tick_period_ms: u32) -> Self {
        Self {
            sleep_duration_us: u64::from(tick_period_ms) * 1_000,
        }
    }
}

#[cfg(target_os = "espidf")]
impl PowerPort for SleepAdapter {
    fn enter_deep_sleep(&mut self) {
        // SAFETY: plain ESP-IDF sleep API calls from the main task.
        unsafe {
            // Let the UART drain so the last status lines are not cut off
            // mid-character when the APB clock gates.
            uart_wait_tx_done(0, 100);

            // Gate the RTC peripheral domain for the sleep window. This is
            // what powers down the brown-out detector (it lives in this
            // domain and otherwise keeps drawing current while asleep);
            // the domain is restored automatically on wake.
            esp_sleep_pd_config(
                esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_PERIPH,
                esp_sleep_pd_option_t_ESP_PD_OPTION_OFF,
            );

            esp_sleep_enable_timer_wakeup(self.sleep_duration_us);
            esp_light_sleep_start();

            // Re-disarm so a later sleep entry states its own wakeup.
            esp_sleep_disable_wakeup_source(esp_sleep_source_t_ESP_SLEEP_WAKEUP_TIMER);
        }
        debug!("woke from light sleep");
    }
}

#[cfg(not(target_os = "espidf"))]
impl PowerPort for SleepAdapter {
    fn enter_deep_sleep(&mut self) {
        debug!(
            "sim: sleeping {} ms",
            self.sleep_duration_us / 1_000
        );
        std::thread::sleep(std::time::Duration::from_millis(
            // Scaled down so a host run still duty-cycles visibly.
            (self.sleep_duration_us / 1_000).min(50),
        ));
    }
}

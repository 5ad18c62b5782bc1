//! Firmware entry point for the SETU sensor node.
//!
//! Boot sequence: logger, stale-reset-flag clear, peripheral init,
//! watchdog tick timer, then the service loop. The loop never exits:
//! each iteration is one wake (poll, maybe cycle, sleep).

use anyhow::Result;
use log::{error, info};

use setu_node::adapters::{HardwareAdapter, LogEventSink, SleepAdapter};
use setu_node::app::service::NodeService;
use setu_node::config::NodeConfig;
use setu_node::drivers::{hw_init, watchdog};
use setu_node::ticks;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let config = NodeConfig::default();
    info!("SETU node v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "node_id={} tick={} ms threshold={}",
        config.node_id, config.tick_period_ms, config.tick_threshold
    );

    // ── 2. Hardware bring-up ──────────────────────────────────
    watchdog::clear_stale_reset_flag();

    // A field node must keep its serial stream alive for diagnosis, so
    // bring-up failures are logged and the loop runs regardless.
    if let Err(e) = hw_init::init_peripherals() {
        error!("peripheral init failed: {e}");
    }
    if !watchdog::start(config.tick_period_ms) {
        error!("tick timer failed to start; node will idle");
    }

    // ── 3. Adapters + service loop ────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut power = SleepAdapter::new(config.tick_period_ms);
    let mut sink = LogEventSink;

    let mut service = NodeService::new(&config, &ticks::WAKE_TICKS);
    service.start(&mut sink);

    loop {
        service.run_wake(&mut hw, &mut power, &mut sink);
    }
}

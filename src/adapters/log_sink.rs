//! Event sink that renders node events on the serial log stream.
//!
//! This is the node's only human-facing output in the field: a technician
//! with a UART clip can follow the duty cycle line by line.

use log::{info, warn};

use crate::app::events::NodeEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &NodeEvent) {
        match event {
            NodeEvent::Started => info!("node up"),
            NodeEvent::CycleStarted { cycle } => info!("--- cycle {cycle} ---"),
            NodeEvent::SampleTaken(s) => {
                info!("sample: {:.2} C, {:.2} %RH", s.temperature_c, s.humidity_pct);
            }
            NodeEvent::SampleFailed(e) => warn!("sample failed: {e}"),
            NodeEvent::Delivered { attempts } => info!("delivered ({attempts} attempt(s))"),
            NodeEvent::DeliveryFailed(e) => warn!("delivery failed: {e}"),
            NodeEvent::EnteringSleep => info!("sleeping"),
        }
    }
}

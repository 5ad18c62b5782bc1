//! Mock hardware for integration tests.
//!
//! Records every radio call so tests can assert on the full command
//! history, and exposes settable sensor values (including NaN faults)
//! plus a scripted ack sequence for the radio.

use setu_node::app::events::NodeEvent;
use setu_node::app::ports::{EventSink, PowerPort, RadioPort, SensorPort};
use setu_node::config::PaLevel;

// ── Radio call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RadioCall {
    Begin,
    SetChannel(u8),
    SetPaLevel(PaLevel),
    SetAutoRetry { delay_us: u16, count: u8 },
    OpenWritingPipe([u8; 5]),
    Write(Vec<u8>),
    PowerDown,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub temperature: f32,
    pub humidity: f32,
    /// Result of each successive `write()`; writes past the end fail.
    pub ack_script: Vec<bool>,
    /// `false` makes `begin()` report a dead radio.
    pub radio_responds: bool,
    pub calls: Vec<RadioCall>,
    writes_seen: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            temperature: 23.45,
            humidity: 60.12,
            ack_script: vec![true],
            radio_responds: true,
            calls: Vec::new(),
            writes_seen: 0,
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes_seen
    }

    /// Payload of the i-th write, if it happened.
    pub fn written_payload(&self, i: usize) -> Option<&[u8]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RadioCall::Write(p) => Some(p.as_slice()),
                _ => None,
            })
            .nth(i)
    }

    /// True if the last radio call of the history is a power-down.
    pub fn powered_down_last(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find(|c| !matches!(c, RadioCall::Write(_)))
            .is_some_and(|c| *c == RadioCall::PowerDown)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_temperature(&mut self) -> f32 {
        self.temperature
    }

    fn read_humidity(&mut self) -> f32 {
        self.humidity
    }
}

impl RadioPort for MockHardware {
    fn begin(&mut self) -> bool {
        self.calls.push(RadioCall::Begin);
        self.radio_responds
    }

    fn set_channel(&mut self, channel: u8) {
        self.calls.push(RadioCall::SetChannel(channel));
    }

    fn set_pa_level(&mut self, level: PaLevel) {
        self.calls.push(RadioCall::SetPaLevel(level));
    }

    fn set_auto_retry(&mut self, delay_us: u16, count: u8) {
        self.calls.push(RadioCall::SetAutoRetry { delay_us, count });
    }

    fn open_writing_pipe(&mut self, addr: [u8; 5]) {
        self.calls.push(RadioCall::OpenWritingPipe(addr));
    }

    fn write(&mut self, payload: &[u8]) -> bool {
        self.calls.push(RadioCall::Write(payload.to_vec()));
        let acked = self.ack_script.get(self.writes_seen).copied().unwrap_or(false);
        self.writes_seen += 1;
        acked
    }

    fn power_down(&mut self) {
        self.calls.push(RadioCall::PowerDown);
    }
}

// ── MockPower ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPower {
    pub sleep_entries: u32,
}

impl MockPower {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PowerPort for MockPower {
    fn enter_deep_sleep(&mut self) {
        self.sleep_entries += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<NodeEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &NodeEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &NodeEvent) {
        self.events.push(*event);
    }
}

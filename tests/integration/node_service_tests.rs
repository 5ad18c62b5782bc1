//! End-to-end duty-cycle behaviour through the `NodeService`, driven
//! entirely through mock adapters.

use setu_node::app::events::NodeEvent;
use setu_node::app::service::{CycleOutcome, NodeService};
use setu_node::config::{GATEWAY_PIPE, NodeConfig};
use setu_node::error::{Error, RadioError, SensorError};
use setu_node::fsm::StateId;
use setu_node::packet::TelemetryPacket;
use setu_node::ticks::WakeCycleCounter;

use crate::mock_hw::{MockHardware, MockPower, RadioCall, RecordingSink};

fn setup(counter: &WakeCycleCounter) -> NodeService<'_> {
    let mut svc = NodeService::new(&NodeConfig::default(), counter);
    svc.start(&mut RecordingSink::new());
    svc
}

#[test]
fn idle_wake_sleeps_without_touching_the_radio() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    let mut power = MockPower::new();
    let mut sink = RecordingSink::new();

    svc.run_wake(&mut hw, &mut power, &mut sink);

    assert_eq!(power.sleep_entries, 1);
    assert!(hw.calls.is_empty(), "no radio traffic on an idle wake");
    assert_eq!(sink.events, vec![NodeEvent::EnteringSleep]);
}

#[test]
fn successful_cycle_transmits_one_packet_and_sleeps_once() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    let mut power = MockPower::new();
    let mut sink = RecordingSink::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut sink);

    assert_eq!(power.sleep_entries, 1);
    assert_eq!(hw.write_count(), 1);
    assert_eq!(svc.last_outcome(), Some(CycleOutcome::Delivered { attempts: 1 }));
    assert_eq!(svc.state(), StateId::Asleep);
    assert!(sink.contains(&NodeEvent::Delivered { attempts: 1 }));
    assert_eq!(sink.events.last(), Some(&NodeEvent::EnteringSleep));
}

#[test]
fn wire_payload_matches_the_packet_layout() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    hw.temperature = 23.45;
    hw.humidity = 60.12;
    let mut power = MockPower::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());

    let payload = hw.written_payload(0).expect("one write");
    assert_eq!(payload.len(), 6);
    let packet = TelemetryPacket::from_bytes(payload.try_into().unwrap()).expect("valid frame");
    assert_eq!(packet.node_id, 1);
    assert_eq!(packet.temp_centi, 2345);
    assert_eq!(packet.hum_centi, 6012);
}

#[test]
fn cycle_reapplies_link_config_and_powers_down() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    let mut power = MockPower::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());

    // Full bring-up precedes the write; power-down closes the cycle.
    assert_eq!(hw.calls[0], RadioCall::Begin);
    assert!(hw.calls.contains(&RadioCall::SetChannel(76)));
    assert!(hw.calls.contains(&RadioCall::OpenWritingPipe(GATEWAY_PIPE)));
    assert!(
        hw.calls.contains(&RadioCall::SetAutoRetry { delay_us: 1500, count: 5 }),
        "hardware auto-retry must be re-armed each cycle"
    );
    assert_eq!(hw.calls.last(), Some(&RadioCall::PowerDown));
}

#[test]
fn nan_reading_aborts_before_any_radio_traffic() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    hw.temperature = f32::NAN;
    let mut power = MockPower::new();
    let mut sink = RecordingSink::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut sink);

    assert_eq!(hw.write_count(), 0, "garbage must never reach the air");
    assert!(hw.calls.is_empty(), "radio untouched on a sensor fault");
    assert_eq!(svc.last_outcome(), Some(CycleOutcome::Failed(Error::Sensor(SensorError::NotANumber))));
    assert!(sink.contains(&NodeEvent::SampleFailed(SensorError::NotANumber)));
    assert_eq!(power.sleep_entries, 1, "a failed cycle still sleeps exactly once");
}

#[test]
fn unacked_writes_stop_at_five_attempts() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    hw.ack_script = vec![false; 10];
    let mut power = MockPower::new();
    let mut sink = RecordingSink::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut sink);

    assert_eq!(hw.write_count(), 5);
    assert_eq!(
        svc.last_outcome(),
        Some(CycleOutcome::Failed(Error::Radio(RadioError::RetriesExhausted { attempts: 5 })))
    );
    assert!(sink.contains(&NodeEvent::DeliveryFailed(
        RadioError::RetriesExhausted { attempts: 5 }
    )));
    assert_eq!(hw.calls.last(), Some(&RadioCall::PowerDown));
    assert_eq!(power.sleep_entries, 1);
}

#[test]
fn late_ack_stops_the_retry_loop() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    hw.ack_script = vec![false, false, true];
    let mut power = MockPower::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());

    assert_eq!(hw.write_count(), 3);
    assert_eq!(svc.last_outcome(), Some(CycleOutcome::Delivered { attempts: 3 }));
}

#[test]
fn dead_radio_skips_transmission_but_still_powers_down_and_sleeps() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    hw.radio_responds = false;
    let mut power = MockPower::new();
    let mut sink = RecordingSink::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut sink);

    assert_eq!(hw.write_count(), 0);
    assert_eq!(
        svc.last_outcome(),
        Some(CycleOutcome::Failed(Error::Radio(RadioError::InitFailed)))
    );
    assert_eq!(hw.calls.last(), Some(&RadioCall::PowerDown));
    assert_eq!(power.sleep_entries, 1);
}

#[test]
fn counter_resets_so_each_interval_yields_one_cycle() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut power = MockPower::new();

    // Three intervals, one tick each (default threshold is 1).
    for expected in 1..=3u64 {
        counter.increment_from_isr();
        let mut hw = MockHardware::new();
        svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());
        assert_eq!(svc.cycle_count(), expected);
        assert_eq!(hw.write_count(), 1);
    }
    assert_eq!(power.sleep_entries, 3);

    // No new tick: next wake is idle.
    let mut hw = MockHardware::new();
    svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());
    assert_eq!(svc.cycle_count(), 3);
    assert_eq!(hw.write_count(), 0);
}

#[test]
fn threshold_above_one_accumulates_ticks_across_wakes() {
    let counter = WakeCycleCounter::new();
    let mut config = NodeConfig::default();
    config.tick_threshold = 3;
    let mut svc = NodeService::new(&config, &counter);
    svc.start(&mut RecordingSink::new());
    let mut power = MockPower::new();

    for _ in 0..2 {
        counter.increment_from_isr();
        let mut hw = MockHardware::new();
        svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());
        assert_eq!(hw.write_count(), 0, "below threshold, no cycle");
    }

    counter.increment_from_isr();
    let mut hw = MockHardware::new();
    svc.run_wake(&mut hw, &mut power, &mut RecordingSink::new());
    assert_eq!(hw.write_count(), 1);
    assert_eq!(svc.cycle_count(), 1);
}

#[test]
fn event_order_for_a_successful_cycle() {
    let counter = WakeCycleCounter::new();
    let mut svc = setup(&counter);
    let mut hw = MockHardware::new();
    let mut power = MockPower::new();
    let mut sink = RecordingSink::new();

    counter.increment_from_isr();
    svc.run_wake(&mut hw, &mut power, &mut sink);

    let kinds: Vec<&NodeEvent> = sink.events.iter().collect();
    assert!(matches!(kinds[0], NodeEvent::CycleStarted { cycle: 1 }));
    assert!(matches!(kinds[1], NodeEvent::SampleTaken(_)));
    assert!(matches!(kinds[2], NodeEvent::Delivered { attempts: 1 }));
    assert!(matches!(kinds[3], NodeEvent::EnteringSleep));
}

//! Application core — pure domain logic, zero I/O.
//!
//! Duty-cycle orchestration for the node: FSM, sampling, and bounded-retry
//! delivery. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;

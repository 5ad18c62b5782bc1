//! SETU sensor node firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod link;
pub mod packet;
pub mod sensors;
pub mod ticks;

mod pins;

// Hardware-facing modules; the real implementations are guarded by cfg
// attributes inside, with simulation stubs for host builds.
pub mod adapters;
pub mod drivers;

//! Peripheral drivers and one-shot hardware initialisation.

pub mod dht22;
pub mod hw_init;
pub mod nrf24;
pub mod watchdog;

//! Hardware adapter: DHT22 sensor + nRF24 radio behind the port traits.
//!
//! The DHT22 delivers temperature and humidity in one bus transaction, but
//! [`SensorPort`] exposes them as two reads. The adapter performs the
//! transaction on `read_temperature()` and caches the humidity half for
//! the `read_humidity()` call that follows within the same cycle.

use log::warn;

use crate::app::ports::{RadioPort, SensorPort};
use crate::config::PaLevel;
use crate::drivers::{dht22, nrf24::Nrf24};

pub struct HardwareAdapter {
    radio: Nrf24,
    cached_humidity: f32,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            radio: Nrf24::new(),
            cached_humidity: f32::NAN,
        }
    }
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for HardwareAdapter {
    fn read_temperature(&mut self) -> f32 {
        match dht22::read() {
            Ok(reading) => {
                self.cached_humidity = reading.humidity_pct;
                reading.temperature_c
            }
            Err(e) => {
                warn!("dht22: {e}");
                self.cached_humidity = f32::NAN;
                f32::NAN
            }
        }
    }

    fn read_humidity(&mut self) -> f32 {
        self.cached_humidity
    }
}

impl RadioPort for HardwareAdapter {
    fn begin(&mut self) -> bool {
        self.radio.begin()
    }

    fn set_channel(&mut self, channel: u8) {
        self.radio.set_channel(channel);
    }

    fn set_pa_level(&mut self, level: PaLevel) {
        self.radio.set_pa_level(level);
    }

    fn set_auto_retry(&mut self, delay_us: u16, count: u8) {
        self.radio.set_auto_retry(delay_us, count);
    }

    fn open_writing_pipe(&mut self, addr: [u8; 5]) {
        self.radio.open_writing_pipe(addr);
    }

    fn write(&mut self, payload: &[u8]) -> bool {
        self.radio.write(payload)
    }

    fn power_down(&mut self) {
        self.radio.power_down();
    }
}

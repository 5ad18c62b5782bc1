//! DHT22 (AM2302) temperature/humidity sensor, single-wire bit-bang.
//!
//! One transaction yields both measurands, so callers should read once per
//! cycle and reuse the pair. Timing is done against `esp_timer_get_time()`
//! with busy-wait polling; the whole transaction is under 6 ms.
//!
//! Host builds return injectable simulated readings (`sim_set_reading`).

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init::{gpio_read, gpio_write};
#[cfg(target_os = "espidf")]
use crate::pins;

/// One complete sensor transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dht22Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

// ── Target build: bit-bang protocol ───────────────────────────

#[cfg(target_os = "espidf")]
mod proto {
    use esp_idf_svc::sys::{esp_timer_get_time, vTaskDelay};

    use super::*;

    /// Longest we wait for any single line edge, in microseconds.
    const EDGE_TIMEOUT_US: i64 = 120;

    fn now_us() -> i64 {
        // SAFETY: monotonic microsecond clock, always safe to query.
        unsafe { esp_timer_get_time() }
    }

    /// Busy-wait until the data line reaches `level`. Returns the wait in
    /// microseconds, or `None` on timeout.
    fn wait_for_level(level: bool) -> Option<i64> {
        let start = now_us();
        while gpio_read(pins::DHT_DATA_GPIO) != level {
            if now_us() - start > EDGE_TIMEOUT_US {
                return None;
            }
        }
        Some(now_us() - start)
    }

    pub fn read() -> Result<Dht22Reading, SensorError> {
        // Host start signal: pull low >1 ms, then release.
        gpio_write(pins::DHT_DATA_GPIO, false);
        // SAFETY: FreeRTOS delay; 2 ticks >= 2 ms at the default tick rate.
        unsafe { vTaskDelay(2) };
        gpio_write(pins::DHT_DATA_GPIO, true);

        // Sensor response: ~80 µs low then ~80 µs high, then 40 data bits.
        wait_for_level(false).ok_or(SensorError::BusTimeout)?;
        wait_for_level(true).ok_or(SensorError::BusTimeout)?;
        wait_for_level(false).ok_or(SensorError::BusTimeout)?;

        let mut bytes = [0u8; 5];
        for bit in 0..40 {
            // Each bit: 50 µs low preamble, then high for 26-28 µs (0) or
            // ~70 µs (1). Discriminate on the high-pulse width.
            wait_for_level(true).ok_or(SensorError::BusTimeout)?;
            let high_us = wait_for_level(false).ok_or(SensorError::BusTimeout)?;
            if high_us > 48 {
                bytes[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }

        decode(&bytes)
    }
}

/// Decode the 5-byte DHT22 frame: humidity (u16, tenths), temperature
/// (u16, tenths, sign in bit 15), checksum.
#[cfg_attr(not(test), allow(dead_code))]
fn decode(bytes: &[u8; 5]) -> Result<Dht22Reading, SensorError> {
    let sum = bytes[0]
        .wrapping_add(bytes[1])
        .wrapping_add(bytes[2])
        .wrapping_add(bytes[3]);
    if sum != bytes[4] {
        return Err(SensorError::BusTimeout);
    }

    let raw_hum = u16::from_be_bytes([bytes[0], bytes[1]]);
    let raw_temp = u16::from_be_bytes([bytes[2], bytes[3]]);

    let humidity_pct = f32::from(raw_hum) / 10.0;
    let temp_magnitude = f32::from(raw_temp & 0x7FFF) / 10.0;
    let temperature_c = if raw_temp & 0x8000 != 0 {
        -temp_magnitude
    } else {
        temp_magnitude
    };

    Ok(Dht22Reading {
        temperature_c,
        humidity_pct,
    })
}

#[cfg(target_os = "espidf")]
pub fn read() -> Result<Dht22Reading, SensorError> {
    proto::read()
}

// ── Host build: injectable simulation ─────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

    // Centi-units in atomics; i32::MIN marks "reading is NaN".
    pub(super) static TEMP_CENTI: AtomicI32 = AtomicI32::new(2150);
    pub(super) static HUM_CENTI: AtomicI32 = AtomicI32::new(4800);
    pub(super) static BUS_FAULT: AtomicBool = AtomicBool::new(false);

    pub(super) const NAN_MARKER: i32 = i32::MIN;

    pub(super) fn load(cell: &AtomicI32) -> f32 {
        let raw = cell.load(Ordering::Relaxed);
        if raw == NAN_MARKER {
            f32::NAN
        } else {
            raw as f32 / 100.0
        }
    }
}

/// Inject the reading the simulated sensor will return. `NaN` values are
/// preserved (a faulted sensor is part of what the tests exercise).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_reading(temperature_c: f32, humidity_pct: f32) {
    use core::sync::atomic::Ordering;

    let encode = |v: f32| {
        if v.is_nan() {
            sim::NAN_MARKER
        } else {
            (v * 100.0) as i32
        }
    };
    sim::TEMP_CENTI.store(encode(temperature_c), Ordering::Relaxed);
    sim::HUM_CENTI.store(encode(humidity_pct), Ordering::Relaxed);
}

/// Make the simulated sensor fail its next reads with a bus timeout.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_bus_fault(faulted: bool) {
    sim::BUS_FAULT.store(faulted, core::sync::atomic::Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn read() -> Result<Dht22Reading, SensorError> {
    use core::sync::atomic::Ordering;

    if sim::BUS_FAULT.load(Ordering::Relaxed) {
        return Err(SensorError::BusTimeout);
    }
    Ok(Dht22Reading {
        temperature_c: sim::load(&sim::TEMP_CENTI),
        humidity_pct: sim::load(&sim::HUM_CENTI),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(hum_tenths: u16, temp_tenths: u16) -> [u8; 5] {
        let [h0, h1] = hum_tenths.to_be_bytes();
        let [t0, t1] = temp_tenths.to_be_bytes();
        let sum = h0.wrapping_add(h1).wrapping_add(t0).wrapping_add(t1);
        [h0, h1, t0, t1, sum]
    }

    #[test]
    fn decodes_positive_reading() {
        let r = decode(&frame(652, 351)).unwrap();
        assert!((r.humidity_pct - 65.2).abs() < 0.01);
        assert!((r.temperature_c - 35.1).abs() < 0.01);
    }

    #[test]
    fn decodes_negative_temperature() {
        let r = decode(&frame(400, 0x8000 | 105)).unwrap();
        assert!((r.temperature_c - (-10.5)).abs() < 0.01);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut f = frame(500, 250);
        f[4] = f[4].wrapping_add(1);
        assert_eq!(decode(&f), Err(SensorError::BusTimeout));
    }
}

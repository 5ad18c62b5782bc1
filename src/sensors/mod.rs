//! Sensor sampling module.
//!
//! One environmental sensor (temperature + relative humidity), read through
//! [`SensorPort`] and validated before anything touches the radio: a NaN in
//! either channel aborts the cycle so garbage or partial data is never
//! transmitted.
//!
//! Values travel on the wire as signed fixed-point, ×100 — two decimal
//! digits of precision without floating point in the packet.

use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// A validated point-in-time reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity, percent.
    pub humidity_pct: f32,
}

/// Fixed-point form of a [`Sample`], ready for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedSample {
    pub temp_centi: i16,
    pub hum_centi: i16,
}

impl Sample {
    /// Convert to wire fixed-point: multiply by 100, truncate toward zero.
    /// Readings beyond the i16 range saturate; the sensor's physical range
    /// (−40–80 °C, 0–100 %RH) sits far inside it.
    pub fn encode(&self) -> EncodedSample {
        EncodedSample {
            temp_centi: centi(self.temperature_c),
            hum_centi: centi(self.humidity_pct),
        }
    }
}

fn centi(value: f32) -> i16 {
    let scaled = value * 100.0;
    if scaled >= i16::MAX as f32 {
        i16::MAX
    } else if scaled <= i16::MIN as f32 {
        i16::MIN
    } else {
        scaled as i16 // `as` truncates toward zero
    }
}

/// Read and validate one sample.
///
/// Fails with [`SensorError::NotANumber`] if either reading is NaN
/// (hardware fault or bus timeout); the caller must then abort the cycle
/// without attempting transmission.
pub fn sample(port: &mut impl SensorPort) -> Result<Sample, SensorError> {
    let temperature_c = port.read_temperature();
    let humidity_pct = port.read_humidity();

    if temperature_c.is_nan() || humidity_pct.is_nan() {
        return Err(SensorError::NotANumber);
    }

    Ok(Sample {
        temperature_c,
        humidity_pct,
    })
}

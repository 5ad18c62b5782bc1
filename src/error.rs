//! Unified error types for the node firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! duty-cycle controller's error handling uniform. All variants are `Copy`
//! so they can be passed through the cycle logic without allocation.
//!
//! Propagation policy: every runtime error is handled within the current
//! operational cycle and surfaces in the cycle outcome. Nothing here
//! terminates the long-run sleep/wake schedule — a failed cycle still ends
//! in exactly one sleep entry.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type:
/// boot-time bring-up through [`Error::Init`], per-cycle failures through
/// the sensor and radio variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The environmental sensor could not produce a valid reading.
    Sensor(SensorError),
    /// The radio link failed to initialise or deliver.
    Radio(RadioError),
    /// Boot-time peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Radio(e) => write!(f, "radio: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Temperature or humidity read back as NaN (hardware fault or bus
    /// timeout). The cycle aborts; garbage is never transmitted.
    NotANumber,
    /// The single-wire bus did not answer within the protocol window.
    BusTimeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "reading is not a number"),
            Self::BusTimeout => write!(f, "sensor bus timeout"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Radio errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// The radio did not respond to per-cycle initialisation.
    InitFailed,
    /// Every software transmission attempt went unacknowledged.
    /// Carries the number of attempts actually made.
    RetriesExhausted { attempts: u8 },
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "hardware init failed"),
            Self::RetriesExhausted { attempts } => {
                write!(f, "no ack after {attempts} attempts")
            }
        }
    }
}

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

// ---------------------------------------------------------------------------
// Boot-time peripheral errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation (see
/// `drivers::hw_init`). Return codes are raw ESP-IDF `esp_err_t` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    SpiBusInitFailed(i32),
    SpiDeviceAddFailed(i32),
    GpioConfigFailed(i32),
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiBusInitFailed(rc) => write!(f, "SPI bus init failed (rc={})", rc),
            Self::SpiDeviceAddFailed(rc) => write!(f, "SPI device add failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystem_errors_funnel_into_their_variants() {
        assert_eq!(
            Error::from(SensorError::NotANumber),
            Error::Sensor(SensorError::NotANumber)
        );
        assert_eq!(
            Error::from(RadioError::RetriesExhausted { attempts: 5 }),
            Error::Radio(RadioError::RetriesExhausted { attempts: 5 })
        );
        assert_eq!(
            Error::from(HwInitError::SpiBusInitFailed(-1)),
            Error::Init(HwInitError::SpiBusInitFailed(-1))
        );
    }

    #[test]
    fn display_prefixes_the_subsystem() {
        let e = Error::from(RadioError::RetriesExhausted { attempts: 5 });
        assert_eq!(e.to_string(), "radio: no ack after 5 attempts");

        let e = Error::from(SensorError::BusTimeout);
        assert_eq!(e.to_string(), "sensor: sensor bus timeout");

        let e = Error::from(HwInitError::GpioConfigFailed(263));
        assert_eq!(e.to_string(), "init: GPIO config failed (rc=263)");
    }
}

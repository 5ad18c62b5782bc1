//! Production adapters binding port traits to real peripherals.
//!
//! | Adapter             | Port(s)                  | Backing           |
//! |---------------------|--------------------------|-------------------|
//! | [`HardwareAdapter`] | `SensorPort`, `RadioPort`| DHT22 + nRF24     |
//! | [`SleepAdapter`]    | `PowerPort`              | ESP light sleep   |
//! | [`LogEventSink`]    | `EventSink`              | serial log stream |

pub mod hardware;
pub mod log_sink;
pub mod power;

pub use hardware::HardwareAdapter;
pub use log_sink::LogEventSink;
pub use power::SleepAdapter;

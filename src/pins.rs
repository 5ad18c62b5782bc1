//! GPIO / peripheral pin assignments for the SETU node board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// nRF24L01+ radio (SPI2)
// ---------------------------------------------------------------------------

pub const SPI_SCLK_GPIO: i32 = 18;
pub const SPI_MOSI_GPIO: i32 = 23;
pub const SPI_MISO_GPIO: i32 = 19;
/// Chip select, handled by the SPI driver.
pub const NRF_CSN_GPIO: i32 = 21;
/// Chip enable — pulsed high to start a transmission.
pub const NRF_CE_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// DHT22 environmental sensor
// ---------------------------------------------------------------------------

/// Single-wire data line (external 10 kΩ pull-up).
pub const DHT_DATA_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// UART diagnostics
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 1;
pub const UART_RX_GPIO: i32 = 3;

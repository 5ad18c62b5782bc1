//! nRF24L01+ radio, register-level SPI driver.
//!
//! Minimal TX-only command set: per-cycle configuration, a blocking
//! `write()` that waits for the hardware ack outcome, and power-down.
//! The radio has no state worth preserving between cycles — every
//! register is rewritten on `begin()` after each power-up.
//!
//! Host builds simulate the air interface; tests script ack behaviour
//! through `sim_set_ack_pattern`.

use crate::config::PaLevel;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init::{gpio_write, spi_transfer};
#[cfg(target_os = "espidf")]
use crate::pins;

// SPI command set (nRF24L01+ datasheet §8.3.1).
const CMD_R_REGISTER: u8 = 0x00;
const CMD_W_REGISTER: u8 = 0x20;
const CMD_W_TX_PAYLOAD: u8 = 0xA0;
const CMD_FLUSH_TX: u8 = 0xE1;
const CMD_NOP: u8 = 0xFF;

// Register map.
const REG_CONFIG: u8 = 0x00;
const REG_EN_AA: u8 = 0x01;
const REG_SETUP_RETR: u8 = 0x04;
const REG_RF_CH: u8 = 0x05;
const REG_RF_SETUP: u8 = 0x06;
const REG_STATUS: u8 = 0x07;
const REG_RX_ADDR_P0: u8 = 0x0A;
const REG_TX_ADDR: u8 = 0x10;

// CONFIG bits.
const CONFIG_EN_CRC: u8 = 0x08;
const CONFIG_CRCO_2BYTE: u8 = 0x04;
const CONFIG_PWR_UP: u8 = 0x02;

// STATUS bits.
const STATUS_TX_DS: u8 = 0x20;
const STATUS_MAX_RT: u8 = 0x10;

/// TX-mode CONFIG value: powered up, 2-byte CRC, PRIM_RX clear.
const CONFIG_TX_MODE: u8 = CONFIG_EN_CRC | CONFIG_CRCO_2BYTE | CONFIG_PWR_UP;

fn pa_level_bits(level: PaLevel) -> u8 {
    // RF_SETUP RF_PWR field (bits 2:1), 1 Mbps data rate.
    match level {
        PaLevel::Min => 0x00,
        PaLevel::Low => 0x02,
        PaLevel::High => 0x04,
        PaLevel::Max => 0x06,
    }
}

/// Driver handle. Owns no bus resources; SPI and CE come from `hw_init`.
pub struct Nrf24 {
    powered: bool,
}

impl Nrf24 {
    pub const fn new() -> Self {
        Self { powered: false }
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }
}

impl Default for Nrf24 {
    fn default() -> Self {
        Self::new()
    }
}

// ── Target build ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl Nrf24 {
    fn write_register(&mut self, reg: u8, value: u8) -> bool {
        let mut buf = [CMD_W_REGISTER | (reg & 0x1F), value];
        spi_transfer(&mut buf)
    }

    fn write_register_bytes(&mut self, reg: u8, value: &[u8; 5]) -> bool {
        let mut buf = [0u8; 6];
        buf[0] = CMD_W_REGISTER | (reg & 0x1F);
        buf[1..].copy_from_slice(value);
        spi_transfer(&mut buf)
    }

    fn read_register(&mut self, reg: u8) -> u8 {
        let mut buf = [CMD_R_REGISTER | (reg & 0x1F), CMD_NOP];
        let _ = spi_transfer(&mut buf);
        buf[1]
    }

    fn status(&mut self) -> u8 {
        let mut buf = [CMD_NOP];
        let _ = spi_transfer(&mut buf);
        buf[0]
    }

    fn flush_tx(&mut self) {
        let mut buf = [CMD_FLUSH_TX];
        let _ = spi_transfer(&mut buf);
    }

    /// Power up and verify the radio answers on the bus. Verification reads
    /// back RF_CH after writing it — an absent or dead radio reads 0x00 or
    /// 0xFF for everything.
    pub fn begin(&mut self) -> bool {
        gpio_write(pins::NRF_CE_GPIO, false);

        if !self.write_register(REG_CONFIG, CONFIG_TX_MODE) {
            return false;
        }
        // Tpd2stby: 1.5 ms max from power-down to standby.
        // SAFETY: FreeRTOS delay, 2 ticks.
        unsafe { esp_idf_svc::sys::vTaskDelay(2) };

        // Probe with a throwaway channel value.
        if !self.write_register(REG_RF_CH, 0x4C) {
            return false;
        }
        if self.read_register(REG_RF_CH) != 0x4C {
            return false;
        }

        // Enhanced ShockBurst auto-ack on pipe 0.
        let _ = self.write_register(REG_EN_AA, 0x01);
        self.flush_tx();
        let _ = self.write_register(REG_STATUS, STATUS_TX_DS | STATUS_MAX_RT);

        self.powered = true;
        true
    }

    pub fn set_channel(&mut self, channel: u8) {
        let _ = self.write_register(REG_RF_CH, channel & 0x7F);
    }

    pub fn set_pa_level(&mut self, level: PaLevel) {
        let _ = self.write_register(REG_RF_SETUP, pa_level_bits(level));
    }

    pub fn set_auto_retry(&mut self, delay_us: u16, count: u8) {
        // SETUP_RETR: ARD in 250 µs steps (bits 7:4), ARC (bits 3:0).
        let ard = ((delay_us / 250).saturating_sub(1) as u8).min(0x0F);
        let arc = count.min(0x0F);
        let _ = self.write_register(REG_SETUP_RETR, (ard << 4) | arc);
    }

    pub fn open_writing_pipe(&mut self, addr: [u8; 5]) {
        let _ = self.write_register_bytes(REG_TX_ADDR, &addr);
        // Pipe 0 must mirror TX_ADDR to receive the ack.
        let _ = self.write_register_bytes(REG_RX_ADDR_P0, &addr);
    }

    /// Transmit one payload and block until the hardware reports either an
    /// ack (TX_DS) or auto-retry exhaustion (MAX_RT). Returns `true` only
    /// on ack.
    pub fn write(&mut self, payload: &[u8]) -> bool {
        let mut buf = [0u8; 33];
        buf[0] = CMD_W_TX_PAYLOAD;
        let n = payload.len().min(32);
        buf[1..=n].copy_from_slice(&payload[..n]);
        if !spi_transfer(&mut buf[..=n]) {
            return false;
        }

        // CE pulse >10 µs starts the transmission.
        gpio_write(pins::NRF_CE_GPIO, true);
        // SAFETY: busy-wait on the microsecond clock.
        let start = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        while unsafe { esp_idf_svc::sys::esp_timer_get_time() } - start < 15 {}
        gpio_write(pins::NRF_CE_GPIO, false);

        // Worst case on air: 15 retries at max ARD is still well under
        // 100 ms; anything longer means the bus itself wedged.
        loop {
            let status = self.status();
            if status & STATUS_TX_DS != 0 {
                let _ = self.write_register(REG_STATUS, STATUS_TX_DS);
                return true;
            }
            if status & STATUS_MAX_RT != 0 {
                let _ = self.write_register(REG_STATUS, STATUS_MAX_RT);
                self.flush_tx();
                return false;
            }
            if unsafe { esp_idf_svc::sys::esp_timer_get_time() } - start > 100_000 {
                self.flush_tx();
                return false;
            }
        }
    }

    /// Drop to power-down mode (~900 nA). Register state is lost; the next
    /// cycle starts from `begin()` again.
    pub fn power_down(&mut self) {
        gpio_write(pins::NRF_CE_GPIO, false);
        let _ = self.write_register(REG_CONFIG, CONFIG_TX_MODE & !CONFIG_PWR_UP);
        self.powered = false;
    }
}

// ── Host build: scripted air interface ────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

    /// Bit i of the pattern = outcome of the i-th write since injection
    /// (1 = acked). Writes past bit 31 repeat the last bit.
    pub(super) static ACK_PATTERN: AtomicU32 = AtomicU32::new(u32::MAX);
    pub(super) static WRITE_COUNT: AtomicU8 = AtomicU8::new(0);
    pub(super) static BEGIN_FAILS: AtomicBool = AtomicBool::new(false);

    pub(super) fn next_write_acked() -> bool {
        let i = WRITE_COUNT.fetch_add(1, Ordering::Relaxed).min(31);
        ACK_PATTERN.load(Ordering::Relaxed) & (1 << i) != 0
    }
}

/// Script the outcome of upcoming simulated writes: bit i of `pattern` is
/// the ack result of the i-th `write()` call. Resets the write counter.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ack_pattern(pattern: u32) {
    use core::sync::atomic::Ordering;
    sim::ACK_PATTERN.store(pattern, Ordering::Relaxed);
    sim::WRITE_COUNT.store(0, Ordering::Relaxed);
}

/// Make subsequent simulated `begin()` calls fail.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_begin_fails(fails: bool) {
    sim::BEGIN_FAILS.store(fails, core::sync::atomic::Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
impl Nrf24 {
    pub fn begin(&mut self) -> bool {
        if sim::BEGIN_FAILS.load(core::sync::atomic::Ordering::Relaxed) {
            return false;
        }
        self.powered = true;
        true
    }

    pub fn set_channel(&mut self, _channel: u8) {}

    pub fn set_pa_level(&mut self, _level: PaLevel) {}

    pub fn set_auto_retry(&mut self, _delay_us: u16, _count: u8) {}

    pub fn open_writing_pipe(&mut self, _addr: [u8; 5]) {}

    pub fn write(&mut self, _payload: &[u8]) -> bool {
        self.powered && sim::next_write_acked()
    }

    pub fn power_down(&mut self) {
        self.powered = false;
    }
}

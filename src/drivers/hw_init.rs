//! One-shot hardware peripheral initialization.
//!
//! Configures the SPI bus for the radio and the GPIO lines for the radio
//! CE pin and the sensor data line, using raw ESP-IDF sys calls. Called
//! once from `main()` before the sleep/wake loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
use crate::error::HwInitError;
use crate::error::Result;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the wake loop; single-threaded.
    unsafe {
        init_gpio()?;
        init_spi()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<()> {
    // Radio CE: push-pull output, idle low (radio in standby).
    let ce_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::NRF_CE_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&ce_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret).into());
    }
    unsafe { gpio_set_level(pins::NRF_CE_GPIO, 0) };

    // DHT22 data: open-drain in/out, idle high via the external pull-up.
    let dht_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT_DATA_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&dht_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret).into());
    }
    unsafe { gpio_set_level(pins::DHT_DATA_GPIO, 1) };

    info!("hw_init: GPIO configured (CE={}, DHT={})", pins::NRF_CE_GPIO, pins::DHT_DATA_GPIO);
    Ok(())
}

/// Drive a GPIO output (no-op if the pin was never configured).
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin direction configured in init_gpio(); level writes are
    // atomic at the register level.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// Read a GPIO input level.
#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: reads have no side effects on configured pins.
    unsafe { gpio_get_level(pin) != 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── SPI (radio) ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut NRF_SPI: spi_device_handle_t = core::ptr::null_mut();

/// SAFETY: NRF_SPI is written once in `init_spi()` before the wake loop
/// starts; all later access is from the single main-loop context.
#[cfg(target_os = "espidf")]
unsafe fn nrf_spi() -> spi_device_handle_t {
    unsafe { NRF_SPI }
}

#[cfg(target_os = "espidf")]
unsafe fn init_spi() -> Result<()> {
    let mut bus_cfg = spi_bus_config_t::default();
    bus_cfg.__bindgen_anon_1.mosi_io_num = pins::SPI_MOSI_GPIO;
    bus_cfg.__bindgen_anon_2.miso_io_num = pins::SPI_MISO_GPIO;
    bus_cfg.sclk_io_num = pins::SPI_SCLK_GPIO;
    bus_cfg.__bindgen_anon_3.quadwp_io_num = -1;
    bus_cfg.__bindgen_anon_4.quadhd_io_num = -1;
    bus_cfg.max_transfer_sz = 64;

    let ret = unsafe {
        spi_bus_initialize(spi_host_device_t_SPI2_HOST, &bus_cfg, spi_common_dma_t_SPI_DMA_CH_AUTO)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SpiBusInitFailed(ret).into());
    }

    let dev_cfg = spi_device_interface_config_t {
        // nRF24L01+ tops out at 10 MHz; 8 MHz leaves margin on long leads.
        clock_speed_hz: 8_000_000,
        mode: 0,
        spics_io_num: pins::NRF_CSN_GPIO,
        queue_size: 1,
        ..Default::default()
    };

    // SAFETY: NRF_SPI is only written here, once at boot.
    let ret = unsafe { spi_bus_add_device(spi_host_device_t_SPI2_HOST, &dev_cfg, &raw mut NRF_SPI) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SpiDeviceAddFailed(ret).into());
    }

    info!("hw_init: SPI2 configured for nRF24 (8 MHz, CSN={})", pins::NRF_CSN_GPIO);
    Ok(())
}

/// Full-duplex SPI transfer, in place: `buf` is transmitted and overwritten
/// with the received bytes. Returns `false` on bus error.
#[cfg(target_os = "espidf")]
pub fn spi_transfer(buf: &mut [u8]) -> bool {
    let mut t = spi_transaction_t::default();
    t.length = buf.len() * 8;
    t.__bindgen_anon_1.tx_buffer = buf.as_ptr().cast();
    t.__bindgen_anon_2.rx_buffer = buf.as_mut_ptr().cast();

    // SAFETY: nrf_spi() contract — handle written once at init, accessed
    // only from the main-loop context; buffers outlive the blocking call.
    let ret = unsafe { spi_device_transmit(nrf_spi(), &mut t) };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn spi_transfer(_buf: &mut [u8]) -> bool {
    true
}

//! One-shot GPIO configuration and raw pin access.
//!
//! Wraps the ESP-IDF sys calls the board needs: push-pull outputs for the LED
//! banks and wake line, rising-edge inputs for the buttons, the per-pin ISR
//! service, and GPIO-level wake from light sleep.  Off target every function
//! is a logging no-op so the rest of the crate runs in simulation.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during peripheral configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrAttachFailed(i32),
    SleepFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrAttachFailed(rc)  => write!(f, "GPIO ISR attach failed (rc={})", rc),
            Self::SleepFailed(rc)      => write!(f, "light sleep failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

// ── GPIO Outputs ──────────────────────────────────────────────

/// Configure `pin` as a push-pull output driven low.
#[cfg(target_os = "espidf")]
pub fn init_output(pin: u8) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: gpio_config reads the config struct only; main-task context.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    unsafe { gpio_set_level(i32::from(pin), 0) };
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_output(pin: u8) -> Result<(), HwInitError> {
    log::debug!("hw_init(sim): output {} configured", pin);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: u8, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Main-loop only.
    unsafe { gpio_set_level(i32::from(pin), u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: u8, _high: bool) {}

/// Return `pin` to its reset state (input, no pulls).
#[cfg(target_os = "espidf")]
pub fn reset_pin(pin: u8) {
    // SAFETY: gpio_reset_pin only touches the named pin's registers.
    unsafe { gpio_reset_pin(i32::from(pin)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn reset_pin(pin: u8) {
    log::debug!("hw_init(sim): pin {} reset", pin);
}

// ── GPIO Inputs ───────────────────────────────────────────────

/// Configure `pin` as a pulled-down input interrupting on rising edges.
#[cfg(target_os = "espidf")]
pub fn init_rising_input(pin: u8) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_POSEDGE,
    };
    // SAFETY: gpio_config reads the config struct only; main-task context.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_rising_input(pin: u8) -> Result<(), HwInitError> {
    log::debug!("hw_init(sim): input {} configured", pin);
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn edge_isr(arg: *mut core::ffi::c_void) {
    // The handler argument carries the pin number, not a pointer.
    let pin = arg as usize as u8;
    crate::events::EDGE_LATCH.record(pin, crate::events::EDGE_RISE);
}

/// Install the per-pin GPIO ISR service.
#[cfg(target_os = "espidf")]
pub fn install_isr_service() -> Result<(), HwInitError> {
    // SAFETY: ESP_ERR_INVALID_STATE means the service is already installed,
    // which is acceptable.
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    info!("hw_init: ISR service installed");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn install_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

/// Route rising edges on `pin` into the global edge latch.
#[cfg(target_os = "espidf")]
pub fn attach_edge_isr(pin: u8) -> Result<(), HwInitError> {
    // SAFETY: edge_isr only performs an atomic fetch_or on a static.
    unsafe {
        let ret = gpio_isr_handler_add(i32::from(pin), Some(edge_isr), usize::from(pin) as *mut core::ffi::c_void);
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrAttachFailed(ret)); }
        gpio_intr_enable(i32::from(pin));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn attach_edge_isr(pin: u8) -> Result<(), HwInitError> {
    log::debug!("hw_init(sim): edge ISR on pin {} skipped", pin);
    Ok(())
}

// ── Light sleep ───────────────────────────────────────────────

/// Light-sleep until any of `pins` goes high.
///
/// GPIO wake needs level triggering, so each pin is switched to high-level
/// wake for the duration of the sleep and back to rising-edge interrupts
/// afterwards.
#[cfg(target_os = "espidf")]
pub fn light_sleep_until_edge(pins: &[u8]) -> Result<(), HwInitError> {
    // SAFETY: plain ESP-IDF GPIO/sleep API calls on pins configured by
    // init_rising_input; RAM and GPIO state are retained across light sleep.
    unsafe {
        for &pin in pins {
            let ret = gpio_wakeup_enable(i32::from(pin), gpio_int_type_t_GPIO_INTR_HIGH_LEVEL);
            if ret != ESP_OK as i32 { return Err(HwInitError::SleepFailed(ret)); }
        }
        let ret = esp_sleep_enable_gpio_wakeup();
        let slept = if ret == ESP_OK as i32 { esp_light_sleep_start() } else { ret };
        for &pin in pins {
            gpio_wakeup_disable(i32::from(pin));
            gpio_set_intr_type(i32::from(pin), gpio_int_type_t_GPIO_INTR_POSEDGE);
        }
        if slept != ESP_OK as i32 { return Err(HwInitError::SleepFailed(slept)); }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn light_sleep_until_edge(pins: &[u8]) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): light sleep on {:?} skipped", pins);
    Ok(())
}

//! Raw ESP-IDF GPIO as a [`BinaryOutput`].

use log::warn;

use crate::app::ports::BinaryOutput;
use crate::drivers::hw_init;

/// One push-pull output pin, active high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioOutput {
    pin: u8,
}

impl GpioOutput {
    pub const fn new(pin: u8) -> Self {
        Self { pin }
    }

    pub const fn pin(&self) -> u8 {
        self.pin
    }
}

impl BinaryOutput for GpioOutput {
    fn initiate(&mut self) {
        if let Err(e) = hw_init::init_output(self.pin) {
            warn!("GPIO {}: {}", self.pin, e);
        }
    }

    fn disable(&mut self) {
        hw_init::reset_pin(self.pin);
    }

    fn set_on(&mut self) {
        hw_init::gpio_write(self.pin, true);
    }

    fn set_off(&mut self) {
        hw_init::gpio_write(self.pin, false);
    }
}

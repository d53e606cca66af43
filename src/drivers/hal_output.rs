//! Any `embedded-hal` output pin as a [`BinaryOutput`].
//!
//! Lets the calculator run on a HAL-owned pin (an `esp-idf-hal`
//! `PinDriver`, an I/O expander line, a test double) instead of a raw GPIO
//! number.  Pin errors are logged and swallowed: a stuck LED must not stop
//! the UI.

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::app::ports::BinaryOutput;

pub struct HalOutput<P: OutputPin> {
    pin: P,
    label: &'static str,
}

impl<P: OutputPin> HalOutput<P> {
    pub fn new(pin: P, label: &'static str) -> Self {
        Self { pin, label }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn check(&self, op: &str, result: Result<(), P::Error>) {
        if let Err(e) = result {
            warn!("{}: {} failed ({:?})", self.label, op, e.kind());
        }
    }
}

impl<P: OutputPin> BinaryOutput for HalOutput<P> {
    fn initiate(&mut self) {
        let r = self.pin.set_low();
        self.check("initiate", r);
    }

    fn disable(&mut self) {
        let r = self.pin.set_low();
        self.check("disable", r);
    }

    fn set_on(&mut self) {
        let r = self.pin.set_high();
        self.check("set_on", r);
    }

    fn set_off(&mut self) {
        let r = self.pin.set_low();
        self.check("set_off", r);
    }
}

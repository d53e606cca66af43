//! LED banks for the calculator display.
//!
//! | Bank     | Width | Shows                                   |
//! |----------|-------|-----------------------------------------|
//! | lhs      | 3     | left operand                            |
//! | rhs      | 3     | right operand                           |
//! | result   | 6     | result, or all-on/all-off flashing      |
//! | operator | 2     | operator ordinal                        |
//!
//! Each LED is an [`OutputPinController`], so a bank releases its pins when
//! dropped.

use crate::app::ports::{BinaryOutput, CalcDisplay};
use crate::drivers::gpio_output::GpioOutput;
use crate::output_pin::OutputPinController;
use crate::pins;

// ── Bank ──────────────────────────────────────────────────────

/// `W` LEDs showing a `W`-bit value, least significant bit first.
pub struct LedBank<O: BinaryOutput, const W: usize> {
    leds: [OutputPinController<O>; W],
}

impl<O: BinaryOutput, const W: usize> LedBank<O, W> {
    pub fn new(outputs: [O; W]) -> Self {
        const { assert!(W <= 8, "a bank shows at most one byte") }
        Self { leds: outputs.map(OutputPinController::new) }
    }

    /// Light exactly the LEDs whose bit is set.  Bits above `W` are ignored.
    pub fn show(&mut self, bits: u8) {
        for (i, led) in self.leds.iter_mut().enumerate() {
            led.set((bits >> i) & 1 == 1);
        }
    }

    pub fn blank(&mut self) {
        for led in &mut self.leds {
            led.turn_off();
        }
    }

    /// Value currently lit.
    pub fn bits(&self) -> u8 {
        self.leds
            .iter()
            .enumerate()
            .fold(0, |acc, (i, led)| acc | (u8::from(led.is_on()) << i))
    }

    pub fn leds(&self) -> &[OutputPinController<O>; W] {
        &self.leds
    }
}

// ── Display ───────────────────────────────────────────────────

/// The outputs behind each bank, least significant bit first.
pub struct DisplayOutputs<O> {
    pub lhs: [O; 3],
    pub rhs: [O; 3],
    pub result: [O; 6],
    pub operator: [O; 2],
}

impl DisplayOutputs<GpioOutput> {
    /// The board's LED pins from [`crate::pins`].
    pub fn board() -> Self {
        Self {
            lhs: pins::LHS_LED_GPIOS.map(GpioOutput::new),
            rhs: pins::RHS_LED_GPIOS.map(GpioOutput::new),
            result: pins::RESULT_LED_GPIOS.map(GpioOutput::new),
            operator: pins::OPERATOR_LED_GPIOS.map(GpioOutput::new),
        }
    }
}

pub struct LedDisplay<O: BinaryOutput> {
    lhs: LedBank<O, 3>,
    rhs: LedBank<O, 3>,
    result: LedBank<O, 6>,
    operator: LedBank<O, 2>,
    no_result: bool,
    flash_lit: bool,
}

impl<O: BinaryOutput> LedDisplay<O> {
    pub fn new(outputs: DisplayOutputs<O>) -> Self {
        Self {
            lhs: LedBank::new(outputs.lhs),
            rhs: LedBank::new(outputs.rhs),
            result: LedBank::new(outputs.result),
            operator: LedBank::new(outputs.operator),
            no_result: false,
            flash_lit: false,
        }
    }

    /// The last push was "no result"; the result bank should flash.
    pub const fn no_result(&self) -> bool {
        self.no_result
    }

    /// Alternate the result bank between all-on and all-off.
    pub fn flash_toggle(&mut self) {
        self.flash_lit = !self.flash_lit;
        self.result.show(if self.flash_lit { u8::MAX } else { 0 });
    }

    /// Blank every bank.
    pub fn sleep_all(&mut self) {
        self.lhs.blank();
        self.rhs.blank();
        self.result.blank();
        self.operator.blank();
        self.flash_lit = false;
    }

    pub fn lhs_bits(&self) -> u8 {
        self.lhs.bits()
    }

    pub fn rhs_bits(&self) -> u8 {
        self.rhs.bits()
    }

    pub fn result_bits(&self) -> u8 {
        self.result.bits()
    }

    pub fn operator_bits(&self) -> u8 {
        self.operator.bits()
    }

    pub fn result_bank(&self) -> &LedBank<O, 6> {
        &self.result
    }
}

impl<O: BinaryOutput> CalcDisplay for LedDisplay<O> {
    fn set_lhs(&mut self, bits: u8) {
        self.lhs.show(bits);
    }

    fn set_rhs(&mut self, bits: u8) {
        self.rhs.show(bits);
    }

    fn set_result(&mut self, bits: u8) {
        self.no_result = false;
        self.flash_lit = false;
        self.result.show(bits);
    }

    fn set_no_result(&mut self) {
        self.no_result = true;
    }

    fn set_operator(&mut self, bits: u8) {
        self.operator.show(bits);
    }
}

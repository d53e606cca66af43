//! Scoped ownership of one binary output.
//!
//! [`OutputPinController`] calls `initiate()` when it is built and, on drop
//! or [`release`](OutputPinController::release), drives the line off (if on)
//! and calls `disable()` exactly once.  Moving the controller moves that
//! obligation with it.
//!
//! As a [`GpioAction`] it toggles on trigger and turns off on sleep.

use log::debug;

use crate::app::ports::BinaryOutput;
use crate::registry::GpioAction;

pub struct OutputPinController<O: BinaryOutput> {
    output: O,
    is_on: bool,
    initiated: bool,
}

impl<O: BinaryOutput> OutputPinController<O> {
    /// Take ownership of `output` and initiate it.  The line starts off.
    pub fn new(mut output: O) -> Self {
        output.initiate();
        Self { output, is_on: false, initiated: true }
    }

    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    pub const fn is_initiated(&self) -> bool {
        self.initiated
    }

    /// Flip the line.
    pub fn trigger(&mut self) {
        self.is_on = !self.is_on;
        if self.is_on {
            self.output.set_on();
        } else {
            self.output.set_off();
        }
    }

    pub fn turn_off(&mut self) {
        if self.is_on {
            self.output.set_off();
            self.is_on = false;
        }
    }

    /// Only acts while the line is already on, and then drives it off
    /// without clearing `is_on`.  Use [`trigger`](Self::trigger) or
    /// [`set`](Self::set) to switch a line on.
    pub fn turn_on(&mut self) {
        if self.is_on {
            self.output.set_off();
            self.is_on = true;
        }
    }

    /// Drive the line to `on`, toggling only on a change.
    pub fn set(&mut self, on: bool) {
        if self.is_on != on {
            self.trigger();
        }
    }

    /// Turn off and disable now.  Later calls, and the eventual drop, do
    /// nothing.
    pub fn release(&mut self) {
        if self.initiated {
            self.turn_off();
            self.output.disable();
            self.initiated = false;
            debug!("output: released");
        }
    }

    /// Access the wrapped output, e.g. to inspect a mock in tests.
    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: BinaryOutput> Drop for OutputPinController<O> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<O: BinaryOutput, C: ?Sized> GpioAction<C> for OutputPinController<O> {
    fn trigger(&mut self, _ctx: &mut C) {
        OutputPinController::trigger(self);
    }

    fn on_sleep(&mut self, _ctx: &mut C) {
        self.turn_off();
    }

    fn on_wake(&mut self, _ctx: &mut C) {}
}

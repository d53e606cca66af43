//! Port traits: the boundary between the calculator core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Registry / Calculator UI / Device
//! ```
//!
//! Drivers implement these traits; the core consumes them via generics, so
//! every state machine in the crate runs on the host against recording mocks.

use embassy_time::Instant;

// ───────────────────────────────────────────────────────────────
// Binary output port (domain → one hardware line)
// ───────────────────────────────────────────────────────────────

/// One on/off hardware output with an explicit acquire/release lifecycle.
///
/// Owned through [`OutputPinController`](crate::output_pin::OutputPinController),
/// which guarantees `initiate` is paired with exactly one `disable`.
pub trait BinaryOutput {
    /// Claim and configure the line.
    fn initiate(&mut self);

    /// Release the line.
    fn disable(&mut self);

    /// Drive the line to its active level.
    fn set_on(&mut self);

    /// Drive the line to its inactive level.
    fn set_off(&mut self);
}

impl<T: BinaryOutput + ?Sized> BinaryOutput for &mut T {
    fn initiate(&mut self) {
        (**self).initiate();
    }

    fn disable(&mut self) {
        (**self).disable();
    }

    fn set_on(&mut self) {
        (**self).set_on();
    }

    fn set_off(&mut self) {
        (**self).set_off();
    }
}

// ───────────────────────────────────────────────────────────────
// Display sink (calculator UI → LEDs)
// ───────────────────────────────────────────────────────────────

/// Push-only sink for calculator state.  No failure mode.
pub trait CalcDisplay {
    fn set_lhs(&mut self, bits: u8);

    fn set_rhs(&mut self, bits: u8);

    /// Show a computed result.  Mutually exclusive with `set_no_result`
    /// for any single push.
    fn set_result(&mut self, bits: u8);

    /// The current operator has no result for these operands.
    fn set_no_result(&mut self);

    fn set_operator(&mut self, bits: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

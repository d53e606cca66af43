//! Button-driven calculator UI.
//!
//! Three states, advanced by the rotate button:
//!
//! ```text
//!   OperandLo ──rotate──▶ OperandHi ──rotate──▶ OpSelect ──rotate──▶ OperandLo
//!   (swap lhs/rhs on leaving OperandLo)
//! ```
//!
//! In either operand state the bit buttons flip bits of `rhs`; in `OpSelect`
//! buttons 0 and 1 flip bits of the two-bit operator selector.  Every change
//! is pushed straight to a [`CalcDisplay`].

use log::debug;

use super::{Calculator, Operator};
use crate::app::ports::CalcDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    OperandLo,
    OperandHi,
    OpSelect,
}

impl UiState {
    pub const fn next(self) -> Self {
        match self {
            Self::OperandLo => Self::OperandHi,
            Self::OperandHi => Self::OpSelect,
            Self::OpSelect => Self::OperandLo,
        }
    }
}

/// UI state for a `BITS`-wide calculator.  The calculator itself is passed in
/// by reference on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculatorUi<const BITS: u32> {
    state: UiState,
}

impl<const BITS: u32> CalculatorUi<BITS> {
    pub const fn new() -> Self {
        Self { state: UiState::OperandLo }
    }

    pub const fn state(&self) -> UiState {
        self.state
    }

    /// Handle a press of bit button `BIT`.
    pub fn toggle_bit<const BIT: u32>(&self, calc: &mut Calculator<BITS>, display: &mut impl CalcDisplay) {
        const { assert!(BIT < BITS || BIT < 2, "no such bit button") }
        let mask = 1u8 << BIT;

        if self.state == UiState::OpSelect {
            if BIT < 2 {
                let op = Operator::from_bits(calc.current_operator().bits() ^ mask);
                calc.set_operator(op);
                debug!("ui: operator -> {:?}", op);
                Self::push_result(calc, display);
                display.set_operator(calc.current_operator().bits());
            }
        } else {
            calc.set_rhs(calc.rhs() ^ mask);
            debug!("ui: rhs -> {}", calc.rhs());
            display.set_rhs(calc.rhs());
            Self::push_result(calc, display);
        }
    }

    /// Push every displayed value.
    pub fn read_all(&self, calc: &Calculator<BITS>, display: &mut impl CalcDisplay) {
        display.set_lhs(calc.lhs());
        display.set_rhs(calc.rhs());
        Self::push_result(calc, display);
        display.set_operator(calc.current_operator().bits());
    }

    /// Handle a press of the rotate button.
    pub fn rotate_behaviour(&mut self, calc: &mut Calculator<BITS>, display: &mut impl CalcDisplay) {
        if self.state == UiState::OperandLo {
            calc.swap_lr();
            self.read_all(calc, display);
        }
        self.state = self.state.next();
        debug!("ui: state -> {:?}", self.state);
    }

    fn push_result(calc: &Calculator<BITS>, display: &mut impl CalcDisplay) {
        if calc.can_compute() {
            display.set_result(calc.result());
        } else {
            display.set_no_result();
        }
    }
}

//! Bit-width generic two-operand calculator.
//!
//! Operands are nominally `BITS` wide and stored as given; add, subtract and
//! multiply results are cut to `2 * BITS` bits.  The operator is a
//! [`TaggedDispatch`] over the four arithmetic behaviours, so the calculator
//! is three bytes of state whatever operator is selected.
//!
//! | Operator | Ordinal | Result                                        |
//! |----------|---------|-----------------------------------------------|
//! | add      | 0       | `(lhs + rhs) mod 2^(2·BITS)`                  |
//! | subtract | 1       | `(lhs - rhs) mod 2^(2·BITS)`                  |
//! | multiply | 2       | `(lhs * rhs) mod 2^(2·BITS)`                  |
//! | divide   | 3       | `(lhs / rhs) << 3 \| (lhs % rhs) & 0b111`     |
//!
//! Divide by zero has no result; [`Calculator::can_compute`] reports it and
//! [`Calculator::result`] yields 0.

pub mod ui;

use crate::tagged::{Behaviours, TaggedDispatch};

/// Width of the remainder field packed into a divide result.
pub const REMAINDER_BITS: u32 = 3;
const REMAINDER_MASK: u8 = (1 << REMAINDER_BITS) - 1;

// ── Operators ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Operator {
    Add = 0,
    Subtract = 1,
    Multiply = 2,
    Divide = 3,
}

impl Operator {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Decode a two-bit selector; higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Add,
            1 => Self::Subtract,
            2 => Self::Multiply,
            _ => Self::Divide,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }
}

// ── Arithmetic behaviours ─────────────────────────────────────

/// Operand pair handed to each behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Operands {
    pub lhs: u8,
    pub rhs: u8,
}

/// The four arithmetic behaviours for `BITS`-wide operands.
pub struct Arith<const BITS: u32>;

impl<const BITS: u32> Arith<BITS> {
    const RESULT_MASK: u8 = ((1u16 << (2 * BITS)) - 1) as u8;

    fn add(o: Operands) -> u8 {
        o.lhs.wrapping_add(o.rhs) & Self::RESULT_MASK
    }

    fn subtract(o: Operands) -> u8 {
        o.lhs.wrapping_sub(o.rhs) & Self::RESULT_MASK
    }

    fn multiply(o: Operands) -> u8 {
        o.lhs.wrapping_mul(o.rhs) & Self::RESULT_MASK
    }

    fn divide(o: Operands) -> u8 {
        if o.rhs == 0 {
            return 0;
        }
        ((o.lhs / o.rhs) << REMAINDER_BITS) | ((o.lhs % o.rhs) & REMAINDER_MASK)
    }
}

impl<const BITS: u32> Behaviours for Arith<BITS> {
    type Data = Operands;
    type Output = u8;

    // Order matches the `Operator` ordinals.
    const TABLE: &'static [fn(Operands) -> u8] = &[Self::add, Self::subtract, Self::multiply, Self::divide];
}

// ── Calculator ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator<const BITS: u32> {
    lhs: u8,
    rhs: u8,
    operator: TaggedDispatch<Arith<BITS>>,
}

impl<const BITS: u32> Default for Calculator<BITS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BITS: u32> Calculator<BITS> {
    /// Operand width.
    pub const INPUT_BITS: u32 = BITS;
    /// Largest operand value.
    pub const MAX_INPUT: u8 = ((1u16 << BITS) - 1) as u8;
    /// Width of the add/subtract/multiply result.
    pub const RESULT_BITS: u32 = 2 * BITS;

    /// Zero operands, operator add.
    pub const fn new() -> Self {
        const { assert!(BITS >= 1 && 2 * BITS <= 8, "operands must be 1..=4 bits wide") }
        Self { lhs: 0, rhs: 0, operator: TaggedDispatch::new() }
    }

    /// Set the left operand.  Stored as given; callers keep it within
    /// `BITS` bits, and results are cut to the result width.
    pub fn set_lhs(&mut self, value: u8) {
        self.lhs = value;
    }

    /// Set the right operand.  Stored as given, like [`set_lhs`](Self::set_lhs).
    pub fn set_rhs(&mut self, value: u8) {
        self.rhs = value;
    }

    pub const fn lhs(&self) -> u8 {
        self.lhs
    }

    pub const fn rhs(&self) -> u8 {
        self.rhs
    }

    /// Apply the selected operator.  Only meaningful when
    /// [`can_compute`](Self::can_compute) holds; divide by zero yields 0.
    pub fn result(&self) -> u8 {
        self.operator.call(Operands { lhs: self.lhs, rhs: self.rhs })
    }

    /// False only for divide with a zero right operand.
    pub fn can_compute(&self) -> bool {
        !(self.current_operator() == Operator::Divide && self.rhs == 0)
    }

    pub fn set_operator(&mut self, op: Operator) {
        self.operator.set_index(op.bits());
    }

    pub fn current_operator(&self) -> Operator {
        Operator::from_bits(self.operator.index())
    }

    pub fn swap_lr(&mut self) {
        core::mem::swap(&mut self.lhs, &mut self.rhs);
    }

    /// add → subtract → multiply → divide → add.
    pub fn rotate_operator(&mut self) {
        self.operator.rotate_inplace();
    }
}

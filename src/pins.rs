//! GPIO pin assignments for the calculator board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  LED banks are listed least significant bit first.

use crate::registry::pins_unique;

// ---------------------------------------------------------------------------
// Buttons (active high, rising edge)
// ---------------------------------------------------------------------------

/// Cycles the UI state; in the low-operand state it also swaps lhs and rhs.
pub const ROTATE_BUTTON_GPIO: u8 = 16;
/// Toggles bit 0 of the rhs operand or the operator selector.
pub const BIT0_BUTTON_GPIO: u8 = 10;
/// Toggles bit 1 of the rhs operand or the operator selector.
pub const BIT1_BUTTON_GPIO: u8 = 11;
/// Toggles bit 2 of the rhs operand.
pub const BIT2_BUTTON_GPIO: u8 = 12;

// ---------------------------------------------------------------------------
// Wake link to the partner board
// ---------------------------------------------------------------------------

/// Output: pulsed high whenever a local button is handled.
pub const WAKE_TX_GPIO: u8 = 6;
/// Input: a rising edge from the partner keeps this board awake.
pub const WAKE_RX_GPIO: u8 = 7;

// ---------------------------------------------------------------------------
// LED banks
// ---------------------------------------------------------------------------

/// Two-bit operator selector (add, subtract, multiply, divide).
pub const OPERATOR_LED_GPIOS: [u8; 2] = [8, 9];
/// Right-hand operand, the one the bit buttons edit.
pub const RHS_LED_GPIOS: [u8; 3] = [13, 14, 15];
/// Left-hand operand.
pub const LHS_LED_GPIOS: [u8; 3] = [17, 18, 19];
/// Six-bit result; flashes when the operation has no result.
pub const RESULT_LED_GPIOS: [u8; 6] = [20, 21, 22, 26, 27, 28];

/// Every pin armed for rising-edge interrupts, in dispatch order.
pub const INPUT_GPIOS: [u8; 5] = [
    ROTATE_BUTTON_GPIO,
    BIT0_BUTTON_GPIO,
    BIT1_BUTTON_GPIO,
    BIT2_BUTTON_GPIO,
    WAKE_RX_GPIO,
];

const ALL_GPIOS: [u8; 20] = [
    ROTATE_BUTTON_GPIO,
    BIT0_BUTTON_GPIO,
    BIT1_BUTTON_GPIO,
    BIT2_BUTTON_GPIO,
    WAKE_TX_GPIO,
    WAKE_RX_GPIO,
    OPERATOR_LED_GPIOS[0],
    OPERATOR_LED_GPIOS[1],
    RHS_LED_GPIOS[0],
    RHS_LED_GPIOS[1],
    RHS_LED_GPIOS[2],
    LHS_LED_GPIOS[0],
    LHS_LED_GPIOS[1],
    LHS_LED_GPIOS[2],
    RESULT_LED_GPIOS[0],
    RESULT_LED_GPIOS[1],
    RESULT_LED_GPIOS[2],
    RESULT_LED_GPIOS[3],
    RESULT_LED_GPIOS[4],
    RESULT_LED_GPIOS[5],
];

const _: () = assert!(pins_unique(&ALL_GPIOS), "a GPIO is assigned twice");

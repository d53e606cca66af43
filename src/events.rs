//! Interrupt-driven edge intake.
//!
//! The GPIO ISR records rising edges into an [`EdgeLatch`]; the run loop
//! drains it and hands each pin to the device.
//!
//! ```text
//! ┌─────────────┐  record(pin)  ┌──────────────┐  drain()  ┌──────────────┐
//! │ GPIO ISR    │──────────────▶│  EdgeLatch   │──────────▶│  Run loop    │
//! │ (any pin)   │               │  (lock-free) │           │  (consumer)  │
//! └─────────────┘               └──────────────┘           └──────────────┘
//! ```
//!
//! The latch is a 64-bit pin set split over two `AtomicU32` words, since the
//! Xtensa cores have no 64-bit atomics.  Repeated edges on one pin before a
//! drain collapse into one.

use core::sync::atomic::{AtomicU32, Ordering};

/// Rising-edge bit in the event mask delivered with a GPIO interrupt.
pub const EDGE_RISE: u32 = 0b1000;

/// Number of pins the latch can track.
pub const MAX_PINS: u8 = 64;

/// Written by the GPIO ISR, drained by the run loop.
pub static EDGE_LATCH: EdgeLatch = EdgeLatch::new();

pub struct EdgeLatch {
    lo: AtomicU32,
    hi: AtomicU32,
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self { lo: AtomicU32::new(0), hi: AtomicU32::new(0) }
    }

    /// Record an interrupt on `pin`.  Only rising edges are kept.  Returns
    /// whether the edge was latched.
    ///
    /// ISR-safe.
    pub fn record(&self, pin: u8, events: u32) -> bool {
        if events & EDGE_RISE == 0 || pin >= MAX_PINS {
            return false;
        }
        let word = if pin < 32 { &self.lo } else { &self.hi };
        word.fetch_or(1 << (pin % 32), Ordering::Release);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.lo.load(Ordering::Acquire) == 0 && self.hi.load(Ordering::Acquire) == 0
    }

    /// Take every latched pin and visit them in ascending order.
    pub fn drain(&self, mut visitor: impl FnMut(u8)) -> usize {
        let mut count = 0;
        for (base, word) in [(0u8, &self.lo), (32u8, &self.hi)] {
            let mut bits = word.swap(0, Ordering::AcqRel);
            while bits != 0 {
                let bit = bits.trailing_zeros() as u8;
                bits &= bits - 1;
                visitor(base + bit);
                count += 1;
            }
        }
        count
    }
}

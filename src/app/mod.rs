//! Application layer: the calculator board built from the generic core.
//!
//! [`ports`] defines the hardware-facing traits, [`display`] turns calculator
//! pushes into LED bank levels, and [`device`] wires the registry, calculator
//! and timed queue into the unit the run loop drives.

pub mod device;
pub mod display;
pub mod ports;

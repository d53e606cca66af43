//! MyButtons firmware library.
//!
//! The generic core (dispatch registry, output ownership, tagged dispatch,
//! calculator, timed queue) plus the board application built on it.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]` within
//! each module, so the whole library builds and tests on the host.

#![deny(unused_must_use)]

pub mod calculator;
pub mod output_pin;
pub mod queue;
pub mod registry;
pub mod tagged;

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;

pub mod adapters;
pub mod drivers;

//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter | Implements | Connects to          |
//! |---------|------------|----------------------|
//! | `time`  | Clock      | ESP32 system timer   |
//!
//! Output adapters live in [`crate::drivers`].

pub mod time;

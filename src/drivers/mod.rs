//! Output drivers and one-shot GPIO configuration.

pub mod gpio_output;
pub mod hal_output;
pub mod hw_init;

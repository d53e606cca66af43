//! Device configuration parameters
//!
//! All tunable timings for the calculator board.  Pin assignments live in
//! [`crate::pins`]; this struct only carries values that can reasonably be
//! changed without a board respin.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    // --- Power ---
    /// Inactivity period before the board drops into light sleep (seconds)
    pub sleep_timeout_secs: u32,

    // --- Input ---
    /// Longest slice the run loop idles before draining edges (milliseconds)
    pub input_poll_ms: u32,

    // --- Display ---
    /// Half-period of the result-bank flash shown when no result exists (milliseconds)
    pub no_result_flash_ms: u32,

    // --- Wake link ---
    /// Width of the outgoing wake pulse (microseconds)
    pub wake_pulse_us: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            // Power
            sleep_timeout_secs: 5 * 60,

            // Input
            input_poll_ms: 10,

            // Display
            no_result_flash_ms: 1000,

            // Wake link
            wake_pulse_us: 100,
        }
    }
}

impl DeviceConfig {
    /// Reject configurations the run loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.sleep_timeout_secs == 0 {
            return Err(Error::Config("sleep timeout is zero"));
        }
        if self.input_poll_ms == 0 {
            return Err(Error::Config("input poll slice is zero"));
        }
        if u64::from(self.input_poll_ms) > u64::from(self.sleep_timeout_secs) * 1000 {
            return Err(Error::Config("input poll slice exceeds sleep timeout"));
        }
        if self.no_result_flash_ms == 0 {
            return Err(Error::Config("no-result flash period is zero"));
        }
        if self.wake_pulse_us == 0 {
            return Err(Error::Config("wake pulse width is zero"));
        }
        Ok(())
    }

    pub fn sleep_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.sleep_timeout_secs))
    }

    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(u64::from(self.input_poll_ms))
    }

    pub fn no_result_flash(&self) -> Duration {
        Duration::from_millis(u64::from(self.no_result_flash_ms))
    }

    pub fn wake_pulse(&self) -> Duration {
        Duration::from_micros(u64::from(self.wake_pulse_us))
    }
}

//! Alarm timing configuration
//!
//! All tunable timing parameters for alarm presentation and the
//! stop-function watchdog.  Defaults match the shipped firmware; a
//! persisted override can be loaded from a postcard blob.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Depth of the alarm event queue.  A const generic on the channel type,
/// so it cannot live in the runtime config.
pub const ALARM_QUEUE_DEPTH: usize = 16;

/// Alarm core timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfigSet {
    // --- Presentation ---
    /// How long the detail title stays on screen (ms)
    pub title_timeout_ms: u32,
    /// Popup auto-dismiss after this long without touch input (ms)
    pub popup_no_action_timeout_ms: u32,
    /// Detail/additional message duration when both are shown (ms)
    pub message_timeout_short_ms: u32,
    /// Detail message duration when it is the only message (ms)
    pub message_timeout_long_ms: u32,

    // --- Watchdog ---
    /// Continuous stop-function time before automatic power-off (ms)
    pub stop_function_power_off_ms: u32,

    // --- Timing ---
    /// Device task period; one `handle_event` call per period (ms)
    pub device_tick_ms: u32,
    /// GUI task period; one `run` call per period (ms)
    pub gui_tick_ms: u32,
}

impl Default for AlarmConfigSet {
    fn default() -> Self {
        Self {
            // Presentation
            title_timeout_ms: 2_000,
            popup_no_action_timeout_ms: 30_000,
            message_timeout_short_ms: 5_000,
            message_timeout_long_ms: 10_000,

            // Watchdog
            stop_function_power_off_ms: 180_000, // 3 min

            // Timing
            device_tick_ms: 10,
            gui_tick_ms: 10,
        }
    }
}

impl AlarmConfigSet {
    /// Number of `handle_event` ticks before the stop-function watchdog fires.
    pub fn power_off_ticks(&self) -> u32 {
        self.stop_function_power_off_ms / self.device_tick_ms.max(1)
    }

    /// Reject values that would stall or invert the presentation cycle.
    pub fn validate(&self) -> Result<()> {
        if self.device_tick_ms == 0 || self.gui_tick_ms == 0 {
            return Err(Error::Config("tick period must be non-zero"));
        }
        if self.title_timeout_ms == 0 {
            return Err(Error::Config("title timeout must be non-zero"));
        }
        if self.message_timeout_short_ms == 0
            || self.message_timeout_short_ms > self.message_timeout_long_ms
        {
            return Err(Error::Config("short message timeout must be in 1..=long"));
        }
        if self.popup_no_action_timeout_ms <= self.title_timeout_ms {
            return Err(Error::Config("no-action timeout must exceed title timeout"));
        }
        if self.stop_function_power_off_ms < self.device_tick_ms {
            return Err(Error::Config("power-off delay shorter than one device tick"));
        }
        Ok(())
    }

    /// Decode and validate a persisted configuration blob.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self> {
        let cfg: Self =
            postcard::from_bytes(bytes).map_err(|_| Error::Config("corrupted config blob"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

//! Alarm indicator blink engine.
//!
//! The indicator panels framing the screen carry the colour scheme of the
//! presented alarm's priority and blink at a priority-dependent rate:
//!
//! | Priority | Scheme  | Blink period |
//! |----------|---------|--------------|
//! | High     | high    | 250 ms       |
//! | Medium   | medium  | 1000 ms      |
//! | Low1     | low-1   | solid        |
//! | Low2     | low-2   | solid        |
//!
//! Each timer expiry toggles panel visibility.

use crate::alarm::AlarmPriority;

use super::timer::PeriodicTimer;

pub const HIGH_PRIORITY_BLINK_MS: u32 = 250;
pub const MEDIUM_PRIORITY_BLINK_MS: u32 = 1_000;

/// Blink period for `priority`, or `None` for a solid indicator.
pub const fn blink_period_ms(priority: AlarmPriority) -> Option<u32> {
    match priority {
        AlarmPriority::High => Some(HIGH_PRIORITY_BLINK_MS),
        AlarmPriority::Medium => Some(MEDIUM_PRIORITY_BLINK_MS),
        AlarmPriority::Low1 | AlarmPriority::Low2 => None,
    }
}

/// Blink state for the indicator panels.
#[derive(Debug, Default)]
pub struct IndicatorBlinker {
    timer: PeriodicTimer,
    lit: bool,
}

impl IndicatorBlinker {
    pub const fn new() -> Self {
        Self {
            timer: PeriodicTimer::new(),
            lit: false,
        }
    }

    pub fn start(&mut self, period_ms: u32) {
        self.timer.start(period_ms);
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn period_ms(&self) -> Option<u32> {
        self.timer.period_ms()
    }

    /// Advance the blink phase.  Returns the new panel visibility if it
    /// changed.
    pub fn tick(&mut self, delta_ms: u32) -> Option<bool> {
        let fired = self.timer.tick(delta_ms);
        if fired % 2 == 0 {
            return None;
        }
        self.lit = !self.lit;
        Some(self.lit)
    }
}

//! Cooperative periodic timer.
//!
//! The GUI task owns every presentation timer and advances them from its
//! loop with the elapsed milliseconds, so callbacks run on the GUI task and
//! never race widget updates.  A long gap between ticks delivers every
//! missed expiry on the next call.

/// Software periodic timer driven by [`tick`](Self::tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodicTimer {
    period_ms: Option<u32>,
    elapsed_ms: u32,
}

impl PeriodicTimer {
    pub const fn new() -> Self {
        Self {
            period_ms: None,
            elapsed_ms: 0,
        }
    }

    /// Arm with `period_ms`.  A running timer is left untouched; stop it
    /// first to change the period.  Returns whether the timer was armed.
    pub fn start(&mut self, period_ms: u32) -> bool {
        if self.is_running() || period_ms == 0 {
            return false;
        }
        self.period_ms = Some(period_ms);
        self.elapsed_ms = 0;
        true
    }

    pub fn stop(&mut self) {
        self.period_ms = None;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.period_ms.is_some()
    }

    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    /// Advance by `delta_ms` and return how many periods expired.
    pub fn tick(&mut self, delta_ms: u32) -> u32 {
        let Some(period) = self.period_ms else {
            return 0;
        };
        let total = self.elapsed_ms.saturating_add(delta_ms);
        self.elapsed_ms = total % period;
        total / period
    }
}

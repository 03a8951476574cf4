//! The 5-byte alarm payload and the sub-conditions it encodes.
//!
//! ```text
//!  byte 0   additional message enable (1 = show "remove the cannula")
//!  byte 1   message offset / sub-condition selector
//!  byte 2   reset button override
//!  byte 3-4 reserved
//! ```

use num_enum::TryFromPrimitive;

/// Raw payload carried by every [`AlarmEvent`](crate::events::AlarmEvent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmPayload(pub [u8; AlarmPayload::LEN]);

impl AlarmPayload {
    pub const LEN: usize = 5;

    const ADDITIONAL_IDX: usize = 0;
    const SELECTOR_IDX: usize = 1;
    const RESET_BUTTON_IDX: usize = 2;

    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Payload carrying only a sub-condition selector.
    pub const fn with_selector(selector: u8) -> Self {
        let mut bytes = [0; Self::LEN];
        bytes[Self::SELECTOR_IDX] = selector;
        Self(bytes)
    }

    pub const fn bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub const fn additional_message_enabled(&self) -> bool {
        self.0[Self::ADDITIONAL_IDX] == 1
    }

    /// Detail-message offset; also the sub-condition byte read by the
    /// safety engine.
    pub const fn selector(&self) -> u8 {
        self.0[Self::SELECTOR_IDX]
    }

    /// Unknown override bytes fall back to the configured buttons.
    pub fn reset_button(&self) -> ResetButtonOverride {
        ResetButtonOverride::try_from(self.0[Self::RESET_BUTTON_IDX])
            .unwrap_or(ResetButtonOverride::Default)
    }
}

impl From<[u8; AlarmPayload::LEN]> for AlarmPayload {
    fn from(bytes: [u8; AlarmPayload::LEN]) -> Self {
        Self(bytes)
    }
}

/// Per-activation override of the popup's reset/OK button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive)]
#[repr(u8)]
pub enum ResetButtonOverride {
    #[default]
    Default = 0,
    Hide = 1,
    ShowReset = 2,
    ShowOk = 3,
}

// ── Sub-condition selectors ──────────────────────────────────

/// E010 selector values.
pub mod low_temperature {
    pub const AMBIENT_BELOW_18C: u8 = 0;
    pub const AMBIENT_AT_OR_ABOVE_18C: u8 = 1;
}

/// E011 selector values.
pub mod high_temperature {
    pub const AMBIENT_BELOW_SETTING: u8 = 0;
    pub const AMBIENT_AT_OR_ABOVE_SETTING: u8 = 1;
}

/// E014 selector values.
pub mod operating_conditions {
    pub const AMBIENT_BELOW_42C: u8 = 0;
    pub const AMBIENT_AT_OR_ABOVE_42C: u8 = 1;
}

/// E005 selector: which circuit was fitted against which mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum CircuitChange {
    AdultToPediatric = 0,
    PediatricToAdult = 1,
    AdultToDisinfection = 2,
    PediatricToDisinfection = 3,
    DisinfectionToAdult = 4,
    DisinfectionToPediatric = 5,
}

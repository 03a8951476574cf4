//! Outbound application events.
//!
//! [`AlarmService`](super::service::AlarmService) and
//! [`AlarmPresenter`](super::presenter::AlarmPresenter) emit these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters decide where
//! they go.

use crate::alarm::{AlarmKind, AlarmPriority};
use crate::fsm::StateId;
use crate::safety::SafetyActions;

/// Structured events emitted by the alarm core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// An alarm condition went Active in the status table.
    AlarmRaised(AlarmKind),

    /// An alarm condition went Inactive.
    AlarmCleared(AlarmKind),

    /// An event carried an id outside the declared range.
    InvalidAlarm(u8),

    /// The safety engine issued collaborator commands.
    ReactionIssued {
        kind: AlarmKind,
        actions: SafetyActions,
    },

    /// The device-wide any-alarm-active flag changed.
    AnyActiveChanged(bool),

    /// The stop-function alarm outlived its grace period.
    PowerOff,

    /// A kind took over the presentation slot.
    Presenting {
        kind: AlarmKind,
        priority: AlarmPriority,
    },

    /// The presentation state machine moved.
    PresentationChanged { from: StateId, to: StateId },
}

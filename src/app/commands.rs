//! Inbound requests to the alarm presenter.
//!
//! Other tasks never touch the presentation slot directly; they post one of
//! these to the GUI task, which feeds it to
//! [`AlarmPresenter::handle_command`](super::presenter::AlarmPresenter::handle_command).

use crate::alarm::{AlarmKind, AlarmPayload, AlarmPriority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCommand {
    /// Put `kind` in the presentation slot.
    Active {
        kind: AlarmKind,
        priority: AlarmPriority,
        payload: AlarmPayload,
    },

    /// The presented alarm is no longer active.
    Inactive,

    ShowPopup,

    HidePopup,

    /// Show or hide the mute icon on the next refresh.
    SetMuteIcon(bool),

    /// Request (or withdraw) an operator reset.
    SetReset(bool),
}

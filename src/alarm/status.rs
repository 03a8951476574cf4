//! Alarm status table: the authoritative "is this condition true" record.
//!
//! One atomic flag per [`AlarmKind`].  The device task is the only writer
//! (through [`AlarmService`](crate::app::service::AlarmService)); the GUI
//! task reads it concurrently through a shared `Arc`.  Release/Acquire
//! ordering keeps a reader from observing a status before the write that
//! produced it.

use core::sync::atomic::{AtomicBool, Ordering};

use super::kind::{AlarmKind, AlarmStatus};

pub struct AlarmStatusTable {
    active: [AtomicBool; AlarmKind::COUNT],
}

impl Default for AlarmStatusTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmStatusTable {
    /// Every kind starts Inactive.
    pub fn new() -> Self {
        Self {
            active: core::array::from_fn(|_| AtomicBool::new(false)),
        }
    }

    pub fn set_status(&self, kind: AlarmKind, status: AlarmStatus) {
        self.active[kind.index()].store(status.is_active(), Ordering::Release);
    }

    pub fn status(&self, kind: AlarmKind) -> AlarmStatus {
        if self.is_active(kind) {
            AlarmStatus::Active
        } else {
            AlarmStatus::Inactive
        }
    }

    pub fn is_active(&self, kind: AlarmKind) -> bool {
        self.active[kind.index()].load(Ordering::Acquire)
    }

    /// Status by raw id.  Unknown ids read as Inactive.
    pub fn status_raw(&self, raw: u8) -> AlarmStatus {
        AlarmKind::try_from(raw).map_or(AlarmStatus::Inactive, |kind| self.status(kind))
    }

    /// Full scan; true if any kind is Active.
    pub fn any_active(&self) -> bool {
        self.active.iter().any(|a| a.load(Ordering::Acquire))
    }

    /// Kinds currently Active, in id order.
    pub fn active_kinds(&self) -> impl Iterator<Item = AlarmKind> + '_ {
        AlarmKind::ALL.into_iter().filter(|k| self.is_active(*k))
    }
}

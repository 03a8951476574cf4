//! Alarm event channel.
//!
//! Producer tasks (sensor polling, comms, UI) enqueue [`AlarmEvent`]s; the
//! device task is the single consumer and polls with zero wait from
//! [`AlarmService::handle_event`](crate::app::service::AlarmService::handle_event).
//!
//! ```text
//! ┌──────────────┐
//! │ Sensor task  │──┐
//! │ Comms task   │──┼──▶ AlarmEventChannel ──▶ device task (try_receive)
//! │ GUI task     │──┘    (bounded, drop-all on overflow)
//! └──────────────┘
//! ```
//!
//! A full queue is never waited on.  The whole queue is cleared and the
//! send reports failure; producers re-assert their state periodically, so
//! the condition is delivered again on a later cycle.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::warn;

use crate::alarm::{AlarmKind, AlarmPayload, AlarmStatus};
use crate::config::ALARM_QUEUE_DEPTH;
use crate::error::{DeliveryError, Error, Result};

/// One alarm transition as carried across the queue.
///
/// The id stays raw until the consumer validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmEvent {
    pub id: u8,
    pub status: AlarmStatus,
    pub payload: AlarmPayload,
}

impl AlarmEvent {
    pub const fn new(kind: AlarmKind, status: AlarmStatus, payload: AlarmPayload) -> Self {
        Self {
            id: kind.id(),
            status,
            payload,
        }
    }

    /// Build from wire bytes.  The id is not checked here.
    pub fn from_raw(id: u8, status: u8, data: [u8; AlarmPayload::LEN]) -> Result<Self> {
        let status = AlarmStatus::try_from(status).map_err(|_| Error::InvalidStatus(status))?;
        Ok(Self {
            id,
            status,
            payload: AlarmPayload::new(data),
        })
    }

    pub fn kind(&self) -> Result<AlarmKind> {
        AlarmKind::try_from(self.id).map_err(|_| Error::InvalidAlarmKind(self.id))
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

type AlarmQueue = Channel<CriticalSectionRawMutex, AlarmEvent, ALARM_QUEUE_DEPTH>;

pub struct AlarmEventChannel {
    queue: AlarmQueue,
}

impl Default for AlarmEventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmEventChannel {
    pub const fn new() -> Self {
        Self {
            queue: Channel::new(),
        }
    }

    /// Enqueue without waiting.  On overflow every pending event is
    /// dropped along with this one.
    pub fn try_send(&self, event: AlarmEvent) -> Result<()> {
        match self.queue.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(dropped)) => {
                let lost = self.queue.len();
                self.queue.clear();
                warn!(
                    "Alarm queue full: dropped id={} and {} pending event(s)",
                    dropped.id, lost
                );
                Err(DeliveryError::QueueFull.into())
            }
        }
    }

    /// Producer entry point.  Returns `false` if the queue overflowed and
    /// was reset.
    pub fn send_event_alarm(
        &self,
        id: u8,
        status: AlarmStatus,
        data: [u8; AlarmPayload::LEN],
    ) -> bool {
        self.try_send(AlarmEvent {
            id,
            status,
            payload: AlarmPayload::new(data),
        })
        .is_ok()
    }

    /// Zero-wait poll.
    pub fn try_receive(&self) -> Option<AlarmEvent> {
        self.queue.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&self) {
        self.queue.clear();
    }
}

/// Process-wide alarm queue shared by every producer task.
pub static ALARM_CHANNEL: AlarmEventChannel = AlarmEventChannel::new();

/// Enqueue on [`ALARM_CHANNEL`].
pub fn send_event_alarm(id: u8, status: AlarmStatus, data: [u8; AlarmPayload::LEN]) -> bool {
    ALARM_CHANNEL.send_event_alarm(id, status, data)
}

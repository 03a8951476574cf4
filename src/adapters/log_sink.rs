//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`AppEvent`] as one
//! `CATEGORY | key=value` line through the `log` facade (UART / USB-CDC on
//! target).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::AlarmRaised(kind) => {
                warn!("ALARM | raised code={} kind={:?}", kind.code(), kind);
            }
            AppEvent::AlarmCleared(kind) => {
                info!("ALARM | cleared code={} kind={:?}", kind.code(), kind);
            }
            AppEvent::InvalidAlarm(id) => {
                warn!("ALARM | invalid id={}", id);
            }
            AppEvent::ReactionIssued { kind, actions } => {
                warn!("SAFETY | code={} actions={:?}", kind.code(), actions.as_slice());
            }
            AppEvent::AnyActiveChanged(active) => {
                info!("ALARM | any_active={}", active);
            }
            AppEvent::PowerOff => {
                error!("POWER | off reason=stop_function_timeout");
            }
            AppEvent::Presenting { kind, priority } => {
                info!("GUI | presenting code={} priority={:?}", kind.code(), priority);
            }
            AppEvent::PresentationChanged { from, to } => {
                info!("GUI | {:?} -> {:?}", from, to);
            }
        }
    }
}

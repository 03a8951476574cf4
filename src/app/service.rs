//! Device-side alarm orchestrator.
//!
//! [`AlarmService`] owns the write side of the status table.  Each device
//! tick it polls the alarm queue once, records the transition, runs the
//! safety engine and applies its commands, then advances the stop-function
//! watchdog.
//!
//! ```text
//!  AlarmEventChannel ──▶ ┌──────────────────────────┐ ──▶ ActuatorPort
//!                        │       AlarmService        │ ──▶ SystemPort
//!                        │ status · safety · watchdog│ ──▶ EventSink
//!                        └──────────────────────────┘
//!                                     │ Arc<AlarmStatusTable>
//!                                     ▼
//!                               AlarmPresenter (GUI task)
//! ```

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::alarm::{AlarmKind, AlarmStatus, AlarmStatusTable};
use crate::config::AlarmConfigSet;
use crate::events::{AlarmEvent, AlarmEventChannel};
use crate::safety::{self, SafetyAction, SafetyActions};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, GuiNotification, HeaterCommand, MotorCommand, SystemPort};

// ───────────────────────────────────────────────────────────────
// AlarmService
// ───────────────────────────────────────────────────────────────

pub struct AlarmService {
    status: Arc<AlarmStatusTable>,
    config: AlarmConfigSet,
    /// Watchdog threshold in `handle_event` calls.
    power_off_ticks: u32,
    /// Consecutive calls with the stop-function alarm Active.
    stop_function_ticks: u32,
    /// Power-off already requested for the current stop-function activation.
    powered_off: bool,
    any_active: bool,
    tick_count: u64,
}

impl AlarmService {
    pub fn new(config: AlarmConfigSet) -> Self {
        Self::with_status_table(config, Arc::new(AlarmStatusTable::new()))
    }

    /// Use an existing table (shared with the presenter).
    pub fn with_status_table(config: AlarmConfigSet, status: Arc<AlarmStatusTable>) -> Self {
        if let Err(e) = config.validate() {
            warn!("AlarmService config rejected ({e}), watchdog clamped to one tick");
        }
        let power_off_ticks = config.power_off_ticks().max(1);
        info!(
            "AlarmService ready: stop-function power-off after {} ticks",
            power_off_ticks
        );
        Self {
            any_active: status.any_active(),
            status,
            config,
            power_off_ticks,
            stop_function_ticks: 0,
            powered_off: false,
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One device tick: zero-wait poll of `channel`, then the watchdog.
    ///
    /// `hw` satisfies both [`ActuatorPort`] and [`SystemPort`].
    pub fn handle_event(
        &mut self,
        channel: &AlarmEventChannel,
        hw: &mut (impl ActuatorPort + SystemPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        if let Some(event) = channel.try_receive() {
            self.process_event(event, hw, sink);
        }

        self.check_stop_function(hw, sink);
    }

    /// Apply one dequeued event.
    pub fn process_event(
        &mut self,
        event: AlarmEvent,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let kind = match event.kind() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Ignoring alarm event: {e}");
                sink.emit(&AppEvent::InvalidAlarm(event.id));
                return;
            }
        };

        self.status.set_status(kind, event.status);
        match event.status {
            AlarmStatus::Active => {
                error!("ALARM RAISED: {kind} payload={:?}", event.payload.bytes());
                sink.emit(&AppEvent::AlarmRaised(kind));
            }
            AlarmStatus::Inactive => {
                info!("ALARM CLEARED: {kind}");
                sink.emit(&AppEvent::AlarmCleared(kind));
            }
        }

        let actions = safety::react(kind, event.status, &event.payload, &self.status);
        if !actions.is_empty() {
            Self::apply_actions(&actions, hw);
            sink.emit(&AppEvent::ReactionIssued { kind, actions });
        }

        let any_active = self.status.any_active();
        if any_active != self.any_active {
            self.any_active = any_active;
            sink.emit(&AppEvent::AnyActiveChanged(any_active));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self, kind: AlarmKind) -> AlarmStatus {
        self.status.status(kind)
    }

    /// Shared handle for the GUI side.
    pub fn status_table(&self) -> Arc<AlarmStatusTable> {
        Arc::clone(&self.status)
    }

    /// Recomputed after every processed event.
    pub fn any_active(&self) -> bool {
        self.any_active
    }

    pub fn can_start_normal_operation(&self) -> bool {
        safety::can_start_normal_operation(&self.status)
    }

    pub fn stop_function_ticks(&self) -> u32 {
        self.stop_function_ticks
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &AlarmConfigSet {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate safety actions into port calls, in order.
    fn apply_actions(actions: &SafetyActions, hw: &mut impl ActuatorPort) {
        for action in actions {
            match action {
                SafetyAction::DisableMotor => hw.disable_motor(),
                SafetyAction::EnableMotor => hw.enable_motor(),
                SafetyAction::HeaterStart => hw.heater(HeaterCommand::Start),
                SafetyAction::HeaterStop => hw.heater(HeaterCommand::Stop),
                SafetyAction::MotorStart => hw.motor(MotorCommand::Start),
                SafetyAction::MotorStop => hw.motor(MotorCommand::Stop),
                SafetyAction::MotorPrepareStop => hw.motor(MotorCommand::PrepareStop),
                SafetyAction::WaterPumpOff => hw.turn_off_and_disable_pump(),
            }
        }
    }

    /// Power off once the stop-function alarm has been Active for the
    /// configured number of consecutive ticks.
    fn check_stop_function(&mut self, hw: &mut impl SystemPort, sink: &mut impl EventSink) {
        if !self.status.is_active(AlarmKind::StopFunction) {
            if self.stop_function_ticks != 0 {
                debug!("stop-function watchdog reset at {} ticks", self.stop_function_ticks);
            }
            self.stop_function_ticks = 0;
            self.powered_off = false;
            return;
        }

        self.stop_function_ticks = self.stop_function_ticks.saturating_add(1);
        if !self.powered_off && self.stop_function_ticks >= self.power_off_ticks {
            self.powered_off = true;
            error!(
                "Stop function active for {} ms, powering off",
                self.config.stop_function_power_off_ms
            );
            hw.notify_gui(GuiNotification::TurnOffMachine);
            hw.power_off();
            sink.emit(&AppEvent::PowerOff);
        }
    }
}

//! Channel-backed collaborator adapter.
//!
//! Safety commands leave the device task through `embassy-sync` bounded
//! channels read by the heater, motor and GUI tasks.  Motor enable and
//! pump disable are level states, so they are plain atomics.
//!
//! ```text
//!                       HEATER_CHANNEL ──▶ heater task
//!  AlarmService ──▶     MOTOR_CHANNEL  ──▶ motor task
//!  (TaskChannelAdapter) GUI_CHANNEL    ──▶ GUI task
//!                       MOTOR_ENABLED / PUMP_ENABLED (atomics)
//!
//!  arbitration ──▶ PRESENTER_CHANNEL ──▶ GUI task (AlarmPresenter)
//! ```
//!
//! Sends never block.  A full collaborator queue drops the command with a
//! warning; the next alarm transition re-issues the full row.

use core::fmt::Debug;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{error, info, warn};

use crate::app::commands::PresenterCommand;
use crate::app::ports::{ActuatorPort, GuiNotification, HeaterCommand, MotorCommand, SystemPort};

const TASK_QUEUE_DEPTH: usize = 8;
const GUI_QUEUE_DEPTH: usize = 4;

/// Device task → heater task.
pub static HEATER_CHANNEL: Channel<CriticalSectionRawMutex, HeaterCommand, TASK_QUEUE_DEPTH> =
    Channel::new();

/// Device task → motor task.
pub static MOTOR_CHANNEL: Channel<CriticalSectionRawMutex, MotorCommand, TASK_QUEUE_DEPTH> =
    Channel::new();

/// Device task → GUI task.
pub static GUI_CHANNEL: Channel<CriticalSectionRawMutex, GuiNotification, GUI_QUEUE_DEPTH> =
    Channel::new();

/// Presentation-slot requests → GUI task.
pub static PRESENTER_CHANNEL: Channel<CriticalSectionRawMutex, PresenterCommand, TASK_QUEUE_DEPTH> =
    Channel::new();

pub static MOTOR_ENABLED: AtomicBool = AtomicBool::new(true);
pub static PUMP_ENABLED: AtomicBool = AtomicBool::new(true);

fn post<T: Debug + Copy, const N: usize>(
    channel: &Channel<CriticalSectionRawMutex, T, N>,
    msg: T,
    task: &str,
) {
    if channel.try_send(msg).is_err() {
        warn!("{task} queue full, dropped {msg:?}");
    }
}

/// [`ActuatorPort`] + [`SystemPort`] over the static task channels.
#[derive(Debug, Default)]
pub struct TaskChannelAdapter {
    power_off_requested: bool,
}

impl TaskChannelAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set once [`SystemPort::power_off`] ran.
    pub fn power_off_requested(&self) -> bool {
        self.power_off_requested
    }
}

impl ActuatorPort for TaskChannelAdapter {
    fn heater(&mut self, cmd: HeaterCommand) {
        post(&HEATER_CHANNEL, cmd, "heater");
    }

    fn motor(&mut self, cmd: MotorCommand) {
        post(&MOTOR_CHANNEL, cmd, "motor");
    }

    fn enable_motor(&mut self) {
        MOTOR_ENABLED.store(true, Ordering::Release);
    }

    fn disable_motor(&mut self) {
        MOTOR_ENABLED.store(false, Ordering::Release);
    }

    fn turn_off_and_disable_pump(&mut self) {
        PUMP_ENABLED.store(false, Ordering::Release);
    }
}

impl SystemPort for TaskChannelAdapter {
    fn notify_gui(&mut self, notification: GuiNotification) {
        post(&GUI_CHANNEL, notification, "gui");
    }

    fn power_off(&mut self) {
        self.power_off_requested = true;
        error!("System power-off requested");
        #[cfg(target_os = "espidf")]
        {
            info!("Entering deep sleep with no wake source");
            unsafe { esp_idf_svc::sys::esp_deep_sleep_start() };
        }
        #[cfg(not(target_os = "espidf"))]
        info!("Host build: power-off recorded only");
    }
}

//! Port traits: the hexagonal boundary between the alarm core and the
//! rest of the firmware.
//!
//! ```text
//!   device task                                GUI task
//!   ActuatorPort ◀── AlarmService            AlarmPresenter ──▶ DisplayPort
//!   SystemPort   ◀──      │                        │        ──▶ VideoPort
//!                         └──▶ EventSink ◀─────────┘        ◀── TouchPort / ClockPort
//!                                                           ──▶ OperatorPort
//! ```
//!
//! Adapters implement these traits; the service and presenter consume them
//! via generics so the core never touches tasks, widgets or hardware.

use crate::alarm::{AlarmPriority, TextKey};
use crate::drivers::video::FrameBlit;
use crate::fsm::context::{ButtonImage, HAlign, Screen, SlideDirection, Widget};

// ───────────────────────────────────────────────────────────────
// Collaborator commands
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterCommand {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCommand {
    Start,
    Stop,
    PrepareStop,
}

/// Events the alarm core posts to the GUI task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiNotification {
    /// The stop-function alarm outlived its grace period.
    TurnOffMachine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    Adult,
    Child,
}

// ───────────────────────────────────────────────────────────────
// Device side (driven by AlarmService)
// ───────────────────────────────────────────────────────────────

/// Heater, motor and water-supply command surface.
pub trait ActuatorPort {
    fn heater(&mut self, cmd: HeaterCommand);

    fn motor(&mut self, cmd: MotorCommand);

    fn enable_motor(&mut self);

    fn disable_motor(&mut self);

    /// Stop the water pump and keep it disabled.
    fn turn_off_and_disable_pump(&mut self);
}

/// System-level actions.
pub trait SystemPort {
    fn notify_gui(&mut self, notification: GuiNotification);

    /// Terminal: power the device off.
    fn power_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// GUI side (driven by AlarmPresenter)
// ───────────────────────────────────────────────────────────────

/// Widget surface of the display.
pub trait DisplayPort {
    /// Screen currently shown, or `None` for screens without alarm widgets.
    fn active_screen(&self) -> Option<Screen>;

    fn set_visible(&mut self, widget: Widget, visible: bool);

    fn set_text(&mut self, widget: Widget, text: TextKey);

    fn set_alignment(&mut self, widget: Widget, align: HAlign);

    fn set_position(&mut self, widget: Widget, x: i16, y: i16);

    fn set_x(&mut self, widget: Widget, x: i16);

    fn set_color_scheme(&mut self, widget: Widget, priority: AlarmPriority);

    fn set_button_image(&mut self, widget: Widget, image: ButtonImage);

    /// Stop any running popup slide and start one in `direction`.  The
    /// display reports progress back through
    /// [`AlarmPresenter::on_slide`](super::presenter::AlarmPresenter::on_slide).
    fn start_slide(&mut self, direction: SlideDirection);

    /// Hide the monitor and setting popups and cancel their animations.
    fn suppress_popups(&mut self);

    fn restore_monitor_popup(&mut self);
}

pub trait TouchPort {
    /// True while the panel reports a touch.
    fn touched(&self) -> bool;
}

pub trait ClockPort {
    /// Monotonic milliseconds since boot.
    fn now_ms(&self) -> u64;
}

/// Animation decode-and-blit pipeline.
pub trait VideoPort {
    fn init(&mut self, animation: crate::alarm::Animation);

    /// Decode `frame` into the input buffer.
    fn decode(&mut self, animation: crate::alarm::Animation, frame: u16);

    /// Copy a decoded frame into both frame buffers.
    fn blit(&mut self, blit: &FrameBlit);

    fn start(&mut self);

    fn stop(&mut self);

    /// Free decoder and buffers.
    fn release(&mut self);
}

/// Operating-mode controls behind the reset button.
pub trait OperatorPort {
    /// Acknowledge (pause) the alarm currently presented.
    fn pause_current_alarm(&mut self);

    fn set_operating_mode(&mut self, mode: OperatingMode);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

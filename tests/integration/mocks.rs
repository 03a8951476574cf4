//! Recording mocks for integration tests.
//!
//! Every port call is recorded so tests can assert on the full command
//! history without tasks, widgets or hardware.

use std::collections::HashMap;

use jflo_alarm::alarm::{AlarmPriority, Animation, TextKey};
use jflo_alarm::app::events::AppEvent;
use jflo_alarm::app::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, GuiNotification, HeaterCommand, MotorCommand,
    OperatingMode, OperatorPort, SystemPort, TouchPort, VideoPort,
};
use jflo_alarm::app::presenter::{AlarmPresenter, SlidePhase, SLIDE_RANGE};
use jflo_alarm::drivers::video::FrameBlit;
use jflo_alarm::fsm::context::{ButtonImage, HAlign, Screen, SlideDirection, Widget};

// ── Device side ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Heater(HeaterCommand),
    Motor(MotorCommand),
    EnableMotor,
    DisableMotor,
    PumpOff,
}

#[derive(Debug, Default)]
pub struct MockActuators {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockActuators {
    /// True if any recorded call starts or re-enables an actuator.
    pub fn any_start(&self) -> bool {
        self.calls.iter().any(|c| {
            matches!(
                c,
                ActuatorCall::EnableMotor
                    | ActuatorCall::Heater(HeaterCommand::Start)
                    | ActuatorCall::Motor(MotorCommand::Start)
            )
        })
    }
}

impl ActuatorPort for MockActuators {
    fn heater(&mut self, cmd: HeaterCommand) {
        self.calls.push(ActuatorCall::Heater(cmd));
    }

    fn motor(&mut self, cmd: MotorCommand) {
        self.calls.push(ActuatorCall::Motor(cmd));
    }

    fn enable_motor(&mut self) {
        self.calls.push(ActuatorCall::EnableMotor);
    }

    fn disable_motor(&mut self) {
        self.calls.push(ActuatorCall::DisableMotor);
    }

    fn turn_off_and_disable_pump(&mut self) {
        self.calls.push(ActuatorCall::PumpOff);
    }
}

#[derive(Debug, Default)]
pub struct MockSystem {
    pub notifications: Vec<GuiNotification>,
    pub power_offs: u32,
}

impl SystemPort for MockSystem {
    fn notify_gui(&mut self, notification: GuiNotification) {
        self.notifications.push(notification);
    }

    fn power_off(&mut self) {
        self.power_offs += 1;
    }
}

/// Both device-side ports in one value, as `handle_event` wants.
#[derive(Debug, Default)]
pub struct MockDevice {
    pub actuators: MockActuators,
    pub system: MockSystem,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[ActuatorCall] {
        &self.actuators.calls
    }

    pub fn clear(&mut self) {
        self.actuators.calls.clear();
    }
}

impl ActuatorPort for MockDevice {
    fn heater(&mut self, cmd: HeaterCommand) {
        self.actuators.heater(cmd);
    }

    fn motor(&mut self, cmd: MotorCommand) {
        self.actuators.motor(cmd);
    }

    fn enable_motor(&mut self) {
        self.actuators.enable_motor();
    }

    fn disable_motor(&mut self) {
        self.actuators.disable_motor();
    }

    fn turn_off_and_disable_pump(&mut self) {
        self.actuators.turn_off_and_disable_pump();
    }
}

impl SystemPort for MockDevice {
    fn notify_gui(&mut self, notification: GuiNotification) {
        self.system.notify_gui(notification);
    }

    fn power_off(&mut self) {
        self.system.power_off();
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── GUI side ──────────────────────────────────────────────────

/// Last-write-wins widget model plus a slide log.
#[allow(dead_code)]
#[derive(Debug)]
pub struct MockDisplay {
    pub screen: Option<Screen>,
    pub visible: HashMap<Widget, bool>,
    pub text: HashMap<Widget, TextKey>,
    pub align: HashMap<Widget, HAlign>,
    pub position: HashMap<Widget, (i16, i16)>,
    pub x: HashMap<Widget, i16>,
    pub scheme: HashMap<Widget, AlarmPriority>,
    pub button_image: HashMap<Widget, ButtonImage>,
    pub slides: Vec<SlideDirection>,
    pub pending_slide: Option<SlideDirection>,
    pub suppressed: u32,
    pub restored: u32,
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self {
            screen: Some(Screen::Main),
            visible: HashMap::new(),
            text: HashMap::new(),
            align: HashMap::new(),
            position: HashMap::new(),
            x: HashMap::new(),
            scheme: HashMap::new(),
            button_image: HashMap::new(),
            slides: Vec::new(),
            pending_slide: None,
            suppressed: 0,
            restored: 0,
        }
    }
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn is_visible(&self, widget: Widget) -> bool {
        self.visible.get(&widget).copied().unwrap_or(false)
    }

    pub fn text_of(&self, widget: Widget) -> Option<TextKey> {
        self.text.get(&widget).copied()
    }
}

impl DisplayPort for MockDisplay {
    fn active_screen(&self) -> Option<Screen> {
        self.screen
    }

    fn set_visible(&mut self, widget: Widget, visible: bool) {
        self.visible.insert(widget, visible);
    }

    fn set_text(&mut self, widget: Widget, text: TextKey) {
        self.text.insert(widget, text);
    }

    fn set_alignment(&mut self, widget: Widget, align: HAlign) {
        self.align.insert(widget, align);
    }

    fn set_position(&mut self, widget: Widget, x: i16, y: i16) {
        self.position.insert(widget, (x, y));
    }

    fn set_x(&mut self, widget: Widget, x: i16) {
        self.x.insert(widget, x);
    }

    fn set_color_scheme(&mut self, widget: Widget, priority: AlarmPriority) {
        self.scheme.insert(widget, priority);
    }

    fn set_button_image(&mut self, widget: Widget, image: ButtonImage) {
        self.button_image.insert(widget, image);
    }

    fn start_slide(&mut self, direction: SlideDirection) {
        self.slides.push(direction);
        self.pending_slide = Some(direction);
    }

    fn suppress_popups(&mut self) {
        self.suppressed += 1;
    }

    fn restore_monitor_popup(&mut self) {
        self.restored += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoCall {
    Init(Animation),
    Decode(u16),
    Blit(u16),
    Start,
    Stop,
    Release,
}

#[derive(Debug, Default)]
pub struct MockVideo {
    pub calls: Vec<VideoCall>,
}

#[allow(dead_code)]
impl MockVideo {
    pub fn blits(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, VideoCall::Blit(_))).count()
    }

    pub fn decodes(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, VideoCall::Decode(_))).count()
    }
}

impl VideoPort for MockVideo {
    fn init(&mut self, animation: Animation) {
        self.calls.push(VideoCall::Init(animation));
    }

    fn decode(&mut self, _animation: Animation, frame: u16) {
        self.calls.push(VideoCall::Decode(frame));
    }

    fn blit(&mut self, blit: &FrameBlit) {
        self.calls.push(VideoCall::Blit(blit.frame));
    }

    fn start(&mut self) {
        self.calls.push(VideoCall::Start);
    }

    fn stop(&mut self) {
        self.calls.push(VideoCall::Stop);
    }

    fn release(&mut self) {
        self.calls.push(VideoCall::Release);
    }
}

#[derive(Debug, Default)]
pub struct ManualClock {
    pub now_ms: u64,
}

impl ManualClock {
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Every GUI-side port in one value, as `run` wants.
#[derive(Debug, Default)]
pub struct MockGui {
    pub display: MockDisplay,
    pub video: MockVideo,
    pub clock: ManualClock,
    pub touched: bool,
}

#[allow(dead_code)]
impl MockGui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the presenter on the main screen, then play back any slide it
    /// started to completion.
    pub fn run(&mut self, presenter: &mut AlarmPresenter, sink: &mut RecordingSink) {
        presenter.run(self, sink);
        if let Some(direction) = self.display.pending_slide.take() {
            presenter.on_slide(direction, SlidePhase::Start, &mut self.display);
            presenter.on_slide(direction, SlidePhase::Running(SLIDE_RANGE / 2), &mut self.display);
            presenter.on_slide(direction, SlidePhase::Running(SLIDE_RANGE), &mut self.display);
            presenter.on_slide(direction, SlidePhase::End, &mut self.display);
        }
    }

    /// Advance the clock and the presenter's timers together.
    pub fn advance(&mut self, presenter: &mut AlarmPresenter, ms: u32) {
        self.clock.advance(u64::from(ms));
        presenter.tick_timers(ms, self);
    }
}

impl DisplayPort for MockGui {
    fn active_screen(&self) -> Option<Screen> {
        self.display.active_screen()
    }

    fn set_visible(&mut self, widget: Widget, visible: bool) {
        self.display.set_visible(widget, visible);
    }

    fn set_text(&mut self, widget: Widget, text: TextKey) {
        self.display.set_text(widget, text);
    }

    fn set_alignment(&mut self, widget: Widget, align: HAlign) {
        self.display.set_alignment(widget, align);
    }

    fn set_position(&mut self, widget: Widget, x: i16, y: i16) {
        self.display.set_position(widget, x, y);
    }

    fn set_x(&mut self, widget: Widget, x: i16) {
        self.display.set_x(widget, x);
    }

    fn set_color_scheme(&mut self, widget: Widget, priority: AlarmPriority) {
        self.display.set_color_scheme(widget, priority);
    }

    fn set_button_image(&mut self, widget: Widget, image: ButtonImage) {
        self.display.set_button_image(widget, image);
    }

    fn start_slide(&mut self, direction: SlideDirection) {
        self.display.start_slide(direction);
    }

    fn suppress_popups(&mut self) {
        self.display.suppress_popups();
    }

    fn restore_monitor_popup(&mut self) {
        self.display.restore_monitor_popup();
    }
}

impl TouchPort for MockGui {
    fn touched(&self) -> bool {
        self.touched
    }
}

impl ClockPort for MockGui {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl VideoPort for MockGui {
    fn init(&mut self, animation: Animation) {
        self.video.init(animation);
    }

    fn decode(&mut self, animation: Animation, frame: u16) {
        self.video.decode(animation, frame);
    }

    fn blit(&mut self, blit: &FrameBlit) {
        self.video.blit(blit);
    }

    fn start(&mut self) {
        VideoPort::start(&mut self.video);
    }

    fn stop(&mut self) {
        VideoPort::stop(&mut self.video);
    }

    fn release(&mut self) {
        self.video.release();
    }
}

// ── Operator ──────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockOperator {
    pub paused: u32,
    pub modes: Vec<OperatingMode>,
}

impl OperatorPort for MockOperator {
    fn pause_current_alarm(&mut self) {
        self.paused += 1;
    }

    fn set_operating_mode(&mut self, mode: OperatingMode) {
        self.modes.push(mode);
    }
}

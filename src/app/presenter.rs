//! GUI-side alarm orchestrator.
//!
//! [`AlarmPresenter`] owns the single presentation slot.  The GUI task
//! selects which active alarm to present (arbitration lives there) and
//! calls [`active`](AlarmPresenter::active); afterwards it calls
//! [`run`](AlarmPresenter::run) or
//! [`run_setting_screen`](AlarmPresenter::run_setting_screen) (or
//! [`run_current_surface`](AlarmPresenter::run_current_surface)) once per GUI
//! tick, plus [`tick_timers`](AlarmPresenter::tick_timers) with the elapsed
//! time.
//!
//! ```text
//!  TouchPort ─┐                                        ┌─▶ DisplayPort
//!  ClockPort ─┼─▶ AlarmPresenter ── Fsm ── UiCommands ─┼─▶ VideoPort
//!  status ────┘   (slot, blinker)                      └─▶ EventSink
//! ```
//!
//! Every widget effect is produced by the state handlers as a
//! [`UiCommand`] and applied here after the step.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::alarm::{
    AlarmKind, AlarmPayload, AlarmPriority, AlarmStatus, AlarmStatusTable, CircuitChange,
    ResetBehavior,
};
use crate::config::AlarmConfigSet;
use crate::drivers::indicator::IndicatorBlinker;
use crate::fsm::context::{
    PresentationContext, Screen, SlideDirection, UiCommand, UiCommands, VideoCommand, Widget,
};
use crate::fsm::{Fsm, StateId, Surface};

use super::commands::PresenterCommand;
use super::events::AppEvent;
use super::ports::{
    ClockPort, DisplayPort, EventSink, OperatingMode, OperatorPort, TouchPort, VideoPort,
};

/// Popup X when fully slid out.
pub const POPUP_X_HIDDEN: i16 = 272;
/// Popup X when fully slid in.
pub const POPUP_X_SHOWN: i16 = 0;
/// Slide progress runs from 0 to this value.
pub const SLIDE_RANGE: u16 = 1_000;

/// Progress report from the display's slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePhase {
    Start,
    /// Progress in `0..=SLIDE_RANGE`.
    Running(u16),
    End,
}

// ───────────────────────────────────────────────────────────────
// AlarmPresenter
// ───────────────────────────────────────────────────────────────

pub struct AlarmPresenter {
    fsm: Fsm,
    ctx: PresentationContext,
    status: Arc<AlarmStatusTable>,
    blinker: IndicatorBlinker,
    popup_x: i16,
    /// The table has shown the presented kind Active since `active()`.
    table_seen_active: bool,
}

impl AlarmPresenter {
    pub fn new(config: AlarmConfigSet, status: Arc<AlarmStatusTable>) -> Self {
        let mut ctx = PresentationContext::new(config);
        let mut fsm = Fsm::presentation();
        fsm.start(&mut ctx);
        Self {
            fsm,
            ctx,
            status,
            blinker: IndicatorBlinker::new(),
            popup_x: POPUP_X_HIDDEN,
            table_seen_active: false,
        }
    }

    // ── Slot selection ────────────────────────────────────────

    /// Present `kind`.  Replaces whatever occupied the slot.
    ///
    /// The device task may not have written the status table yet; the table
    /// only clears the slot once it has been seen Active for `kind`.
    pub fn active(&mut self, kind: AlarmKind, priority: AlarmPriority) {
        info!("alarm slot <- {kind} ({priority:?})");
        self.ctx.release_video();
        self.table_seen_active = self.status.is_active(kind);
        self.ctx.kind = kind;
        self.ctx.priority = priority;
        self.ctx.status = AlarmStatus::Active;
        self.ctx.auto_show = true;
        self.ctx.flags.mute_icon_visible = false;
        self.ctx.flags.reset_requested = false;
        self.ctx.title_since = None;
        self.fsm.force_transition(StateId::Init, &mut self.ctx);
    }

    /// Payload of the activation: additional message, message offset and
    /// reset-button override.
    pub fn set_additional_data(&mut self, payload: &AlarmPayload) {
        self.ctx.apply_payload(payload);
    }

    /// The presented alarm is no longer active; the FSM winds down on the
    /// next steps.
    pub fn inactive(&mut self) {
        self.ctx.status = AlarmStatus::Inactive;
    }

    pub fn handle_command(&mut self, cmd: PresenterCommand, sink: &mut impl EventSink) {
        match cmd {
            PresenterCommand::Active {
                kind,
                priority,
                payload,
            } => {
                self.set_additional_data(&payload);
                self.active(kind, priority);
                sink.emit(&AppEvent::Presenting { kind, priority });
            }
            PresenterCommand::Inactive => self.inactive(),
            PresenterCommand::ShowPopup => self.show_popup(),
            PresenterCommand::HidePopup => self.hide_popup(),
            PresenterCommand::SetMuteIcon(visible) => self.set_mute_icon_visible(visible),
            PresenterCommand::SetReset(reset) => self.set_reset(reset),
        }
    }

    // ── Per-tick stepping ─────────────────────────────────────

    /// One step of the main-screen machine.
    pub fn run(
        &mut self,
        gui: &mut (impl DisplayPort + TouchPort + VideoPort + ClockPort),
        sink: &mut impl EventSink,
    ) {
        self.step(Surface::Main, gui, sink);
    }

    /// One step of the setting-screen machine.
    pub fn run_setting_screen(
        &mut self,
        gui: &mut (impl DisplayPort + TouchPort + VideoPort + ClockPort),
        sink: &mut impl EventSink,
    ) {
        self.step(Surface::Setting, gui, sink);
    }

    /// One step on whichever surface the display is showing.
    pub fn run_current_surface(
        &mut self,
        gui: &mut (impl DisplayPort + TouchPort + VideoPort + ClockPort),
        sink: &mut impl EventSink,
    ) {
        match gui.active_screen() {
            Some(Screen::Setting) => self.run_setting_screen(gui, sink),
            _ => self.run(gui, sink),
        }
    }

    fn step(
        &mut self,
        surface: Surface,
        gui: &mut (impl DisplayPort + TouchPort + VideoPort + ClockPort),
        sink: &mut impl EventSink,
    ) {
        self.ctx.now_ms = gui.now_ms();
        self.ctx.screen = gui.active_screen();
        self.ctx.touched = gui.touched();
        self.follow_status_table();

        let from = self.fsm.current_state();
        self.fsm.tick(surface, &mut self.ctx);
        let commands = self.ctx.drain_commands();
        self.apply_ui(&commands, gui);

        let to = self.fsm.current_state();
        if to != from {
            sink.emit(&AppEvent::PresentationChanged { from, to });
        }
    }

    /// Clear the slot on an Active -> Inactive edge of the presented kind.
    fn follow_status_table(&mut self) {
        if !self.ctx.status.is_active() {
            return;
        }
        if self.status.is_active(self.ctx.kind) {
            self.table_seen_active = true;
        } else if self.table_seen_active {
            debug!("{} cleared in status table", self.ctx.kind);
            self.ctx.status = AlarmStatus::Inactive;
        }
    }

    /// Advance the blink and frame timers by `delta_ms`.
    pub fn tick_timers(&mut self, delta_ms: u32, gui: &mut (impl DisplayPort + VideoPort)) {
        if let Some(lit) = self.blinker.tick(delta_ms) {
            if let Some(screen) = gui.active_screen() {
                gui.set_visible(Widget::Indicator(screen), lit);
            }
        }

        for _ in 0..self.ctx.video.tick(delta_ms) {
            self.on_frame_timer(gui);
        }
    }

    /// Frame-timer callback: blit the next frame if the decoder is far
    /// enough ahead.
    pub fn on_frame_timer(&mut self, video: &mut impl VideoPort) {
        match self.ctx.video.next_blit() {
            Ok(Some(blit)) => video.blit(&blit),
            Ok(None) => {}
            Err(e) => warn!("alarm animation: {e}, frame skipped"),
        }
    }

    /// Slide-animation callback from the display.
    pub fn on_slide(
        &mut self,
        direction: SlideDirection,
        phase: SlidePhase,
        display: &mut impl DisplayPort,
    ) {
        match phase {
            SlidePhase::Start => {
                self.ctx.popup_moving = true;
                if direction == SlideDirection::In {
                    display.set_visible(Widget::MonitoringArea, false);
                }
            }
            SlidePhase::Running(progress) => {
                let x = slide_x(direction, progress);
                if x != self.popup_x {
                    self.popup_x = x;
                    display.set_x(Widget::AlarmArea, x);
                }
            }
            SlidePhase::End => {
                self.ctx.popup_moving = false;
                self.ctx.popup_shown = direction == SlideDirection::In;
            }
        }
    }

    // ── Operator entry points ─────────────────────────────────

    pub fn show_popup(&mut self) {
        self.ctx.title_since = None;
        self.ctx.video.park();
        self.fsm.force_transition(StateId::ShowPopup, &mut self.ctx);
    }

    pub fn hide_popup(&mut self) {
        self.fsm.force_transition(StateId::HidePopup, &mut self.ctx);
    }

    pub fn close_button_pressed(&mut self) {
        self.hide_popup();
    }

    pub fn reset_button_pressed(&mut self, operator: &mut impl OperatorPort) {
        match self.ctx.alarm().reset_behavior {
            ResetBehavior::Default => operator.pause_current_alarm(),
            ResetBehavior::ModeSwitch => self.switch_mode(operator),
        }
    }

    fn switch_mode(&mut self, operator: &mut impl OperatorPort) {
        let offset = self.ctx.message_offset;
        match CircuitChange::try_from(offset) {
            Ok(CircuitChange::AdultToPediatric) => {
                operator.set_operating_mode(OperatingMode::Child);
                self.inactive();
            }
            Ok(CircuitChange::PediatricToAdult) => {
                operator.set_operating_mode(OperatingMode::Adult);
                self.inactive();
            }
            Ok(change) => debug!("circuit change {change:?}: mode unchanged"),
            Err(_) => warn!("circuit change selector {offset} out of range"),
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn set_reset(&mut self, reset: bool) {
        self.ctx.flags.reset_requested = reset;
    }

    pub fn is_reset(&self) -> bool {
        self.ctx.flags.reset_requested
    }

    pub fn set_mute_icon_visible(&mut self, visible: bool) {
        self.ctx.flags.mute_icon_visible = visible;
    }

    pub fn mute_icon_visible(&self) -> bool {
        self.ctx.flags.mute_icon_visible
    }

    pub fn set_pended(&mut self, pended: bool) {
        self.ctx.pended = pended;
    }

    pub fn is_pended(&self) -> bool {
        self.ctx.pended
    }

    pub fn set_priority(&mut self, priority: AlarmPriority) {
        self.ctx.priority = priority;
    }

    pub fn priority(&self) -> AlarmPriority {
        self.ctx.priority
    }

    pub fn set_auto_show_at_init(&mut self, auto_show: bool) {
        self.ctx.auto_show = auto_show;
    }

    /// True while the slot holds an alarm.
    pub fn is_active_state(&self) -> bool {
        self.fsm.current_state() != StateId::Inactive
    }

    pub fn is_active_status(&self) -> bool {
        self.ctx.status.is_active()
    }

    pub fn kind(&self) -> AlarmKind {
        self.ctx.kind
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn popup_shown(&self) -> bool {
        self.ctx.popup_shown
    }

    /// Current indicator blink period, `None` when solid or stopped.
    pub fn blink_period_ms(&self) -> Option<u32> {
        self.blinker.period_ms()
    }

    pub fn context(&self) -> &PresentationContext {
        &self.ctx
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_ui(&mut self, commands: &UiCommands, gui: &mut (impl DisplayPort + VideoPort)) {
        for cmd in commands {
            match *cmd {
                UiCommand::SetVisible(w, visible) => gui.set_visible(w, visible),
                UiCommand::SetText(w, text) => gui.set_text(w, text),
                UiCommand::SetAlign(w, align) => gui.set_alignment(w, align),
                UiCommand::SetPosition(w, x, y) => gui.set_position(w, x, y),
                UiCommand::SetX(w, x) => gui.set_x(w, x),
                UiCommand::SetScheme(w, priority) => gui.set_color_scheme(w, priority),
                UiCommand::SetButtonImage(w, image) => gui.set_button_image(w, image),
                UiCommand::StartBlink(period) => self.blinker.start(period),
                UiCommand::StopBlink => self.blinker.stop(),
                UiCommand::StartSlide(direction) => gui.start_slide(direction),
                UiCommand::SuppressPopups => gui.suppress_popups(),
                UiCommand::RestoreMonitorPopup => gui.restore_monitor_popup(),
                UiCommand::Video(video) => match video {
                    VideoCommand::Init(animation) => VideoPort::init(gui, animation),
                    VideoCommand::Decode { animation, frame } => gui.decode(animation, frame),
                    VideoCommand::Start => VideoPort::start(gui),
                    VideoCommand::Stop => VideoPort::stop(gui),
                    VideoCommand::Release => gui.release(),
                },
            }
        }
    }
}

/// Popup X for `progress` through a slide in `direction`.
fn slide_x(direction: SlideDirection, progress: u16) -> i16 {
    let progress = i32::from(progress.min(SLIDE_RANGE));
    let span = i32::from(POPUP_X_HIDDEN - POPUP_X_SHOWN);
    let travelled = span * progress / i32::from(SLIDE_RANGE);
    let x = match direction {
        SlideDirection::In => i32::from(POPUP_X_HIDDEN) - travelled,
        SlideDirection::Out => i32::from(POPUP_X_SHOWN) + travelled,
    };
    x.clamp(i32::from(POPUP_X_SHOWN), i32::from(POPUP_X_HIDDEN)) as i16
}

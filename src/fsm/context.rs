//! Presentation context threaded through every FSM handler.
//!
//! `PresentationContext` is the blackboard for the single presentation
//! slot: which alarm is shown and how (kind, priority, payload-derived
//! sub-state), where the message cycle is, the popup's slide state, the
//! animation's frame counters, and the UI commands produced by this step.
//! State handlers never touch the display; they append [`UiCommand`]s that
//! the [`AlarmPresenter`](crate::app::presenter::AlarmPresenter) applies
//! after the tick.

use heapless::Vec;
use log::warn;

use crate::alarm::{
    registry, AlarmConfig, AlarmKind, AlarmPayload, AlarmPriority, AlarmStatus, Animation,
    RegistryFlags, ResetButtonOverride, TextKey,
};
use crate::config::AlarmConfigSet;
use crate::drivers::video::VideoControl;

// ---------------------------------------------------------------------------
// UI vocabulary
// ---------------------------------------------------------------------------

/// Display surface hosting the alarm widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Main,
    Setting,
}

/// Alarm widgets the presenter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    /// Left, right and bottom indicator panels.
    Indicator(Screen),
    TitlePanel(Screen),
    TitleLabel(Screen),
    MuteIcon(Screen),
    /// Detail title / message label inside the popup.
    InfoLabel,
    /// The sliding popup.
    AlarmArea,
    ResetButton,
    CloseButton,
    /// Main-screen monitoring area covered by the popup.
    MonitoringArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonImage {
    Ok,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    Init(Animation),
    Decode { animation: Animation, frame: u16 },
    Start,
    Stop,
    Release,
}

/// One display-side effect requested by a state handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    SetVisible(Widget, bool),
    SetText(Widget, TextKey),
    SetAlign(Widget, HAlign),
    SetPosition(Widget, i16, i16),
    SetX(Widget, i16),
    /// Colour scheme for the given priority.
    SetScheme(Widget, AlarmPriority),
    SetButtonImage(Widget, ButtonImage),
    StartBlink(u32),
    StopBlink,
    /// Stop any running popup slide and start one in `direction`.
    StartSlide(SlideDirection),
    /// Hide the monitor/setting popups and cancel their animations.
    SuppressPopups,
    /// Show the monitor popup again (unless a setting popup is up).
    RestoreMonitorPopup,
    Video(VideoCommand),
}

pub type UiCommands = Vec<UiCommand, 32>;

// ── Layout ───────────────────────────────────────────────────

pub const DETAIL_MESSAGE_POS: (i16, i16) = (24, 1);
pub const INFO_LABEL_HOME_POS: (i16, i16) = (9, 1);
pub const CLOSE_BUTTON_X_WITH_RESET: i16 = 48;
pub const CLOSE_BUTTON_X_ALONE: i16 = 88;

// ---------------------------------------------------------------------------
// PresentationContext
// ---------------------------------------------------------------------------

pub struct PresentationContext {
    // -- Timing --
    pub ticks_in_state: u64,
    pub total_ticks: u64,
    /// Monotonic time sampled at the start of the step (ms).
    pub now_ms: u64,

    // -- Selection --
    pub kind: AlarmKind,
    pub priority: AlarmPriority,
    pub status: AlarmStatus,
    pub message_offset: u8,
    pub reset_override: ResetButtonOverride,
    pub additional_enabled: bool,
    pub auto_show: bool,
    pub pended: bool,
    pub flags: RegistryFlags,

    // -- Inputs --
    pub screen: Option<Screen>,
    pub touched: bool,

    // -- Popup --
    pub popup_shown: bool,
    pub popup_moving: bool,

    // -- Message cycle --
    pub detail_title_pending: bool,
    pub detail_message_pending: bool,
    pub additional_pending: bool,
    pub title_since: Option<u64>,
    pub message_since: Option<u64>,
    pub additional_since: Option<u64>,
    pub touch_since: Option<u64>,

    pub video: VideoControl,
    pub config: AlarmConfigSet,

    // -- Output --
    pub commands: UiCommands,
}

impl PresentationContext {
    pub fn new(config: AlarmConfigSet) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            now_ms: 0,
            kind: AlarmKind::I2c1Error,
            priority: AlarmPriority::Low2,
            status: AlarmStatus::Inactive,
            message_offset: 0,
            reset_override: ResetButtonOverride::Default,
            additional_enabled: false,
            auto_show: false,
            pended: false,
            flags: RegistryFlags::default(),
            screen: None,
            touched: false,
            popup_shown: false,
            popup_moving: false,
            detail_title_pending: false,
            detail_message_pending: false,
            additional_pending: false,
            title_since: None,
            message_since: None,
            additional_since: None,
            touch_since: None,
            video: VideoControl::default(),
            config,
            commands: UiCommands::new(),
        }
    }

    /// Registry entry of the presented kind.
    pub fn alarm(&self) -> &'static AlarmConfig {
        registry().get(self.kind)
    }

    /// True while a clip is loaded in the video control.  The loaded clip
    /// may belong to a previous alarm until it is released.
    pub fn video_loaded(&self) -> bool {
        self.video.animation().is_some()
    }

    /// Stop and release whatever clip is loaded.
    pub fn release_video(&mut self) {
        if !self.video_loaded() {
            return;
        }
        self.video.stop();
        self.push(UiCommand::Video(VideoCommand::Stop));
        self.push(UiCommand::Video(VideoCommand::Release));
        self.video = VideoControl::default();
    }

    /// Take the payload-derived sub-state for this activation.
    pub fn apply_payload(&mut self, payload: &AlarmPayload) {
        self.additional_enabled = payload.additional_message_enabled();
        self.message_offset = payload.selector();
        self.reset_override = payload.reset_button();
    }

    pub fn push(&mut self, cmd: UiCommand) {
        if self.commands.push(cmd).is_err() {
            warn!("UI command buffer full, dropped {:?}", cmd);
        }
    }

    pub fn drain_commands(&mut self) -> UiCommands {
        core::mem::take(&mut self.commands)
    }

    /// Clear every message and touch timer.
    pub fn reset_timers(&mut self) {
        self.title_since = None;
        self.message_since = None;
        self.additional_since = None;
        self.touch_since = None;
    }

    /// Reset the message timers and re-arm the detail title.
    pub fn restart_message_cycle(&mut self) {
        self.additional_since = None;
        self.message_since = None;
        self.title_since = None;
        self.detail_title_pending = true;
    }

    pub fn timers_idle(&self) -> bool {
        self.title_since.is_none()
            && self.message_since.is_none()
            && self.additional_since.is_none()
            && self.touch_since.is_none()
    }

    fn elapsed_since(&self, since: u64) -> u64 {
        self.now_ms.saturating_sub(since)
    }

    // ── Message selection ────────────────────────────────────

    pub fn detail_message(&self) -> Option<TextKey> {
        self.alarm().detail_message(self.message_offset)
    }

    pub fn has_detail_message(&self) -> bool {
        self.detail_message().is_some()
    }

    /// 5 s when an additional message follows the detail message, else 10 s.
    pub fn message_timeout_ms(&self) -> u64 {
        if self.has_detail_message() && self.additional_enabled {
            self.config.message_timeout_short_ms as u64
        } else {
            self.config.message_timeout_long_ms as u64
        }
    }

    fn detail_message_due(&self) -> bool {
        self.has_detail_message() && self.detail_message_pending
    }

    fn additional_due(&self) -> bool {
        self.additional_enabled && self.additional_pending
    }

    // ── Touch inactivity ─────────────────────────────────────

    pub fn note_touch(&mut self) {
        self.touch_since = Some(self.now_ms);
    }

    /// True once the popup has gone untouched for the no-action timeout.
    pub fn no_action_timed_out(&mut self) -> bool {
        let since = self.touch_since.unwrap_or(0);
        if self.elapsed_since(since) >= self.config.popup_no_action_timeout_ms as u64 {
            self.touch_since = None;
            return true;
        }
        false
    }

    // ── Detail title ─────────────────────────────────────────

    /// Show the detail title while it is pending.  Returns true once it
    /// has been up for the title timeout (or was not pending).
    pub fn detail_title_done(&mut self) -> bool {
        if self.detail_title_pending {
            let since = match self.title_since {
                Some(t) => t,
                None => {
                    let title = registry().detail_title(self.kind);
                    self.title_since = Some(self.now_ms);
                    self.push(UiCommand::SetVisible(Widget::InfoLabel, true));
                    self.push(UiCommand::SetAlign(Widget::InfoLabel, HAlign::Center));
                    self.push(UiCommand::SetText(Widget::InfoLabel, title));
                    self.now_ms
                }
            };

            if self.elapsed_since(since) >= self.config.title_timeout_ms as u64 {
                self.push(UiCommand::SetVisible(Widget::InfoLabel, false));
                self.detail_title_pending = false;
                self.video.rewind();
                self.detail_message_pending = true;
                self.additional_pending = true;
            }
        }
        !self.detail_title_pending
    }

    // ── Detail / additional message ──────────────────────────

    /// One step of the message cycle.  Returns true when the cycle is
    /// complete.
    pub fn show_alarm_message(&mut self) -> bool {
        let timeout = self.message_timeout_ms();

        if !self.has_detail_message() && !self.additional_enabled {
            return true;
        }

        if self.detail_message_due() {
            let since = match self.message_since {
                Some(t) => t,
                None => {
                    self.message_since = Some(self.now_ms);
                    self.additional_pending = false;
                    let (x, y) = DETAIL_MESSAGE_POS;
                    let text = self.detail_message().unwrap_or(crate::alarm::registry::NULL_TEXT);
                    self.push(UiCommand::SetVisible(Widget::InfoLabel, true));
                    self.push(UiCommand::SetPosition(Widget::InfoLabel, x, y));
                    self.push(UiCommand::SetAlign(Widget::InfoLabel, HAlign::Left));
                    self.push(UiCommand::SetText(Widget::InfoLabel, text));
                    self.now_ms
                }
            };

            if self.elapsed_since(since) >= timeout {
                let (x, y) = INFO_LABEL_HOME_POS;
                self.push(UiCommand::SetPosition(Widget::InfoLabel, x, y));
                self.push(UiCommand::SetAlign(Widget::InfoLabel, HAlign::Center));
                self.push(UiCommand::SetVisible(Widget::InfoLabel, false));
                self.detail_message_pending = false;
                self.additional_pending = true;

                if !self.additional_enabled {
                    return true;
                }
            }
        }

        if self.additional_due() {
            let since = match self.additional_since {
                Some(t) => t,
                None => {
                    self.additional_since = Some(self.now_ms);
                    self.detail_message_pending = false;
                    self.push(UiCommand::SetVisible(Widget::InfoLabel, true));
                    self.push(UiCommand::SetText(
                        Widget::InfoLabel,
                        crate::alarm::registry::ADDITIONAL_MESSAGE_REMOVE_CANNULA,
                    ));
                    self.now_ms
                }
            };

            if self.elapsed_since(since) >= timeout {
                self.push(UiCommand::SetVisible(Widget::InfoLabel, false));
                self.detail_message_pending = false;
                self.additional_pending = false;
                return true;
            }
        }

        false
    }

    // ── Indicator / title / mute ─────────────────────────────

    pub fn set_indicator_visible(&mut self, visible: bool) {
        if let Some(screen) = self.screen {
            self.push(UiCommand::SetVisible(Widget::Indicator(screen), visible));
        }
    }

    /// Scheme the indicator for the current priority and restart the blink.
    pub fn update_indicator(&mut self) {
        let Some(screen) = self.screen else {
            return;
        };
        self.push(UiCommand::SetScheme(Widget::Indicator(screen), self.priority));
        self.push(UiCommand::StopBlink);
        if let Some(period) = crate::drivers::indicator::blink_period_ms(self.priority) {
            self.push(UiCommand::StartBlink(period));
        }
    }

    pub fn update_title(&mut self) {
        let Some(screen) = self.screen else {
            return;
        };
        self.push(UiCommand::SetText(Widget::TitleLabel(screen), registry().title(self.kind)));
        self.push(UiCommand::SetScheme(Widget::TitlePanel(screen), self.priority));
    }

    pub fn update_mute_icon(&mut self) {
        if let Some(screen) = self.screen {
            self.push(UiCommand::SetVisible(
                Widget::MuteIcon(screen),
                self.flags.mute_icon_visible,
            ));
        }
    }

    // ── Popup composition ────────────────────────────────────

    pub fn update_popup(&mut self) {
        let alarm = self.alarm();
        self.push(UiCommand::SetText(Widget::InfoLabel, registry().detail_title(self.kind)));
        self.push(UiCommand::SetVisible(Widget::InfoLabel, true));

        self.push(UiCommand::SetVisible(Widget::AlarmArea, alarm.popup));
        if !alarm.popup {
            return;
        }

        self.update_reset_button();
        self.push(UiCommand::SetVisible(Widget::CloseButton, alarm.close_button));
    }

    fn update_reset_button(&mut self) {
        let alarm = self.alarm();
        let configured = if alarm.has_action_button() {
            Some(if alarm.ok_button {
                ButtonImage::Ok
            } else {
                ButtonImage::Reset
            })
        } else {
            None
        };

        let button = match self.reset_override {
            ResetButtonOverride::Default => configured,
            ResetButtonOverride::Hide => None,
            ResetButtonOverride::ShowReset => Some(ButtonImage::Reset),
            ResetButtonOverride::ShowOk => Some(ButtonImage::Ok),
        };

        match button {
            Some(image) => {
                self.push(UiCommand::SetVisible(Widget::ResetButton, true));
                self.push(UiCommand::SetX(Widget::CloseButton, CLOSE_BUTTON_X_WITH_RESET));
                self.push(UiCommand::SetButtonImage(Widget::ResetButton, image));
            }
            None => {
                self.push(UiCommand::SetVisible(Widget::ResetButton, false));
                self.push(UiCommand::SetX(Widget::CloseButton, CLOSE_BUTTON_X_ALONE));
            }
        }
    }

    // ── Teardown ─────────────────────────────────────────────

    /// Tear down the main-surface presentation.
    pub fn deinit(&mut self) {
        self.release_video();
        self.push(UiCommand::StopBlink);
        self.set_indicator_visible(false);
        self.popup_shown = false;
        self.push(UiCommand::SetVisible(Widget::AlarmArea, false));
        self.push(UiCommand::SetVisible(Widget::TitlePanel(Screen::Main), false));
        self.push(UiCommand::RestoreMonitorPopup);
    }

    pub fn deinit_setting(&mut self) {
        self.push(UiCommand::StopBlink);
        self.set_indicator_visible(false);
        self.push(UiCommand::SetVisible(Widget::TitlePanel(Screen::Setting), false));
    }
}

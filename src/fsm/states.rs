//! Presentation state handlers and table builders.
//!
//! Both display surfaces share one state pointer but have their own table.
//! The main surface runs the full popup lifecycle:
//!
//! ```text
//!  INACTIVE ──[active()]──▶ INIT ──[auto show]──▶ SHOW_POPUP ──▶ ANIMATION_RUNNING
//!                            │  │                                  │  (slide in)
//!                    [reset] │  └──────────▶ IDLE ◀── PLAY_ANIMATION ◀── SHOW_DETAIL_TITLE
//!                            ▼                │
//!                          RESET      [inactive / reset / no touch]
//!                            │                ▼
//!                            │           HIDE_POPUP ──▶ ANIMATION_RUNNING (slide out)
//!                            │                                  │
//!                            └──────[inactive]────▶ COMPLETE ◀──┘
//!                                                      │
//!                                                      ▼
//!                                                  INACTIVE
//! ```
//!
//! The setting surface only knows INIT ──▶ IDLE ──▶ COMPLETE ──▶ INACTIVE;
//! every other state holds there until the main surface runs again.

use super::context::{PresentationContext, Screen, SlideDirection, UiCommand, VideoCommand, Widget};
use super::{StateDescriptor, StateId};
use crate::drivers::video::VideoControl;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builders
// ═══════════════════════════════════════════════════════════════════════════

const fn state(id: StateId, name: &'static str, on_update: fn(&mut PresentationContext) -> Option<StateId>) -> StateDescriptor {
    StateDescriptor {
        id,
        name,
        on_enter: None,
        on_exit: None,
        on_update,
    }
}

/// Main-screen table.
pub fn build_main_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            on_enter: Some(inactive_enter),
            ..state(StateId::Inactive, "Inactive", hold)
        },
        state(StateId::Init, "Init", init_update),
        state(StateId::ShowPopup, "ShowPopup", show_popup_update),
        state(StateId::AnimationRunning, "AnimationRunning", animation_running_update),
        state(StateId::ShowDetailTitle, "ShowDetailTitle", show_detail_title_update),
        state(StateId::PlayAnimation, "PlayAnimation", play_animation_update),
        state(StateId::Idle, "Idle", idle_update),
        state(StateId::HidePopup, "HidePopup", hide_popup_update),
        state(StateId::Complete, "Complete", complete_update),
        state(StateId::Reset, "Reset", reset_update),
    ]
}

/// Setting-screen table.
pub fn build_setting_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            on_enter: Some(inactive_enter),
            ..state(StateId::Inactive, "Inactive", hold)
        },
        state(StateId::Init, "Init", setting_init_update),
        state(StateId::ShowPopup, "ShowPopup", hold),
        state(StateId::AnimationRunning, "AnimationRunning", hold),
        state(StateId::ShowDetailTitle, "ShowDetailTitle", hold),
        state(StateId::PlayAnimation, "PlayAnimation", hold),
        state(StateId::Idle, "Idle", setting_idle_update),
        state(StateId::HidePopup, "HidePopup", hold),
        state(StateId::Complete, "Complete", setting_complete_update),
        state(StateId::Reset, "Reset", hold),
    ]
}

fn hold(_ctx: &mut PresentationContext) -> Option<StateId> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  INACTIVE
// ═══════════════════════════════════════════════════════════════════════════

fn inactive_enter(ctx: &mut PresentationContext) {
    ctx.reset_timers();
    ctx.detail_title_pending = false;
    ctx.detail_message_pending = false;
    ctx.additional_pending = false;
    debug!("presentation slot free");
}

// ═══════════════════════════════════════════════════════════════════════════
//  INIT: compose title, indicator and popup
// ═══════════════════════════════════════════════════════════════════════════

fn init_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if !ctx.status.is_active() {
        return Some(StateId::Inactive);
    }

    if ctx.flags.reset_requested {
        ctx.update_title();
        ctx.push(UiCommand::SetVisible(Widget::TitlePanel(Screen::Main), true));
        return Some(StateId::Reset);
    }

    info!("presenting {} ({:?})", ctx.kind, ctx.priority);
    ctx.set_indicator_visible(true);
    ctx.push(UiCommand::SetVisible(Widget::TitlePanel(Screen::Main), true));
    ctx.update_title();
    ctx.update_indicator();
    ctx.update_popup();

    ctx.release_video();
    if let Some(animation) = ctx.alarm().animation {
        ctx.video = VideoControl::init(animation);
        ctx.push(UiCommand::Video(VideoCommand::Init(animation)));
    }

    if ctx.auto_show {
        ctx.auto_show = false;
        Some(StateId::ShowPopup)
    } else {
        Some(StateId::Idle)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHOW_POPUP / HIDE_POPUP: start a slide
// ═══════════════════════════════════════════════════════════════════════════

fn show_popup_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if !ctx.alarm().popup {
        return Some(StateId::Idle);
    }

    ctx.note_touch();
    ctx.push(UiCommand::SuppressPopups);
    ctx.push(UiCommand::StartSlide(SlideDirection::In));
    ctx.title_since = None;
    ctx.detail_title_pending = true;
    Some(StateId::AnimationRunning)
}

fn hide_popup_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if ctx.video_loaded() {
        ctx.video.stop();
        ctx.push(UiCommand::Video(VideoCommand::Stop));
    }
    ctx.push(UiCommand::SetVisible(Widget::InfoLabel, false));
    ctx.message_since = None;
    ctx.additional_since = None;
    ctx.title_since = None;
    ctx.detail_title_pending = true;
    ctx.push(UiCommand::StartSlide(SlideDirection::Out));
    Some(StateId::AnimationRunning)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ANIMATION_RUNNING: wait for the slide to finish
// ═══════════════════════════════════════════════════════════════════════════

fn animation_running_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if ctx.popup_moving {
        return None;
    }

    if ctx.popup_shown {
        return Some(StateId::ShowDetailTitle);
    }

    ctx.push(UiCommand::RestoreMonitorPopup);
    if !ctx.status.is_active() {
        Some(StateId::Complete)
    } else if ctx.flags.reset_requested {
        ctx.deinit();
        ctx.push(UiCommand::SetVisible(Widget::TitlePanel(Screen::Main), true));
        Some(StateId::Reset)
    } else {
        Some(StateId::Idle)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHOW_DETAIL_TITLE / PLAY_ANIMATION
// ═══════════════════════════════════════════════════════════════════════════

/// Where to go when the alarm stops being presentable.
fn leave(ctx: &PresentationContext) -> Option<StateId> {
    if !ctx.status.is_active() {
        return Some(if ctx.popup_shown {
            StateId::HidePopup
        } else {
            StateId::Complete
        });
    }
    if ctx.flags.reset_requested {
        return Some(StateId::HidePopup);
    }
    None
}

fn show_detail_title_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if let Some(next) = leave(ctx) {
        return Some(next);
    }
    if ctx.detail_title_done() {
        return Some(StateId::PlayAnimation);
    }
    None
}

fn play_animation_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if ctx.video_loaded() && ctx.video.start() {
        ctx.push(UiCommand::Video(VideoCommand::Start));
    }
    Some(StateId::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE: message cycle, touch inactivity, mute icon
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if let Some(next) = leave(ctx) {
        return Some(next);
    }

    if ctx.popup_shown {
        if ctx.touched {
            ctx.note_touch();
        }
        if ctx.no_action_timed_out() {
            debug!("popup untouched, hiding");
            return Some(StateId::HidePopup);
        }

        if ctx.detail_title_done() && run_popup_content(ctx) {
            ctx.restart_message_cycle();
        }
    }

    ctx.update_mute_icon();
    None
}

/// Decode the next animation frame, then cycle the messages once playback
/// has passed the last frame.  Returns true when the message cycle ends.
fn run_popup_content(ctx: &mut PresentationContext) -> bool {
    if let Some(animation) = ctx.video.animation() {
        if let Some(frame) = ctx.video.next_decode() {
            ctx.push(UiCommand::Video(VideoCommand::Decode { animation, frame }));
            ctx.video.mark_decoded();
        }
        if !ctx.video.is_finished() {
            return false;
        }
    }
    ctx.show_alarm_message()
}

// ═══════════════════════════════════════════════════════════════════════════
//  COMPLETE / RESET
// ═══════════════════════════════════════════════════════════════════════════

fn complete_update(ctx: &mut PresentationContext) -> Option<StateId> {
    info!("presentation of {} complete", ctx.kind);
    ctx.deinit();
    Some(StateId::Inactive)
}

fn reset_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if ctx.status.is_active() {
        None
    } else {
        Some(StateId::Complete)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Setting surface
// ═══════════════════════════════════════════════════════════════════════════

fn setting_init_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if !ctx.status.is_active() {
        return Some(StateId::Inactive);
    }
    ctx.set_indicator_visible(true);
    ctx.push(UiCommand::SetVisible(Widget::TitlePanel(Screen::Setting), true));
    ctx.update_title();
    ctx.update_indicator();
    Some(StateId::Idle)
}

fn setting_idle_update(ctx: &mut PresentationContext) -> Option<StateId> {
    if !ctx.status.is_active() {
        return Some(StateId::Complete);
    }
    ctx.update_mute_icon();
    None
}

fn setting_complete_update(ctx: &mut PresentationContext) -> Option<StateId> {
    ctx.deinit_setting();
    Some(StateId::Inactive)
}

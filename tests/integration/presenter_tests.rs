//! GUI-side presentation flow against a recording display, video engine
//! and manual clock.

use std::sync::Arc;

use jflo_alarm::alarm::{AlarmKind, AlarmPayload, AlarmPriority, AlarmStatus, AlarmStatusTable, CircuitChange};
use jflo_alarm::app::commands::PresenterCommand;
use jflo_alarm::app::events::AppEvent;
use jflo_alarm::app::ports::OperatingMode;
use jflo_alarm::app::presenter::AlarmPresenter;
use jflo_alarm::config::AlarmConfigSet;
use jflo_alarm::fsm::context::{Screen, SlideDirection, Widget};
use jflo_alarm::fsm::StateId;

use crate::mocks::{MockGui, MockOperator, RecordingSink, VideoCall};

struct Rig {
    table: Arc<AlarmStatusTable>,
    presenter: AlarmPresenter,
    gui: MockGui,
    sink: RecordingSink,
}

fn make_rig() -> Rig {
    let table = Arc::new(AlarmStatusTable::new());
    Rig {
        presenter: AlarmPresenter::new(AlarmConfigSet::default(), Arc::clone(&table)),
        table,
        gui: MockGui::new(),
        sink: RecordingSink::new(),
    }
}

impl Rig {
    /// Mark `kind` Active in the table and hand it the slot.
    fn present(&mut self, kind: AlarmKind, priority: AlarmPriority) {
        self.table.set_status(kind, AlarmStatus::Active);
        self.presenter.active(kind, priority);
    }

    fn run(&mut self) {
        self.gui.run(&mut self.presenter, &mut self.sink);
    }

    fn run_setting(&mut self) {
        self.presenter.run_setting_screen(&mut self.gui, &mut self.sink);
    }

    /// Run until `state` is reached, at most `limit` steps.
    fn run_until(&mut self, state: StateId, limit: usize) {
        for _ in 0..limit {
            if self.presenter.state() == state {
                return;
            }
            self.run();
        }
        assert_eq!(self.presenter.state(), state, "state not reached in {limit} steps");
    }

    /// Drive a fresh activation through the slide and detail title to Idle.
    fn to_idle(&mut self) {
        self.run_until(StateId::ShowDetailTitle, 4);
        self.run();
        self.gui.advance(&mut self.presenter, 2_000);
        self.run_until(StateId::Idle, 3);
    }
}

// ── Scenario: medium-priority activation ──────────────────────

#[test]
fn medium_alarm_reaches_idle_with_blinking_indicator() {
    let mut rig = make_rig();
    rig.present(AlarmKind::BreathingCircuitChanged, AlarmPriority::Medium);

    rig.run_until(StateId::ShowDetailTitle, 4);
    assert_eq!(
        rig.gui.display.scheme.get(&Widget::Indicator(Screen::Main)),
        Some(&AlarmPriority::Medium)
    );
    assert_eq!(rig.presenter.blink_period_ms(), Some(1_000));
    assert_eq!(rig.gui.display.slides, vec![SlideDirection::In]);
    assert!(rig.presenter.popup_shown());
    assert!(!rig.gui.display.is_visible(Widget::MonitoringArea));

    // First step in the state puts the detail title up.
    rig.run();
    assert!(rig.gui.display.is_visible(Widget::InfoLabel));

    rig.gui.clock.advance(1_999);
    rig.run();
    assert_eq!(rig.presenter.state(), StateId::ShowDetailTitle);

    rig.gui.clock.advance(1);
    rig.run();
    assert_eq!(rig.presenter.state(), StateId::PlayAnimation);
    assert!(!rig.gui.display.is_visible(Widget::InfoLabel));

    rig.run();
    assert_eq!(rig.presenter.state(), StateId::Idle);
}

#[test]
fn blinker_toggles_indicator_visibility() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::High);
    rig.run();
    assert_eq!(rig.presenter.blink_period_ms(), Some(250));

    rig.gui.advance(&mut rig.presenter, 250);
    let first = rig.gui.display.is_visible(Widget::Indicator(Screen::Main));
    rig.gui.advance(&mut rig.presenter, 250);
    assert_ne!(rig.gui.display.is_visible(Widget::Indicator(Screen::Main)), first);
}

#[test]
fn low_priority_indicator_is_solid() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Low1);
    rig.run();
    assert_eq!(rig.presenter.blink_period_ms(), None);
    assert!(rig.gui.display.is_visible(Widget::Indicator(Screen::Main)));
}

// ── Clearing ──────────────────────────────────────────────────

#[test]
fn cleared_alarm_slides_out_and_frees_slot() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();

    rig.table.set_status(AlarmKind::CheckLeak, AlarmStatus::Inactive);
    rig.run_until(StateId::Inactive, 6);

    assert_eq!(rig.gui.display.slides, vec![SlideDirection::In, SlideDirection::Out]);
    assert!(!rig.presenter.is_active_state());
    assert!(!rig.presenter.popup_shown());
    assert!(rig.presenter.context().timers_idle());
    assert_eq!(rig.presenter.blink_period_ms(), None);
    assert!(!rig.gui.display.is_visible(Widget::AlarmArea));
    assert!(!rig.gui.display.is_visible(Widget::TitlePanel(Screen::Main)));
    assert!(rig.gui.display.restored >= 1);
    assert!(rig.sink.events.contains(&AppEvent::PresentationChanged {
        from: StateId::Complete,
        to: StateId::Inactive,
    }));
}

#[test]
fn presenter_follows_status_table() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckBlockage, AlarmPriority::Medium);
    assert!(rig.presenter.is_active_status());

    rig.table.set_status(AlarmKind::CheckBlockage, AlarmStatus::Inactive);
    rig.run();
    assert!(!rig.presenter.is_active_status());
    assert_eq!(rig.presenter.state(), StateId::Inactive);
}

#[test]
fn activation_ahead_of_device_tick_is_presented() {
    let mut rig = make_rig();
    rig.presenter.active(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.run();
    assert!(rig.presenter.is_active_status());
    assert_eq!(rig.presenter.state(), StateId::ShowPopup);

    // The device task catches up after the GUI has started presenting.
    rig.table.set_status(AlarmKind::CheckLeak, AlarmStatus::Active);
    rig.to_idle();
    assert!(rig.presenter.is_active_status());
    assert!(rig.presenter.popup_shown());

    // Clearing still follows the table once it has been seen Active.
    rig.table.set_status(AlarmKind::CheckLeak, AlarmStatus::Inactive);
    rig.run_until(StateId::Inactive, 6);
}

#[test]
fn setting_screen_clears_in_two_steps() {
    let mut rig = make_rig();
    rig.gui.display.screen = Some(Screen::Setting);
    rig.present(AlarmKind::LowTemperature, AlarmPriority::High);

    rig.run_setting();
    assert_eq!(rig.presenter.state(), StateId::Idle);
    assert!(rig.gui.display.is_visible(Widget::TitlePanel(Screen::Setting)));
    assert_eq!(
        rig.gui.display.scheme.get(&Widget::Indicator(Screen::Setting)),
        Some(&AlarmPriority::High)
    );

    rig.presenter.inactive();
    rig.run_setting();
    assert_eq!(rig.presenter.state(), StateId::Complete);
    rig.run_setting();
    assert_eq!(rig.presenter.state(), StateId::Inactive);
    assert!(!rig.gui.display.is_visible(Widget::TitlePanel(Screen::Setting)));
}

#[test]
fn current_surface_follows_active_screen() {
    let mut rig = make_rig();
    rig.gui.display.screen = Some(Screen::Setting);
    rig.present(AlarmKind::LowTemperature, AlarmPriority::High);

    rig.presenter.run_current_surface(&mut rig.gui, &mut rig.sink);
    assert_eq!(rig.presenter.state(), StateId::Idle);
    assert!(rig.gui.display.is_visible(Widget::TitlePanel(Screen::Setting)));
    assert!(rig.gui.display.slides.is_empty());

    rig.gui.display.screen = Some(Screen::Main);
    rig.present(AlarmKind::LowTemperature, AlarmPriority::High);
    rig.presenter.run_current_surface(&mut rig.gui, &mut rig.sink);
    assert_eq!(rig.presenter.state(), StateId::ShowPopup);
}

// ── Operator input ────────────────────────────────────────────

#[test]
fn close_button_hides_popup_but_keeps_alarm() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();

    rig.presenter.close_button_pressed();
    assert_eq!(rig.presenter.state(), StateId::HidePopup);
    rig.run_until(StateId::Idle, 3);

    assert!(!rig.presenter.popup_shown());
    assert!(rig.presenter.is_active_state());
    assert_eq!(rig.gui.display.slides.last(), Some(&SlideDirection::Out));
}

#[test]
fn untouched_popup_hides_itself() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();

    rig.gui.clock.advance(27_999);
    rig.run();
    assert_eq!(rig.presenter.state(), StateId::Idle);

    rig.gui.clock.advance(1);
    rig.run();
    assert_eq!(rig.presenter.state(), StateId::HidePopup);
}

#[test]
fn touch_keeps_popup_up() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();

    rig.gui.clock.advance(20_000);
    rig.gui.touched = true;
    rig.run();
    rig.gui.touched = false;

    rig.gui.clock.advance(20_000);
    rig.run();
    assert_eq!(rig.presenter.state(), StateId::Idle);
    assert!(rig.presenter.popup_shown());
}

#[test]
fn ok_on_circuit_change_switches_operating_mode() {
    let mut rig = make_rig();
    let mut operator = MockOperator::default();
    rig.presenter
        .set_additional_data(&AlarmPayload::with_selector(CircuitChange::AdultToPediatric as u8));
    rig.present(AlarmKind::BreathingCircuitChanged, AlarmPriority::Medium);

    rig.presenter.reset_button_pressed(&mut operator);
    assert_eq!(operator.modes, vec![OperatingMode::Child]);
    assert_eq!(operator.paused, 0);
    assert!(!rig.presenter.is_active_status());

    rig.presenter
        .set_additional_data(&AlarmPayload::with_selector(CircuitChange::PediatricToAdult as u8));
    rig.present(AlarmKind::BreathingCircuitChanged, AlarmPriority::Medium);
    rig.presenter.reset_button_pressed(&mut operator);
    assert_eq!(operator.modes, vec![OperatingMode::Child, OperatingMode::Adult]);
}

#[test]
fn disinfection_circuit_change_keeps_mode() {
    let mut rig = make_rig();
    let mut operator = MockOperator::default();
    rig.presenter
        .set_additional_data(&AlarmPayload::with_selector(CircuitChange::AdultToDisinfection as u8));
    rig.present(AlarmKind::BreathingCircuitChanged, AlarmPriority::Medium);

    rig.presenter.reset_button_pressed(&mut operator);
    assert!(operator.modes.is_empty());
    assert!(rig.presenter.is_active_status());
}

#[test]
fn reset_on_ordinary_alarm_pauses_it() {
    let mut rig = make_rig();
    let mut operator = MockOperator::default();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);

    rig.presenter.reset_button_pressed(&mut operator);
    assert_eq!(operator.paused, 1);
    assert!(operator.modes.is_empty());
}

// ── Animation playback ────────────────────────────────────────

#[test]
fn frame_timer_skips_while_decoder_is_behind() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.run();

    rig.presenter.on_frame_timer(&mut rig.gui.video);
    assert_eq!(rig.gui.video.blits(), 0);
}

#[test]
fn animation_plays_every_frame_once() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();
    assert_eq!(rig.gui.video.blits(), 0);

    for _ in 0..30 {
        rig.run();
        rig.gui.advance(&mut rig.presenter, 100);
    }
    for _ in 0..20 {
        rig.gui.advance(&mut rig.presenter, 100);
    }

    assert_eq!(rig.gui.video.decodes(), 30);
    assert_eq!(rig.gui.video.blits(), 30);
    assert!(rig.presenter.context().video.is_finished());
}

#[test]
fn replacing_animated_alarm_releases_its_clip() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();
    for _ in 0..8 {
        rig.run();
        rig.gui.advance(&mut rig.presenter, 100);
    }
    assert!(rig.presenter.context().video.is_playing());
    assert!(rig.gui.video.blits() > 0);
    rig.gui.video.calls.clear();

    rig.present(AlarmKind::NonGenuineCircuit, AlarmPriority::High);
    assert!(!rig.presenter.context().video.is_playing());
    assert_eq!(rig.presenter.context().video.animation(), None);

    rig.to_idle();
    for _ in 0..10 {
        rig.run();
        rig.gui.advance(&mut rig.presenter, 100);
    }
    // Only the teardown of the old clip; nothing of it reaches the new popup.
    assert_eq!(rig.gui.video.calls, vec![VideoCall::Stop, VideoCall::Release]);
    assert_eq!(rig.presenter.state(), StateId::Idle);

    rig.table.set_status(AlarmKind::NonGenuineCircuit, AlarmStatus::Inactive);
    rig.run_until(StateId::Inactive, 6);
    assert_eq!(rig.gui.video.calls, vec![VideoCall::Stop, VideoCall::Release]);
}

#[test]
fn cleared_animated_alarm_releases_decoder() {
    let mut rig = make_rig();
    rig.present(AlarmKind::CheckLeak, AlarmPriority::Medium);
    rig.to_idle();
    for _ in 0..5 {
        rig.run();
        rig.gui.advance(&mut rig.presenter, 100);
    }
    assert!(rig.presenter.context().video.is_playing());

    rig.table.set_status(AlarmKind::CheckLeak, AlarmStatus::Inactive);
    rig.run_until(StateId::Inactive, 6);

    assert!(!rig.presenter.context().video.is_playing());
    assert_eq!(rig.presenter.context().video.animation(), None);
    assert_eq!(rig.gui.video.calls.last(), Some(&VideoCall::Release));
    let blits = rig.gui.video.blits();
    rig.gui.advance(&mut rig.presenter, 1_000);
    assert_eq!(rig.gui.video.blits(), blits);
}

// ── Command channel ───────────────────────────────────────────

#[test]
fn commands_drive_the_slot() {
    let mut rig = make_rig();
    rig.table.set_status(AlarmKind::ExpiredCircuit, AlarmStatus::Active);

    rig.presenter.handle_command(
        PresenterCommand::Active {
            kind: AlarmKind::ExpiredCircuit,
            priority: AlarmPriority::Low2,
            payload: AlarmPayload::default(),
        },
        &mut rig.sink,
    );
    assert_eq!(rig.presenter.state(), StateId::Init);
    assert!(rig.sink.events.contains(&AppEvent::Presenting {
        kind: AlarmKind::ExpiredCircuit,
        priority: AlarmPriority::Low2,
    }));

    rig.presenter.handle_command(PresenterCommand::SetMuteIcon(true), &mut rig.sink);
    assert!(rig.presenter.mute_icon_visible());

    rig.presenter.handle_command(PresenterCommand::SetReset(true), &mut rig.sink);
    rig.run();
    assert_eq!(rig.presenter.state(), StateId::Reset);

    rig.presenter.handle_command(PresenterCommand::Inactive, &mut rig.sink);
    rig.run_until(StateId::Inactive, 3);
}

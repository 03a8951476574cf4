//! JFLO alarm core: firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Adapters (outer ring)                     │
//! │  TaskChannelAdapter   LogEventSink   HeadlessGui   MonotonicClock│
//! │  (Actuator+System)    (EventSink)    (Display/Video/Touch/Clock) │
//! │  ──────────────────── Port Trait Boundary ─────────────────────  │
//! │   device thread                         GUI thread               │
//! │  ┌───────────────────────┐   Arc    ┌─────────────────────────┐  │
//! │  │ AlarmService          │─status──▶│ AlarmPresenter          │  │
//! │  │ queue · safety · wdog │  table   │ FSM · blink · video     │  │
//! │  └───────────────────────┘          └─────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};

use jflo_alarm::adapters::headless_display::HeadlessGui;
use jflo_alarm::adapters::log_sink::LogEventSink;
use jflo_alarm::adapters::task_channels::{TaskChannelAdapter, GUI_CHANNEL, PRESENTER_CHANNEL};
use jflo_alarm::app::ports::GuiNotification;
use jflo_alarm::app::presenter::{AlarmPresenter, SlidePhase, SLIDE_RANGE};
use jflo_alarm::app::service::AlarmService;
use jflo_alarm::config::AlarmConfigSet;
use jflo_alarm::events::ALARM_CHANNEL;

const DEVICE_TASK_STACK: usize = 8 * 1024;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("JFLO alarm core v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = AlarmConfigSet::default();
    config.validate()?;

    // ── 3. Device side ────────────────────────────────────────
    let mut service = AlarmService::new(config.clone());
    let status = service.status_table();
    let device_tick = Duration::from_millis(u64::from(config.device_tick_ms));

    thread::Builder::new()
        .name("alarm-device".into())
        .stack_size(DEVICE_TASK_STACK)
        .spawn(move || {
            let mut hw = TaskChannelAdapter::new();
            let mut sink = LogEventSink::new();
            loop {
                service.handle_event(&ALARM_CHANNEL, &mut hw, &mut sink);
                if hw.power_off_requested() {
                    error!("Device task halted after power-off");
                    return;
                }
                thread::sleep(device_tick);
            }
        })?;

    // ── 4. GUI side (this thread) ─────────────────────────────
    let mut presenter = AlarmPresenter::new(config.clone(), status);
    let mut gui = HeadlessGui::new();
    let mut sink = LogEventSink::new();
    let gui_tick_ms = config.gui_tick_ms;

    info!("Alarm core ready. Entering GUI loop.");

    loop {
        while let Ok(cmd) = PRESENTER_CHANNEL.try_receive() {
            presenter.handle_command(cmd, &mut sink);
        }

        while let Ok(notification) = GUI_CHANNEL.try_receive() {
            match notification {
                GuiNotification::TurnOffMachine => {
                    warn!("GUI: stop function timed out, machine turning off");
                }
            }
        }

        if presenter.is_active_state() {
            presenter.run_current_surface(&mut gui, &mut sink);
        }

        // No panel animation: play slides back in one step.
        if let Some(direction) = gui.take_slide() {
            presenter.on_slide(direction, SlidePhase::Start, &mut gui);
            presenter.on_slide(direction, SlidePhase::Running(SLIDE_RANGE), &mut gui);
            presenter.on_slide(direction, SlidePhase::End, &mut gui);
        }

        presenter.tick_timers(gui_tick_ms, &mut gui);
        thread::sleep(Duration::from_millis(u64::from(gui_tick_ms)));
    }
}

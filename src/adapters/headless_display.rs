//! Headless GUI adapter.
//!
//! Implements the GUI-side ports without a panel: widget updates are
//! logged at `debug!`, slides are queued for the GUI loop to play back
//! through [`AlarmPresenter::on_slide`](crate::app::presenter::AlarmPresenter::on_slide),
//! and time comes from [`MonotonicClock`].  Used on boards without the LCD
//! module and for host runs.

use log::debug;

use crate::alarm::{AlarmPriority, Animation, TextKey};
use crate::app::ports::{ClockPort, DisplayPort, TouchPort, VideoPort};
use crate::drivers::video::FrameBlit;
use crate::fsm::context::{ButtonImage, HAlign, Screen, SlideDirection, Widget};

use super::time::MonotonicClock;

pub struct HeadlessGui {
    clock: MonotonicClock,
    screen: Option<Screen>,
    pending_slide: Option<SlideDirection>,
    frames_blitted: u32,
}

impl Default for HeadlessGui {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessGui {
    pub fn new() -> Self {
        Self {
            clock: MonotonicClock::new(),
            screen: Some(Screen::Main),
            pending_slide: None,
            frames_blitted: 0,
        }
    }

    pub fn set_screen(&mut self, screen: Option<Screen>) {
        self.screen = screen;
    }

    /// Slide requested since the last call, if any.
    pub fn take_slide(&mut self) -> Option<SlideDirection> {
        self.pending_slide.take()
    }

    pub fn frames_blitted(&self) -> u32 {
        self.frames_blitted
    }
}

impl DisplayPort for HeadlessGui {
    fn active_screen(&self) -> Option<Screen> {
        self.screen
    }

    fn set_visible(&mut self, widget: Widget, visible: bool) {
        debug!("ui: {widget:?} visible={visible}");
    }

    fn set_text(&mut self, widget: Widget, text: TextKey) {
        debug!("ui: {widget:?} text={text}");
    }

    fn set_alignment(&mut self, widget: Widget, align: HAlign) {
        debug!("ui: {widget:?} align={align:?}");
    }

    fn set_position(&mut self, widget: Widget, x: i16, y: i16) {
        debug!("ui: {widget:?} pos=({x},{y})");
    }

    fn set_x(&mut self, widget: Widget, x: i16) {
        debug!("ui: {widget:?} x={x}");
    }

    fn set_color_scheme(&mut self, widget: Widget, priority: AlarmPriority) {
        debug!("ui: {widget:?} scheme={priority:?}");
    }

    fn set_button_image(&mut self, widget: Widget, image: ButtonImage) {
        debug!("ui: {widget:?} image={image:?}");
    }

    fn start_slide(&mut self, direction: SlideDirection) {
        debug!("ui: slide {direction:?}");
        self.pending_slide = Some(direction);
    }

    fn suppress_popups(&mut self) {
        debug!("ui: suppress popups");
    }

    fn restore_monitor_popup(&mut self) {
        debug!("ui: restore monitor popup");
    }
}

impl TouchPort for HeadlessGui {
    fn touched(&self) -> bool {
        false
    }
}

impl ClockPort for HeadlessGui {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl VideoPort for HeadlessGui {
    fn init(&mut self, animation: Animation) {
        debug!("video: init {animation:?}");
        self.frames_blitted = 0;
    }

    fn decode(&mut self, animation: Animation, frame: u16) {
        debug!("video: decode {animation:?} #{frame}");
    }

    fn blit(&mut self, blit: &FrameBlit) {
        self.frames_blitted += 1;
        debug!("video: blit #{} ({} lines)", blit.frame, blit.lines);
    }

    fn start(&mut self) {
        debug!("video: start");
    }

    fn stop(&mut self) {
        debug!("video: stop");
    }

    fn release(&mut self) {
        debug!("video: release");
    }
}

//! Fuzz target: alarm intake and safety reaction
//!
//! Splits the input into 7-byte wire events (id, status, 5 payload bytes)
//! and feeds every decodable one to the service.  The service must never
//! panic, and an Active disqualifying alarm must always block restart.
//!
//! cargo fuzz run fuzz_alarm_stream

#![no_main]

use critical_section as _;
use libfuzzer_sys::fuzz_target;

use jflo_alarm::alarm::AlarmPayload;
use jflo_alarm::app::events::AppEvent;
use jflo_alarm::app::ports::{ActuatorPort, EventSink, HeaterCommand, MotorCommand};
use jflo_alarm::app::service::AlarmService;
use jflo_alarm::config::AlarmConfigSet;
use jflo_alarm::events::AlarmEvent;
use jflo_alarm::safety;

struct Null;

impl ActuatorPort for Null {
    fn heater(&mut self, _: HeaterCommand) {}
    fn motor(&mut self, _: MotorCommand) {}
    fn enable_motor(&mut self) {}
    fn disable_motor(&mut self) {}
    fn turn_off_and_disable_pump(&mut self) {}
}

impl EventSink for Null {
    fn emit(&mut self, _: &AppEvent) {}
}

const EVENT_LEN: usize = 2 + AlarmPayload::LEN;

fuzz_target!(|data: &[u8]| {
    let mut svc = AlarmService::new(AlarmConfigSet::default());
    let mut hw = Null;
    let mut sink = Null;

    for chunk in data.chunks_exact(EVENT_LEN) {
        let mut payload = [0u8; AlarmPayload::LEN];
        payload.copy_from_slice(&chunk[2..]);
        let Ok(event) = AlarmEvent::from_raw(chunk[0], chunk[1], payload) else {
            continue;
        };
        svc.process_event(event, &mut hw, &mut sink);

        if let Ok(kind) = event.kind() {
            if event.status.is_active() && safety::is_disqualifying(kind) {
                assert!(!svc.can_start_normal_operation());
            }
        }
    }
});

//! Fuzz target: `AlarmConfigSet::from_postcard`
//!
//! Arbitrary bytes must either decode into a configuration that passes
//! validation or be rejected with an error, never a panic.
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use jflo_alarm::config::AlarmConfigSet;

fuzz_target!(|data: &[u8]| {
    if let Ok(cfg) = AlarmConfigSet::from_postcard(data) {
        assert!(cfg.validate().is_ok());
        assert!(cfg.power_off_ticks() >= 1);
    }
});

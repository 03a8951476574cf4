//! JFLO alarm core library.
//!
//! Alarm intake, status tracking, safety interlocks and alarm presentation
//! for the heated humidifier.  Pure-logic modules are exposed for
//! integration testing; ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` inside each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod fsm;
pub mod safety;

pub mod adapters;

// Host tests need the std critical-section impl linked for embassy-sync.
#[cfg(test)]
use critical_section as _;

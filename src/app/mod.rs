//! Application core: alarm orchestration with zero direct I/O.
//!
//! The device task runs [`service::AlarmService`] (event intake, status
//! table, safety reactions, stop-function watchdog); the GUI task runs
//! [`presenter::AlarmPresenter`] (presentation slot).  Everything outside
//! goes through the port traits in [`ports`].

pub mod commands;
pub mod events;
pub mod ports;
pub mod presenter;
pub mod service;

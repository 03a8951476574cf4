//! Alarm domain model.
//!
//! Identity ([`AlarmKind`], [`AlarmStatus`], [`AlarmPriority`]), the 5-byte
//! [`AlarmPayload`], the authoritative [`AlarmStatusTable`] and the static
//! per-kind [`AlarmRegistry`].

pub mod kind;
pub mod payload;
pub mod registry;
pub mod status;

pub use kind::{AlarmKind, AlarmPriority, AlarmStatus};
pub use payload::{AlarmPayload, CircuitChange, ResetButtonOverride};
pub use registry::{
    registry, AlarmConfig, AlarmRegistry, Animation, RegistryFlags, ResetBehavior, TextKey,
};
pub use status::AlarmStatusTable;

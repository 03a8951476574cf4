//! Unified error types for the alarm core.
//!
//! Every fallible operation in the crate funnels into [`Error`].  All
//! variants are `Copy` so they can be logged and passed between the device
//! and GUI tasks without allocation.  Almost none of them escape the
//! orchestrators: the alarm core recovers locally and keeps running.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An alarm event could not be enqueued.
    Delivery(DeliveryError),
    /// A raw alarm id does not name any [`AlarmKind`](crate::alarm::AlarmKind).
    InvalidAlarmKind(u8),
    /// A raw status byte is neither Active nor Inactive.
    InvalidStatus(u8),
    /// The alarm animation pipeline could not produce a frame.
    Video(VideoError),
    /// Timing configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivery(e) => write!(f, "delivery: {e}"),
            Self::InvalidAlarmKind(raw) => write!(f, "invalid alarm kind: {raw}"),
            Self::InvalidStatus(raw) => write!(f, "invalid alarm status: {raw}"),
            Self::Video(e) => write!(f, "video: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Delivery errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The alarm queue was full; it has been cleared and the event dropped.
    QueueFull,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "alarm queue full, queue reset"),
        }
    }
}

impl From<DeliveryError> for Error {
    fn from(e: DeliveryError) -> Self {
        Self::Delivery(e)
    }
}

// ---------------------------------------------------------------------------
// Video errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoError {
    /// The decoder has not kept ahead of playback.
    FrameUnderrun { index: u16, ready: u16, total: u16 },
    /// Playback was requested before an animation was loaded.
    NotInitialised,
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameUnderrun {
                index,
                ready,
                total,
            } => write!(f, "frame underrun (index {index}, ready {ready}, total {total})"),
            Self::NotInitialised => write!(f, "no animation loaded"),
        }
    }
}

impl From<VideoError> for Error {
    fn from(e: VideoError) -> Self {
        Self::Video(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

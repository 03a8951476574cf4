//! Alarm animation frame pacing.
//!
//! Instructional animations are stored as compressed frames.  The GUI task
//! decodes one frame per `run()` into the input buffer while the frame
//! timer blits already-decoded frames to both display buffers:
//!
//! ```text
//!  run()          decode ──▶ frame_ready++           (until ready == total)
//!  frame timer    blit(frame_index) ──▶ frame_index++  (while index < total)
//! ```
//!
//! Playback stays [`FRAME_DECODE_DELAY`] frames behind the decoder until the
//! whole clip is decoded; a timer tick that would overtake it is an
//! underrun and the frame is skipped.
//!
//! Asset geometry is authored in landscape coordinates; the panel is mounted
//! portrait, so [`VideoControl::init`] swaps the axes.

use crate::alarm::Animation;
use crate::error::VideoError;

use super::timer::PeriodicTimer;

/// Frames the decoder must stay ahead of playback.
pub const FRAME_DECODE_DELAY: u16 = 2;

/// Portrait panel size.
pub const SCREEN_WIDTH: u32 = 272;
pub const SCREEN_HEIGHT: u32 = 480;

const VIDEO_POS_X: u16 = 36;
const VIDEO_POS_Y: u16 = 100;
const VIDEO_WIDTH: u16 = 200;
const VIDEO_HEIGHT: u16 = 120;
const BYTES_PER_PIXEL: u8 = 2;
const FRAME_RATE_MS: u16 = 100;

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Landscape geometry and size of one animation clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationAsset {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub bytes_per_pixel: u8,
    pub frame_rate_ms: u16,
    pub frame_count: u16,
}

impl AnimationAsset {
    /// Decoded size of the whole clip.
    pub const fn size_in_bytes(&self) -> u32 {
        self.width as u32 * self.height as u32 * self.bytes_per_pixel as u32 * self.frame_count as u32
    }
}

const fn clip(frame_count: u16) -> AnimationAsset {
    AnimationAsset {
        x: VIDEO_POS_X,
        y: VIDEO_POS_Y,
        width: VIDEO_WIDTH,
        height: VIDEO_HEIGHT,
        bytes_per_pixel: BYTES_PER_PIXEL,
        frame_rate_ms: FRAME_RATE_MS,
        frame_count,
    }
}

impl Animation {
    pub const fn asset(self) -> AnimationAsset {
        match self {
            Animation::CheckTubeConnection => clip(40),
            Animation::CheckForLeaks => clip(30),
            Animation::CheckForBlockage => clip(30),
        }
    }
}

// ---------------------------------------------------------------------------
// Blit description
// ---------------------------------------------------------------------------

/// One frame copy, line by line, from the decoded input buffer into the
/// frame buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBlit {
    pub frame: u16,
    /// Byte offset of the frame's first line in the input buffer.
    pub src_offset: u32,
    /// Byte offset of the first destination line in the frame buffer.
    pub dest_offset: u32,
    pub line_bytes: u32,
    /// Destination stride (one screen row).
    pub dest_stride: u32,
    /// Lines to copy, clipped to both buffers.
    pub lines: u32,
}

// ---------------------------------------------------------------------------
// VideoControl
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct VideoControl {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub bytes_per_pixel: u8,
    pub frame_rate_ms: u16,
    pub input_size: u32,
    pub frame_total: u16,
    pub frame_ready: u16,
    pub frame_index: u16,
    timer: PeriodicTimer,
    loaded: Option<Animation>,
}

impl VideoControl {
    /// Load `animation`, rotating its geometry to portrait.
    pub fn init(animation: Animation) -> Self {
        let asset = animation.asset();
        let mut vc = Self {
            x: asset.y,
            y: asset.x,
            w: asset.height,
            h: asset.width,
            bytes_per_pixel: asset.bytes_per_pixel,
            frame_rate_ms: asset.frame_rate_ms,
            input_size: asset.size_in_bytes(),
            loaded: Some(animation),
            ..Self::default()
        };
        vc.frame_total = (vc.input_size / vc.frame_size().max(1)) as u16;
        vc
    }

    pub fn animation(&self) -> Option<Animation> {
        self.loaded
    }

    pub fn frame_size(&self) -> u32 {
        self.line_bytes() * self.h as u32
    }

    fn line_bytes(&self) -> u32 {
        self.w as u32 * self.bytes_per_pixel as u32
    }

    /// Next frame the decoder should produce, if any remain.
    pub fn next_decode(&self) -> Option<u16> {
        (self.loaded.is_some() && self.frame_ready < self.frame_total).then_some(self.frame_ready)
    }

    pub fn mark_decoded(&mut self) {
        if self.frame_ready < self.frame_total {
            self.frame_ready += 1;
        }
    }

    /// Rewind playback to the first frame.
    pub fn rewind(&mut self) {
        self.frame_index = 0;
    }

    /// Hold playback past the last frame so the timer idles.
    pub fn park(&mut self) {
        self.frame_index = self.frame_total;
    }

    pub fn is_finished(&self) -> bool {
        self.frame_index >= self.frame_total
    }

    // ── Frame timer ──────────────────────────────────────────

    pub fn start(&mut self) -> bool {
        self.timer.start(self.frame_rate_ms as u32)
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_running()
    }

    /// Advance the frame timer; returns expiries due.
    pub fn tick(&mut self, delta_ms: u32) -> u32 {
        self.timer.tick(delta_ms)
    }

    /// One frame-timer step.
    ///
    /// `Ok(None)` once playback has passed the last frame, `Err` when the
    /// decoder has not kept far enough ahead.
    pub fn next_blit(&mut self) -> Result<Option<FrameBlit>, VideoError> {
        if self.loaded.is_none() {
            return Err(VideoError::NotInitialised);
        }
        if self.frame_index >= self.frame_total {
            return Ok(None);
        }
        if self.frame_ready < self.frame_total
            && self.frame_index + FRAME_DECODE_DELAY >= self.frame_ready
        {
            return Err(VideoError::FrameUnderrun {
                index: self.frame_index,
                ready: self.frame_ready,
                total: self.frame_total,
            });
        }

        let blit = self.describe(self.frame_index);
        self.frame_index += 1;
        Ok(Some(blit))
    }

    fn describe(&self, frame: u16) -> FrameBlit {
        let bpp = self.bytes_per_pixel as u32;
        let line_bytes = self.line_bytes();
        let dest_stride = SCREEN_WIDTH * bpp;
        let src_offset = frame as u32 * self.frame_size();
        let dest_offset = (self.x as u32 + self.y as u32 * SCREEN_WIDTH) * bpp;

        let screen_size = SCREEN_WIDTH * SCREEN_HEIGHT * bpp;
        let mut lines = 0;
        while lines < self.h as u32 {
            let dest = dest_offset + lines * dest_stride;
            let src = src_offset + lines * line_bytes;
            if dest + line_bytes > screen_size || src + line_bytes > self.input_size {
                break;
            }
            lines += 1;
        }

        FrameBlit {
            frame,
            src_offset,
            dest_offset,
            line_bytes,
            dest_stride,
            lines,
        }
    }
}

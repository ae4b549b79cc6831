//! Frame clock for the viewer.
//!
//! The simulation itself is frame-stepped: it never reads wall time. The
//! clock only counts frames, measures FPS for the window title, and owns
//! the pause flag.
//!
//! # Example
//!
//! ```ignore
//! use hvac_flow::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In the redraw handler:
//! if clock.tick() {
//!     sim.advance(params);
//! }
//! println!("FPS: {:.1}", clock.fps());
//! ```

use std::time::{Duration, Instant};

/// Frame counter with periodic FPS sampling and a pause toggle.
#[derive(Debug)]
pub struct FrameClock {
    /// Total frames presented, paused or not.
    frame_count: u64,
    /// Frames on which the simulation was stepped.
    stepped_frames: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    paused: bool,
}

impl FrameClock {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(500))
    }

    /// Create a clock that refreshes its FPS figure every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            frame_count: 0,
            stepped_frames: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval: interval,
            paused: false,
        }
    }

    /// Record one presented frame.
    ///
    /// Returns `true` when the simulation should be stepped this frame,
    /// i.e. when the clock is not paused.
    pub fn tick(&mut self) -> bool {
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        if self.paused {
            return false;
        }
        self.stepped_frames += 1;
        true
    }

    /// Total frames presented.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames on which the simulation advanced.
    #[inline]
    pub fn stepped_frames(&self) -> u64 {
        self.stepped_frames
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Restart the stepped-frame count, e.g. after a respawn.
    pub fn reset_steps(&mut self) {
        self.stepped_frames = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

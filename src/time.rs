//! Frame clock for the host loop.
//!
//! The simulation itself advances by a fixed [`TICK`](crate::profile::TICK)
//! per redraw; this clock only counts frames, measures FPS for the window
//! title and remembers whether the simulation is paused.

use std::time::{Duration, Instant};

/// How often the FPS figure is recomputed.
pub const FPS_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct FrameClock {
    /// Total frames since start.
    frame_count: u64,
    /// Frames in which the simulation advanced.
    simulated_frames: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            frame_count: 0,
            simulated_frames: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            paused: false,
        }
    }

    /// Record a frame. Returns `true` if the simulation should tick.
    pub fn frame(&mut self) -> bool {
        self.frame_at(Instant::now())
    }

    /// Like [`FrameClock::frame`] with an explicit timestamp.
    pub fn frame_at(&mut self, now: Instant) -> bool {
        self.frame_count += 1;
        if !self.paused {
            self.simulated_frames += 1;
        }

        let since = now.saturating_duration_since(self.fps_update_time);
        if since >= FPS_UPDATE_INTERVAL {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        !self.paused
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn simulated_frames(&self) -> u64 {
        self.simulated_frames
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause state and return the new one.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frames(), 0);
        assert_eq!(clock.fps(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_fps_refresh() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        for i in 1..=30 {
            clock.frame_at(start + Duration::from_millis(i * 10));
        }
        // 300ms in, no refresh yet.
        assert_eq!(clock.fps(), 0.0);

        for i in 31..=60 {
            clock.frame_at(start + Duration::from_millis(i * 10));
        }
        // Refreshed at 500ms after 50 frames.
        assert!((clock.fps() - 100.0).abs() < 0.5);
        assert_eq!(clock.frames(), 60);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        assert!(clock.frame_at(start));
        assert!(clock.toggle_pause());
        assert!(!clock.frame_at(start));
        assert!(!clock.frame_at(start));
        assert!(!clock.toggle_pause());
        assert!(clock.frame_at(start));

        assert_eq!(clock.frames(), 4);
        assert_eq!(clock.simulated_frames(), 2);
    }
}

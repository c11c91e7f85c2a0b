//! Frame timing: the animation driver's clock

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame-rate summary over the recent history window
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct FpsStats {
    pub avg: f32,
    pub min: f32,
    pub max: f32,
    pub frame_count: u64,
}

/// Tracks frame timing and supplies the millisecond timestamp that drives
/// sway and flicker animation
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    /// (timestamp, frame_time_secs) for the last `HISTORY` of frames
    frame_history: VecDeque<(Instant, f32)>,
}

impl FrameTimer {
    const HISTORY: Duration = Duration::from_secs(5);

    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            frame_history: VecDeque::new(),
        }
    }

    /// Call once per frame to update timing
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        self.frame_history.push_back((now, self.delta.as_secs_f32()));
        while let Some(&(timestamp, _)) = self.frame_history.front() {
            if now.saturating_duration_since(timestamp) > Self::HISTORY {
                self.frame_history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Milliseconds since the timer was created, monotonically increasing
    pub fn elapsed_ms(&self) -> f64 {
        self.last_frame.saturating_duration_since(self.start).as_secs_f64() * 1000.0
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frame-rate statistics over the history window
    pub fn fps_stats(&self) -> FpsStats {
        let mut total_time = 0.0f32;
        let mut min_fps = f32::INFINITY;
        let mut max_fps = 0.0f32;
        let mut frames = 0u32;

        for &(_, frame_time) in self.frame_history.iter() {
            if frame_time <= 0.0 {
                continue;
            }
            let fps = 1.0 / frame_time;
            total_time += frame_time;
            min_fps = min_fps.min(fps);
            max_fps = max_fps.max(fps);
            frames += 1;
        }

        if frames == 0 {
            return FpsStats { avg: 0.0, min: 0.0, max: 0.0, frame_count: self.frame_count };
        }

        FpsStats {
            avg: frames as f32 / total_time,
            min: min_fps,
            max: max_fps,
            frame_count: self.frame_count,
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

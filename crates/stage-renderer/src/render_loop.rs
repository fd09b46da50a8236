//! Fixed-cadence frame pacing

use std::time::{Duration, Instant};

/// Decides when a frame is due and tracks the achieved frame rate.
///
/// Calls arriving before the frame interval has elapsed are skipped. The
/// remainder of each interval carries over so the cadence does not drift.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    frame_time: Duration,
    last_frame: Option<Instant>,
    running: bool,
    fps: FpsCounter,
}

impl RenderLoop {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            last_frame: None,
            running: false,
            fps: FpsCounter::default(),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.frame_time = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
    }

    pub fn start(&mut self) {
        self.running = true;
        self.last_frame = None;
    }

    /// Cancels the driver. Later `frame_due` calls return `None` until restarted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the elapsed time since the previous frame if a frame is due.
    pub fn frame_due(&mut self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        let Some(last) = self.last_frame else {
            self.last_frame = Some(now);
            self.fps.record(now);
            return Some(self.frame_time);
        };

        let delta = now.saturating_duration_since(last);
        if delta < self.frame_time {
            return None;
        }

        let frame_nanos = self.frame_time.as_nanos().max(1);
        let remainder = Duration::from_nanos((delta.as_nanos() % frame_nanos) as u64);
        self.last_frame = Some(now - remainder);
        self.fps.record(now);
        Some(delta)
    }

    /// Time until the next frame is due, for scheduling a repaint.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) => self
                .frame_time
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }
}

/// Frames per second measured over one-second windows.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn record(&mut self, now: Instant) {
        let start = *self.window_start.get_or_insert(now);
        self.frames = self.frames.saturating_add(1);
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

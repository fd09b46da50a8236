//! Looping frame player used as a video decode handle

use std::time::Duration;

use stage_renderer::{VideoDecoder, VideoFrame};

/// Plays pre-decoded frames in a loop.
///
/// A new frame is flagged whenever playback crosses a frame boundary or the
/// player is rewound, so paused players never cause texture uploads.
pub struct GifPlayer {
    frames: Vec<(VideoFrame, Duration)>,
    index: usize,
    clock: Duration,
    playing: bool,
    pending: bool,
    dimensions: (u32, u32),
}

impl GifPlayer {
    pub fn new(frames: Vec<(VideoFrame, Duration)>) -> Self {
        // Zero delays would never let the clock drain
        let frames: Vec<_> = frames
            .into_iter()
            .map(|(frame, delay)| (frame, delay.max(Duration::from_millis(1))))
            .collect();
        let dimensions = frames
            .first()
            .map(|(f, _)| (f.width, f.height))
            .unwrap_or((0, 0));
        Self {
            frames,
            index: 0,
            clock: Duration::ZERO,
            playing: false,
            pending: false,
            dimensions,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }
}

impl VideoDecoder for GifPlayer {
    fn play(&mut self) {
        if !self.frames.is_empty() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        if self.index != 0 || self.clock > Duration::ZERO {
            self.pending = !self.frames.is_empty();
        }
        self.index = 0;
        self.clock = Duration::ZERO;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn advance(&mut self, dt: Duration) {
        if !self.playing || self.frames.len() < 2 {
            return;
        }
        self.clock += dt;
        while let Some((_, delay)) = self.frames.get(self.index)
            && self.clock >= *delay
        {
            self.clock -= *delay;
            self.index = (self.index + 1) % self.frames.len();
            self.pending = true;
        }
    }

    fn has_new_frame(&self) -> bool {
        self.pending
    }

    fn take_frame(&mut self) -> Option<VideoFrame> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.frames.get(self.index).map(|(frame, _)| frame.clone())
    }

    fn release(&mut self) {
        self.frames = Vec::new();
        self.playing = false;
        self.pending = false;
        self.index = 0;
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}

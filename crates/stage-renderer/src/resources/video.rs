//! Video decode handles

use std::time::Duration;

/// One decoded RGBA8 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl VideoFrame {
    pub fn byte_size(&self) -> usize {
        self.rgba.len()
    }
}

/// A looping frame source backing a video texture.
pub trait VideoDecoder {
    fn play(&mut self);

    fn pause(&mut self);

    /// Seeks back to the first frame.
    fn rewind(&mut self);

    fn is_playing(&self) -> bool;

    /// Advances the playback clock. Does nothing while paused.
    fn advance(&mut self, dt: Duration);

    /// True if a frame was decoded since the last `take_frame`.
    fn has_new_frame(&self) -> bool;

    fn take_frame(&mut self) -> Option<VideoFrame>;

    /// Frees decoder state. The decoder produces no frames afterwards.
    fn release(&mut self);

    fn dimensions(&self) -> (u32, u32);
}

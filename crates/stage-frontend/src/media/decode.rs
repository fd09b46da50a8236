//! Image and GIF decoding into RGBA frames

use std::io::Cursor;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, RgbaImage};
use stage_editor::LoadError;
use stage_renderer::VideoFrame;

/// Frames shorter than this play at this delay instead
const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);
/// Delay used when a GIF frame declares none
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Size that fits within `max` on both sides, keeping the aspect ratio.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let scale = max as f32 / width.max(height) as f32;
    (
        ((width as f32 * scale).round() as u32).max(1),
        ((height as f32 * scale).round() as u32).max(1),
    )
}

fn downscale(image: RgbaImage, max: u32) -> RgbaImage {
    let (width, height) = fit_within(image.width(), image.height(), max);
    if (width, height) == image.dimensions() {
        image
    } else {
        image::imageops::resize(&image, width, height, FilterType::Triangle)
    }
}

fn decode_error(label: &str, e: impl std::fmt::Display) -> LoadError {
    LoadError::Decode {
        path: label.to_string(),
        reason: e.to_string(),
    }
}

/// Decodes a still image, downscaled to at most `max_size` per side.
pub fn decode_image(bytes: &[u8], label: &str, max_size: u32) -> Result<VideoFrame, LoadError> {
    let image = image::load_from_memory(bytes).map_err(|e| decode_error(label, e))?;
    let rgba = downscale(image.to_rgba8(), max_size);
    Ok(VideoFrame {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Decodes every frame of an animated GIF with its display duration.
pub fn decode_gif(
    bytes: &[u8],
    label: &str,
    max_size: u32,
) -> Result<Vec<(VideoFrame, Duration)>, LoadError> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| decode_error(label, e))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| decode_error(label, e))?;
    if frames.is_empty() {
        return Err(decode_error(label, "no frames"));
    }

    Ok(frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = if numer == 0 || denom == 0 {
                DEFAULT_FRAME_DELAY
            } else {
                Duration::from_micros(numer as u64 * 1000 / denom as u64).max(MIN_FRAME_DELAY)
            };
            let rgba = downscale(frame.into_buffer(), max_size);
            let frame = VideoFrame {
                width: rgba.width(),
                height: rgba.height(),
                rgba: rgba.into_raw(),
            };
            (frame, delay)
        })
        .collect())
}

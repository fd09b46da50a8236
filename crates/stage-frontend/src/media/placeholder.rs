//! Generated textures for media without loadable pixels

use stage_core::MediaKind;
use stage_renderer::VideoFrame;

const SIZE: u32 = 128;
const BORDER: u32 = 4;

fn fill_color(kind: MediaKind) -> [u8; 3] {
    match kind {
        MediaKind::Audio => [0x4a, 0x3a, 0x7a],
        MediaKind::Other => [0x70, 0x70, 0x70],
        // Failed image, video or model loads
        _ => [0x7a, 0x2e, 0x2e],
    }
}

/// Bar heights of the audio card, as fractions of the card height
fn waveform(column: u32) -> f32 {
    let t = column as f32 / SIZE as f32 * std::f32::consts::TAU * 3.0;
    0.15 + 0.25 * (t.sin() * (t * 0.37).cos()).abs()
}

/// Solid card with a lighter border. Audio cards get a waveform.
///
/// The label is drawn over the card by the viewport.
pub fn placeholder_frame(kind: MediaKind) -> VideoFrame {
    let [r, g, b] = fill_color(kind);
    let light = [r.saturating_add(60), g.saturating_add(60), b.saturating_add(60)];
    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);

    for y in 0..SIZE {
        for x in 0..SIZE {
            let border = x < BORDER || y < BORDER || x >= SIZE - BORDER || y >= SIZE - BORDER;
            let bar = kind == MediaKind::Audio && x % 6 < 3 && {
                let from_middle = (y as f32 / SIZE as f32 - 0.5).abs();
                from_middle < waveform(x)
            };
            let [pr, pg, pb] = if border || bar { light } else { [r, g, b] };
            rgba.extend_from_slice(&[pr, pg, pb, 255]);
        }
    }

    VideoFrame {
        width: SIZE,
        height: SIZE,
        rgba,
    }
}

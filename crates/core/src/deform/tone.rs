//! Whole-frame tone adjustments used by the tone-only filter kinds.

use crate::shared::frame::Frame;

/// Warm-tint channel gains: lift red, hold green, drop blue.
const WARM_GAINS: [f32; 3] = [1.08, 1.02, 0.95];

/// Box-blur radius and blend weight for the skin-smoothing pass.
const SMOOTH_RADIUS: i64 = 2;
const SMOOTH_BLEND: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneOp {
    /// Warm color cast via fixed per-channel gains.
    Warm,
    /// Mild skin smoothing: small box blur blended at half strength.
    Smooth,
}

pub fn apply_tone(frame: &mut Frame, op: ToneOp) {
    match op {
        ToneOp::Warm => warm(frame),
        ToneOp::Smooth => smooth(frame),
    }
}

fn warm(frame: &mut Frame) {
    let channels = frame.channels() as usize;
    for px in frame.data_mut().chunks_exact_mut(channels) {
        for c in 0..channels.min(3) {
            px[c] = (px[c] as f32 * WARM_GAINS[c]).min(255.0) as u8;
        }
    }
}

fn smooth(frame: &mut Frame) {
    let width = frame.width() as i64;
    let height = frame.height() as i64;
    let channels = frame.channels() as usize;
    if width == 0 || height == 0 {
        return;
    }

    let source = frame.data().to_vec();
    let data = frame.data_mut();

    for y in 0..height {
        for x in 0..width {
            let out_off = ((y * width + x) as usize) * channels;
            for c in 0..channels {
                let mut sum = 0u32;
                let mut count = 0u32;
                for ky in -SMOOTH_RADIUS..=SMOOTH_RADIUS {
                    for kx in -SMOOTH_RADIUS..=SMOOTH_RADIUS {
                        let sx = (x + kx).clamp(0, width - 1);
                        let sy = (y + ky).clamp(0, height - 1);
                        sum += source[((sy * width + sx) as usize) * channels + c] as u32;
                        count += 1;
                    }
                }
                let blurred = (sum / count) as f32;
                let original = source[out_off + c] as f32;
                data[out_off + c] =
                    (original + (blurred - original) * SMOOTH_BLEND).round() as u8;
            }
        }
    }
}

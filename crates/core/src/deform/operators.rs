//! Primitive radial distortion operators.
//!
//! All operators are backward-mapped: for every output pixel inside the
//! effect radius, a source position is computed and bilinearly sampled from
//! a copy of the affected region. Pixels at or beyond the radius are left
//! untouched, so effects compose locally without smearing the whole frame.

use crate::shared::frame::Frame;
use crate::shared::geometry::ViewPoint;

/// Radial pinch/bump. `strength` in [-1, 1]: negative pulls pixels toward
/// the center (features shrink), positive pushes them outward (features
/// grow). Zero strength is the identity.
pub fn radial_warp(frame: &mut Frame, center: ViewPoint, radius: f32, strength: f32) {
    let strength = strength.clamp(-1.0, 1.0);
    if radius <= 0.0 || strength == 0.0 {
        return;
    }
    warp_region(frame, center, radius, |dx, dy, t| {
        // Displacement factor: 1 at the rim, (1 - strength) at the center.
        let f = (1.0 - strength * (1.0 - t) * (1.0 - t)).max(0.0);
        (dx * f, dy * f)
    });
}

/// Rotates pixels around `center` by an angle that falls off quadratically
/// with distance, reaching zero at the radius.
pub fn swirl(frame: &mut Frame, center: ViewPoint, radius: f32, angle: f32) {
    if radius <= 0.0 || angle == 0.0 {
        return;
    }
    warp_region(frame, center, radius, |dx, dy, t| {
        let a = angle * (1.0 - t) * (1.0 - t);
        let (sin_a, cos_a) = a.sin_cos();
        (dx * cos_a - dy * sin_a, dx * sin_a + dy * cos_a)
    });
}

/// Shared backward-mapping loop. `displace` maps an output offset from the
/// center (and normalized distance t = r/radius) to the source offset.
fn warp_region<F>(frame: &mut Frame, center: ViewPoint, radius: f32, displace: F)
where
    F: Fn(f32, f32, f32) -> (f32, f32),
{
    let width = frame.width() as i64;
    let height = frame.height() as i64;
    let channels = frame.channels() as usize;

    let x0 = ((center.x - radius).floor() as i64).max(0);
    let y0 = ((center.y - radius).floor() as i64).max(0);
    let x1 = ((center.x + radius).ceil() as i64 + 1).min(width);
    let y1 = ((center.y + radius).ceil() as i64 + 1).min(height);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let roi_w = (x1 - x0) as usize;
    let roi_h = (y1 - y0) as usize;

    // Snapshot the region so already-warped rows never feed later samples.
    let mut source = vec![0u8; roi_w * roi_h * channels];
    {
        let data = frame.data();
        for row in 0..roi_h {
            let frame_off = (((y0 as usize + row) * width as usize) + x0 as usize) * channels;
            let roi_off = row * roi_w * channels;
            source[roi_off..roi_off + roi_w * channels]
                .copy_from_slice(&data[frame_off..frame_off + roi_w * channels]);
        }
    }

    let data = frame.data_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            let r = dx.hypot(dy);
            if r >= radius {
                continue;
            }
            let t = r / radius;
            let (sdx, sdy) = displace(dx, dy, t);
            let sx = center.x + sdx - x0 as f32;
            let sy = center.y + sdy - y0 as f32;

            let offset = ((y as usize * width as usize) + x as usize) * channels;
            sample_bilinear(
                &source,
                roi_w,
                roi_h,
                channels,
                sx,
                sy,
                &mut data[offset..offset + channels],
            );
        }
    }
}

/// Bilinear sample with clamp-to-edge addressing.
fn sample_bilinear(
    source: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    x: f32,
    y: f32,
    out: &mut [u8],
) {
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    for c in 0..channels {
        let p00 = source[(y0 * width + x0) * channels + c] as f32;
        let p10 = source[(y0 * width + x1) * channels + c] as f32;
        let p01 = source[(y1 * width + x0) * channels + c] as f32;
        let p11 = source[(y1 * width + x1) * channels + c] as f32;
        let top = p00 + (p10 - p00) * fx;
        let bottom = p01 + (p11 - p01) * fx;
        out[c] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
}

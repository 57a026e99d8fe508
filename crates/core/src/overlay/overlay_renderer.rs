use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::anchors::anchor_geometry::{AnchorError, FaceAnchors};
use crate::filters::filter_kind::FilterKind;
use crate::overlay::accessory_layout::{placements, Placement};
use crate::overlay::bitmap_store::BitmapStore;
use crate::shared::frame::Frame;
use crate::shared::geometry::ViewRect;

/// Composites accessory bitmaps onto a canvas frame at anchor-derived
/// rectangles.
///
/// A missing bitmap skips that placement and leaves the canvas untouched;
/// rectangles partially outside the canvas are clipped.
pub struct OverlayRenderer {
    store: Box<dyn BitmapStore>,
}

impl OverlayRenderer {
    pub fn new(store: Box<dyn BitmapStore>) -> Self {
        Self { store }
    }

    /// Draws the accessory for `kind` onto `canvas`. Returns the anchor
    /// error when the landmark set is too short; the caller treats that as
    /// "no overlay this frame".
    pub fn render(
        &self,
        canvas: &mut Frame,
        kind: FilterKind,
        anchors: &FaceAnchors<'_>,
    ) -> Result<(), AnchorError> {
        for placement in placements(kind, anchors)? {
            self.draw(canvas, &placement);
        }
        Ok(())
    }

    fn draw(&self, canvas: &mut Frame, placement: &Placement) {
        let Some(bitmap) = self.store.load_named(placement.bitmap) else {
            log::debug!("bitmap '{}' not loaded, skipping overlay", placement.bitmap);
            return;
        };
        blend_into(canvas, &bitmap, placement.rect);
    }
}

/// Scales `bitmap` to `rect` and alpha-blends it onto the RGB canvas.
fn blend_into(canvas: &mut Frame, bitmap: &RgbaImage, rect: ViewRect) {
    let dest_w = rect.width.round() as i64;
    let dest_h = rect.height.round() as i64;
    if dest_w <= 0 || dest_h <= 0 {
        return;
    }

    let scaled = imageops::resize(bitmap, dest_w as u32, dest_h as u32, FilterType::Triangle);
    let origin_x = rect.x.round() as i64;
    let origin_y = rect.y.round() as i64;
    let channels = canvas.channels() as usize;
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);

    for (sx, sy, pixel) in scaled.enumerate_pixels() {
        let cx = origin_x + sx as i64;
        let cy = origin_y + sy as i64;
        if cx < 0 || cy < 0 || cx >= cw || cy >= ch {
            continue;
        }
        let alpha = pixel[3] as u32;
        if alpha == 0 {
            continue;
        }
        // pixel_offset bounds were just checked.
        let offset = match canvas.pixel_offset(cx as u32, cy as u32) {
            Some(o) => o,
            None => continue,
        };
        let data = canvas.data_mut();
        for c in 0..channels.min(3) {
            let src = pixel[c] as u32;
            let dst = data[offset + c] as u32;
            data[offset + c] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
        }
    }
}

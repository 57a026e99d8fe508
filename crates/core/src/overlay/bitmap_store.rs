use std::collections::HashMap;

use image::RgbaImage;

/// Source of named accessory bitmaps.
///
/// Absence is non-fatal: the renderer skips an accessory whose bitmap is
/// missing and leaves the canvas untouched for that placement.
pub trait BitmapStore: Send {
    fn load_named(&self, name: &str) -> Option<RgbaImage>;
}

/// Bitmap store backed by a plain map, filled by the application root at
/// startup (asset decoding is outside this crate).
#[derive(Default)]
pub struct InMemoryBitmapStore {
    bitmaps: HashMap<String, RgbaImage>,
}

impl InMemoryBitmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bitmap: RgbaImage) {
        self.bitmaps.insert(name.into(), bitmap);
    }
}

impl BitmapStore for InMemoryBitmapStore {
    fn load_named(&self, name: &str) -> Option<RgbaImage> {
        self.bitmaps.get(name).cloned()
    }
}

pub mod accessory_layout;
pub mod bitmap_store;
pub mod overlay_renderer;

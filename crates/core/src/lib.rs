//! Core geometry and compositing pipeline for landmark-driven face filters.
//!
//! The crate turns normalized face landmarks from an external detector into
//! accessory overlays and local geometric deformations on camera frames.
//! Detection, camera capture, asset files, and presentation all live behind
//! traits; this crate owns the math and the per-frame scheduling discipline.

pub mod anchors;
pub mod deform;
pub mod detection;
pub mod filters;
pub mod interactive;
pub mod overlay;
pub mod pipeline;
pub mod shared;

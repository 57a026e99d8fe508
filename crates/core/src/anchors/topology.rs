//! Landmark indices for the 468-point face mesh produced by the detector.
//!
//! Every mesh-specific index lives in this one table. Swapping in a detector
//! with a different topology means editing this file and nothing else.

/// Ring of points around each eye used to average a stable eye center.
pub const LEFT_EYE_RING: [usize; 7] = [33, 160, 158, 133, 153, 144, 145];
pub const RIGHT_EYE_RING: [usize; 7] = [362, 385, 387, 263, 373, 380, 374];

/// Outer eye corners, used for glasses width.
pub const LEFT_EYE_OUTER: usize = 33;
pub const RIGHT_EYE_OUTER: usize = 263;

/// Lower-lid points, used to anchor glasses vertically.
pub const LEFT_UNDER_EYE: usize = 145;
pub const RIGHT_UNDER_EYE: usize = 374;

pub const MOUTH_LEFT: usize = 61;
pub const MOUTH_RIGHT: usize = 291;
pub const UPPER_LIP: usize = 13;
pub const LOWER_LIP: usize = 14;
pub const LIP_BOTTOM: usize = 17;

pub const NOSE_TIP: usize = 1;
pub const NOSE_BOTTOM: usize = 2;

pub const CHIN: usize = 152;
pub const FOREHEAD: usize = 151;
pub const TOP_OF_HEAD: usize = 10;
pub const BROW_CENTER: usize = 9;

pub const LEFT_CHEEK: usize = 50;
pub const RIGHT_CHEEK: usize = 280;

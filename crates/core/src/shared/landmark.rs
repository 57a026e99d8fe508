/// Landmark count of the face-mesh topology the default index table targets.
pub const MESH_LANDMARK_COUNT: usize = 468;

/// One normalized facial keypoint: x, y in [0, 1], origin top-left,
/// y increasing downward. Produced by the external detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps both coordinates into [0, 1]. Noisy detectors occasionally
    /// report slightly out-of-range values; those are tolerated, not rejected.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// One detected face in one frame: an ordered, index-addressable sequence
/// of normalized landmarks. Created by the detector, consumed synchronously
/// within the same processing step.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: Vec<LandmarkPoint>,
}

impl LandmarkSet {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// Convenience constructor from (x, y) pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Self {
        Self::new(pairs.iter().map(|&(x, y)| LandmarkPoint::new(x, y)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<LandmarkPoint> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }
}

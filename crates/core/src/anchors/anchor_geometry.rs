use thiserror::Error;

use crate::anchors::topology;
use crate::shared::geometry::{FrameGeometry, ViewPoint, ViewRect};
use crate::shared::landmark::LandmarkSet;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// A required landmark index is out of range for the detected set.
    /// Callers treat this as "no overlay this frame", never as a hard failure.
    #[error("landmark index {index} out of range for set of {len} points")]
    InsufficientLandmarks { index: usize, len: usize },
}

/// Named view-space anchors derived from one landmark set.
///
/// Each accessor computes only what it needs, on demand; no anchor is
/// derived eagerly over the full mesh. All results go through the owning
/// `FrameGeometry`, so mirroring and aspect-fill are already applied.
pub struct FaceAnchors<'a> {
    landmarks: &'a LandmarkSet,
    geometry: FrameGeometry,
}

impl<'a> FaceAnchors<'a> {
    pub fn new(landmarks: &'a LandmarkSet, geometry: FrameGeometry) -> Self {
        Self {
            landmarks,
            geometry,
        }
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    fn mapped(&self, index: usize) -> Result<ViewPoint, AnchorError> {
        let lm = self
            .landmarks
            .point(index)
            .ok_or(AnchorError::InsufficientLandmarks {
                index,
                len: self.landmarks.len(),
            })?;
        Ok(self.geometry.map_point(lm))
    }

    /// Mean of a fixed index ring, mapped to view space. Mapping is affine,
    /// so averaging mapped points equals mapping the normalized average.
    fn ring_center(&self, indices: &[usize]) -> Result<ViewPoint, AnchorError> {
        let mut sx = 0.0;
        let mut sy = 0.0;
        for &i in indices {
            let p = self.mapped(i)?;
            sx += p.x;
            sy += p.y;
        }
        let n = indices.len() as f32;
        Ok(ViewPoint::new(sx / n, sy / n))
    }

    pub fn left_eye(&self) -> Result<ViewPoint, AnchorError> {
        self.ring_center(&topology::LEFT_EYE_RING)
    }

    pub fn right_eye(&self) -> Result<ViewPoint, AnchorError> {
        self.ring_center(&topology::RIGHT_EYE_RING)
    }

    pub fn eye_distance(&self) -> Result<f32, AnchorError> {
        Ok(self.left_eye()?.distance(self.right_eye()?))
    }

    pub fn eye_outer_corners(&self) -> Result<(ViewPoint, ViewPoint), AnchorError> {
        Ok((
            self.mapped(topology::LEFT_EYE_OUTER)?,
            self.mapped(topology::RIGHT_EYE_OUTER)?,
        ))
    }

    pub fn under_eye_midpoint(&self) -> Result<ViewPoint, AnchorError> {
        let l = self.mapped(topology::LEFT_UNDER_EYE)?;
        let r = self.mapped(topology::RIGHT_UNDER_EYE)?;
        Ok(l.midpoint(r))
    }

    pub fn mouth_corners(&self) -> Result<(ViewPoint, ViewPoint), AnchorError> {
        Ok((
            self.mapped(topology::MOUTH_LEFT)?,
            self.mapped(topology::MOUTH_RIGHT)?,
        ))
    }

    pub fn mouth_center(&self) -> Result<ViewPoint, AnchorError> {
        let (l, r) = self.mouth_corners()?;
        Ok(l.midpoint(r))
    }

    pub fn mouth_width(&self) -> Result<f32, AnchorError> {
        let (l, r) = self.mouth_corners()?;
        Ok(l.distance(r))
    }

    pub fn upper_lip(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::UPPER_LIP)
    }

    pub fn lower_lip(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::LOWER_LIP)
    }

    pub fn lip_bottom(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::LIP_BOTTOM)
    }

    pub fn nose_tip(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::NOSE_TIP)
    }

    pub fn nose_bottom(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::NOSE_BOTTOM)
    }

    pub fn chin(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::CHIN)
    }

    pub fn forehead(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::FOREHEAD)
    }

    pub fn top_of_head(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::TOP_OF_HEAD)
    }

    pub fn brow_center(&self) -> Result<ViewPoint, AnchorError> {
        self.mapped(topology::BROW_CENTER)
    }

    pub fn cheeks(&self) -> Result<(ViewPoint, ViewPoint), AnchorError> {
        Ok((
            self.mapped(topology::LEFT_CHEEK)?,
            self.mapped(topology::RIGHT_CHEEK)?,
        ))
    }

    /// Bounding box over the entire landmark set.
    pub fn face_bbox(&self) -> Result<ViewRect, AnchorError> {
        self.geometry
            .map_rect(self.landmarks.points())
            .ok_or(AnchorError::InsufficientLandmarks {
                index: 0,
                len: 0,
            })
    }
}

use crate::detection::domain::face_landmarker::FaceLandmarker;
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Decorator that bridges detector dropouts with the last good result.
///
/// Live preview keeps the prior overlay on a missed detection instead of
/// blanking for one frame. Detector errors still propagate; only a clean
/// "no face" is bridged.
pub struct LastGoodLandmarker {
    inner: Box<dyn FaceLandmarker>,
    last_good: Option<LandmarkSet>,
}

impl LastGoodLandmarker {
    pub fn new(inner: Box<dyn FaceLandmarker>) -> Self {
        Self {
            inner,
            last_good: None,
        }
    }
}

impl FaceLandmarker for LastGoodLandmarker {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        match self.inner.detect(frame)? {
            Some(set) => {
                self.last_good = Some(set.clone());
                Ok(Some(set))
            }
            None => Ok(self.last_good.clone()),
        }
    }
}

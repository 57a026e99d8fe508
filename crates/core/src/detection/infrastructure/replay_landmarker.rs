use std::collections::HashMap;
use std::sync::Arc;

use crate::detection::domain::face_landmarker::FaceLandmarker;
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Replays pre-computed landmark sets by frame index.
///
/// Used by tests and by capture previews where detection already ran once
/// and re-running the real detector would only repeat the work.
pub struct ReplayLandmarker {
    cache: Arc<HashMap<usize, LandmarkSet>>,
}

impl ReplayLandmarker {
    pub fn new(cache: Arc<HashMap<usize, LandmarkSet>>) -> Self {
        Self { cache }
    }
}

impl FaceLandmarker for ReplayLandmarker {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        Ok(self.cache.get(&frame.index()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize) -> Frame {
        Frame::filled(10, 10, 0, index)
    }

    fn set(x: f32) -> LandmarkSet {
        LandmarkSet::from_pairs(&[(x, 0.5)])
    }

    #[test]
    fn test_returns_cached_set_for_known_frame() {
        let cache = Arc::new(HashMap::from([(0, set(0.3))]));
        let mut landmarker = ReplayLandmarker::new(cache);
        let result = landmarker.detect(&frame(0)).unwrap();
        assert_eq!(result, Some(set(0.3)));
    }

    #[test]
    fn test_unknown_frame_is_no_detection() {
        let cache = Arc::new(HashMap::from([(0, set(0.3))]));
        let mut landmarker = ReplayLandmarker::new(cache);
        assert!(landmarker.detect(&frame(5)).unwrap().is_none());
    }

    #[test]
    fn test_different_sets_per_frame() {
        let cache = Arc::new(HashMap::from([(0, set(0.1)), (1, set(0.9))]));
        let mut landmarker = ReplayLandmarker::new(cache);
        assert_eq!(landmarker.detect(&frame(0)).unwrap(), Some(set(0.1)));
        assert_eq!(landmarker.detect(&frame(1)).unwrap(), Some(set(0.9)));
    }
}

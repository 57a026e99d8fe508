use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Interface to the external face-landmark detector.
///
/// Returns the first detected face only; additional faces in frame are
/// ignored. `None` is a valid non-error outcome meaning no face was found.
/// Implementations may be stateful (tracking, caching), hence `&mut self`.
pub trait FaceLandmarker: Send {
    fn detect(&mut self, frame: &Frame)
        -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>>;
}

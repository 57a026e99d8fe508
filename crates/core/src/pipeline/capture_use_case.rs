use crate::filters::filter_kind::FilterKind;
use crate::interactive::warp_controller::GestureEvent;
use crate::pipeline::frame_processor::{ControlHandle, FrameProcessor};
use crate::shared::frame::Frame;

/// Single-shot capture path: run the same stages as the live pipeline once,
/// synchronously, on one captured image.
///
/// Returns the composited image, or the original untouched when no filter
/// is selected or no face is found, ready to hand to a save/share
/// collaborator.
pub struct CaptureUseCase {
    processor: FrameProcessor,
    control: ControlHandle,
}

impl CaptureUseCase {
    pub fn new(processor: FrameProcessor, control: ControlHandle) -> Self {
        Self { processor, control }
    }

    pub fn set_filter(&self, kind: Option<FilterKind>) {
        self.control.set_filter(kind);
    }

    pub fn gesture(&self, event: GestureEvent) {
        self.control.gesture(event);
    }

    pub fn reset_stamps(&self) {
        self.control.reset_stamps();
    }

    pub fn capture(&mut self, image: Frame) -> Frame {
        self.processor.process(image)
    }
}

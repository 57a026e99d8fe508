use crate::deform::operators;
use crate::deform::plan::WarpOp;
use crate::deform::tone::apply_tone;
use crate::shared::frame::Frame;

/// Executes an ordered operator plan against a frame, each op consuming the
/// output of the previous. An empty plan leaves the frame untouched, which
/// is how "no face this frame" degrades.
#[derive(Default)]
pub struct DeformationEngine;

impl DeformationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn deform(&self, frame: &mut Frame, plan: &[WarpOp]) {
        for op in plan {
            match *op {
                WarpOp::Pinch {
                    center,
                    radius,
                    strength,
                } => operators::radial_warp(frame, center, radius, -strength),
                WarpOp::Bump {
                    center,
                    radius,
                    strength,
                } => operators::radial_warp(frame, center, radius, strength),
                WarpOp::Swirl {
                    center,
                    radius,
                    angle,
                } => operators::swirl(frame, center, radius, angle),
                WarpOp::Tone(tone) => apply_tone(frame, tone),
            }
        }
    }
}

use std::time::Instant;

use image::imageops;

use crate::anchors::anchor_geometry::FaceAnchors;
use crate::deform::engine::DeformationEngine;
use crate::deform::plan::{deformation_plan, stamp_plan};
use crate::detection::domain::face_landmarker::FaceLandmarker;
use crate::filters::filter_kind::FilterKind;
use crate::interactive::warp_controller::{GestureEvent, InteractiveWarpController};
use crate::overlay::bitmap_store::BitmapStore;
use crate::overlay::overlay_renderer::OverlayRenderer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;
use crate::shared::geometry::FrameGeometry;
use crate::shared::landmark::LandmarkSet;

/// Commands mutated from the UI-owning thread and drained on the worker at
/// the start of each frame, so processor state is never shared live across
/// threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    SetFilter(Option<FilterKind>),
    ResetStamps,
    Gesture(GestureEvent),
}

/// UI-side sender for control events. Sends never block; events queue until
/// the next processed frame.
#[derive(Clone)]
pub struct ControlHandle {
    tx: crossbeam_channel::Sender<ControlEvent>,
}

impl ControlHandle {
    pub fn send(&self, event: ControlEvent) {
        // A dropped processor means shutdown; losing control events then
        // is harmless.
        let _ = self.tx.send(event);
    }

    pub fn set_filter(&self, kind: Option<FilterKind>) {
        self.send(ControlEvent::SetFilter(kind));
    }

    pub fn gesture(&self, event: GestureEvent) {
        self.send(ControlEvent::Gesture(event));
    }

    pub fn reset_stamps(&self) {
        self.send(ControlEvent::ResetStamps);
    }
}

/// The per-frame stage: detect, derive anchors, composite.
///
/// Owns everything a frame touches, so the whole stage can move onto the
/// worker thread. The contract is "always produce some image": every soft
/// failure (no face, short landmark set, missing bitmap, bad geometry)
/// degrades to the unmodified input.
pub struct FrameProcessor {
    landmarker: Box<dyn FaceLandmarker>,
    renderer: OverlayRenderer,
    engine: DeformationEngine,
    controller: InteractiveWarpController,
    filter: Option<FilterKind>,
    view_size: (u32, u32),
    mirrored: bool,
    logger: Box<dyn PipelineLogger>,
    control_rx: crossbeam_channel::Receiver<ControlEvent>,
}

impl FrameProcessor {
    pub fn new(
        landmarker: Box<dyn FaceLandmarker>,
        store: Box<dyn BitmapStore>,
        view_size: (u32, u32),
        mirrored: bool,
        logger: Box<dyn PipelineLogger>,
    ) -> (Self, ControlHandle) {
        let (tx, control_rx) = crossbeam_channel::unbounded();
        let processor = Self {
            landmarker,
            renderer: OverlayRenderer::new(store),
            engine: DeformationEngine::new(),
            controller: InteractiveWarpController::new(),
            filter: None,
            view_size,
            mirrored,
            logger,
            control_rx,
        };
        (processor, ControlHandle { tx })
    }

    pub fn filter(&self) -> Option<FilterKind> {
        self.filter
    }

    /// Runs one frame through detect, anchors, and compositing. Infallible
    /// by contract; degraded paths return the input unchanged.
    pub fn process(&mut self, frame: Frame) -> Frame {
        self.drain_control();

        let geometry = match FrameGeometry::new(
            (frame.width(), frame.height()),
            self.view_size,
            self.mirrored,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::warn!("unusable frame geometry: {e}");
                return frame;
            }
        };

        let detect_start = Instant::now();
        let detection = match self.landmarker.detect(&frame) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("landmark detection failed: {e}");
                None
            }
        };
        self.logger
            .timing("detect", detect_start.elapsed().as_secs_f64() * 1000.0);

        let compose_start = Instant::now();
        let mut canvas = match fill_into_view(&frame, &geometry) {
            Some(c) => c,
            None => return frame,
        };
        self.composite(&mut canvas, geometry, detection.as_ref());
        self.logger
            .timing("compose", compose_start.elapsed().as_secs_f64() * 1000.0);

        canvas
    }

    fn composite(
        &mut self,
        canvas: &mut Frame,
        geometry: FrameGeometry,
        detection: Option<&LandmarkSet>,
    ) {
        let Some(kind) = self.filter else {
            return;
        };

        if kind == FilterKind::InteractiveWarp {
            // Stamps carry their own geometry; no face needed.
            let plan = stamp_plan(&self.controller.snapshot());
            self.engine.deform(canvas, &plan);
            return;
        }

        if kind.is_tone_only() {
            let empty = LandmarkSet::new(Vec::new());
            let anchors = FaceAnchors::new(&empty, geometry);
            if let Ok(plan) = deformation_plan(kind, &anchors) {
                self.engine.deform(canvas, &plan);
            }
            return;
        }

        let Some(set) = detection else {
            return;
        };
        let anchors = FaceAnchors::new(set, geometry);
        let result = if kind.is_accessory() {
            self.renderer.render(canvas, kind, &anchors)
        } else {
            deformation_plan(kind, &anchors).map(|plan| self.engine.deform(canvas, &plan))
        };
        if let Err(e) = result {
            log::debug!("skipping {kind:?} this frame: {e}");
        }
    }

    fn drain_control(&mut self) {
        while let Ok(event) = self.control_rx.try_recv() {
            match event {
                ControlEvent::SetFilter(kind) => {
                    if kind != Some(FilterKind::InteractiveWarp) && self.controller.has_state() {
                        self.controller.clear();
                    }
                    self.filter = kind;
                }
                ControlEvent::ResetStamps => self.controller.reset_stamps(),
                ControlEvent::Gesture(event) => self.controller.apply(event),
            }
        }
    }

    /// Emits the logger's end-of-run summary. Called once at shutdown.
    pub fn finish(&self) {
        self.logger.summary();
    }
}

/// Aspect-fill composite of the frame into a view-sized canvas: scale by
/// the fill ratio, crop the centered overflow, then mirror for the front
/// camera. Identity-shaped geometry short-circuits to a plain copy so the
/// no-filter path stays pixel-identical.
fn fill_into_view(frame: &Frame, geometry: &FrameGeometry) -> Option<Frame> {
    let (vw, vh) = geometry.view_size();
    if geometry.frame_size() == (vw, vh) && !geometry.mirrored() {
        return Some(frame.clone());
    }

    let rgb = frame.to_rgb_image()?;
    let scale = geometry.scale();
    let scaled_w = ((frame.width() as f32) * scale).ceil().max(vw as f32) as u32;
    let scaled_h = ((frame.height() as f32) * scale).ceil().max(vh as f32) as u32;

    let mut scaled = if (scaled_w, scaled_h) == (frame.width(), frame.height()) {
        rgb
    } else {
        imageops::resize(&rgb, scaled_w, scaled_h, imageops::FilterType::Triangle)
    };
    if geometry.mirrored() {
        scaled = imageops::flip_horizontal(&scaled);
    }

    let crop_x = (scaled_w - vw) / 2;
    let crop_y = (scaled_h - vh) / 2;
    let view = imageops::crop_imm(&scaled, crop_x, crop_y, vw, vh).to_image();
    Some(Frame::from_rgb_image(view, frame.index()))
}

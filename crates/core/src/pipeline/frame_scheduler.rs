use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::filters::filter_kind::FilterKind;
use crate::interactive::warp_controller::GestureEvent;
use crate::pipeline::frame_gate::{Admission, FrameGate, MIN_FRAME_INTERVAL};
use crate::pipeline::frame_processor::{ControlEvent, ControlHandle, FrameProcessor};
use crate::shared::frame::Frame;

/// Presentation surface the scheduler publishes composited frames to.
/// Implementations own the display lifecycle; the core only hands over
/// view-sized images.
pub trait DisplaySink: Send {
    fn publish(&mut self, frame: Frame);
}

/// Live-camera orchestration: admission control on the caller thread, one
/// worker thread for detection and compositing, no queueing.
///
/// At most one frame is in flight system-wide. A frame that started
/// processing always runs to completion; its result is discarded only when
/// the filter selection changed between submit and completion.
pub struct FrameScheduler {
    gate: FrameGate,
    frame_tx: Option<crossbeam_channel::Sender<(Frame, u64)>>,
    control: ControlHandle,
    generation: Arc<AtomicU64>,
    dropped_busy: u64,
    dropped_rate: u64,
    stale_discarded: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl FrameScheduler {
    pub fn new(
        processor: FrameProcessor,
        control: ControlHandle,
        sink: Box<dyn DisplaySink>,
    ) -> Self {
        Self::with_min_interval(processor, control, sink, MIN_FRAME_INTERVAL)
    }

    pub fn with_min_interval(
        mut processor: FrameProcessor,
        control: ControlHandle,
        mut sink: Box<dyn DisplaySink>,
        min_interval: Duration,
    ) -> Self {
        let gate = FrameGate::new(min_interval);
        let busy = gate.busy_flag();
        let generation = Arc::new(AtomicU64::new(0));
        let stale_discarded = Arc::new(AtomicU64::new(0));

        // Capacity 1 is enough: the busy flag guarantees a single frame in
        // flight, the channel only hands it across threads.
        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<(Frame, u64)>(1);

        let worker_generation = Arc::clone(&generation);
        let worker_stale = Arc::clone(&stale_discarded);
        let worker = std::thread::spawn(move || {
            for (frame, submitted_generation) in frame_rx {
                let composited = processor.process(frame);
                if worker_generation.load(Ordering::Acquire) == submitted_generation {
                    sink.publish(composited);
                } else {
                    log::debug!("discarding stale result after filter change");
                    worker_stale.fetch_add(1, Ordering::Relaxed);
                }
                busy.store(false, Ordering::Release);
            }
            processor.finish();
        });

        Self {
            gate,
            frame_tx: Some(frame_tx),
            control,
            generation,
            dropped_busy: 0,
            dropped_rate: 0,
            stale_discarded,
            worker: Some(worker),
        }
    }

    /// Offers one camera frame. Returns immediately; a dropped frame is
    /// lost, never buffered.
    pub fn submit(&mut self, frame: Frame) -> Admission {
        let admission = self.gate.admit(Instant::now());
        match admission {
            Admission::Admitted => {
                let generation = self.generation.load(Ordering::Acquire);
                if let Some(tx) = &self.frame_tx {
                    // bounded(1) never blocks here: busy admits one at a time.
                    let _ = tx.send((frame, generation));
                }
            }
            Admission::DroppedBusy => {
                self.dropped_busy += 1;
                log::trace!("frame dropped: previous frame still in flight");
            }
            Admission::DroppedRate => {
                self.dropped_rate += 1;
                log::trace!("frame dropped: rate ceiling");
            }
        }
        admission
    }

    /// Changes the current filter. Results of frames submitted under the
    /// previous selection are discarded at publish time.
    pub fn set_filter(&self, kind: Option<FilterKind>) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.control.send(ControlEvent::SetFilter(kind));
    }

    pub fn gesture(&self, event: GestureEvent) {
        self.control.send(ControlEvent::Gesture(event));
    }

    pub fn reset_stamps(&self) {
        self.control.send(ControlEvent::ResetStamps);
    }

    pub fn dropped_busy(&self) -> u64 {
        self.dropped_busy
    }

    pub fn dropped_rate(&self) -> u64 {
        self.dropped_rate
    }

    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded.load(Ordering::Relaxed)
    }

    /// Stops accepting frames and waits for the in-flight frame to finish.
    pub fn shutdown(&mut self) {
        self.frame_tx = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

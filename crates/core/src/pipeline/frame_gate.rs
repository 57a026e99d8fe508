use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Throughput ceiling for the live path: at most one admitted frame every
/// 100ms (10 fps), independent of detector speed.
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Why an incoming frame was or was not admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    /// A previous frame is still in flight.
    DroppedBusy,
    /// Admitted too recently; the rate ceiling applies even when idle.
    DroppedRate,
}

/// Single-flight plus rate-limit admission control.
///
/// The busy flag is shared with the worker, which clears it when a frame
/// finishes. Dropped frames are lost, never buffered; freshness beats
/// completeness here.
pub struct FrameGate {
    busy: Arc<AtomicBool>,
    last_admitted: Option<Instant>,
    min_interval: Duration,
}

impl FrameGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            last_admitted: None,
            min_interval,
        }
    }

    /// Shared handle the worker uses to mark the frame finished.
    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    /// Decides one incoming frame. On `Admitted` the busy flag is set and
    /// stays set until the worker clears it.
    pub fn admit(&mut self, now: Instant) -> Admission {
        if self.busy.load(Ordering::Acquire) {
            return Admission::DroppedBusy;
        }
        if let Some(last) = self.last_admitted {
            if now.duration_since(last) < self.min_interval {
                return Admission::DroppedRate;
            }
        }
        self.busy.store(true, Ordering::Release);
        self.last_admitted = Some(now);
        Admission::Admitted
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(MIN_FRAME_INTERVAL)
    }
}

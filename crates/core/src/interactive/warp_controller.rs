//! Gesture state machine for user-stamped warps.
//!
//! Gestures arrive as messages from the UI-owning thread and are drained on
//! the worker at the start of each frame. The controller itself is plain
//! single-threaded state; cross-thread sharing happens only through the
//! owned snapshot it hands out.

use std::collections::BTreeMap;

use crate::shared::geometry::ViewPoint;

/// Touch radius when a pinch drag begins.
const PINCH_GESTURE_RADIUS: f32 = 80.0;
/// Touch radius when a long-press bump begins.
const BUMP_GESTURE_RADIUS: f32 = 100.0;
/// Committed stamps never shrink below this radius.
const MIN_STAMP_RADIUS: f32 = 40.0;
/// Drag distance divisor for magnitude.
const DRAG_MAGNITUDE_SCALE: f32 = 80.0;
const MAGNITUDE_CEILING: f32 = 0.6;
const PINCH_MAGNITUDE_FLOOR: f32 = 0.12;
const BUMP_MAGNITUDE_FLOOR: f32 = 0.14;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarpMode {
    Pinch,
    Bump,
}

impl WarpMode {
    fn gesture_radius(self) -> f32 {
        match self {
            WarpMode::Pinch => PINCH_GESTURE_RADIUS,
            WarpMode::Bump => BUMP_GESTURE_RADIUS,
        }
    }

    fn magnitude_floor(self) -> f32 {
        match self {
            WarpMode::Pinch => PINCH_MAGNITUDE_FLOOR,
            WarpMode::Bump => BUMP_MAGNITUDE_FLOOR,
        }
    }
}

/// A committed, persistent warp. Immutable once committed; replayed every
/// frame until reset or filter change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpStamp {
    pub center: ViewPoint,
    pub radius: f32,
    pub mode: WarpMode,
    pub magnitude: f32,
}

/// An in-flight gesture, alive between begin and end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveWarpGesture {
    pub start: ViewPoint,
    pub current: ViewPoint,
    pub radius: f32,
    pub mode: WarpMode,
}

/// Gesture messages enqueued from the UI thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Began {
        id: u64,
        point: ViewPoint,
        mode: WarpMode,
    },
    Moved {
        id: u64,
        point: ViewPoint,
    },
    Ended {
        id: u64,
    },
}

/// Per-gesture-id state machine producing persistent warp stamps.
#[derive(Default)]
pub struct InteractiveWarpController {
    // BTreeMap keeps active-gesture replay order deterministic by id.
    active: BTreeMap<u64, ActiveWarpGesture>,
    committed: Vec<WarpStamp>,
}

impl InteractiveWarpController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Began { id, point, mode } => self.begin(id, point, mode),
            GestureEvent::Moved { id, point } => self.moved(id, point),
            GestureEvent::Ended { id } => self.end(id),
        }
    }

    pub fn begin(&mut self, id: u64, point: ViewPoint, mode: WarpMode) {
        self.active.insert(
            id,
            ActiveWarpGesture {
                start: point,
                current: point,
                radius: mode.gesture_radius(),
                mode,
            },
        );
    }

    pub fn moved(&mut self, id: u64, point: ViewPoint) {
        if let Some(gesture) = self.active.get_mut(&id) {
            gesture.current = point;
        }
    }

    /// Commits the gesture as a stamp. A zero-distance release still commits
    /// at the magnitude floor, never at zero.
    pub fn end(&mut self, id: u64) {
        let Some(gesture) = self.active.remove(&id) else {
            return;
        };
        self.committed.push(stamp_from(&gesture));
    }

    pub fn committed(&self) -> &[WarpStamp] {
        &self.committed
    }

    pub fn has_state(&self) -> bool {
        !self.active.is_empty() || !self.committed.is_empty()
    }

    /// Committed stamps in insertion order, then in-flight gestures (as
    /// live-preview stamps) in ascending id order. The returned list is an
    /// owned copy safe to hand to the worker thread.
    pub fn snapshot(&self) -> Vec<WarpStamp> {
        let mut stamps = self.committed.clone();
        stamps.extend(self.active.values().map(stamp_from));
        stamps
    }

    /// Clears committed stamps only; active gestures keep dragging.
    pub fn reset_stamps(&mut self) {
        self.committed.clear();
    }

    /// Clears everything. Invoked on any filter change away from the
    /// interactive warp.
    pub fn clear(&mut self) {
        self.active.clear();
        self.committed.clear();
    }
}

fn stamp_from(gesture: &ActiveWarpGesture) -> WarpStamp {
    let distance = gesture.current.distance(gesture.start);
    let magnitude = (distance / DRAG_MAGNITUDE_SCALE)
        .clamp(gesture.mode.magnitude_floor(), MAGNITUDE_CEILING);
    WarpStamp {
        center: gesture.current,
        radius: gesture.radius.max(MIN_STAMP_RADIUS),
        mode: gesture.mode,
        magnitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn p(x: f32, y: f32) -> ViewPoint {
        ViewPoint::new(x, y)
    }

    #[test]
    fn test_begin_move_end_commits_stamp() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(100.0, 100.0), WarpMode::Pinch);
        ctl.moved(1, p(140.0, 100.0));
        ctl.end(1);

        let stamps = ctl.committed();
        assert_eq!(stamps.len(), 1);
        assert_eq!(stamps[0].center, p(140.0, 100.0));
        assert_eq!(stamps[0].mode, WarpMode::Pinch);
        // 40px drag / 80 = 0.5, within the clamp range.
        assert_relative_eq!(stamps[0].magnitude, 0.5);
        assert_relative_eq!(stamps[0].radius, 80.0);
    }

    #[rstest]
    #[case::pinch(WarpMode::Pinch, 0.12)]
    #[case::bump(WarpMode::Bump, 0.14)]
    fn test_zero_distance_release_commits_at_floor(#[case] mode: WarpMode, #[case] floor: f32) {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(50.0, 50.0), mode);
        ctl.end(1);
        assert_relative_eq!(ctl.committed()[0].magnitude, floor);
    }

    #[test]
    fn test_magnitude_clamped_at_ceiling() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(0.0, 0.0), WarpMode::Pinch);
        ctl.moved(1, p(500.0, 0.0));
        ctl.end(1);
        assert_relative_eq!(ctl.committed()[0].magnitude, 0.6);
    }

    #[test]
    fn test_bump_gesture_radius() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(0.0, 0.0), WarpMode::Bump);
        ctl.end(1);
        assert_relative_eq!(ctl.committed()[0].radius, 100.0);
    }

    #[test]
    fn test_snapshot_includes_live_preview() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(10.0, 10.0), WarpMode::Pinch);
        ctl.end(1);
        ctl.begin(2, p(90.0, 90.0), WarpMode::Bump);
        ctl.moved(2, p(120.0, 90.0));

        let snapshot = ctl.snapshot();
        assert_eq!(snapshot.len(), 2);
        // Committed first, then the in-flight gesture at its current point.
        assert_eq!(snapshot[0].center, p(10.0, 10.0));
        assert_eq!(snapshot[1].center, p(120.0, 90.0));
        // Only one stamp is actually committed.
        assert_eq!(ctl.committed().len(), 1);
    }

    #[test]
    fn test_snapshot_active_order_is_by_id() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(7, p(70.0, 0.0), WarpMode::Pinch);
        ctl.begin(3, p(30.0, 0.0), WarpMode::Pinch);

        let snapshot = ctl.snapshot();
        assert_eq!(snapshot[0].center.x, 30.0);
        assert_eq!(snapshot[1].center.x, 70.0);
    }

    #[test]
    fn test_stamps_accumulate_in_insertion_order() {
        let mut ctl = InteractiveWarpController::new();
        for (id, x) in [(1u64, 10.0f32), (2, 20.0), (3, 30.0)] {
            ctl.begin(id, p(x, 0.0), WarpMode::Pinch);
            ctl.end(id);
        }
        let xs: Vec<f32> = ctl.committed().iter().map(|s| s.center.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut ctl = InteractiveWarpController::new();
        ctl.end(9);
        ctl.moved(9, p(1.0, 1.0));
        assert!(ctl.committed().is_empty());
        assert!(!ctl.has_state());
    }

    #[test]
    fn test_reset_stamps_keeps_active_gesture() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(0.0, 0.0), WarpMode::Pinch);
        ctl.end(1);
        ctl.begin(2, p(5.0, 5.0), WarpMode::Bump);

        ctl.reset_stamps();

        assert!(ctl.committed().is_empty());
        assert_eq!(ctl.snapshot().len(), 1); // live preview survives
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut ctl = InteractiveWarpController::new();
        ctl.begin(1, p(0.0, 0.0), WarpMode::Pinch);
        ctl.end(1);
        ctl.begin(2, p(5.0, 5.0), WarpMode::Bump);

        ctl.clear();

        assert!(!ctl.has_state());
        assert!(ctl.snapshot().is_empty());
    }

    #[test]
    fn test_apply_routes_events() {
        let mut ctl = InteractiveWarpController::new();
        ctl.apply(GestureEvent::Began {
            id: 1,
            point: p(0.0, 0.0),
            mode: WarpMode::Pinch,
        });
        ctl.apply(GestureEvent::Moved {
            id: 1,
            point: p(80.0, 0.0),
        });
        ctl.apply(GestureEvent::Ended { id: 1 });
        assert_eq!(ctl.committed().len(), 1);
        assert_relative_eq!(ctl.committed()[0].magnitude, 1.0f32.clamp(0.12, 0.6));
    }
}

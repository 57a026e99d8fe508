use thiserror::Error;

use crate::shared::landmark::LandmarkPoint;

/// A point in destination (view) pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPoint {
    pub x: f32,
    pub y: f32,
}

impl ViewPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: ViewPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: ViewPoint) -> ViewPoint {
        ViewPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle in view pixel space. Width or height may be
/// zero for degenerate landmark input; consumers must not assume otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: ViewPoint, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn center(&self) -> ViewPoint {
        ViewPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, other: &ViewRect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    #[error("frame and view dimensions must be non-zero")]
    EmptyDimensions,
}

/// Mapping between detector frame space and display view space.
///
/// Uses aspect-fill semantics: the frame is scaled by the larger of the two
/// axis ratios so it fully covers the view, and the overflow is cropped by
/// centering. Front-camera frames are additionally mirrored about the
/// vertical axis before scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    frame_width: u32,
    frame_height: u32,
    view_width: u32,
    view_height: u32,
    mirrored: bool,
}

impl FrameGeometry {
    pub fn new(
        frame_size: (u32, u32),
        view_size: (u32, u32),
        mirrored: bool,
    ) -> Result<Self, GeometryError> {
        let (fw, fh) = frame_size;
        let (vw, vh) = view_size;
        if fw == 0 || fh == 0 || vw == 0 || vh == 0 {
            return Err(GeometryError::EmptyDimensions);
        }
        Ok(Self {
            frame_width: fw,
            frame_height: fh,
            view_width: vw,
            view_height: vh,
            mirrored,
        })
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// Aspect-fill scale: the larger of the two axis ratios, so the scaled
    /// frame always covers the whole view.
    pub fn scale(&self) -> f32 {
        let sx = self.view_width as f32 / self.frame_width as f32;
        let sy = self.view_height as f32 / self.frame_height as f32;
        sx.max(sy)
    }

    /// Offset that centers the scaled frame in the view. At most one axis
    /// is non-zero, and it is never positive (the frame overflows the view).
    pub fn offset(&self) -> (f32, f32) {
        let s = self.scale();
        let ox = (self.view_width as f32 - self.frame_width as f32 * s) / 2.0;
        let oy = (self.view_height as f32 - self.frame_height as f32 * s) / 2.0;
        (ox, oy)
    }

    /// Maps one normalized landmark into view pixel space.
    ///
    /// Coordinates are clamped into [0, 1] first; the mirror flip happens in
    /// normalized space before any scaling.
    pub fn map_point(&self, landmark: LandmarkPoint) -> ViewPoint {
        let p = landmark.clamped();
        let xn = if self.mirrored { 1.0 - p.x } else { p.x };
        let px = xn * self.frame_width as f32;
        let py = p.y * self.frame_height as f32;
        let s = self.scale();
        let (ox, oy) = self.offset();
        ViewPoint::new(px * s + ox, py * s + oy)
    }

    /// Maps the axis-aligned bounding box of a landmark subset.
    ///
    /// The mirror flip is applied per point before taking min/max, which is
    /// equivalent to mirroring each corner: after the flip, the left edge
    /// becomes `1 - max_x` and the right edge `1 - min_x`.
    pub fn map_rect(&self, landmarks: &[LandmarkPoint]) -> Option<ViewRect> {
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;

        for lm in landmarks {
            let p = lm.clamped();
            let xn = if self.mirrored { 1.0 - p.x } else { p.x };
            min_x = min_x.min(xn);
            max_x = max_x.max(xn);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        if landmarks.is_empty() {
            return None;
        }

        let s = self.scale();
        let (ox, oy) = self.offset();
        let x = min_x * self.frame_width as f32 * s + ox;
        let y = min_y * self.frame_height as f32 * s + oy;
        let w = (max_x - min_x) * self.frame_width as f32 * s;
        let h = (max_y - min_y) * self.frame_height as f32 * s;
        Some(ViewRect::new(x, y, w, h))
    }

    /// The whole frame mapped into view space. Always contains the view
    /// rectangle under aspect-fill.
    pub fn frame_rect_in_view(&self) -> ViewRect {
        let s = self.scale();
        let (ox, oy) = self.offset();
        ViewRect::new(
            ox,
            oy,
            self.frame_width as f32 * s,
            self.frame_height as f32 * s,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn geometry(frame: (u32, u32), view: (u32, u32), mirrored: bool) -> FrameGeometry {
        FrameGeometry::new(frame, view, mirrored).unwrap()
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            FrameGeometry::new((0, 480), (640, 480), false),
            Err(GeometryError::EmptyDimensions)
        );
        assert_eq!(
            FrameGeometry::new((640, 480), (640, 0), false),
            Err(GeometryError::EmptyDimensions)
        );
    }

    #[test]
    fn test_map_point_identity_when_sizes_match() {
        let g = geometry((640, 480), (640, 480), false);
        let p = g.map_point(LandmarkPoint::new(0.25, 0.5));
        assert_relative_eq!(p.x, 160.0);
        assert_relative_eq!(p.y, 240.0);
    }

    #[test]
    fn test_map_point_mirrored_symmetry() {
        // map(x).x == view_width - map(1 - x).x
        let g = geometry((640, 480), (640, 480), true);
        let a = g.map_point(LandmarkPoint::new(0.3, 0.4));
        let b = g.map_point(LandmarkPoint::new(0.7, 0.4));
        assert_relative_eq!(a.x, 640.0 - b.x, epsilon = 1e-3);
        assert_relative_eq!(a.y, b.y);
    }

    #[test]
    fn test_map_point_clamps_noisy_input() {
        let g = geometry((100, 100), (100, 100), false);
        let p = g.map_point(LandmarkPoint::new(-0.5, 1.5));
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 100.0);
    }

    #[rstest]
    #[case::same((640, 480), (640, 480))]
    #[case::wider_view((640, 480), (1280, 480))]
    #[case::taller_view((640, 480), (640, 1280))]
    #[case::portrait_frame((480, 640), (640, 480))]
    #[case::odd_sizes((333, 777), (1024, 600))]
    fn test_aspect_fill_covers_view(#[case] frame: (u32, u32), #[case] view: (u32, u32)) {
        let g = geometry(frame, view, false);
        let frame_rect = g.frame_rect_in_view();
        let view_rect = ViewRect::new(0.0, 0.0, view.0 as f32, view.1 as f32);
        // Tolerate float rounding at the boundary.
        let grown = ViewRect::new(
            frame_rect.x - 1e-3,
            frame_rect.y - 1e-3,
            frame_rect.width + 2e-3,
            frame_rect.height + 2e-3,
        );
        assert!(grown.contains(&view_rect));
    }

    #[test]
    fn test_scale_uses_larger_ratio() {
        // 640/320 = 2.0, 480/480 = 1.0 -> scale 2.0
        let g = geometry((320, 480), (640, 480), false);
        assert_relative_eq!(g.scale(), 2.0);
        // Vertical overflow is centered: frame height 960 vs view 480.
        let (ox, oy) = g.offset();
        assert_relative_eq!(ox, 0.0);
        assert_relative_eq!(oy, -240.0);
    }

    #[test]
    fn test_map_rect_bbox() {
        let g = geometry((100, 100), (100, 100), false);
        let pts = [
            LandmarkPoint::new(0.2, 0.3),
            LandmarkPoint::new(0.6, 0.5),
            LandmarkPoint::new(0.4, 0.8),
        ];
        let r = g.map_rect(&pts).unwrap();
        assert_relative_eq!(r.x, 20.0);
        assert_relative_eq!(r.y, 30.0);
        assert_relative_eq!(r.width, 40.0);
        assert_relative_eq!(r.height, 50.0);
    }

    #[test]
    fn test_map_rect_mirrored_swaps_edges() {
        let g = geometry((100, 100), (100, 100), true);
        let pts = [LandmarkPoint::new(0.2, 0.0), LandmarkPoint::new(0.6, 1.0)];
        let r = g.map_rect(&pts).unwrap();
        // Flipped x range is [0.4, 0.8].
        assert_relative_eq!(r.x, 40.0);
        assert_relative_eq!(r.right(), 80.0);
    }

    #[test]
    fn test_map_rect_empty_subset() {
        let g = geometry((100, 100), (100, 100), false);
        assert!(g.map_rect(&[]).is_none());
    }

    #[test]
    fn test_map_rect_degenerate_single_point() {
        let g = geometry((100, 100), (100, 100), false);
        let pts = [LandmarkPoint::new(0.5, 0.5), LandmarkPoint::new(0.5, 0.5)];
        let r = g.map_rect(&pts).unwrap();
        assert_relative_eq!(r.width, 0.0);
        assert_relative_eq!(r.height, 0.0);
        assert_relative_eq!(r.center().x, 50.0);
    }

    #[test]
    fn test_view_point_helpers() {
        let a = ViewPoint::new(0.0, 0.0);
        let b = ViewPoint::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
        let m = a.midpoint(b);
        assert_relative_eq!(m.x, 1.5);
        assert_relative_eq!(m.y, 2.0);
    }

    #[test]
    fn test_view_rect_from_center() {
        let r = ViewRect::from_center(ViewPoint::new(50.0, 40.0), 20.0, 10.0);
        assert_relative_eq!(r.x, 40.0);
        assert_relative_eq!(r.y, 35.0);
        assert_relative_eq!(r.center().x, 50.0);
        assert_relative_eq!(r.center().y, 40.0);
    }
}

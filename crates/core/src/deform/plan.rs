//! Per-kind deformation tables.
//!
//! Each deformation filter is an ordered list of operator invocations.
//! Radii and strengths derive from measured facial distances, never fixed
//! pixel counts, so the effect scales with face size in frame.

use crate::anchors::anchor_geometry::{AnchorError, FaceAnchors};
use crate::deform::tone::ToneOp;
use crate::filters::filter_kind::FilterKind;
use crate::interactive::warp_controller::{WarpMode, WarpStamp};
use crate::shared::geometry::ViewPoint;

/// One operator invocation. Pinch and Bump both carry a positive strength
/// magnitude; the sign convention (pinch pulls inward) is applied when the
/// op is executed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WarpOp {
    Pinch {
        center: ViewPoint,
        radius: f32,
        strength: f32,
    },
    Bump {
        center: ViewPoint,
        radius: f32,
        strength: f32,
    },
    Swirl {
        center: ViewPoint,
        radius: f32,
        angle: f32,
    },
    Tone(ToneOp),
}

const BIG_EYES_RADIUS_FACTOR: f32 = 0.6;
const BIG_EYES_STRENGTH: f32 = 0.35;

const TINY_NOSE_RADIUS_FACTOR: f32 = 0.12;
const TINY_NOSE_STRENGTH: f32 = 0.4;

const WIDE_MOUTH_RADIUS_FACTOR: f32 = 0.9;
const WIDE_MOUTH_STRENGTH: f32 = 0.3;
const WIDE_MOUTH_CORNER_RADIUS_FACTOR: f32 = 0.6;
const WIDE_MOUTH_CORNER_STRENGTH: f32 = 0.25;

const PUFFY_CHEEKS_RADIUS_FACTOR: f32 = 0.35;
const PUFFY_CHEEKS_STRENGTH: f32 = 0.3;

const SWIRL_RADIUS_FACTOR: f32 = 0.35;
const SWIRL_ANGLE: f32 = 1.2;

const LONG_CHIN_RADIUS_FACTOR: f32 = 0.3;
const LONG_CHIN_PINCH_STRENGTH: f32 = 0.2;
const LONG_CHIN_BUMP_STRENGTHS: [f32; 2] = [0.3, 0.25];

const MEGA_FACE_EYE_RADIUS_FACTOR: f32 = 0.8;
const MEGA_FACE_EYE_STRENGTH: f32 = 0.45;
const MEGA_FACE_MOUTH_RADIUS_FACTOR: f32 = 1.1;
const MEGA_FACE_MOUTH_STRENGTH: f32 = 0.4;

const ALIEN_JAW_RADIUS_FACTOR: f32 = 0.45;
const ALIEN_JAW_STRENGTH: f32 = 0.3;
const ALIEN_FOREHEAD_RADIUS_FACTOR: f32 = 0.5;
const ALIEN_FOREHEAD_STRENGTH: f32 = 0.4;
const ALIEN_HAIRLINE_RADIUS_FACTOR: f32 = 0.25;
const ALIEN_HAIRLINE_STRENGTH: f32 = 0.2;

/// Operator list for an anchor-driven or tone-only deformation kind.
///
/// Accessory kinds and `InteractiveWarp` produce an empty plan: accessories
/// never deform, and interactive stamps are planned from controller state
/// via [`stamp_plan`] instead of anchors.
pub fn deformation_plan(
    kind: FilterKind,
    anchors: &FaceAnchors<'_>,
) -> Result<Vec<WarpOp>, AnchorError> {
    let ops = match kind {
        FilterKind::BigEyes => {
            let radius = anchors.eye_distance()? * BIG_EYES_RADIUS_FACTOR;
            vec![
                WarpOp::Bump {
                    center: anchors.left_eye()?,
                    radius,
                    strength: BIG_EYES_STRENGTH,
                },
                WarpOp::Bump {
                    center: anchors.right_eye()?,
                    radius,
                    strength: BIG_EYES_STRENGTH,
                },
            ]
        }
        FilterKind::TinyNose => {
            let (vw, vh) = anchors.geometry().view_size();
            let radius = vw.min(vh) as f32 * TINY_NOSE_RADIUS_FACTOR;
            vec![WarpOp::Pinch {
                center: anchors.nose_tip()?,
                radius,
                strength: TINY_NOSE_STRENGTH,
            }]
        }
        FilterKind::WideMouth => {
            let mouth_width = anchors.mouth_width()?;
            let center_radius = mouth_width * WIDE_MOUTH_RADIUS_FACTOR;
            let corner_radius = center_radius * WIDE_MOUTH_CORNER_RADIUS_FACTOR;
            let (left, right) = anchors.mouth_corners()?;
            vec![
                WarpOp::Bump {
                    center: anchors.mouth_center()?,
                    radius: center_radius,
                    strength: WIDE_MOUTH_STRENGTH,
                },
                WarpOp::Pinch {
                    center: left,
                    radius: corner_radius,
                    strength: WIDE_MOUTH_CORNER_STRENGTH,
                },
                WarpOp::Pinch {
                    center: right,
                    radius: corner_radius,
                    strength: WIDE_MOUTH_CORNER_STRENGTH,
                },
            ]
        }
        FilterKind::PuffyCheeks => {
            let radius = anchors.face_bbox()?.width * PUFFY_CHEEKS_RADIUS_FACTOR;
            let (left, right) = anchors.cheeks()?;
            vec![
                WarpOp::Bump {
                    center: left,
                    radius,
                    strength: PUFFY_CHEEKS_STRENGTH,
                },
                WarpOp::Bump {
                    center: right,
                    radius,
                    strength: PUFFY_CHEEKS_STRENGTH,
                },
            ]
        }
        FilterKind::Swirl => {
            let nose = anchors.nose_bottom()?;
            let lip = anchors.upper_lip()?;
            let radius = SWIRL_RADIUS_FACTOR * 4.0 * nose.distance(lip);
            vec![WarpOp::Swirl {
                center: nose.midpoint(lip),
                radius,
                angle: SWIRL_ANGLE,
            }]
        }
        FilterKind::LongChin => {
            let chin = anchors.chin()?;
            let radius = anchors.face_bbox()?.width * LONG_CHIN_RADIUS_FACTOR;
            // Tighten the chin, then stack two bumps progressively below it
            // so the jawline stretches downward.
            let mut ops = vec![WarpOp::Pinch {
                center: chin,
                radius,
                strength: LONG_CHIN_PINCH_STRENGTH,
            }];
            for (step, &strength) in LONG_CHIN_BUMP_STRENGTHS.iter().enumerate() {
                let drop = radius * 0.35 * (step + 1) as f32;
                ops.push(WarpOp::Bump {
                    center: ViewPoint::new(chin.x, chin.y + drop),
                    radius: radius * (1.0 - 0.1 * (step + 1) as f32),
                    strength,
                });
            }
            ops
        }
        FilterKind::MegaFace => {
            let eye_radius = anchors.eye_distance()? * MEGA_FACE_EYE_RADIUS_FACTOR;
            let mouth_radius = anchors.mouth_width()? * MEGA_FACE_MOUTH_RADIUS_FACTOR;
            vec![
                WarpOp::Bump {
                    center: anchors.left_eye()?,
                    radius: eye_radius,
                    strength: MEGA_FACE_EYE_STRENGTH,
                },
                WarpOp::Bump {
                    center: anchors.right_eye()?,
                    radius: eye_radius,
                    strength: MEGA_FACE_EYE_STRENGTH,
                },
                WarpOp::Bump {
                    center: anchors.mouth_center()?,
                    radius: mouth_radius,
                    strength: MEGA_FACE_MOUTH_STRENGTH,
                },
            ]
        }
        FilterKind::AlienHead => {
            let bbox = anchors.face_bbox()?;
            let chin = anchors.chin()?;
            let mouth = anchors.mouth_center()?;
            let forehead = anchors.forehead()?;
            let hairline = anchors.top_of_head()?;
            // Narrow the lower face, inflate the upper forehead, then nip
            // the hairline: a pear-shaped head.
            vec![
                WarpOp::Pinch {
                    center: chin.midpoint(mouth),
                    radius: bbox.width * ALIEN_JAW_RADIUS_FACTOR,
                    strength: ALIEN_JAW_STRENGTH,
                },
                WarpOp::Bump {
                    center: ViewPoint::new(forehead.x, forehead.y - bbox.height * 0.25),
                    radius: bbox.width * ALIEN_FOREHEAD_RADIUS_FACTOR,
                    strength: ALIEN_FOREHEAD_STRENGTH,
                },
                WarpOp::Pinch {
                    center: hairline,
                    radius: bbox.width * ALIEN_HAIRLINE_RADIUS_FACTOR,
                    strength: ALIEN_HAIRLINE_STRENGTH,
                },
            ]
        }
        FilterKind::Beauty => vec![WarpOp::Tone(ToneOp::Smooth)],
        FilterKind::WarmTint => vec![WarpOp::Tone(ToneOp::Warm)],
        FilterKind::InteractiveWarp
        | FilterKind::DogFace
        | FilterKind::Glasses
        | FilterKind::Mustache
        | FilterKind::Hat
        | FilterKind::Santa => Vec::new(),
    };
    Ok(ops)
}

/// Operator list for a sequence of interactive warp stamps, preserving
/// order. Each stamp is a pinch or bump at its own center and radius.
pub fn stamp_plan(stamps: &[WarpStamp]) -> Vec<WarpOp> {
    stamps
        .iter()
        .map(|s| match s.mode {
            WarpMode::Pinch => WarpOp::Pinch {
                center: s.center,
                radius: s.radius,
                strength: s.magnitude,
            },
            WarpMode::Bump => WarpOp::Bump {
                center: s.center,
                radius: s.radius,
                strength: s.magnitude,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::topology;
    use crate::shared::geometry::FrameGeometry;
    use crate::shared::landmark::{LandmarkPoint, LandmarkSet, MESH_LANDMARK_COUNT};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn mesh_with(overrides: &[(usize, f32, f32)]) -> LandmarkSet {
        let mut pts = vec![LandmarkPoint::new(0.5, 0.5); MESH_LANDMARK_COUNT];
        for &(i, x, y) in overrides {
            pts[i] = LandmarkPoint::new(x, y);
        }
        LandmarkSet::new(pts)
    }

    fn geometry() -> FrameGeometry {
        FrameGeometry::new((1000, 1000), (1000, 1000), false).unwrap()
    }

    #[test]
    fn test_big_eyes_two_bumps_scaled_by_eye_distance() {
        let mut overrides: Vec<(usize, f32, f32)> = topology::LEFT_EYE_RING
            .iter()
            .map(|&i| (i, 0.35, 0.4))
            .collect();
        overrides.extend(topology::RIGHT_EYE_RING.iter().map(|&i| (i, 0.65, 0.4)));
        let set = mesh_with(&overrides);
        let anchors = FaceAnchors::new(&set, geometry());

        let plan = deformation_plan(FilterKind::BigEyes, &anchors).unwrap();
        assert_eq!(plan.len(), 2);
        // Eye distance 300px -> radius 180.
        for op in &plan {
            match op {
                WarpOp::Bump { radius, .. } => assert_relative_eq!(*radius, 180.0, epsilon = 0.1),
                other => panic!("expected bump, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_tiny_nose_radius_from_view_size() {
        let set = mesh_with(&[(topology::NOSE_TIP, 0.5, 0.5)]);
        let geom = FrameGeometry::new((640, 480), (640, 480), false).unwrap();
        let anchors = FaceAnchors::new(&set, geom);

        let plan = deformation_plan(FilterKind::TinyNose, &anchors).unwrap();
        assert_eq!(plan.len(), 1);
        match plan[0] {
            WarpOp::Pinch { radius, .. } => {
                // 0.12 * min(640, 480) = 57.6
                assert_relative_eq!(radius, 57.6, epsilon = 0.01);
            }
            other => panic!("expected pinch, got {other:?}"),
        }
    }

    #[test]
    fn test_wide_mouth_order_is_bump_then_corner_pinches() {
        let set = mesh_with(&[
            (topology::MOUTH_LEFT, 0.4, 0.7),
            (topology::MOUTH_RIGHT, 0.6, 0.7),
        ]);
        let anchors = FaceAnchors::new(&set, geometry());

        let plan = deformation_plan(FilterKind::WideMouth, &anchors).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(matches!(plan[0], WarpOp::Bump { .. }));
        assert!(matches!(plan[1], WarpOp::Pinch { .. }));
        assert!(matches!(plan[2], WarpOp::Pinch { .. }));
    }

    #[test]
    fn test_long_chin_pinch_then_stacked_bumps_below() {
        let set = mesh_with(&[
            (topology::CHIN, 0.5, 0.8),
            (topology::LEFT_EYE_OUTER, 0.3, 0.4),
            (topology::RIGHT_EYE_OUTER, 0.7, 0.4),
        ]);
        let anchors = FaceAnchors::new(&set, geometry());

        let plan = deformation_plan(FilterKind::LongChin, &anchors).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(matches!(plan[0], WarpOp::Pinch { .. }));
        let mut last_y = match plan[0] {
            WarpOp::Pinch { center, .. } => center.y,
            _ => unreachable!(),
        };
        for op in &plan[1..] {
            match op {
                WarpOp::Bump { center, .. } => {
                    assert!(center.y > last_y, "bumps must stack progressively below");
                    last_y = center.y;
                }
                other => panic!("expected bump, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_alien_head_pinch_bump_pinch() {
        let set = mesh_with(&[
            (topology::CHIN, 0.5, 0.85),
            (topology::FOREHEAD, 0.5, 0.3),
            (topology::TOP_OF_HEAD, 0.5, 0.2),
            (topology::LEFT_EYE_OUTER, 0.3, 0.4),
            (topology::RIGHT_EYE_OUTER, 0.7, 0.4),
        ]);
        let anchors = FaceAnchors::new(&set, geometry());

        let plan = deformation_plan(FilterKind::AlienHead, &anchors).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(matches!(plan[0], WarpOp::Pinch { .. }));
        assert!(matches!(plan[1], WarpOp::Bump { .. }));
        assert!(matches!(plan[2], WarpOp::Pinch { .. }));
    }

    #[test]
    fn test_mega_face_is_stronger_than_big_eyes() {
        let mut overrides: Vec<(usize, f32, f32)> = topology::LEFT_EYE_RING
            .iter()
            .map(|&i| (i, 0.35, 0.4))
            .collect();
        overrides.extend(topology::RIGHT_EYE_RING.iter().map(|&i| (i, 0.65, 0.4)));
        let set = mesh_with(&overrides);
        let anchors = FaceAnchors::new(&set, geometry());

        let big = deformation_plan(FilterKind::BigEyes, &anchors).unwrap();
        let mega = deformation_plan(FilterKind::MegaFace, &anchors).unwrap();
        let (big_r, big_s) = match big[0] {
            WarpOp::Bump {
                radius, strength, ..
            } => (radius, strength),
            _ => unreachable!(),
        };
        let (mega_r, mega_s) = match mega[0] {
            WarpOp::Bump {
                radius, strength, ..
            } => (radius, strength),
            _ => unreachable!(),
        };
        assert!(mega_r > big_r);
        assert!(mega_s > big_s);
    }

    #[rstest]
    #[case::beauty(FilterKind::Beauty, ToneOp::Smooth)]
    #[case::warm(FilterKind::WarmTint, ToneOp::Warm)]
    fn test_tone_only_kinds(#[case] kind: FilterKind, #[case] expected: ToneOp) {
        // Tone kinds never touch anchors, so a short set must still work.
        let set = LandmarkSet::new(Vec::new());
        let anchors = FaceAnchors::new(&set, geometry());
        let plan = deformation_plan(kind, &anchors).unwrap();
        assert_eq!(plan, vec![WarpOp::Tone(expected)]);
    }

    #[test]
    fn test_accessory_and_interactive_kinds_plan_empty() {
        let set = mesh_with(&[]);
        let anchors = FaceAnchors::new(&set, geometry());
        for kind in [
            FilterKind::DogFace,
            FilterKind::Glasses,
            FilterKind::InteractiveWarp,
        ] {
            assert!(deformation_plan(kind, &anchors).unwrap().is_empty());
        }
    }

    #[test]
    fn test_stamp_plan_preserves_order_and_mode() {
        let stamps = [
            WarpStamp {
                center: ViewPoint::new(10.0, 10.0),
                radius: 80.0,
                mode: WarpMode::Pinch,
                magnitude: 0.2,
            },
            WarpStamp {
                center: ViewPoint::new(50.0, 50.0),
                radius: 100.0,
                mode: WarpMode::Bump,
                magnitude: 0.4,
            },
        ];
        let plan = stamp_plan(&stamps);
        assert_eq!(plan.len(), 2);
        assert!(matches!(plan[0], WarpOp::Pinch { strength, .. } if strength == 0.2));
        assert!(matches!(plan[1], WarpOp::Bump { strength, .. } if strength == 0.4));
    }

    #[test]
    fn test_insufficient_landmarks_propagate() {
        let set = LandmarkSet::from_pairs(&[(0.5, 0.5); 5]);
        let anchors = FaceAnchors::new(&set, geometry());
        assert!(deformation_plan(FilterKind::BigEyes, &anchors).is_err());
    }
}

//! Placement formulas for the accessory overlay family.
//!
//! Each accessory maps 2 to 4 anchors to one or two destination rectangles
//! through empirical multipliers. The multipliers are part of the product's
//! look; change them and placements drift visibly.

use crate::anchors::anchor_geometry::{AnchorError, FaceAnchors};
use crate::filters::filter_kind::FilterKind;
use crate::shared::geometry::{ViewPoint, ViewRect};

pub const DOG_FACE_BITMAP: &str = "dog_face";
pub const GLASSES_BITMAP: &str = "glasses";
pub const MUSTACHE_BITMAP: &str = "mustache";
pub const HAT_BITMAP: &str = "hat";
pub const SANTA_HAT_BITMAP: &str = "santa_hat";
pub const SANTA_BEARD_BITMAP: &str = "santa_beard";

const DOG_FACE_WIDTH_FACTOR: f32 = 1.4;
const DOG_FACE_TOP_OFFSET: f32 = 0.18;

const GLASSES_WIDTH_FACTOR: f32 = 2.0;
const GLASSES_ASPECT: f32 = 0.5;
const GLASSES_TOP_OFFSET: f32 = 0.35;

const MUSTACHE_WIDTH_FACTOR: f32 = 1.5;
const MUSTACHE_ASPECT: f32 = 0.4;

const HAT_WIDTH_FACTOR: f32 = 1.8;
const HAT_ASPECT: f32 = 0.6;
const HAT_TOP_OFFSET: f32 = 0.7;

const SANTA_HAT_WIDTH_FACTOR: f32 = 1.8;
const SANTA_HAT_ASPECT: f32 = 0.6;
const SANTA_BEARD_WIDTH_FACTOR: f32 = 1.2;
const SANTA_BEARD_ASPECT: f32 = 0.6;

/// One bitmap to draw at one destination rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub bitmap: &'static str,
    pub rect: ViewRect,
}

/// Destination rectangle(s) for an accessory kind. Non-accessory kinds get
/// an empty list. Degenerate anchors (zero face width) yield zero-size
/// rectangles; nothing here divides by a measured distance.
pub fn placements(
    kind: FilterKind,
    anchors: &FaceAnchors<'_>,
) -> Result<Vec<Placement>, AnchorError> {
    match kind {
        FilterKind::DogFace => {
            let bbox = anchors.face_bbox()?;
            let width = bbox.width * DOG_FACE_WIDTH_FACTOR;
            let height = width;
            let x = bbox.center().x - width / 2.0;
            let y = bbox.y - DOG_FACE_TOP_OFFSET * height;
            Ok(vec![Placement {
                bitmap: DOG_FACE_BITMAP,
                rect: ViewRect::new(x, y, width, height),
            }])
        }
        FilterKind::Glasses => {
            let (left, right) = anchors.eye_outer_corners()?;
            let under_eye = anchors.under_eye_midpoint()?;
            let width = left.distance(right) * GLASSES_WIDTH_FACTOR;
            let height = width * GLASSES_ASPECT;
            let center_x = left.midpoint(right).x;
            let y = under_eye.y - GLASSES_TOP_OFFSET * height;
            Ok(vec![Placement {
                bitmap: GLASSES_BITMAP,
                rect: ViewRect::new(center_x - width / 2.0, y, width, height),
            }])
        }
        FilterKind::Mustache => {
            let nose_bottom = anchors.nose_bottom()?;
            let upper_lip = anchors.upper_lip()?;
            let center_x = anchors.mouth_center()?.x;
            let width = anchors.mouth_width()? * MUSTACHE_WIDTH_FACTOR;
            let height = width * MUSTACHE_ASPECT;
            let center_y = (nose_bottom.y + upper_lip.y) / 2.0;
            Ok(vec![Placement {
                bitmap: MUSTACHE_BITMAP,
                rect: ViewRect::from_center(ViewPoint::new(center_x, center_y), width, height),
            }])
        }
        FilterKind::Hat => {
            let bbox = anchors.face_bbox()?;
            let top = anchors.top_of_head()?;
            let width = bbox.width * HAT_WIDTH_FACTOR;
            let height = width * HAT_ASPECT;
            let x = bbox.center().x - width / 2.0;
            let y = top.y - HAT_TOP_OFFSET * height;
            Ok(vec![Placement {
                bitmap: HAT_BITMAP,
                rect: ViewRect::new(x, y, width, height),
            }])
        }
        FilterKind::Santa => {
            let bbox = anchors.face_bbox()?;
            let brow = anchors.brow_center()?;
            let lip_bottom = anchors.lip_bottom()?;
            let chin = anchors.chin()?;

            let hat_width = bbox.width * SANTA_HAT_WIDTH_FACTOR;
            let hat_height = hat_width * SANTA_HAT_ASPECT;
            // Hat sits fully above the brows: its bottom edge rests on them.
            let hat = ViewRect::new(
                brow.x - hat_width / 2.0,
                brow.y - hat_height,
                hat_width,
                hat_height,
            );

            let beard_width = bbox.width * SANTA_BEARD_WIDTH_FACTOR;
            let beard_height = beard_width * SANTA_BEARD_ASPECT;
            let beard_center = lip_bottom.midpoint(chin);
            let beard = ViewRect::from_center(beard_center, beard_width, beard_height);

            Ok(vec![
                Placement {
                    bitmap: SANTA_HAT_BITMAP,
                    rect: hat,
                },
                Placement {
                    bitmap: SANTA_BEARD_BITMAP,
                    rect: beard,
                },
            ])
        }
        _ => Ok(Vec::new()),
    }
}

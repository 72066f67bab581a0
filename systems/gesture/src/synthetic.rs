//! Synthetic hand skeletons for headless sessions and tests.

use gesture_strike_core::{landmark, GestureLabel, HandObservation, Handedness, Vec2};

const WRIST: Vec2 = Vec2::new(0.0, 0.0);
const THUMB_CMC: Vec2 = Vec2::new(-0.15, -0.10);
const KNUCKLES: [Vec2; 4] = [
    Vec2::new(-0.12, -0.45),
    Vec2::new(0.0, -0.48),
    Vec2::new(0.10, -0.45),
    Vec2::new(0.20, -0.40),
];
// Joint offsets from the knuckle: middle joint, outer joint, tip.
const EXTENDED: [Vec2; 3] = [
    Vec2::new(0.0, -0.25),
    Vec2::new(0.0, -0.40),
    Vec2::new(0.0, -0.52),
];
const FOLDED: [Vec2; 3] = [
    Vec2::new(0.0, -0.18),
    Vec2::new(0.0, -0.08),
    Vec2::new(0.0, 0.05),
];
const THUMB_OUT: [Vec2; 3] = [
    Vec2::new(-0.30, -0.20),
    Vec2::new(-0.42, -0.30),
    Vec2::new(-0.52, -0.38),
];
const THUMB_TUCKED: [Vec2; 3] = [
    Vec2::new(-0.20, -0.25),
    Vec2::new(-0.10, -0.35),
    Vec2::new(0.0, -0.38),
];

/// Builds an upright 21-point hand whose index fingertip lands on `index_tip`.
///
/// Coordinates are normalised and mirrored like detector output. `scale` is
/// the wrist-to-knuckle span in normalised units; `None` produces a relaxed
/// two-finger pose that classifies as [`GestureLabel::None`].
#[must_use]
pub fn hand(
    label: GestureLabel,
    handedness: Handedness,
    index_tip: Vec2,
    scale: f32,
) -> HandObservation {
    let (fingers, thumb) = match label {
        GestureLabel::OpenPalm => ([true; 4], true),
        GestureLabel::Fist => ([false; 4], false),
        GestureLabel::Point => ([true, false, false, false], false),
        GestureLabel::None => ([true, true, false, false], false),
    };

    let mut local = vec![Vec2::ZERO; landmark::COUNT];
    local[landmark::WRIST] = WRIST;
    local[landmark::WRIST + 1] = THUMB_CMC;
    let thumb_joints = if thumb { THUMB_OUT } else { THUMB_TUCKED };
    local[2..=landmark::THUMB_TIP].copy_from_slice(&thumb_joints);

    for (finger, (knuckle, extended)) in KNUCKLES.iter().zip(fingers).enumerate() {
        let base = landmark::INDEX_MCP + finger * 4;
        local[base] = *knuckle;
        let joints = if extended { EXTENDED } else { FOLDED };
        for (offset, joint) in joints.iter().enumerate() {
            local[base + 1 + offset] = *knuckle + *joint;
        }
    }

    // Skeleton above is a right hand; the left hand mirrors it.
    let mirror = Vec2::new(-handedness.mirror_sign(), 1.0);
    let anchor = local[landmark::INDEX_TIP] * mirror;
    let keypoints = local
        .into_iter()
        .map(|point| index_tip + (point * mirror - anchor) * scale)
        .collect();

    HandObservation::new(keypoints, handedness, 0.9)
}

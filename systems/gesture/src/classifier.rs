//! Geometric shape classification for a single hand.

use gesture_strike_core::{landmark, GameConfig, GestureLabel, HandObservation, Vec2};
use thiserror::Error;

const MIN_PALM_EXTENT: f32 = 1e-4;

const FINGERS: [(usize, usize); 4] = [
    (landmark::INDEX_PIP, landmark::INDEX_TIP),
    (landmark::MIDDLE_PIP, landmark::MIDDLE_TIP),
    (landmark::RING_PIP, landmark::RING_TIP),
    (landmark::PINKY_PIP, landmark::PINKY_TIP),
];

/// Reasons a hand observation cannot be classified this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ObservationError {
    /// The detector produced fewer keypoints than a full skeleton.
    #[error("hand has {found} landmarks, {required} required")]
    TooFewLandmarks {
        /// Number of keypoints supplied.
        found: usize,
        /// Number of keypoints a complete hand carries.
        required: usize,
    },
    /// A keypoint coordinate is NaN or infinite.
    #[error("landmark {index} is not finite")]
    NonFiniteLandmark {
        /// Index of the offending keypoint.
        index: usize,
    },
    /// The palm collapsed to a point, so no relative distance is meaningful.
    #[error("palm landmarks are degenerate")]
    DegeneratePalm,
}

/// Per-finger extension flags derived from one observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerState {
    /// Thumb reaches away from the palm.
    pub thumb: bool,
    /// Index, middle, ring and little finger extension.
    pub fingers: [bool; 4],
}

impl FingerState {
    /// Maps the extension pattern onto a gesture label.
    #[must_use]
    pub fn label(&self) -> GestureLabel {
        match self.fingers {
            [true, true, true, true] => GestureLabel::OpenPalm,
            [false, false, false, false] if !self.thumb => GestureLabel::Fist,
            [true, false, false, false] => GestureLabel::Point,
            _ => GestureLabel::None,
        }
    }
}

/// Classifies hand skeletons using distances relative to the palm.
///
/// Only ratios of distances are compared, so the result does not depend on how
/// far the hand is from the camera. The thumb test flips with handedness so a
/// left and a right hand making the same shape agree.
#[derive(Clone, Copy, Debug)]
pub struct Classifier {
    extension_ratio: f32,
    thumb_ratio: f32,
}

impl Classifier {
    /// Creates a classifier using the configured thresholds.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            extension_ratio: config.extension_ratio,
            thumb_ratio: config.thumb_extension_ratio,
        }
    }

    /// Labels the shape of one hand.
    pub fn classify(&self, hand: &HandObservation) -> Result<GestureLabel, ObservationError> {
        self.finger_state(hand).map(|state| state.label())
    }

    /// Computes which fingers are extended.
    pub fn finger_state(&self, hand: &HandObservation) -> Result<FingerState, ObservationError> {
        let points = validated(hand)?;

        let wrist = points[landmark::WRIST];
        let knuckles = [
            points[landmark::INDEX_MCP],
            points[landmark::MIDDLE_MCP],
            points[landmark::RING_MCP],
            points[landmark::PINKY_MCP],
        ];
        let palm_centre = knuckles.iter().fold(wrist, |sum, knuckle| sum + *knuckle) / 5.0;
        let palm_width = knuckles[0].distance(knuckles[3]);
        let axis = points[landmark::MIDDLE_MCP] - wrist;
        if palm_width < MIN_PALM_EXTENT || axis.length() < MIN_PALM_EXTENT {
            return Err(ObservationError::DegeneratePalm);
        }

        let mut fingers = [false; 4];
        for (extended, (joint, tip)) in fingers.iter_mut().zip(FINGERS) {
            let joint_reach = points[joint].distance(palm_centre);
            let tip_reach = points[tip].distance(palm_centre);
            *extended = tip_reach > self.extension_ratio * joint_reach;
        }

        let thumb_offset = points[landmark::THUMB_TIP] - wrist;
        let lateral = axis.normalize().perp_dot(thumb_offset) * hand.handedness().mirror_sign();
        let thumb = lateral > self.thumb_ratio * palm_width;

        Ok(FingerState { thumb, fingers })
    }
}

fn validated(hand: &HandObservation) -> Result<&[Vec2], ObservationError> {
    let points = hand.keypoints();
    if points.len() < landmark::COUNT {
        return Err(ObservationError::TooFewLandmarks {
            found: points.len(),
            required: landmark::COUNT,
        });
    }
    if let Some(index) = points.iter().position(|point| !point.is_finite()) {
        return Err(ObservationError::NonFiniteLandmark { index });
    }
    Ok(points)
}

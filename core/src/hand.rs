//! Hand observations produced by the landmark detector.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keypoint indices of the 21-point hand skeleton.
pub mod landmark {
    /// Base of the palm.
    pub const WRIST: usize = 0;
    /// Thumb fingertip.
    pub const THUMB_TIP: usize = 4;
    /// Index finger knuckle.
    pub const INDEX_MCP: usize = 5;
    /// Index finger middle joint.
    pub const INDEX_PIP: usize = 6;
    /// Index fingertip; drives the cursor.
    pub const INDEX_TIP: usize = 8;
    /// Middle finger knuckle.
    pub const MIDDLE_MCP: usize = 9;
    /// Middle finger middle joint.
    pub const MIDDLE_PIP: usize = 10;
    /// Middle fingertip.
    pub const MIDDLE_TIP: usize = 12;
    /// Ring finger knuckle.
    pub const RING_MCP: usize = 13;
    /// Ring finger middle joint.
    pub const RING_PIP: usize = 14;
    /// Ring fingertip.
    pub const RING_TIP: usize = 16;
    /// Little finger knuckle.
    pub const PINKY_MCP: usize = 17;
    /// Little finger middle joint.
    pub const PINKY_PIP: usize = 18;
    /// Little fingertip.
    pub const PINKY_TIP: usize = 20;
    /// Number of keypoints in a complete hand.
    pub const COUNT: usize = 21;
}

/// Which hand the detector believes it saw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// The player's left hand.
    Left,
    /// The player's right hand.
    Right,
}

impl Handedness {
    /// Sign that maps a signed lateral offset onto "toward the thumb side".
    ///
    /// Frames are mirrored before detection, so a right hand facing the camera
    /// has its thumb on the negative side of the wrist-to-knuckle axis.
    #[must_use]
    pub const fn mirror_sign(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The other hand.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One detected hand for a single camera frame.
///
/// Keypoints are normalised frame coordinates in `0.0..=1.0`, already
/// mirrored so that moving the hand right moves the point right.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    keypoints: Vec<Vec2>,
    handedness: Handedness,
    confidence: f32,
}

impl HandObservation {
    /// Creates an observation from raw detector output.
    #[must_use]
    pub fn new(keypoints: Vec<Vec2>, handedness: Handedness, confidence: f32) -> Self {
        Self {
            keypoints,
            handedness,
            confidence,
        }
    }

    /// All keypoints in detector order.
    #[must_use]
    pub fn keypoints(&self) -> &[Vec2] {
        &self.keypoints
    }

    /// Keypoint at the provided landmark index, if the detector produced it.
    #[must_use]
    pub fn keypoint(&self, index: usize) -> Option<Vec2> {
        self.keypoints.get(index).copied()
    }

    /// Handedness label reported by the detector.
    #[must_use]
    pub const fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Detector confidence in `0.0..=1.0`.
    #[must_use]
    pub const fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Supplier of per-frame hand detections.
pub trait LandmarkSource {
    /// Polls for the latest detection result without blocking the frame.
    ///
    /// `None` means no new frame is ready yet; `Some` with an empty list means
    /// a frame was processed and no hands were found.
    fn poll(&mut self) -> Option<Vec<HandObservation>>;
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Gesture pipeline that turns raw hand skeletons into debounced commands.
//!
//! Every frame each visible hand is classified into a [`GestureLabel`]. Labels
//! feed one [`LabelWindow`] per role; a role's gesture becomes active only once
//! its whole window agrees and drops the moment a different label arrives.
//! In two-hand mode one hand steers the cursor while the other fires and
//! shields.

mod classifier;
pub mod synthetic;
mod window;

use std::cmp::Ordering;

use gesture_strike_core::{
    landmark, ConfirmedCommand, GameConfig, GestureLabel, GestureRole, HandObservation,
    Handedness, Vec2,
};
use tracing::debug;

pub use classifier::{Classifier, FingerState, ObservationError};
pub use window::LabelWindow;

/// Outcome of one processed detection frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureFrame {
    /// Hands that survived validation.
    pub hands_visible: usize,
    /// Index fingertip of the aiming hand in screen pixels.
    pub aim_point: Option<Vec2>,
    /// Confirmed label of the aiming role.
    pub aim_gesture: GestureLabel,
    /// Confirmed label of the acting role.
    pub action_gesture: GestureLabel,
}

impl GestureFrame {
    /// Reports whether at least one usable hand was seen.
    #[must_use]
    pub const fn hand_visible(&self) -> bool {
        self.hands_visible > 0
    }

    /// Whether continuous fire is requested.
    #[must_use]
    pub fn shooting(&self) -> bool {
        self.hand_visible() && self.action_gesture == GestureLabel::OpenPalm
    }

    /// Whether the shield is requested.
    #[must_use]
    pub fn shielding(&self) -> bool {
        self.hand_visible() && self.action_gesture == GestureLabel::Fist
    }

    /// Reports whether either role currently holds a confirmed gesture.
    #[must_use]
    pub fn any_confirmed(&self) -> bool {
        self.aim_gesture != GestureLabel::None || self.action_gesture != GestureLabel::None
    }

    /// Gesture a presentation layer should highlight, preferring the action.
    #[must_use]
    pub fn display_gesture(&self) -> GestureLabel {
        if self.action_gesture == GestureLabel::None {
            self.aim_gesture
        } else {
            self.action_gesture
        }
    }

    /// Appends the confirmed commands this frame implies.
    pub fn push_commands(&self, out: &mut Vec<ConfirmedCommand>) {
        if let Some(point) = self.aim_point {
            out.push(ConfirmedCommand::Aim(point));
        }
        out.push(ConfirmedCommand::Shoot(self.shooting()));
        out.push(ConfirmedCommand::Shield(self.shielding()));
    }
}

#[derive(Clone, Debug)]
struct RoleTracker {
    role: GestureRole,
    window: LabelWindow,
    active: GestureLabel,
}

impl RoleTracker {
    fn new(role: GestureRole, frames: usize) -> Self {
        Self {
            role,
            window: LabelWindow::new(frames),
            active: GestureLabel::None,
        }
    }

    fn observe(&mut self, label: GestureLabel) -> GestureLabel {
        self.window.push(label);
        let confirmed = self.window.confirmed().unwrap_or_default();
        if confirmed != self.active {
            if confirmed == GestureLabel::None {
                debug!(role = ?self.role, released = ?self.active, "gesture released");
            } else {
                debug!(role = ?self.role, gesture = ?confirmed, "gesture confirmed");
            }
            self.active = confirmed;
        }
        confirmed
    }

    fn reset(&mut self) {
        self.window.clear();
        self.active = GestureLabel::None;
    }
}

#[derive(Clone, Debug)]
enum Roles {
    Combined(RoleTracker),
    Split {
        aim_hand: Handedness,
        aim: RoleTracker,
        action: RoleTracker,
    },
}

#[derive(Clone, Copy, Debug)]
struct Classified<'a> {
    hand: &'a HandObservation,
    label: GestureLabel,
    wrist_x: f32,
}

/// Debounces classified hands into per-role gestures.
#[derive(Clone, Debug)]
pub struct GestureEngine {
    classifier: Classifier,
    bounds: Vec2,
    roles: Roles,
}

impl GestureEngine {
    /// Creates an engine in the configured hand mode.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let frames = config.confirmation_frames;
        let roles = if config.two_hand_mode {
            Roles::Split {
                aim_hand: config.aim_hand,
                aim: RoleTracker::new(GestureRole::Aim, frames),
                action: RoleTracker::new(GestureRole::Action, frames),
            }
        } else {
            Roles::Combined(RoleTracker::new(GestureRole::Combined, frames))
        };
        Self {
            classifier: Classifier::new(config),
            bounds: config.screen_size(),
            roles,
        }
    }

    /// Processes the hands detected in one frame.
    ///
    /// Malformed hands are discarded for this frame only. With no usable hand
    /// every role observes [`GestureLabel::None`], so actions release at once
    /// while the aim point is left empty for the cursor to hold.
    pub fn update(&mut self, hands: &[HandObservation]) -> GestureFrame {
        let mut classified: Vec<Classified<'_>> = hands
            .iter()
            .filter_map(|hand| match self.classifier.classify(hand) {
                Ok(label) => Some(Classified {
                    hand,
                    label,
                    wrist_x: hand
                        .keypoint(landmark::WRIST)
                        .map_or(0.0, |wrist| wrist.x),
                }),
                Err(error) => {
                    debug!(%error, handedness = ?hand.handedness(), "discarding hand observation");
                    None
                }
            })
            .collect();
        classified.sort_by(by_confidence_then_position);
        classified.truncate(2);

        let bounds = self.bounds;
        let aim_point = |entry: &Classified<'_>| {
            entry
                .hand
                .keypoint(landmark::INDEX_TIP)
                .map(|tip| tip * bounds)
        };

        match &mut self.roles {
            Roles::Combined(tracker) => {
                let best = classified.first();
                let gesture = tracker.observe(best.map_or(GestureLabel::None, |entry| entry.label));
                GestureFrame {
                    hands_visible: classified.len(),
                    aim_point: best.and_then(aim_point),
                    aim_gesture: gesture,
                    action_gesture: gesture,
                }
            }
            Roles::Split {
                aim_hand,
                aim,
                action,
            } => {
                let (aiming, acting) = match classified.as_slice() {
                    [] => (None, None),
                    [only] => (Some(only), Some(only)),
                    [first, second, ..] => {
                        if aims_with(first, second, *aim_hand) {
                            (Some(first), Some(second))
                        } else {
                            (Some(second), Some(first))
                        }
                    }
                };
                GestureFrame {
                    hands_visible: classified.len(),
                    aim_point: aiming.and_then(aim_point),
                    aim_gesture: aim.observe(aiming.map_or(GestureLabel::None, |entry| entry.label)),
                    action_gesture: action
                        .observe(acting.map_or(GestureLabel::None, |entry| entry.label)),
                }
            }
        }
    }

    /// Forgets all label history.
    pub fn reset(&mut self) {
        match &mut self.roles {
            Roles::Combined(tracker) => tracker.reset(),
            Roles::Split { aim, action, .. } => {
                aim.reset();
                action.reset();
            }
        }
    }
}

/// Decides whether `first` should aim when paired with `second`.
///
/// A hand reporting the configured aiming handedness wins. When both or
/// neither do, the hand physically on the aiming side of the frame wins.
fn aims_with(first: &Classified<'_>, second: &Classified<'_>, aim_hand: Handedness) -> bool {
    let first_matches = first.hand.handedness() == aim_hand;
    let second_matches = second.hand.handedness() == aim_hand;
    if first_matches != second_matches {
        return first_matches;
    }
    match aim_hand {
        Handedness::Right => first.wrist_x >= second.wrist_x,
        Handedness::Left => first.wrist_x <= second.wrist_x,
    }
}

fn by_confidence_then_position(a: &Classified<'_>, b: &Classified<'_>) -> Ordering {
    b.hand
        .confidence()
        .total_cmp(&a.hand.confidence())
        .then_with(|| a.wrist_x.total_cmp(&b.wrist_x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_requests_nothing() {
        let frame = GestureFrame::default();
        let mut commands = Vec::new();
        frame.push_commands(&mut commands);
        assert_eq!(
            commands,
            vec![
                ConfirmedCommand::Shoot(false),
                ConfirmedCommand::Shield(false)
            ]
        );
        assert!(!frame.any_confirmed());
    }

    #[test]
    fn display_prefers_action_gesture() {
        let frame = GestureFrame {
            hands_visible: 2,
            aim_point: None,
            aim_gesture: GestureLabel::Point,
            action_gesture: GestureLabel::Fist,
        };
        assert_eq!(frame.display_gesture(), GestureLabel::Fist);
        assert!(frame.shielding());
        assert!(!frame.shooting());
    }
}

use std::f32::consts::TAU;

use clap::ValueEnum;
use gesture_strike_core::{GestureLabel, HandObservation, Handedness, LandmarkSource, Vec2};
use gesture_strike_system_gesture::synthetic;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SCRIPT_RNG_STREAM: u64 = 0x6861_6e64_73;
const HAND_SCALE: f32 = 0.2;
const ORBIT_RADIUS: f32 = 0.3;
const ORBIT_STEP: f32 = TAU / 240.0;
const POSE_FRAMES: u32 = 90;
/// Fraction of polls on which the detector has no new frame ready.
const STALL_CHANCE: f64 = 0.05;
/// Fraction of frames on which the detector loses the hand entirely.
const DROPOUT_CHANCE: f64 = 0.02;

/// Pose schedule followed by [`ScriptedHands`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Script {
    /// Open palm most of the time, with pointing and shielding breaks.
    Cycle,
    /// Always pointing.
    Point,
    /// Always an open palm.
    Palm,
    /// Always a fist.
    Fist,
    /// No hands at all.
    Idle,
}

impl Script {
    fn pose(self, frame: u32) -> Option<GestureLabel> {
        match self {
            Self::Cycle => Some(match (frame / POSE_FRAMES) % 4 {
                0 | 2 => GestureLabel::OpenPalm,
                1 => GestureLabel::Point,
                _ => GestureLabel::Fist,
            }),
            Self::Point => Some(GestureLabel::Point),
            Self::Palm => Some(GestureLabel::OpenPalm),
            Self::Fist => Some(GestureLabel::Fist),
            Self::Idle => None,
        }
    }
}

/// Deterministic landmark source sweeping a fingertip around the screen centre.
///
/// In two-hand mode the aim hand always points while the other hand shows the
/// scripted pose; in single-hand mode one hand does both.
#[derive(Debug)]
pub(crate) struct ScriptedHands {
    script: Script,
    aim_hand: Handedness,
    two_hands: bool,
    frame: u32,
    rng: ChaCha8Rng,
}

impl ScriptedHands {
    pub(crate) fn new(script: Script, aim_hand: Handedness, two_hands: bool, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(SCRIPT_RNG_STREAM);
        Self {
            script,
            aim_hand,
            two_hands,
            frame: 0,
            rng,
        }
    }

    fn fingertip(&self) -> Vec2 {
        let angle = self.frame as f32 * ORBIT_STEP;
        Vec2::new(
            0.5 + ORBIT_RADIUS * angle.cos(),
            0.5 + ORBIT_RADIUS * 0.8 * angle.sin(),
        )
    }

    fn hands(&self, pose: GestureLabel) -> Vec<HandObservation> {
        let tip = self.fingertip();
        if !self.two_hands {
            return vec![synthetic::hand(pose, self.aim_hand, tip, HAND_SCALE)];
        }
        let action_hand = self.aim_hand.opposite();
        let action_tip = match action_hand {
            Handedness::Left => Vec2::new(0.2, 0.6),
            Handedness::Right => Vec2::new(0.8, 0.6),
        };
        vec![
            synthetic::hand(GestureLabel::Point, self.aim_hand, tip, HAND_SCALE),
            synthetic::hand(pose, action_hand, action_tip, HAND_SCALE),
        ]
    }
}

impl LandmarkSource for ScriptedHands {
    fn poll(&mut self) -> Option<Vec<HandObservation>> {
        if self.rng.gen_bool(STALL_CHANCE) {
            return None;
        }
        let frame = self.frame;
        self.frame = self.frame.wrapping_add(1);
        let hands = match self.script.pose(frame) {
            Some(_) if self.rng.gen_bool(DROPOUT_CHANCE) => Vec::new(),
            Some(pose) => self.hands(pose),
            None => Vec::new(),
        };
        Some(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polls(source: &mut ScriptedHands, count: usize) -> Vec<Option<Vec<HandObservation>>> {
        (0..count).map(|_| source.poll()).collect()
    }

    #[test]
    fn same_seed_same_frames() {
        let mut first = ScriptedHands::new(Script::Cycle, Handedness::Right, true, 4);
        let mut second = ScriptedHands::new(Script::Cycle, Handedness::Right, true, 4);
        assert_eq!(polls(&mut first, 400), polls(&mut second, 400));
    }

    #[test]
    fn two_hand_mode_yields_an_aim_and_an_action_hand() {
        let mut source = ScriptedHands::new(Script::Fist, Handedness::Right, true, 4);
        let hands = polls(&mut source, 200)
            .into_iter()
            .flatten()
            .find(|hands| !hands.is_empty())
            .expect("at least one detected frame");

        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness(), Handedness::Right);
        assert_eq!(hands[1].handedness(), Handedness::Left);
    }

    #[test]
    fn idle_script_never_shows_a_hand() {
        let mut source = ScriptedHands::new(Script::Idle, Handedness::Right, false, 4);
        assert!(polls(&mut source, 100)
            .into_iter()
            .flatten()
            .all(|hands| hands.is_empty()));
    }

    #[test]
    fn cycle_spends_half_its_time_firing() {
        let firing = (0..POSE_FRAMES * 4)
            .filter(|frame| Script::Cycle.pose(*frame) == Some(GestureLabel::OpenPalm))
            .count();
        assert_eq!(firing as u32, POSE_FRAMES * 2);
    }
}

use gesture_strike_core::{
    landmark, ConfirmedCommand, GameConfig, GestureLabel, HandObservation, Handedness, Vec2,
};
use gesture_strike_system_gesture::{synthetic, Classifier, GestureEngine, GestureFrame};

const LABELS: [GestureLabel; 4] = [
    GestureLabel::None,
    GestureLabel::Point,
    GestureLabel::OpenPalm,
    GestureLabel::Fist,
];

fn single_hand_config() -> GameConfig {
    GameConfig {
        two_hand_mode: false,
        ..GameConfig::default()
    }
}

fn right(label: GestureLabel) -> HandObservation {
    synthetic::hand(label, Handedness::Right, Vec2::new(0.7, 0.4), 0.2)
}

fn left(label: GestureLabel) -> HandObservation {
    synthetic::hand(label, Handedness::Left, Vec2::new(0.3, 0.5), 0.2)
}

fn feed(engine: &mut GestureEngine, frames: &[Vec<HandObservation>]) -> Vec<GestureFrame> {
    frames.iter().map(|hands| engine.update(hands)).collect()
}

#[test]
fn synthetic_poses_classify_as_intended_at_any_scale_and_hand() {
    let classifier = Classifier::new(&GameConfig::default());
    for label in LABELS {
        for handedness in [Handedness::Left, Handedness::Right] {
            for scale in [0.05, 0.2, 0.6] {
                let hand = synthetic::hand(label, handedness, Vec2::new(0.5, 0.5), scale);
                assert_eq!(
                    classifier.classify(&hand),
                    Ok(label),
                    "{label:?} {handedness:?} at scale {scale}"
                );
            }
        }
    }
}

#[test]
fn fewer_than_k_frames_never_confirm() {
    for frames in 1..=5 {
        let config = GameConfig {
            confirmation_frames: frames,
            ..single_hand_config()
        };
        let mut engine = GestureEngine::new(&config);
        for label in [GestureLabel::OpenPalm, GestureLabel::Fist, GestureLabel::Point] {
            engine.reset();
            for _ in 0..frames - 1 {
                let frame = engine.update(&[right(label)]);
                assert!(!frame.any_confirmed(), "{label:?} confirmed early with K={frames}");
            }
        }
    }
}

#[test]
fn confirmation_lands_exactly_on_kth_frame() {
    let mut engine = GestureEngine::new(&single_hand_config());
    let script = vec![
        vec![right(GestureLabel::Fist)],
        vec![right(GestureLabel::OpenPalm)],
        vec![right(GestureLabel::OpenPalm)],
        vec![right(GestureLabel::OpenPalm)],
        vec![right(GestureLabel::OpenPalm)],
    ];

    let shooting: Vec<bool> = feed(&mut engine, &script)
        .iter()
        .map(GestureFrame::shooting)
        .collect();

    assert_eq!(shooting, vec![false, false, false, true, true]);
}

#[test]
fn release_is_immediate() {
    let mut engine = GestureEngine::new(&single_hand_config());
    for _ in 0..3 {
        let _ = engine.update(&[right(GestureLabel::Fist)]);
    }
    assert!(engine.update(&[right(GestureLabel::Fist)]).shielding());

    let released = engine.update(&[right(GestureLabel::Point)]);
    assert!(!released.shielding());
    assert_eq!(released.action_gesture, GestureLabel::None);
}

#[test]
fn losing_the_hand_deactivates_actions_and_leaves_aim_empty() {
    let mut engine = GestureEngine::new(&single_hand_config());
    for _ in 0..3 {
        let _ = engine.update(&[right(GestureLabel::OpenPalm)]);
    }

    let frame = engine.update(&[]);

    assert!(!frame.hand_visible());
    assert!(!frame.shooting());
    assert_eq!(frame.aim_point, None);
    let mut commands = Vec::new();
    frame.push_commands(&mut commands);
    assert!(!commands
        .iter()
        .any(|command| matches!(command, ConfirmedCommand::Aim(_))));
}

#[test]
fn aim_point_tracks_index_tip_in_screen_pixels() {
    let mut engine = GestureEngine::new(&single_hand_config());
    let frame = engine.update(&[right(GestureLabel::Point)]);
    let aim = frame.aim_point.expect("aim point");
    assert!(aim.distance(Vec2::new(0.7 * 1280.0, 0.4 * 720.0)) < 1e-2);
}

#[test]
fn single_hand_mode_follows_most_confident_hand() {
    let mut engine = GestureEngine::new(&single_hand_config());
    let confident = synthetic::hand(GestureLabel::Fist, Handedness::Left, Vec2::new(0.2, 0.2), 0.2);
    let doubtful = HandObservation::new(
        right(GestureLabel::OpenPalm).keypoints().to_vec(),
        Handedness::Right,
        0.4,
    );

    let mut last = GestureFrame::default();
    for _ in 0..3 {
        last = engine.update(&[doubtful.clone(), confident.clone()]);
    }

    assert!(last.shielding());
    let aim = last.aim_point.expect("aim point");
    assert!(aim.distance(Vec2::new(0.2 * 1280.0, 0.2 * 720.0)) < 1e-2);
}

#[test]
fn two_hands_split_aim_and_action_regardless_of_order() {
    let mut forward = GestureEngine::new(&GameConfig::default());
    let mut reversed = GestureEngine::new(&GameConfig::default());

    let mut frames = Vec::new();
    for _ in 0..3 {
        let a = forward.update(&[right(GestureLabel::Point), left(GestureLabel::OpenPalm)]);
        let b = reversed.update(&[left(GestureLabel::OpenPalm), right(GestureLabel::Point)]);
        assert_eq!(a, b);
        frames.push(a);
    }

    let last = frames.last().copied().expect("frames");
    assert_eq!(last.aim_gesture, GestureLabel::Point);
    assert_eq!(last.action_gesture, GestureLabel::OpenPalm);
    assert!(last.shooting());
    let aim = last.aim_point.expect("aim point");
    assert!(aim.distance(Vec2::new(0.7 * 1280.0, 0.4 * 720.0)) < 1e-2);
}

#[test]
fn roles_debounce_independently() {
    let mut engine = GestureEngine::new(&GameConfig::default());
    for _ in 0..3 {
        let _ = engine.update(&[right(GestureLabel::Point), left(GestureLabel::Fist)]);
    }

    let frame = engine.update(&[right(GestureLabel::OpenPalm), left(GestureLabel::Fist)]);

    assert_eq!(frame.aim_gesture, GestureLabel::None);
    assert!(frame.shielding());
}

#[test]
fn one_visible_hand_drives_both_roles() {
    let mut engine = GestureEngine::new(&GameConfig::default());
    let mut last = GestureFrame::default();
    for _ in 0..3 {
        last = engine.update(&[left(GestureLabel::OpenPalm)]);
    }

    assert_eq!(last.hands_visible, 1);
    assert!(last.shooting());
    assert_eq!(last.aim_gesture, GestureLabel::OpenPalm);
    let aim = last.aim_point.expect("aim point");
    assert!(aim.distance(Vec2::new(0.3 * 1280.0, 0.5 * 720.0)) < 1e-2);
}

#[test]
fn same_handedness_pair_aims_with_the_right_side_hand() {
    let mut engine = GestureEngine::new(&GameConfig::default());
    let near = synthetic::hand(GestureLabel::Point, Handedness::Right, Vec2::new(0.8, 0.5), 0.2);
    let far = synthetic::hand(GestureLabel::Fist, Handedness::Right, Vec2::new(0.2, 0.5), 0.2);

    let frame = engine.update(&[far, near]);

    let aim = frame.aim_point.expect("aim point");
    assert!((aim.x - 0.8 * 1280.0).abs() < 1e-2);
}

#[test]
fn malformed_hand_is_discarded_without_disturbing_the_other() {
    let mut engine = GestureEngine::new(&single_hand_config());
    let broken = HandObservation::new(vec![Vec2::ZERO; 4], Handedness::Left, 1.0);
    let mut nan_points = right(GestureLabel::Fist).keypoints().to_vec();
    nan_points[landmark::MIDDLE_TIP] = Vec2::NAN;
    let poisoned = HandObservation::new(nan_points, Handedness::Right, 1.0);

    let mut last = GestureFrame::default();
    for _ in 0..3 {
        last = engine.update(&[broken.clone(), poisoned.clone(), right(GestureLabel::Fist)]);
    }

    assert_eq!(last.hands_visible, 1);
    assert!(last.shielding());
}

use std::time::Duration;

use gesture_strike_core::{
    BulletId, Command, DifficultyLevel, EnemyId, EnemyTier, Event, GameConfig, GameState, Vec2,
    ZigZag,
};
use gesture_strike_system_difficulty::{DifficultyController, DifficultyTuning, WindowStats};
use gesture_strike_world::{apply, query, World};

fn shots(count: u32) -> impl Iterator<Item = Event> {
    (0..count).map(|slot| Event::ShotFired {
        bullet: BulletId::new(slot, 0),
        origin: Vec2::ZERO,
    })
}

fn kills(count: u32) -> impl Iterator<Item = Event> {
    (0..count).map(|id| Event::EnemyKilled {
        enemy: EnemyId::new(id),
        tier: EnemyTier::Standard,
        position: Vec2::ZERO,
        score: 100,
    })
}

fn elapsed(secs: u64) -> Event {
    Event::TimeAdvanced {
        dt: Duration::from_secs(secs),
    }
}

fn window(shot_count: u32, hit_count: u32, secs: u64) -> Vec<Event> {
    shots(shot_count)
        .chain(kills(hit_count))
        .chain(std::iter::once(elapsed(secs)))
        .collect()
}

#[test]
fn sharp_play_raises_the_level_after_one_window() {
    let mut controller = DifficultyController::new(DifficultyTuning::default());
    let mut commands = Vec::new();

    controller.handle(&window(10, 8, 10), GameState::Playing, &mut commands);

    assert_eq!(
        commands,
        vec![Command::SetDifficultyLevel {
            level: DifficultyLevel::new(2)
        }]
    );
    assert_eq!(controller.window(), WindowStats::default());
}

#[test]
fn poor_play_lowers_the_level() {
    let mut controller = DifficultyController::new(DifficultyTuning::default());
    let mut commands = Vec::new();
    for _ in 0..4 {
        controller.handle(&window(10, 9, 10), GameState::Playing, &mut commands);
    }
    assert_eq!(controller.level(), DifficultyLevel::new(5));
    commands.clear();

    controller.handle(&window(10, 3, 10), GameState::Playing, &mut commands);

    assert_eq!(
        commands,
        vec![Command::SetDifficultyLevel {
            level: DifficultyLevel::new(4)
        }]
    );
}

#[test]
fn no_evaluation_before_the_window_closes() {
    let mut controller = DifficultyController::new(DifficultyTuning::default());
    let mut commands = Vec::new();

    controller.handle(&window(10, 10, 9), GameState::Playing, &mut commands);
    assert!(commands.is_empty());
    assert_eq!(controller.window().shots, 10);

    controller.handle(&[elapsed(1)], GameState::Playing, &mut commands);
    assert_eq!(commands.len(), 1);
}

#[test]
fn time_outside_play_does_not_count() {
    let mut controller = DifficultyController::new(DifficultyTuning::default());
    let mut commands = Vec::new();

    controller.handle(&window(10, 10, 30), GameState::Calibration, &mut commands);
    controller.handle(&window(10, 10, 30), GameState::GameOver, &mut commands);

    assert!(commands.is_empty());
    assert_eq!(controller.window(), WindowStats::default());
}

#[test]
fn level_is_capped_at_ten_and_floored_at_one() {
    let mut controller = DifficultyController::new(DifficultyTuning::default());
    let mut commands = Vec::new();
    for _ in 0..15 {
        controller.handle(&window(10, 10, 10), GameState::Playing, &mut commands);
    }
    assert_eq!(controller.level(), DifficultyLevel::MAX);
    assert_eq!(commands.len(), 9);

    commands.clear();
    for _ in 0..15 {
        controller.handle(&window(10, 0, 10), GameState::Playing, &mut commands);
    }
    assert_eq!(controller.level(), DifficultyLevel::MIN);
    assert_eq!(commands.len(), 9);
}

#[test]
fn session_reset_returns_to_the_first_level() {
    let mut controller = DifficultyController::new(DifficultyTuning::default());
    let mut commands = Vec::new();
    controller.handle(&window(10, 10, 10), GameState::Playing, &mut commands);
    controller.handle(&window(5, 5, 4), GameState::Playing, &mut commands);

    controller.handle(&[Event::SessionReset], GameState::Menu, &mut commands);

    assert_eq!(controller.level(), DifficultyLevel::MIN);
    assert_eq!(controller.window(), WindowStats::default());
}

#[test]
fn raised_level_scales_kill_scores_in_the_world() {
    let config = GameConfig {
        bullet_spread_degrees: 0.0,
        ..GameConfig::default()
    };
    let mut world = World::new(config.clone());
    let mut controller = DifficultyController::new(DifficultyTuning::from_config(&config));
    let mut commands = Vec::new();

    controller.handle(&window(10, 8, 10), GameState::Playing, &mut commands);
    let mut events = Vec::new();
    for command in commands.drain(..) {
        apply(&mut world, command, &mut events);
    }
    assert_eq!(
        events,
        vec![Event::DifficultyChanged {
            level: DifficultyLevel::new(2)
        }]
    );

    let target = query::core(&world).position + Vec2::new(0.0, -200.0);
    events.clear();
    apply(
        &mut world,
        Command::SpawnEnemy {
            position: target,
            tier: EnemyTier::Standard,
            speed: 0.0,
            zigzag: ZigZag::NONE,
        },
        &mut events,
    );
    apply(&mut world, Command::AimAt { cursor: target }, &mut events);
    apply(&mut world, Command::FireBullet, &mut events);
    let bullet = events
        .iter()
        .find_map(|event| match event {
            Event::ShotFired { bullet, .. } => Some(*bullet),
            _ => None,
        })
        .expect("shot fired");
    events.clear();
    apply(
        &mut world,
        Command::KillEnemy {
            enemy: EnemyId::new(0),
            bullet,
        },
        &mut events,
    );

    assert!(matches!(
        events.as_slice(),
        [Event::EnemyKilled { score: 200, .. }]
    ));
    assert_eq!(query::difficulty_level(&world), DifficultyLevel::new(2));
}

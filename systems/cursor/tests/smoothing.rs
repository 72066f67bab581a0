use gesture_strike_core::{GameConfig, Vec2};
use gesture_strike_system_cursor::CursorSmoother;
use gesture_strike_world::{apply, query, World};

fn smoother() -> CursorSmoother {
    CursorSmoother::new(&GameConfig::default())
}

#[test]
fn missing_hand_holds_last_position() {
    let mut smoother = smoother();
    let moved = smoother.update(Some(Vec2::new(900.0, 200.0)));
    for _ in 0..10 {
        assert_eq!(smoother.update(None), moved);
    }
}

#[test]
fn displacement_inside_dead_zone_is_ignored() {
    let mut smoother = smoother();
    let start = smoother.position();

    for offset in [Vec2::new(4.9, 0.0), Vec2::new(0.0, -3.0), Vec2::new(3.0, 3.0)] {
        assert_eq!(smoother.update(Some(start + offset)), start);
    }
}

#[test]
fn displacement_at_dead_zone_moves_cursor() {
    let mut smoother = smoother();
    let start = smoother.position();
    let moved = smoother.update(Some(start + Vec2::new(5.0, 0.0)));
    assert!((moved.x - (start.x + 5.0 * 0.35)).abs() < 1e-4);
}

#[test]
fn constant_sample_converges_without_overshoot() {
    let mut smoother = smoother();
    let target = Vec2::new(1100.0, 120.0);
    let mut previous = smoother.position().distance(target);

    for _ in 0..60 {
        let cursor = smoother.update(Some(target));
        let remaining = cursor.distance(target);
        assert!(remaining <= previous, "cursor moved away from a resting sample");
        assert!(cursor.x <= target.x && cursor.y >= target.y, "cursor overshot");
        previous = remaining;
    }

    // Convergence stops once the gap falls inside the dead zone.
    assert!(previous < 5.0);
}

#[test]
fn first_step_follows_exponential_update() {
    let mut smoother = smoother();
    let start = smoother.position();
    let raw = Vec2::new(1000.0, 500.0);

    let cursor = smoother.update(Some(raw));

    let expected = start + (raw - start) * 0.35;
    assert!(cursor.distance(expected) < 1e-3);
}

#[test]
fn aim_command_steers_world_gun() {
    let mut smoother = smoother();
    let mut world = World::new(GameConfig::default());
    let mut commands = Vec::new();
    let mut events = Vec::new();

    smoother.handle(Some(Vec2::new(640.0, 0.0)), &mut commands);
    for command in commands.drain(..) {
        apply(&mut world, command, &mut events);
    }

    assert_eq!(query::cursor(&world), smoother.position());
    let (_, heading) = query::gun(&world);
    assert!(heading.y < -0.99);
}

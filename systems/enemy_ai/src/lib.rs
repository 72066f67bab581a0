#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy behaviour system driving every drone's state machine.
//!
//! Each enemy carries an [`EnemyBrain`]; [`step`] is the pure transition
//! function that advances one brain by one tick. It reads only that enemy's
//! data plus the shared core and cursor positions, so enemies never observe
//! each other.

use gesture_strike_core::{AiState, Command, EnemyBrain, EnemyTier, EnemyView, Event, GameConfig, Vec2};

/// Thresholds that shape dodging behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    /// Cursor distance that counts as lingering over an enemy.
    pub dodge_radius: f32,
    /// Continuous lingering needed before a dodge starts, in seconds.
    pub dodge_trigger_secs: f32,
    /// Length of a dodge, in seconds.
    pub dodge_duration_secs: f32,
}

impl Tuning {
    /// Extracts the behaviour thresholds from the session configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            dodge_radius: config.dodge_radius,
            dodge_trigger_secs: config.dodge_trigger_secs,
            dodge_duration_secs: config.dodge_duration_secs,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Per-enemy inputs for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringInput {
    /// Seconds elapsed this tick.
    pub dt: f32,
    /// Enemy centre.
    pub position: Vec2,
    /// Core centre.
    pub core: Vec2,
    /// Live cursor.
    pub cursor: Vec2,
    /// Cruising speed of the enemy.
    pub speed: f32,
    /// Tier of the enemy.
    pub tier: EnemyTier,
}

/// Result of advancing one brain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    /// Updated behaviour data.
    pub brain: EnemyBrain,
    /// Velocity to apply on the next tick.
    pub velocity: Vec2,
    /// Whether the stagger completed and the enemy should be removed.
    pub despawn: bool,
}

/// Advances one enemy brain by a tick.
#[must_use]
pub fn step(brain: &EnemyBrain, input: &SteeringInput, tuning: &Tuning) -> Steering {
    let mut brain = *brain;
    brain.age_secs += input.dt;

    if brain.state == AiState::Stagger {
        brain.stagger_secs -= input.dt;
        return Steering {
            brain,
            velocity: Vec2::ZERO,
            despawn: brain.stagger_secs <= 0.0,
        };
    }

    if input.position.distance(input.cursor) < tuning.dodge_radius {
        brain.proximity_secs += input.dt;
    } else {
        brain.proximity_secs = 0.0;
    }

    if brain.state == AiState::Dodge {
        brain.dodge_secs -= input.dt;
        if brain.dodge_secs <= 0.0 {
            brain.state = input.tier.cruising_state();
            brain.dodge_secs = 0.0;
        }
    } else if brain.proximity_secs >= tuning.dodge_trigger_secs {
        brain.state = AiState::Dodge;
        brain.dodge_secs = tuning.dodge_duration_secs;
        brain.dodge_direction = dodge_direction(input.position, input.core, input.cursor);
        brain.proximity_secs = 0.0;
    }

    let velocity = match brain.state {
        AiState::Dodge => brain.dodge_direction * input.speed,
        AiState::Seek => seek(input),
        AiState::Aggressive => zigzag(&brain, input),
        AiState::Stagger => Vec2::ZERO,
    };

    Steering {
        brain,
        velocity,
        despawn: false,
    }
}

/// Sidestep direction: perpendicular to the core heading, on the side away from the cursor.
#[must_use]
pub fn dodge_direction(position: Vec2, core: Vec2, cursor: Vec2) -> Vec2 {
    let heading = (core - position).normalize_or_zero();
    let sideways = if heading == Vec2::ZERO {
        Vec2::X
    } else {
        heading.perp()
    };
    if sideways.dot(cursor - position) > 0.0 {
        -sideways
    } else {
        sideways
    }
}

fn seek(input: &SteeringInput) -> Vec2 {
    (input.core - input.position).normalize_or_zero() * input.speed
}

fn zigzag(brain: &EnemyBrain, input: &SteeringInput) -> Vec2 {
    let heading = (input.core - input.position).normalize_or_zero();
    if heading == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let wave = brain.zigzag;
    let sway = (brain.age_secs * wave.frequency + wave.phase).sin() * wave.amplitude;
    let blended = heading * input.speed + heading.perp() * sway;
    blended.normalize_or_zero() * input.speed
}

/// Pure system that reacts to elapsed time and steers every enemy.
#[derive(Debug, Default)]
pub struct EnemyAi {
    tuning: Tuning,
}

impl EnemyAi {
    /// Creates the system with the provided thresholds.
    #[must_use]
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    /// Consumes world events and the enemy view to emit steering commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        core: Vec2,
        cursor: Vec2,
        out: &mut Vec<Command>,
    ) {
        let dt: f32 = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(dt.as_secs_f32()),
                _ => None,
            })
            .sum();
        if dt <= 0.0 {
            return;
        }

        for enemy in enemies.iter() {
            let input = SteeringInput {
                dt,
                position: enemy.position,
                core,
                cursor,
                speed: enemy.speed,
                tier: enemy.tier,
            };
            let steering = step(&enemy.brain, &input, &self.tuning);
            if steering.despawn {
                out.push(Command::DespawnEnemy { enemy: enemy.id });
            } else {
                out.push(Command::SteerEnemy {
                    enemy: enemy.id,
                    brain: steering.brain,
                    velocity: steering.velocity,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_strike_core::ZigZag;

    fn input(position: Vec2, cursor: Vec2, tier: EnemyTier) -> SteeringInput {
        SteeringInput {
            dt: 0.1,
            position,
            core: Vec2::new(640.0, 360.0),
            cursor,
            speed: 120.0,
            tier,
        }
    }

    #[test]
    fn dodge_direction_points_away_from_cursor() {
        let position = Vec2::new(100.0, 360.0);
        let core = Vec2::new(640.0, 360.0);

        let above = dodge_direction(position, core, Vec2::new(110.0, 340.0));
        assert_eq!(above, Vec2::new(0.0, 1.0));

        let below = dodge_direction(position, core, Vec2::new(110.0, 380.0));
        assert_eq!(below, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn zigzag_keeps_cruising_speed() {
        let brain = EnemyBrain::spawned(
            EnemyTier::Boss,
            ZigZag {
                phase: 0.3,
                frequency: 3.0,
                amplitude: 80.0,
            },
        );
        let tuning = Tuning::default();
        let mut current = brain;
        for _ in 0..20 {
            let steering = step(
                &current,
                &input(Vec2::new(100.0, 100.0), Vec2::ZERO, EnemyTier::Boss),
                &tuning,
            );
            assert!((steering.velocity.length() - 120.0).abs() < 1e-3);
            current = steering.brain;
        }
    }

    #[test]
    fn enemy_on_top_of_core_stops() {
        let brain = EnemyBrain::spawned(EnemyTier::Standard, ZigZag::NONE);
        let steering = step(
            &brain,
            &input(Vec2::new(640.0, 360.0), Vec2::ZERO, EnemyTier::Standard),
            &Tuning::default(),
        );
        assert_eq!(steering.velocity, Vec2::ZERO);
    }
}

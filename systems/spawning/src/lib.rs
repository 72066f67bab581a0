#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands
//! and tracking the wave kill quota.

use std::{f32::consts::TAU, time::Duration};

use gesture_strike_core::{
    Command, DifficultyLevel, EnemyTier, Event, GameConfig, GameState, Vec2, ZigZag,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

const SPAWN_RNG_STREAM: u64 = 0x7370_6177_6e;
const ZIGZAG_FREQUENCY: (f32, f32) = (2.0, 4.0);
const ZIGZAG_AMPLITUDE: (f32, f32) = (40.0, 80.0);

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    base_interval_secs: f32,
    jitter_secs: f32,
    margin: f32,
    bounds: Vec2,
    base_speed: f32,
    first_wave_quota: u32,
    quota_growth: f32,
    rng_seed: u64,
}

impl Config {
    /// Extracts the spawn policy from the session configuration.
    #[must_use]
    pub fn from_game(config: &GameConfig) -> Self {
        Self {
            base_interval_secs: config.spawn_interval_secs,
            jitter_secs: config.spawn_jitter_secs,
            margin: config.spawn_margin,
            bounds: config.screen_size(),
            base_speed: config.enemy_base_speed,
            first_wave_quota: config.first_wave_quota,
            quota_growth: config.wave_quota_growth,
            rng_seed: config.seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands while playing.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    accumulator: Duration,
    next_interval: Duration,
    wave: u32,
    kills: u32,
    quota: u32,
    level: DifficultyLevel,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut spawning = Self {
            config,
            accumulator: Duration::ZERO,
            next_interval: Duration::ZERO,
            wave: 1,
            kills: 0,
            quota: config.first_wave_quota,
            level: DifficultyLevel::MIN,
            rng: seeded(config.rng_seed),
        };
        spawning.next_interval = spawning.roll_interval();
        spawning
    }

    /// Wave currently being fielded.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Kills required to finish the current wave.
    #[must_use]
    pub const fn quota(&self) -> u32 {
        self.quota
    }

    /// Kills scored so far in the current wave.
    #[must_use]
    pub const fn kills_this_wave(&self) -> u32 {
        self.kills
    }

    /// Delay until the next spawn once the accumulator is empty.
    #[must_use]
    pub const fn next_interval(&self) -> Duration {
        self.next_interval
    }

    /// Consumes events to emit spawn and wave commands.
    pub fn handle(&mut self, events: &[Event], state: GameState, out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::SessionReset => self.restart(),
                Event::DifficultyChanged { level } => self.level = *level,
                Event::EnemyKilled { .. } => self.record_kill(out),
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                _ => {}
            }
        }

        if state != GameState::Playing {
            self.accumulator = Duration::ZERO;
            return;
        }
        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        while self.accumulator >= self.next_interval {
            self.accumulator -= self.next_interval;
            let command = self.spawn_command();
            out.push(command);
            self.next_interval = self.roll_interval();
        }
    }

    fn record_kill(&mut self, out: &mut Vec<Command>) {
        self.kills += 1;
        if self.kills < self.quota {
            return;
        }
        self.wave += 1;
        self.kills = 0;
        self.quota = ((self.quota as f32) * self.config.quota_growth) as u32;
        info!(
            wave = self.wave,
            quota = self.quota,
            tier = EnemyTier::from_wave(self.wave).label(),
            "wave advanced"
        );
        out.push(Command::SetWave { wave: self.wave });
    }

    fn restart(&mut self) {
        self.accumulator = Duration::ZERO;
        self.wave = 1;
        self.kills = 0;
        self.quota = self.config.first_wave_quota;
        self.level = DifficultyLevel::MIN;
        self.rng = seeded(self.config.rng_seed);
        self.next_interval = self.roll_interval();
    }

    fn roll_interval(&mut self) -> Duration {
        let shortest = self.level.spawn_interval_secs(self.config.base_interval_secs);
        let jitter = if self.config.jitter_secs > 0.0 {
            self.rng.gen_range(0.0..self.config.jitter_secs)
        } else {
            0.0
        };
        Duration::from_secs_f32(shortest + jitter)
    }

    fn spawn_command(&mut self) -> Command {
        let tier = EnemyTier::from_wave(self.wave);
        let position = self.edge_position();
        let zigzag = if tier.is_aggressive() {
            ZigZag {
                phase: self.rng.gen_range(0.0..TAU),
                frequency: self.rng.gen_range(ZIGZAG_FREQUENCY.0..ZIGZAG_FREQUENCY.1),
                amplitude: self.rng.gen_range(ZIGZAG_AMPLITUDE.0..ZIGZAG_AMPLITUDE.1),
            }
        } else {
            ZigZag::NONE
        };
        Command::SpawnEnemy {
            position,
            tier,
            speed: self.config.base_speed
                * tier.speed_multiplier()
                * self.level.speed_multiplier(),
            zigzag,
        }
    }

    /// Picks a point just outside one of the four screen edges, uniformly.
    fn edge_position(&mut self) -> Vec2 {
        let Vec2 {
            x: width,
            y: height,
        } = self.config.bounds;
        let margin = self.config.margin;
        match self.rng.gen_range(0..4) {
            0 => Vec2::new(self.rng.gen_range(0.0..=width), -margin),
            1 => Vec2::new(self.rng.gen_range(0.0..=width), height + margin),
            2 => Vec2::new(-margin, self.rng.gen_range(0.0..=height)),
            _ => Vec2::new(width + margin, self.rng.gen_range(0.0..=height)),
        }
    }
}

fn seeded(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(SPAWN_RNG_STREAM);
    rng
}

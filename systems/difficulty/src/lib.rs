#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Adaptive difficulty controller.
//!
//! Performance is sampled over fixed windows of playing time. At the end of
//! each window the level moves by at most one step, then the window counters
//! start over. Cumulative session telemetry lives in the world and is never
//! touched here.

use std::time::Duration;

use gesture_strike_core::{Command, DifficultyLevel, Event, GameConfig, GameState};
use tracing::info;

/// Thresholds steering level adjustments.
#[derive(Clone, Debug)]
pub struct DifficultyTuning {
    /// Playing time covered by one evaluation window.
    pub window: Duration,
    /// Accuracy that must be exceeded to raise the level.
    pub raise_accuracy: f32,
    /// Accuracy below which the level drops.
    pub lower_accuracy: f32,
    /// Window damage that blocks a raise once reached.
    pub damage_threshold: f32,
    /// Accuracy assumed for a window without shots.
    pub neutral_accuracy: f32,
}

impl DifficultyTuning {
    /// Extracts the thresholds from the session configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            window: Duration::from_secs_f32(config.difficulty_eval_secs),
            raise_accuracy: config.raise_accuracy,
            lower_accuracy: config.lower_accuracy,
            damage_threshold: config.damage_threshold,
            neutral_accuracy: 0.5,
        }
    }
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Counters gathered during one evaluation window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Shots that left the gun.
    pub shots: u32,
    /// Shots that killed an enemy.
    pub hits: u32,
    /// Damage the core absorbed.
    pub damage: u32,
}

impl WindowStats {
    /// Hit ratio for the window, or `neutral` when nothing was fired.
    #[must_use]
    pub fn accuracy(&self, neutral: f32) -> f32 {
        if self.shots == 0 {
            neutral
        } else {
            self.hits as f32 / self.shots as f32
        }
    }
}

/// Applies exactly one adjustment rule to `level` for a finished window.
#[must_use]
pub fn evaluate(
    level: DifficultyLevel,
    stats: &WindowStats,
    tuning: &DifficultyTuning,
) -> DifficultyLevel {
    let accuracy = stats.accuracy(tuning.neutral_accuracy);
    if accuracy > tuning.raise_accuracy && (stats.damage as f32) < tuning.damage_threshold {
        level.raised()
    } else if accuracy < tuning.lower_accuracy {
        level.lowered()
    } else {
        level
    }
}

/// Pure system that retunes the difficulty level from windowed telemetry.
#[derive(Debug)]
pub struct DifficultyController {
    tuning: DifficultyTuning,
    level: DifficultyLevel,
    elapsed: Duration,
    window: WindowStats,
}

impl DifficultyController {
    /// Creates a controller at the lowest level.
    #[must_use]
    pub fn new(tuning: DifficultyTuning) -> Self {
        Self {
            tuning,
            level: DifficultyLevel::MIN,
            elapsed: Duration::ZERO,
            window: WindowStats::default(),
        }
    }

    /// Level the controller currently considers active.
    #[must_use]
    pub const fn level(&self) -> DifficultyLevel {
        self.level
    }

    /// Counters gathered so far in the open window.
    #[must_use]
    pub const fn window(&self) -> WindowStats {
        self.window
    }

    /// Consumes world events and emits level changes at window boundaries.
    ///
    /// Only events observed while playing count towards the window.
    pub fn handle(&mut self, events: &[Event], state: GameState, out: &mut Vec<Command>) {
        for event in events {
            if let Event::SessionReset = event {
                self.reset();
                continue;
            }
            if state != GameState::Playing {
                continue;
            }
            match event {
                Event::ShotFired { .. } => self.window.shots += 1,
                Event::EnemyKilled { .. } => self.window.hits += 1,
                Event::CoreDamaged { amount, .. } => {
                    self.window.damage = self.window.damage.saturating_add(*amount);
                }
                Event::TimeAdvanced { dt } => self.elapsed = self.elapsed.saturating_add(*dt),
                _ => {}
            }
        }

        if self.tuning.window.is_zero() {
            return;
        }
        while self.elapsed >= self.tuning.window {
            self.elapsed -= self.tuning.window;
            self.close_window(out);
        }
    }

    fn close_window(&mut self, out: &mut Vec<Command>) {
        let stats = std::mem::take(&mut self.window);
        let next = evaluate(self.level, &stats, &self.tuning);
        if next == self.level {
            return;
        }
        info!(
            from = self.level.get(),
            to = next.get(),
            accuracy = stats.accuracy(self.tuning.neutral_accuracy),
            damage = stats.damage,
            "difficulty adjusted"
        );
        self.level = next;
        out.push(Command::SetDifficultyLevel { level: next });
    }

    fn reset(&mut self) {
        self.level = DifficultyLevel::MIN;
        self.elapsed = Duration::ZERO;
        self.window = WindowStats::default();
    }
}

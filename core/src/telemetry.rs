//! Cumulative per-session telemetry.

use serde::{Deserialize, Serialize};

use crate::DifficultyLevel;

/// Cumulative counters for one play session.
///
/// Counters only grow until the session is reset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SessionTelemetry {
    /// Bullets that actually left the gun.
    pub shots_fired: u64,
    /// Bullets that struck an enemy.
    pub hits: u64,
    /// Enemies destroyed.
    pub kills: u64,
    /// Total damage applied to the core.
    pub damage_taken: u64,
    /// Seconds spent in the playing state.
    pub survival_secs: f64,
    /// Wave currently being fought.
    pub wave: u32,
    /// Points earned.
    pub score: u64,
    /// Difficulty level most recently applied.
    pub difficulty: DifficultyLevel,
    /// Sum of measured spawn-to-kill reaction times.
    pub reaction_secs_total: f64,
    /// Number of reaction samples.
    pub reaction_samples: u32,
}

impl SessionTelemetry {
    /// Creates telemetry for a fresh session starting on wave one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wave: 1,
            ..Self::default()
        }
    }

    /// Fraction of fired bullets that hit, zero before the first shot.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        self.hits as f64 / self.shots_fired as f64
    }

    /// Accuracy truncated to whole percent.
    #[must_use]
    pub fn accuracy_pct(&self) -> u32 {
        (self.accuracy() * 100.0) as u32
    }

    /// Mean reaction time in whole milliseconds.
    #[must_use]
    pub fn avg_reaction_ms(&self) -> u32 {
        if self.reaction_samples == 0 {
            return 0;
        }
        (self.reaction_secs_total / f64::from(self.reaction_samples) * 1000.0) as u32
    }

    /// Serialisable digest shown on the game-over screen.
    #[must_use]
    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            total_shots: self.shots_fired,
            total_hits: self.hits,
            kills: self.kills,
            accuracy_pct: self.accuracy_pct(),
            damage_taken: self.damage_taken,
            survival_secs: (self.survival_secs * 10.0).round() / 10.0,
            wave: self.wave,
            score: self.score,
            avg_reaction_ms: self.avg_reaction_ms(),
            difficulty: self.difficulty.get(),
        }
    }
}

/// Serialisable digest of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    /// Bullets fired.
    pub total_shots: u64,
    /// Bullets that hit.
    pub total_hits: u64,
    /// Enemies destroyed.
    pub kills: u64,
    /// Accuracy in whole percent.
    pub accuracy_pct: u32,
    /// Damage applied to the core.
    pub damage_taken: u64,
    /// Survival time rounded to a tenth of a second.
    pub survival_secs: f64,
    /// Wave reached.
    pub wave: u32,
    /// Final score.
    pub score: u64,
    /// Mean spawn-to-kill reaction time.
    pub avg_reaction_ms: u32,
    /// Final difficulty level.
    pub difficulty: u8,
}

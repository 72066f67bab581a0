use std::{f32::consts::TAU, time::Duration};

use gesture_strike_core::Event;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SHAKE_RNG_STREAM: u64 = 0x7368_616b_65;

/// Strength of a single shake request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShakeKind {
    /// Shots and shield blocks.
    Small,
    /// Kills and core hits.
    Big,
}

impl ShakeKind {
    /// Peak offset in pixels.
    #[must_use]
    pub const fn amplitude(self) -> f32 {
        match self {
            Self::Small => 2.0,
            Self::Big => 6.0,
        }
    }

    /// Time until the shake has fully decayed.
    #[must_use]
    pub const fn duration_secs(self) -> f32 {
        match self {
            Self::Small => 0.10,
            Self::Big => 0.25,
        }
    }

    /// Shake triggered by a world event, if any.
    #[must_use]
    pub fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::ShotFired { .. } | Event::ShieldBlocked { .. } => Some(Self::Small),
            Event::EnemyKilled { .. } | Event::CoreDamaged { .. } => Some(Self::Big),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Shake {
    amplitude: f32,
    duration: f32,
    elapsed: f32,
    frequency: f32,
    phase: Vec2,
}

impl Shake {
    fn offset(&self) -> Vec2 {
        let t = self.elapsed / self.duration;
        let amplitude = self.amplitude * (1.0 - t) * (1.0 - t);
        Vec2::new(
            amplitude * (self.elapsed * self.frequency + self.phase.x).sin(),
            amplitude * (self.elapsed * self.frequency * 1.3 + self.phase.y).sin(),
        )
    }
}

/// Decaying sine-wave screen shake. Concurrent shakes sum.
#[derive(Debug)]
pub struct CameraShake {
    seed: u64,
    rng: ChaCha8Rng,
    shakes: Vec<Shake>,
}

impl CameraShake {
    /// Creates an idle shake whose frequencies and phases derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: seeded(seed),
            shakes: Vec::new(),
        }
    }

    /// Starts a new shake of the provided strength.
    pub fn trigger(&mut self, kind: ShakeKind) {
        self.shakes.push(Shake {
            amplitude: kind.amplitude(),
            duration: kind.duration_secs(),
            elapsed: 0.0,
            frequency: self.rng.gen_range(30.0..50.0),
            phase: Vec2::new(self.rng.gen_range(0.0..TAU), self.rng.gen_range(0.0..TAU)),
        });
    }

    /// Starts one shake per event that calls for it. A reset clears everything.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            if let Event::SessionReset = event {
                self.reset();
            } else if let Some(kind) = ShakeKind::for_event(event) {
                self.trigger(kind);
            }
        }
    }

    /// Ages every shake and drops the finished ones.
    pub fn update(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        for shake in &mut self.shakes {
            shake.elapsed += dt;
        }
        self.shakes.retain(|shake| shake.elapsed < shake.duration);
    }

    /// Pixel offset to add to every world-space draw call this frame.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.shakes.iter().map(Shake::offset).sum()
    }

    /// Number of shakes still decaying.
    #[must_use]
    pub fn active(&self) -> usize {
        self.shakes.len()
    }

    /// Drops all shakes and reseeds the generator.
    pub fn reset(&mut self) {
        self.shakes.clear();
        self.rng = seeded(self.seed);
    }
}

fn seeded(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(SHAKE_RNG_STREAM);
    rng
}

//! Cosmetic particle bursts stored in a fixed arena.

use std::{f32::consts::TAU, ops::RangeInclusive};

use gesture_strike_core::{ParticleSnapshot, Vec2};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::arena::Arena;

const GRAVITY: f32 = 60.0;

/// Kinds of burst the world emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Burst {
    Impact,
    Explosion,
    ShieldHit,
}

struct BurstProfile {
    count: usize,
    speed: RangeInclusive<f32>,
    life: RangeInclusive<f32>,
    size: RangeInclusive<f32>,
    red: RangeInclusive<u8>,
    green: RangeInclusive<u8>,
    blue: RangeInclusive<u8>,
}

impl Burst {
    fn profile(self) -> BurstProfile {
        match self {
            Self::Impact => BurstProfile {
                count: 8,
                speed: 60.0..=200.0,
                life: 0.2..=0.5,
                size: 2.0..=4.0,
                red: 0..=0,
                green: 180..=255,
                blue: 200..=255,
            },
            Self::Explosion => BurstProfile {
                count: 30,
                speed: 80.0..=350.0,
                life: 0.4..=1.0,
                size: 3.0..=7.0,
                red: 200..=255,
                green: 60..=150,
                blue: 0..=0,
            },
            Self::ShieldHit => BurstProfile {
                count: 12,
                speed: 50.0..=150.0,
                life: 0.2..=0.6,
                size: 2.0..=5.0,
                red: 60..=60,
                green: 140..=140,
                blue: 220..=255,
            },
        }
    }
}

#[derive(Clone, Debug)]
struct Particle {
    position: Vec2,
    velocity: Vec2,
    color: [u8; 3],
    size: f32,
    life: f32,
    max_life: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct Particles {
    arena: Arena<Particle>,
}

impl Particles {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Sprays a burst around `origin`; particles that do not fit are dropped.
    pub(crate) fn emit(&mut self, burst: Burst, origin: Vec2, rng: &mut ChaCha8Rng) {
        let profile = burst.profile();
        let mut dropped = 0_usize;
        for _ in 0..profile.count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(profile.speed.clone());
            let life = rng.gen_range(profile.life.clone());
            let color = [
                rng.gen_range(profile.red.clone()),
                rng.gen_range(profile.green.clone()),
                rng.gen_range(profile.blue.clone()),
            ];
            let size = rng.gen_range(profile.size.clone());
            let particle = Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                color,
                size,
                life,
                max_life: life,
            };
            if self.arena.insert(particle).is_none() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!(?burst, dropped, "particle arena full, dropping particles");
        }
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        self.arena.retain_mut(|particle| {
            particle.position += particle.velocity * dt;
            particle.velocity.y += GRAVITY * dt;
            particle.life -= dt;
            particle.life > 0.0
        });
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
    }

    pub(crate) fn snapshots(&self) -> Vec<ParticleSnapshot> {
        let mut snapshots = Vec::with_capacity(self.arena.len());
        for (_, _, particle) in self.arena.iter() {
            snapshots.push(ParticleSnapshot {
                position: particle.position,
                color: particle.color,
                size: particle.size,
                fade: (particle.life / particle.max_life).clamp(0.0, 1.0),
            });
        }
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{Burst, Particles};
    use gesture_strike_core::Vec2;

    #[test]
    fn full_arena_drops_newest_particles() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut particles = Particles::with_capacity(10);
        particles.emit(Burst::Impact, Vec2::ZERO, &mut rng);
        particles.emit(Burst::Impact, Vec2::ZERO, &mut rng);
        assert_eq!(particles.snapshots().len(), 10);
    }

    #[test]
    fn particles_expire_after_their_life() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut particles = Particles::with_capacity(64);
        particles.emit(Burst::Explosion, Vec2::new(100.0, 100.0), &mut rng);
        assert_eq!(particles.snapshots().len(), 30);

        particles.advance(0.3);
        assert!(particles
            .snapshots()
            .iter()
            .all(|particle| particle.fade > 0.0 && particle.fade < 1.0));

        particles.advance(1.0);
        assert!(particles.snapshots().is_empty());
    }
}

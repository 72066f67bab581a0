use gesture_strike_core::{AudioCue, AudioHint, DifficultyLevel, Event, IntensityTier, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const AUDIO_RNG_STREAM: u64 = 0x6175_6469_6f;
const SHOT_VOLUME: f32 = 0.8;
const VOLUME_JITTER: f32 = 0.05;

/// Derives sound cues and the music intensity from world events.
#[derive(Debug)]
pub(crate) struct AudioDirector {
    seed: u64,
    screen_width: f32,
    rng: ChaCha8Rng,
    intensity: Option<IntensityTier>,
}

impl AudioDirector {
    pub(crate) fn new(seed: u64, screen_width: f32) -> Self {
        Self {
            seed,
            screen_width,
            rng: seeded(seed),
            intensity: None,
        }
    }

    pub(crate) fn cues(&mut self, events: &[Event], cursor: Vec2, out: &mut Vec<AudioCue>) {
        for event in events {
            match event {
                Event::ShotFired { .. } => {
                    let jitter = self.rng.gen_range(-VOLUME_JITTER..=VOLUME_JITTER);
                    out.push(AudioCue::Shoot(AudioHint {
                        pan: (cursor.x / self.screen_width).clamp(0.0, 1.0),
                        volume: SHOT_VOLUME * (1.0 + jitter),
                    }));
                }
                Event::ReloadStarted => out.push(AudioCue::Reload),
                Event::ShieldActivated => out.push(AudioCue::ShieldOn),
                Event::ShieldExpired => out.push(AudioCue::ShieldOff),
                Event::EnemyKilled { .. } => {
                    out.push(AudioCue::EnemyHit);
                    out.push(AudioCue::Explosion);
                }
                Event::CoreDamaged { .. } => out.push(AudioCue::PlayerHit),
                _ => {}
            }
        }
    }

    /// Intensity for the wave, lifted to the level's tier; `Some` only on change.
    pub(crate) fn intensity(
        &mut self,
        wave: u32,
        level: DifficultyLevel,
    ) -> Option<IntensityTier> {
        let tier = IntensityTier::from_wave(wave).max(level.intensity_tier());
        if self.intensity == Some(tier) {
            return None;
        }
        self.intensity = Some(tier);
        Some(tier)
    }

    pub(crate) fn reset(&mut self) {
        self.rng = seeded(self.seed);
        self.intensity = None;
    }
}

fn seeded(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(AUDIO_RNG_STREAM);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_strike_core::{BulletId, EnemyId, EnemyTier};

    fn shot() -> Event {
        Event::ShotFired {
            bullet: BulletId::new(0, 0),
            origin: Vec2::ZERO,
        }
    }

    #[test]
    fn shots_pan_with_the_cursor_and_jitter_volume() {
        let mut audio = AudioDirector::new(7, 1280.0);
        let mut cues = Vec::new();
        audio.cues(&vec![shot(); 50], Vec2::new(960.0, 100.0), &mut cues);

        assert_eq!(cues.len(), 50);
        for cue in cues {
            let AudioCue::Shoot(hint) = cue else {
                panic!("unexpected cue {cue:?}");
            };
            assert_eq!(hint.pan, 0.75);
            assert!((0.759..=0.841).contains(&hint.volume), "volume {}", hint.volume);
        }
    }

    #[test]
    fn kills_play_hit_then_explosion() {
        let mut audio = AudioDirector::new(7, 1280.0);
        let mut cues = Vec::new();
        audio.cues(
            &[Event::EnemyKilled {
                enemy: EnemyId::new(0),
                tier: EnemyTier::Standard,
                position: Vec2::ZERO,
                score: 100,
            }],
            Vec2::ZERO,
            &mut cues,
        );
        assert_eq!(cues, vec![AudioCue::EnemyHit, AudioCue::Explosion]);
    }

    #[test]
    fn intensity_reports_only_changes() {
        let mut audio = AudioDirector::new(7, 1280.0);
        assert_eq!(
            audio.intensity(1, DifficultyLevel::MIN),
            Some(IntensityTier::Ambient)
        );
        assert_eq!(audio.intensity(3, DifficultyLevel::MIN), None);
        assert_eq!(
            audio.intensity(3, DifficultyLevel::new(5)),
            Some(IntensityTier::Medium)
        );
        assert_eq!(
            audio.intensity(8, DifficultyLevel::new(5)),
            Some(IntensityTier::Intense)
        );
        audio.reset();
        assert_eq!(
            audio.intensity(8, DifficultyLevel::new(5)),
            Some(IntensityTier::Intense)
        );
    }
}

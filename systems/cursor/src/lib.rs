#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cursor smoothing system that stabilises the aiming fingertip.
//!
//! Raw fingertip positions jitter by a few pixels every frame. The smoother
//! runs an exponential filter toward each new sample, ignores samples that
//! land inside a dead zone around the current cursor, and holds its last
//! position when no hand is visible.

use gesture_strike_core::{Command, GameConfig, Vec2};

/// Pure system that turns raw fingertip samples into aim commands.
#[derive(Clone, Debug)]
pub struct CursorSmoother {
    alpha: f32,
    dead_zone: f32,
    bounds: Vec2,
    home: Vec2,
    smoothed: Vec2,
}

impl CursorSmoother {
    /// Creates a smoother resting at the centre of the configured playfield.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let home = config.core_position();
        Self {
            alpha: config.smoothing_alpha,
            dead_zone: config.dead_zone,
            bounds: config.screen_size(),
            home,
            smoothed: home,
        }
    }

    /// Current smoothed cursor in screen pixels.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.smoothed
    }

    /// Feeds one raw sample in screen pixels and returns the smoothed cursor.
    ///
    /// `None` means no hand was seen and the cursor holds. Samples closer to
    /// the cursor than the dead zone leave it untouched; anything else moves
    /// the cursor `alpha` of the way toward the sample.
    pub fn update(&mut self, raw: Option<Vec2>) -> Vec2 {
        let Some(raw) = raw else {
            return self.smoothed;
        };
        if !raw.is_finite() {
            return self.smoothed;
        }

        let raw = raw.clamp(Vec2::ZERO, self.bounds);
        if raw.distance(self.smoothed) < self.dead_zone {
            return self.smoothed;
        }

        self.smoothed += (raw - self.smoothed) * self.alpha;
        self.smoothed
    }

    /// Smooths a sample and emits the aim command for the resulting cursor.
    pub fn handle(&mut self, raw: Option<Vec2>, out: &mut Vec<Command>) {
        let cursor = self.update(raw);
        out.push(Command::AimAt { cursor });
    }

    /// Returns the cursor to where it started.
    pub fn reset(&mut self) {
        self.smoothed = self.home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_alpha_snaps_to_sample() {
        let config = GameConfig {
            smoothing_alpha: 1.0,
            ..GameConfig::default()
        };
        let mut smoother = CursorSmoother::new(&config);
        let cursor = smoother.update(Some(Vec2::new(100.0, 80.0)));
        assert_eq!(cursor, Vec2::new(100.0, 80.0));
    }

    #[test]
    fn samples_are_clamped_to_playfield() {
        let config = GameConfig {
            smoothing_alpha: 1.0,
            ..GameConfig::default()
        };
        let mut smoother = CursorSmoother::new(&config);
        let cursor = smoother.update(Some(Vec2::new(-50.0, 9000.0)));
        assert_eq!(cursor, Vec2::new(0.0, config.screen_height));
    }

    #[test]
    fn non_finite_samples_hold_cursor() {
        let mut smoother = CursorSmoother::new(&GameConfig::default());
        let before = smoother.position();
        let _ = smoother.update(Some(Vec2::new(f32::NAN, 10.0)));
        assert_eq!(smoother.position(), before);
    }

    #[test]
    fn reset_returns_to_the_starting_position() {
        let config = GameConfig {
            smoothing_alpha: 1.0,
            ..GameConfig::default()
        };
        let mut smoother = CursorSmoother::new(&config);
        let home = smoother.position();
        assert_eq!(home, config.core_position());

        let _ = smoother.update(Some(Vec2::new(100.0, 80.0)));
        assert_ne!(smoother.position(), home);
        smoother.reset();
        assert_eq!(smoother.position(), home);
    }
}

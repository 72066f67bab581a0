//! Startup configuration surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Handedness;

/// Longest time span any seconds parameter may hold.
pub const MAX_DURATION_SECS: f32 = 86_400.0;

/// Every tunable parameter of a session.
///
/// Values are read once at startup and treated as constants for the session.
/// Any subset may be supplied; omitted keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Playfield width in pixels.
    pub screen_width: f32,
    /// Playfield height in pixels.
    pub screen_height: f32,
    /// Frame rate the loop is paced for.
    pub target_fps: u32,
    /// Longest frame delta fed to the simulation, in seconds.
    pub max_frame_secs: f32,

    /// Core health at the start of a session.
    pub max_health: u32,
    /// Magazine size.
    pub max_ammo: u32,
    /// Collision radius of the core.
    pub core_radius: f32,
    /// Distance from the core centre to the orbiting gun.
    pub gun_orbit_radius: f32,
    /// Barrel length from the gun centre to the muzzle.
    pub gun_length: f32,
    /// Minimum delay between shots, in seconds.
    pub shoot_cooldown_secs: f32,
    /// Time to refill an empty magazine, in seconds.
    pub reload_secs: f32,
    /// How long the shield stays raised, in seconds.
    pub shield_duration_secs: f32,
    /// Delay after the shield drops before it can be raised again, in seconds.
    pub shield_cooldown_secs: f32,

    /// Bullet speed in pixels per second.
    pub bullet_speed: f32,
    /// Seconds a bullet lives before it is recycled.
    pub bullet_lifetime_secs: f32,
    /// Bullet collision radius.
    pub bullet_radius: f32,
    /// Maximum random deviation of a shot, in degrees either side.
    pub bullet_spread_degrees: f32,
    /// Fixed number of bullet slots.
    pub bullet_pool_capacity: usize,
    /// Fixed number of particle slots.
    pub particle_pool_capacity: usize,

    /// Speed of a standard enemy at difficulty one, pixels per second.
    pub enemy_base_speed: f32,
    /// Collision radius of a standard enemy.
    pub enemy_radius: f32,
    /// Lower bound of the spawn interval at difficulty one, in seconds.
    pub spawn_interval_secs: f32,
    /// Width of the random spawn interval range, in seconds.
    pub spawn_jitter_secs: f32,
    /// Distance outside the screen edge enemies appear at.
    pub spawn_margin: f32,
    /// Kills needed to clear the first wave.
    pub first_wave_quota: u32,
    /// Growth factor applied to the kill quota after each wave.
    pub wave_quota_growth: f32,
    /// Cursor distance that counts as lingering over an enemy.
    pub dodge_radius: f32,
    /// Continuous lingering needed before an enemy dodges, in seconds.
    pub dodge_trigger_secs: f32,
    /// Duration of a dodge, in seconds.
    pub dodge_duration_secs: f32,
    /// Delay between a lethal hit and removal, in seconds.
    pub stagger_secs: f32,
    /// Damage an enemy deals when it reaches the unshielded core.
    pub contact_damage: u32,

    /// Exponential smoothing factor in `(0, 1]`.
    pub smoothing_alpha: f32,
    /// Cursor movements shorter than this many pixels are ignored.
    pub dead_zone: f32,
    /// Consecutive identical labels needed to confirm a gesture.
    pub confirmation_frames: usize,
    /// Whether aiming and acting are split across two hands.
    pub two_hand_mode: bool,
    /// Hand that steers the cursor in two-hand mode.
    pub aim_hand: Handedness,
    /// Tip-to-palm over joint-to-palm ratio above which a finger counts as extended.
    pub extension_ratio: f32,
    /// Thumb lateral reach, relative to palm width, above which it counts as extended.
    pub thumb_extension_ratio: f32,

    /// Length of a difficulty evaluation window, in seconds.
    pub difficulty_eval_secs: f32,
    /// Window accuracy above which difficulty rises.
    pub raise_accuracy: f32,
    /// Window accuracy below which difficulty falls.
    pub lower_accuracy: f32,
    /// Window damage that blocks a difficulty rise.
    pub damage_threshold: f32,

    /// Countdown before play starts, in seconds.
    pub calibration_secs: f32,
    /// Countdown before play restarts after a game over, in seconds.
    pub restart_calibration_secs: f32,
    /// Seed for every random draw in the session.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            target_fps: 60,
            max_frame_secs: 0.05,
            max_health: 100,
            max_ammo: 15,
            core_radius: 30.0,
            gun_orbit_radius: 90.0,
            gun_length: 28.0,
            shoot_cooldown_secs: 0.2,
            reload_secs: 1.5,
            shield_duration_secs: 3.0,
            shield_cooldown_secs: 5.0,
            bullet_speed: 900.0,
            bullet_lifetime_secs: 1.2,
            bullet_radius: 5.0,
            bullet_spread_degrees: 2.0,
            bullet_pool_capacity: 80,
            particle_pool_capacity: 300,
            enemy_base_speed: 120.0,
            enemy_radius: 18.0,
            spawn_interval_secs: 2.0,
            spawn_jitter_secs: 1.0,
            spawn_margin: 40.0,
            first_wave_quota: 6,
            wave_quota_growth: 1.25,
            dodge_radius: 50.0,
            dodge_trigger_secs: 0.7,
            dodge_duration_secs: 0.5,
            stagger_secs: 0.1,
            contact_damage: 10,
            smoothing_alpha: 0.35,
            dead_zone: 5.0,
            confirmation_frames: 3,
            two_hand_mode: true,
            aim_hand: Handedness::Right,
            extension_ratio: 1.2,
            thumb_extension_ratio: 0.5,
            difficulty_eval_secs: 10.0,
            raise_accuracy: 0.70,
            lower_accuracy: 0.40,
            damage_threshold: 10.0,
            calibration_secs: 3.0,
            restart_calibration_secs: 2.0,
            seed: 0x6765_7374_7572_6573,
        }
    }
}

impl GameConfig {
    /// Playfield dimensions in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Centre of the playfield, where the core sits.
    #[must_use]
    pub fn core_position(&self) -> Vec2 {
        self.screen_size() * 0.5
    }

    /// Checks every parameter, reporting the first one that cannot run a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0
            && self.screen_height > 0.0
            && self.screen_width.is_finite()
            && self.screen_height.is_finite())
        {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::NotPositive("target_fps"));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::SmoothingAlpha(self.smoothing_alpha));
        }
        if !(self.dead_zone >= 0.0) {
            return Err(ConfigError::DeadZone(self.dead_zone));
        }
        if self.confirmation_frames == 0 {
            return Err(ConfigError::ConfirmationFrames);
        }
        if self.bullet_pool_capacity == 0 {
            return Err(ConfigError::EmptyPool("bullet_pool_capacity"));
        }
        if self.particle_pool_capacity == 0 {
            return Err(ConfigError::EmptyPool("particle_pool_capacity"));
        }
        if self.max_health == 0 {
            return Err(ConfigError::NotPositive("max_health"));
        }
        if self.max_ammo == 0 {
            return Err(ConfigError::NotPositive("max_ammo"));
        }
        if self.first_wave_quota == 0 {
            return Err(ConfigError::NotPositive("first_wave_quota"));
        }
        if !(self.wave_quota_growth >= 1.0) {
            return Err(ConfigError::QuotaGrowth(self.wave_quota_growth));
        }
        if !(self.lower_accuracy <= self.raise_accuracy) {
            return Err(ConfigError::AccuracyBounds {
                lower: self.lower_accuracy,
                raise: self.raise_accuracy,
            });
        }

        let positive = [
            ("max_frame_secs", self.max_frame_secs),
            ("core_radius", self.core_radius),
            ("bullet_speed", self.bullet_speed),
            ("bullet_lifetime_secs", self.bullet_lifetime_secs),
            ("bullet_radius", self.bullet_radius),
            ("enemy_base_speed", self.enemy_base_speed),
            ("enemy_radius", self.enemy_radius),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("difficulty_eval_secs", self.difficulty_eval_secs),
            ("dodge_duration_secs", self.dodge_duration_secs),
            ("stagger_secs", self.stagger_secs),
            ("extension_ratio", self.extension_ratio),
        ];
        for (name, value) in positive {
            if value.is_infinite() {
                return Err(ConfigError::NotFinite(name));
            }
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive(name));
            }
        }

        let non_negative = [
            ("shoot_cooldown_secs", self.shoot_cooldown_secs),
            ("reload_secs", self.reload_secs),
            ("shield_duration_secs", self.shield_duration_secs),
            ("shield_cooldown_secs", self.shield_cooldown_secs),
            ("bullet_spread_degrees", self.bullet_spread_degrees),
            ("spawn_jitter_secs", self.spawn_jitter_secs),
            ("spawn_margin", self.spawn_margin),
            ("dodge_radius", self.dodge_radius),
            ("dodge_trigger_secs", self.dodge_trigger_secs),
            ("gun_orbit_radius", self.gun_orbit_radius),
            ("gun_length", self.gun_length),
            ("thumb_extension_ratio", self.thumb_extension_ratio),
            ("damage_threshold", self.damage_threshold),
            ("calibration_secs", self.calibration_secs),
            ("restart_calibration_secs", self.restart_calibration_secs),
        ];
        for (name, value) in non_negative {
            if value.is_infinite() {
                return Err(ConfigError::NotFinite(name));
            }
            if !(value >= 0.0) {
                return Err(ConfigError::Negative(name));
            }
        }

        let durations = [
            ("max_frame_secs", self.max_frame_secs),
            ("shoot_cooldown_secs", self.shoot_cooldown_secs),
            ("reload_secs", self.reload_secs),
            ("shield_duration_secs", self.shield_duration_secs),
            ("shield_cooldown_secs", self.shield_cooldown_secs),
            ("bullet_lifetime_secs", self.bullet_lifetime_secs),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("spawn_jitter_secs", self.spawn_jitter_secs),
            ("dodge_trigger_secs", self.dodge_trigger_secs),
            ("dodge_duration_secs", self.dodge_duration_secs),
            ("stagger_secs", self.stagger_secs),
            ("difficulty_eval_secs", self.difficulty_eval_secs),
            ("calibration_secs", self.calibration_secs),
            ("restart_calibration_secs", self.restart_calibration_secs),
        ];
        for (name, secs) in durations {
            if secs > MAX_DURATION_SECS {
                return Err(ConfigError::DurationTooLong { name, secs });
            }
        }

        Ok(())
    }
}

/// Reasons a configuration is rejected before the menu is shown.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The playfield has no area.
    #[error("screen size must be positive, got {width}x{height}")]
    ScreenSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// Smoothing alpha lies outside `(0, 1]`.
    #[error("smoothing_alpha must lie in (0, 1], got {0}")]
    SmoothingAlpha(f32),
    /// The dead zone is negative or not a number.
    #[error("dead_zone must be non-negative, got {0}")]
    DeadZone(f32),
    /// Gestures could never be confirmed.
    #[error("confirmation_frames must be at least 1")]
    ConfirmationFrames,
    /// A fixed-capacity pool has no slots.
    #[error("{0} must be at least 1")]
    EmptyPool(&'static str),
    /// The kill quota would shrink between waves.
    #[error("wave_quota_growth must be at least 1.0, got {0}")]
    QuotaGrowth(f32),
    /// The lowering threshold sits above the raising threshold.
    #[error("lower_accuracy ({lower}) must not exceed raise_accuracy ({raise})")]
    AccuracyBounds {
        /// Configured lowering threshold.
        lower: f32,
        /// Configured raising threshold.
        raise: f32,
    },
    /// A parameter that must be strictly positive is not.
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    /// A parameter that must not be negative is.
    #[error("{0} must not be negative")]
    Negative(&'static str),
    /// A parameter is infinite.
    #[error("{0} must be finite")]
    NotFinite(&'static str),
    /// A time span exceeds [`MAX_DURATION_SECS`].
    #[error("{name} must not exceed {} seconds, got {secs}", MAX_DURATION_SECS)]
    DurationTooLong {
        /// Offending parameter.
        name: &'static str,
        /// Configured seconds.
        secs: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GameConfig, MAX_DURATION_SECS};
    use crate::Handedness;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_confirmation_frames_is_fatal() {
        let config = GameConfig {
            confirmation_frames: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ConfirmationFrames));
    }

    #[test]
    fn smoothing_alpha_must_lie_in_unit_interval() {
        for alpha in [0.0, -0.5, 1.5, f32::NAN] {
            let config = GameConfig {
                smoothing_alpha: alpha,
                ..GameConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::SmoothingAlpha(_))),
                "alpha {alpha} should be rejected",
            );
        }

        let config = GameConfig {
            smoothing_alpha: 1.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn empty_bullet_pool_is_fatal() {
        let config = GameConfig {
            bullet_pool_capacity: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPool("bullet_pool_capacity"))
        );
    }

    #[test]
    fn infinite_time_spans_are_rejected() {
        let config = GameConfig {
            difficulty_eval_secs: f32::INFINITY,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite("difficulty_eval_secs"))
        );

        let config = GameConfig {
            spawn_jitter_secs: f32::INFINITY,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite("spawn_jitter_secs"))
        );
    }

    #[test]
    fn huge_time_spans_are_rejected() {
        let config = GameConfig {
            spawn_interval_secs: 1e30,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DurationTooLong {
                name: "spawn_interval_secs",
                secs: 1e30,
            })
        );

        let config = GameConfig {
            max_frame_secs: MAX_DURATION_SECS,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn infinite_screen_is_rejected() {
        let config = GameConfig {
            screen_width: f32::INFINITY,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScreenSize { .. })
        ));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            smoothing_alpha = 0.5
            confirmation_frames = 4
            aim_hand = "Left"
            "#,
        )
        .expect("parse config");

        assert!((config.smoothing_alpha - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.confirmation_frames, 4);
        assert_eq!(config.aim_hand, Handedness::Left);
        assert_eq!(config.max_ammo, GameConfig::default().max_ammo);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = toml::from_str::<GameConfig>("smoothing = 0.5");
        assert!(parsed.is_err());
    }
}

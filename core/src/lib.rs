#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the GestureStrike engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod config;
mod hand;
mod telemetry;

pub use config::{ConfigError, GameConfig, MAX_DURATION_SECS};
pub use glam::Vec2;
pub use hand::{landmark, HandObservation, Handedness, LandmarkSource};
pub use telemetry::{SessionTelemetry, TelemetrySummary};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "GestureStrike: Defense Protocol";

/// Top-level phase of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen waiting for a hand or the start key.
    Menu,
    /// Short countdown that lets the player settle their hands.
    Calibration,
    /// Live simulation.
    Playing,
    /// The core was destroyed; waiting for a restart.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Points the orbital gun at the provided screen-space cursor.
    AimAt {
        /// Smoothed cursor position in screen pixels.
        cursor: Vec2,
    },
    /// Requests a single shot toward the current aim point.
    FireBullet,
    /// Requests that the core shield be raised.
    ActivateShield,
    /// Requests that a new enemy enter the playfield.
    SpawnEnemy {
        /// Spawn position in screen pixels, normally just outside an edge.
        position: Vec2,
        /// Tier derived from the wave that produced the enemy.
        tier: EnemyTier,
        /// Cruising speed in pixels per second, tier and difficulty applied.
        speed: f32,
        /// Lateral oscillation used while the enemy is aggressive.
        zigzag: ZigZag,
    },
    /// Replaces an enemy's behaviour state and velocity for the next tick.
    SteerEnemy {
        /// Identifier of the enemy being steered.
        enemy: EnemyId,
        /// Behaviour state produced by the AI transition function.
        brain: EnemyBrain,
        /// Velocity in pixels per second applied on the next tick.
        velocity: Vec2,
    },
    /// Removes an enemy whose stagger has completed.
    DespawnEnemy {
        /// Identifier of the enemy to remove.
        enemy: EnemyId,
    },
    /// Resolves a bullet striking an enemy. Every hit is lethal.
    KillEnemy {
        /// Identifier of the enemy that was struck.
        enemy: EnemyId,
        /// Bullet consumed by the strike.
        bullet: BulletId,
    },
    /// Resolves an enemy touching the core.
    EnemyContact {
        /// Identifier of the enemy that reached the core.
        enemy: EnemyId,
        /// Whether the shield absorbed the contact.
        blocked: bool,
    },
    /// Records the wave currently being fought.
    SetWave {
        /// One-based wave number.
        wave: u32,
    },
    /// Records the difficulty level that scores kills and drives pacing.
    SetDifficultyLevel {
        /// Level produced by the difficulty controller.
        level: DifficultyLevel,
    },
    /// Drains every pooled entity and restores a fresh session.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a bullet left the gun.
    ShotFired {
        /// Arena slot allocated to the bullet.
        bullet: BulletId,
        /// Muzzle position the bullet started from.
        origin: Vec2,
    },
    /// Reports that a shot request was dropped because the bullet arena is full.
    ShotDropped,
    /// Announces that the magazine ran dry and a reload began.
    ReloadStarted,
    /// Announces that the magazine was refilled.
    ReloadCompleted,
    /// Announces that the shield was raised.
    ShieldActivated,
    /// Announces that the shield dropped and entered cooldown.
    ShieldExpired,
    /// Confirms that an enemy entered the playfield.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Tier assigned to the enemy.
        tier: EnemyTier,
        /// Position the enemy spawned at.
        position: Vec2,
    },
    /// Confirms that a bullet killed an enemy, which is now staggering.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
        /// Tier of the killed enemy.
        tier: EnemyTier,
        /// Position of the enemy when it was struck.
        position: Vec2,
        /// Points awarded for the kill.
        score: u64,
    },
    /// Confirms that an enemy left the simulation.
    EnemyDespawned {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy reached the unshielded core.
    CoreDamaged {
        /// Identifier of the enemy that made contact.
        enemy: EnemyId,
        /// Damage applied to the core.
        amount: u32,
        /// Core health remaining after the contact.
        health: u32,
    },
    /// Reports that an enemy reached the core while the shield was raised.
    ShieldBlocked {
        /// Identifier of the enemy absorbed by the shield.
        enemy: EnemyId,
    },
    /// Announces that core health reached zero.
    PlayerDefeated,
    /// Announces that a new wave began.
    WaveAdvanced {
        /// One-based wave number that became active.
        wave: u32,
    },
    /// Announces that the difficulty level changed.
    DifficultyChanged {
        /// Level that became active.
        level: DifficultyLevel,
    },
    /// Confirms that the world was restored to a fresh session.
    SessionReset,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Handle to a bullet arena slot.
///
/// The generation advances every time a slot is recycled so stale handles
/// never resolve to a newer bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId {
    slot: u32,
    generation: u32,
}

impl BulletId {
    /// Creates a bullet handle from a slot index and generation.
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Arena slot the bullet occupies.
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the slot when the bullet was allocated.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Per-frame shape label derived from a single hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    /// No recognised shape, or no hand.
    #[default]
    None,
    /// Index finger extended, others folded.
    Point,
    /// All four fingers extended.
    OpenPalm,
    /// All fingers folded with the thumb tucked.
    Fist,
}

/// Role a debounced gesture stream plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureRole {
    /// Single-hand mode: one hand both aims and acts.
    Combined,
    /// Two-hand mode: the hand that steers the cursor.
    Aim,
    /// Two-hand mode: the hand that fires and shields.
    Action,
}

/// Debounced command derived from confirmed gestures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfirmedCommand {
    /// Cursor position in screen pixels.
    Aim(Vec2),
    /// Whether continuous fire is requested.
    Shoot(bool),
    /// Whether the shield is requested.
    Shield(bool),
}

/// Enemy category derived from the wave number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Waves 1–2.
    Standard,
    /// Waves 3–5.
    Armoured,
    /// Waves 6–8.
    Elite,
    /// Wave 9 onwards.
    Boss,
}

impl EnemyTier {
    /// Resolves the tier fielded during the provided one-based wave.
    #[must_use]
    pub const fn from_wave(wave: u32) -> Self {
        match wave {
            0..=2 => Self::Standard,
            3..=5 => Self::Armoured,
            6..=8 => Self::Elite,
            _ => Self::Boss,
        }
    }

    /// Factor applied to the base enemy speed.
    #[must_use]
    pub const fn speed_multiplier(self) -> f32 {
        match self {
            Self::Standard => 1.0,
            Self::Armoured => 1.3,
            Self::Elite => 1.65,
            Self::Boss => 2.1,
        }
    }

    /// Factor applied to the base enemy collision radius.
    #[must_use]
    pub const fn radius_multiplier(self) -> f32 {
        match self {
            Self::Standard => 1.0,
            Self::Armoured => 1.2,
            Self::Elite => 1.1,
            Self::Boss => 1.5,
        }
    }

    /// Reports whether the tier cruises with a zig-zag instead of a straight line.
    #[must_use]
    pub const fn is_aggressive(self) -> bool {
        matches!(self, Self::Elite | Self::Boss)
    }

    /// Behaviour state the tier returns to when it is not reacting to anything.
    #[must_use]
    pub const fn cruising_state(self) -> AiState {
        if self.is_aggressive() {
            AiState::Aggressive
        } else {
            AiState::Seek
        }
    }

    /// Short label shown by presentation layers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "DRONE",
            Self::Armoured => "ARMOURED",
            Self::Elite => "ELITE",
            Self::Boss => "BOSS",
        }
    }
}

/// Behaviour states an enemy moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AiState {
    /// Heading straight for the core.
    Seek,
    /// Sidestepping away from a lingering cursor.
    Dodge,
    /// Heading for the core with lateral oscillation.
    Aggressive,
    /// Frozen after a lethal hit, awaiting removal.
    Stagger,
}

/// Lateral oscillation parameters sampled once per enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZigZag {
    /// Phase offset in radians.
    pub phase: f32,
    /// Angular frequency in radians per second.
    pub frequency: f32,
    /// Peak lateral speed contribution in pixels per second.
    pub amplitude: f32,
}

impl ZigZag {
    /// Oscillation that contributes nothing.
    pub const NONE: Self = Self {
        phase: 0.0,
        frequency: 0.0,
        amplitude: 0.0,
    };
}

/// Plain behaviour data carried by every enemy.
///
/// The world stores it verbatim; the enemy AI system is the only producer of
/// new values, through its pure transition function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyBrain {
    /// Current behaviour state.
    pub state: AiState,
    /// Continuous seconds the cursor has lingered within the dodge radius.
    pub proximity_secs: f32,
    /// Seconds of dodge movement left.
    pub dodge_secs: f32,
    /// Unit direction of the active dodge.
    pub dodge_direction: Vec2,
    /// Seconds of stagger left before removal.
    pub stagger_secs: f32,
    /// Seconds since the enemy spawned, drives the zig-zag.
    pub age_secs: f32,
    /// Lateral oscillation used while aggressive.
    pub zigzag: ZigZag,
}

impl EnemyBrain {
    /// Creates the behaviour data for a freshly spawned enemy of the given tier.
    #[must_use]
    pub fn spawned(tier: EnemyTier, zigzag: ZigZag) -> Self {
        Self {
            state: tier.cruising_state(),
            proximity_secs: 0.0,
            dodge_secs: 0.0,
            dodge_direction: Vec2::ZERO,
            stagger_secs: 0.0,
            age_secs: 0.0,
            zigzag,
        }
    }

    /// Moves the brain into its terminal stagger state.
    pub fn enter_stagger(&mut self, stagger_secs: f32) {
        self.state = AiState::Stagger;
        self.stagger_secs = stagger_secs;
        self.dodge_secs = 0.0;
        self.proximity_secs = 0.0;
    }

    /// Reports whether the enemy has already been hit.
    #[must_use]
    pub fn is_staggering(&self) -> bool {
        self.state == AiState::Stagger
    }
}

/// Adaptive difficulty level bounded to `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    /// Lowest reachable level.
    pub const MIN: Self = Self(1);
    /// Highest reachable level.
    pub const MAX: Self = Self(10);

    /// Creates a level, clamping the value into the valid range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// One level harder, capped at [`Self::MAX`].
    #[must_use]
    pub const fn raised(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One level easier, floored at [`Self::MIN`].
    #[must_use]
    pub const fn lowered(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Factor applied to enemy speed at this level.
    #[must_use]
    pub fn speed_multiplier(self) -> f32 {
        1.0 + f32::from(self.0 - 1) * 0.12
    }

    /// Spawn interval after shrinking the base interval for this level.
    ///
    /// Each level above the first removes 0.12 s, never going below 0.5 s.
    #[must_use]
    pub fn spawn_interval_secs(self, base_secs: f32) -> f32 {
        (base_secs - f32::from(self.0 - 1) * 0.12).max(0.5)
    }

    /// Music intensity implied by the level alone.
    #[must_use]
    pub const fn intensity_tier(self) -> IntensityTier {
        match self.0 {
            0..=3 => IntensityTier::Ambient,
            4..=7 => IntensityTier::Medium,
            _ => IntensityTier::Intense,
        }
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::MIN
    }
}

/// Background music intensity selected by the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntensityTier {
    /// Calm opening waves.
    Ambient,
    /// Mid-game pressure.
    Medium,
    /// Late waves.
    Intense,
}

impl IntensityTier {
    /// Intensity implied by the wave number alone.
    #[must_use]
    pub const fn from_wave(wave: u32) -> Self {
        match wave {
            0..=3 => Self::Ambient,
            4..=7 => Self::Medium,
            _ => Self::Intense,
        }
    }

    /// Track key understood by the audio collaborator.
    #[must_use]
    pub const fn track(self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::Medium => "medium",
            Self::Intense => "intense",
        }
    }
}

/// Playback hints attached to positional cues.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioHint {
    /// Stereo pan from 0.0 (left) to 1.0 (right).
    pub pan: f32,
    /// Playback volume after jitter.
    pub volume: f32,
}

/// Discrete sound cues emitted for the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCue {
    /// A bullet was fired.
    Shoot(AudioHint),
    /// The magazine started reloading.
    Reload,
    /// The shield was raised; the shield loop should start.
    ShieldOn,
    /// The shield dropped; the shield loop should stop.
    ShieldOff,
    /// A bullet struck an enemy.
    EnemyHit,
    /// An enemy was destroyed.
    Explosion,
    /// An enemy damaged the core.
    PlayerHit,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Centre of the enemy in screen pixels.
    pub position: Vec2,
    /// Velocity applied during the last tick.
    pub velocity: Vec2,
    /// Collision radius in pixels.
    pub radius: f32,
    /// Tier assigned at spawn.
    pub tier: EnemyTier,
    /// Cruising speed in pixels per second.
    pub speed: f32,
    /// Behaviour data.
    pub brain: EnemyBrain,
}

/// Read-only snapshot describing all enemies in deterministic id order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a live bullet used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Arena handle of the bullet.
    pub id: BulletId,
    /// Centre of the bullet in screen pixels.
    pub position: Vec2,
    /// Velocity in pixels per second.
    pub velocity: Vec2,
    /// Collision radius in pixels.
    pub radius: f32,
}

/// Read-only snapshot describing all live bullets in deterministic id order.
#[derive(Clone, Debug, Default)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured bullet snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured bullets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no bullets were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable description of the defended core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreSnapshot {
    /// Centre of the core in screen pixels.
    pub position: Vec2,
    /// Collision radius of the core.
    pub radius: f32,
    /// Whether the shield is currently raised.
    pub shield_active: bool,
}

/// Immutable representation of a live particle used for presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSnapshot {
    /// Centre of the particle in screen pixels.
    pub position: Vec2,
    /// Byte RGB colour.
    pub color: [u8; 3],
    /// Radius at full life.
    pub size: f32,
    /// Remaining life as a fraction in `0.0..=1.0`.
    pub fade: f32,
}

/// Read-only HUD values exposed to the render collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Session phase.
    pub state: GameState,
    /// Remaining core health.
    pub health: u32,
    /// Maximum core health.
    pub max_health: u32,
    /// Rounds left in the magazine.
    pub ammo: u32,
    /// Magazine size.
    pub max_ammo: u32,
    /// Whether a reload is in progress.
    pub reloading: bool,
    /// Whether the shield is raised.
    pub shield_active: bool,
    /// Seconds of shield left while raised.
    pub shield_secs: f32,
    /// Seconds until the shield can be raised again.
    pub shield_cooldown_secs: f32,
    /// Current wave.
    pub wave: u32,
    /// Current score.
    pub score: u64,
    /// Current difficulty level.
    pub level: DifficultyLevel,
    /// Session accuracy in whole percent.
    pub accuracy_pct: u32,
    /// Measured frames per second.
    pub fps: f32,
}

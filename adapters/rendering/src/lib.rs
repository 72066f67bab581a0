#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for GestureStrike adapters.
//!
//! Backends receive a [`Presentation`] each frame and never reach back into
//! the simulation. Everything here is derived from read-only snapshots.

mod shake;

use anyhow::Result as AnyResult;
use gesture_strike_core::{
    AiState, BulletSnapshot, EnemySnapshot, EnemyTier, GameState, GestureLabel, HudSnapshot,
    ParticleSnapshot,
};
use glam::Vec2;

pub use shake::{CameraShake, ShakeKind};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha scaled by `fade`.
    #[must_use]
    pub fn faded(self, fade: f32) -> Self {
        Self {
            alpha: self.alpha * fade.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Fixed colours of the neon arena look.
pub mod palette {
    use super::Color;

    /// Frame clear colour.
    pub const BACKGROUND: Color = Color::from_rgb_u8(5, 5, 20);
    /// The defended core.
    pub const CORE: Color = Color::from_rgb_u8(80, 200, 255);
    /// Bullets and the firing reticle.
    pub const BULLET: Color = Color::from_rgb_u8(0, 240, 255);
    /// Standard enemies.
    pub const ENEMY: Color = Color::from_rgb_u8(220, 50, 50);
    /// Glow around aggressive enemies.
    pub const ENEMY_GLOW: Color = Color::from_rgb_u8(255, 100, 30);
    /// Shield bubble and the shielding reticle.
    pub const SHIELD: Color = Color::from_rgb_u8(60, 140, 255);
    /// HUD body text.
    pub const HUD_TEXT: Color = Color::from_rgb_u8(230, 230, 230);
    /// HUD highlights.
    pub const HUD_ACCENT: Color = Color::from_rgb_u8(0, 200, 255);
    /// Idle reticle.
    pub const RETICLE: Color = Color::from_rgb_u8(0, 255, 180);
}

/// Reticle colour for the gesture currently shown to the player.
#[must_use]
pub const fn reticle_color(gesture: GestureLabel) -> Color {
    match gesture {
        GestureLabel::OpenPalm => palette::BULLET,
        GestureLabel::Fist => palette::SHIELD,
        GestureLabel::Point | GestureLabel::None => palette::RETICLE,
    }
}

/// Body colour for an enemy tier, brightened for tougher tiers.
#[must_use]
pub fn enemy_color(tier: EnemyTier) -> Color {
    match tier {
        EnemyTier::Standard => palette::ENEMY,
        EnemyTier::Armoured => palette::ENEMY.lighten(0.15),
        EnemyTier::Elite => palette::ENEMY_GLOW,
        EnemyTier::Boss => palette::ENEMY_GLOW.lighten(0.3),
    }
}

/// Health bar colour for the remaining health ratio.
#[must_use]
pub fn health_color(health: u32, max_health: u32) -> Color {
    let ratio = if max_health == 0 {
        0.0
    } else {
        health as f32 / max_health as f32
    };
    if ratio > 0.6 {
        Color::from_rgb_u8(0, 200, 80)
    } else if ratio > 0.3 {
        Color::from_rgb_u8(220, 180, 0)
    } else {
        Color::from_rgb_u8(220, 50, 50)
    }
}

/// Enemy as drawn on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Centre in screen pixels, shake applied.
    pub position: Vec2,
    /// Body radius in pixels.
    pub radius: f32,
    /// Tier assigned at spawn.
    pub tier: EnemyTier,
    /// Behaviour state, used for dodge trails and stagger flashes.
    pub state: AiState,
    /// Body colour.
    pub color: Color,
}

impl EnemyPresentation {
    /// Builds the drawable form of an enemy snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &EnemySnapshot, offset: Vec2) -> Self {
        let state = snapshot.brain.state;
        let color = enemy_color(snapshot.tier);
        Self {
            position: snapshot.position + offset,
            radius: snapshot.radius,
            tier: snapshot.tier,
            state,
            color: if state == AiState::Stagger {
                color.lighten(0.7)
            } else {
                color
            },
        }
    }
}

/// A drawable circle: bullets and particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Centre in screen pixels, shake applied.
    pub position: Vec2,
    /// Radius in pixels.
    pub radius: f32,
    /// Fill colour.
    pub color: Color,
}

impl Dot {
    /// Builds the drawable form of a bullet snapshot.
    #[must_use]
    pub fn bullet(snapshot: &BulletSnapshot, offset: Vec2) -> Self {
        Self {
            position: snapshot.position + offset,
            radius: snapshot.radius,
            color: palette::BULLET,
        }
    }

    /// Builds the drawable form of a particle; size and alpha shrink with its life.
    #[must_use]
    pub fn particle(snapshot: &ParticleSnapshot, offset: Vec2) -> Self {
        let [red, green, blue] = snapshot.color;
        Self {
            position: snapshot.position + offset,
            radius: snapshot.size * snapshot.fade,
            color: Color::from_rgb_u8(red, green, blue).faded(snapshot.fade),
        }
    }
}

/// Everything a backend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// HUD values.
    pub hud: HudSnapshot,
    /// Smoothed cursor in screen pixels.
    pub cursor: Vec2,
    /// Gesture the reticle reflects.
    pub gesture: GestureLabel,
    /// Reticle colour for `gesture`.
    pub reticle: Color,
    /// Core centre in screen pixels, shake applied.
    pub core: Vec2,
    /// Gun centre with shake applied, and its unit heading.
    pub gun: (Vec2, Vec2),
    /// Enemies in id order.
    pub enemies: Vec<EnemyPresentation>,
    /// Bullets in id order.
    pub bullets: Vec<Dot>,
    /// Live particles.
    pub particles: Vec<Dot>,
    /// Camera shake offset already folded into world positions.
    pub shake: Vec2,
}

impl Presentation {
    /// Starts a frame with no world entities.
    ///
    /// The cursor and HUD overlay are never shaken; world-space positions
    /// added through the `with_*` builders are.
    #[must_use]
    pub fn new<T>(window_title: T, hud: HudSnapshot, cursor: Vec2, gesture: GestureLabel) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color: palette::BACKGROUND,
            hud,
            cursor,
            gesture,
            reticle: reticle_color(gesture),
            core: Vec2::ZERO,
            gun: (Vec2::ZERO, Vec2::ZERO),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            shake: Vec2::ZERO,
        }
    }

    /// Sets the shake offset applied to subsequently added world entities.
    #[must_use]
    pub fn with_shake(mut self, shake: Vec2) -> Self {
        self.shake = shake;
        self
    }

    /// Places the core and the gun, given as centre and unit heading.
    #[must_use]
    pub fn with_core(mut self, core: Vec2, gun: (Vec2, Vec2)) -> Self {
        self.core = core + self.shake;
        self.gun = (gun.0 + self.shake, gun.1);
        self
    }

    /// Adds enemies.
    #[must_use]
    pub fn with_enemies<'a>(mut self, enemies: impl IntoIterator<Item = &'a EnemySnapshot>) -> Self {
        let offset = self.shake;
        self.enemies.extend(
            enemies
                .into_iter()
                .map(|enemy| EnemyPresentation::from_snapshot(enemy, offset)),
        );
        self
    }

    /// Adds bullets.
    #[must_use]
    pub fn with_bullets<'a>(mut self, bullets: impl IntoIterator<Item = &'a BulletSnapshot>) -> Self {
        let offset = self.shake;
        self.bullets
            .extend(bullets.into_iter().map(|bullet| Dot::bullet(bullet, offset)));
        self
    }

    /// Adds particles.
    #[must_use]
    pub fn with_particles<'a>(
        mut self,
        particles: impl IntoIterator<Item = &'a ParticleSnapshot>,
    ) -> Self {
        let offset = self.shake;
        self.particles
            .extend(particles.into_iter().map(|particle| Dot::particle(particle, offset)));
        self
    }

    /// Radius of the shield bubble, or `None` while it is down.
    #[must_use]
    pub fn shield_radius(&self, core_radius: f32) -> Option<f32> {
        self.hud.shield_active.then_some(core_radius * 2.0)
    }

    /// HUD text for the frame.
    #[must_use]
    pub fn hud_lines(&self) -> Vec<String> {
        hud_lines(&self.hud)
    }
}

/// HUD text lines in draw order.
#[must_use]
pub fn hud_lines(hud: &HudSnapshot) -> Vec<String> {
    let ammo = if hud.reloading {
        "RELOADING".to_owned()
    } else {
        format!("AMMO {}/{}", hud.ammo, hud.max_ammo)
    };
    let shield = if hud.shield_active {
        format!("SHIELD ACTIVE {:.1}s", hud.shield_secs)
    } else if hud.shield_cooldown_secs > 0.0 {
        format!("SHIELD CD {:.1}s", hud.shield_cooldown_secs)
    } else {
        "SHIELD READY".to_owned()
    };
    vec![
        format!("CORE {}/{}", hud.health, hud.max_health),
        ammo,
        shield,
        format!("WAVE {}", hud.wave),
        format!("SCORE {}", hud.score),
        format!("FPS {:.0}", hud.fps),
        format!("ACC {}%", hud.accuracy_pct),
    ]
}

/// Headline shown over the arena for non-playing states.
#[must_use]
pub const fn banner(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Menu => Some("SHOW YOUR HAND OR PRESS SPACE"),
        GameState::Calibration => Some("CALIBRATING..."),
        GameState::Playing => None,
        GameState::GameOver => Some("GAME OVER - PRESS R TO RESTART"),
    }
}

/// Rendering backend capable of presenting GestureStrike frames.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

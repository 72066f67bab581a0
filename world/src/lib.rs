#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for GestureStrike.
//!
//! The world owns the core, the bullet arena, the enemy roster and the
//! particle arena. Every mutation flows through [`apply`]; systems observe the
//! result through [`query`].

mod arena;
mod particles;
mod player;

use gesture_strike_core::{
    BulletId, Command, DifficultyLevel, EnemyBrain, EnemyId, EnemyTier, Event, GameConfig,
    SessionTelemetry, Vec2, ZigZag, WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};

use arena::Arena;
use particles::{Burst, Particles};
use player::Player;

const WORLD_RNG_STREAM: u64 = 0x7767_6f72_6c64;
const BULLET_BOUNDS_MARGIN: f32 = 50.0;

/// Represents the authoritative GestureStrike world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    core_position: Vec2,
    player: Player,
    bullets: Arena<Bullet>,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
    particles: Particles,
    telemetry: SessionTelemetry,
    level: DifficultyLevel,
    wave: u32,
    clock_secs: f64,
    last_spawn_secs: Option<f64>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world for a fresh session using the provided configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            core_position: config.core_position(),
            player: Player::new(&config),
            bullets: Arena::with_capacity(config.bullet_pool_capacity),
            enemies: Vec::new(),
            next_enemy_id: 0,
            particles: Particles::with_capacity(config.particle_pool_capacity),
            telemetry: SessionTelemetry::new(),
            level: DifficultyLevel::MIN,
            wave: 1,
            clock_secs: 0.0,
            last_spawn_secs: None,
            rng: seeded_rng(config.seed),
            config,
        }
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&enemy, |candidate| candidate.id)
            .ok()
    }

    fn advance(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        self.clock_secs += f64::from(dt);
        if self.player.alive {
            self.telemetry.survival_secs += f64::from(dt);
        }

        self.player.advance(dt, &self.config, out_events);

        let lifetime = self.config.bullet_lifetime_secs;
        let min = Vec2::splat(-BULLET_BOUNDS_MARGIN);
        let max = self.config.screen_size() + BULLET_BOUNDS_MARGIN;
        self.bullets.retain_mut(|bullet| {
            bullet.position += bullet.velocity * dt;
            bullet.age_secs += dt;
            let inside = bullet.position.cmpge(min).all() && bullet.position.cmple(max).all();
            bullet.age_secs < lifetime && inside
        });

        for enemy in &mut self.enemies {
            if !enemy.brain.is_staggering() {
                enemy.position += enemy.velocity * dt;
            }
        }

        self.particles.advance(dt);
    }

    fn fire(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.can_shoot() {
            return;
        }
        if self.bullets.is_full() {
            debug!(
                capacity = self.config.bullet_pool_capacity,
                "bullet arena full, dropping shot"
            );
            out_events.push(Event::ShotDropped);
            return;
        }

        let origin = self.player.muzzle(self.core_position, &self.config);
        let toward_cursor = self.player.cursor - origin;
        let direction = if toward_cursor.length_squared() < 1e-6 {
            self.player.heading()
        } else {
            toward_cursor.normalize()
        };
        let spread = self.config.bullet_spread_degrees;
        let deviation = if spread > 0.0 {
            self.rng.gen_range(-spread..=spread).to_radians()
        } else {
            0.0
        };
        let velocity = Vec2::from_angle(deviation).rotate(direction) * self.config.bullet_speed;

        let Some((slot, generation)) = self.bullets.insert(Bullet {
            position: origin,
            velocity,
            age_secs: 0.0,
        }) else {
            return;
        };

        self.telemetry.shots_fired += 1;
        out_events.push(Event::ShotFired {
            bullet: BulletId::new(slot, generation),
            origin,
        });
        if self.player.consume_round(&self.config) {
            out_events.push(Event::ReloadStarted);
        }
    }

    fn spawn_enemy(
        &mut self,
        position: Vec2,
        tier: EnemyTier,
        speed: f32,
        zigzag: ZigZag,
        out_events: &mut Vec<Event>,
    ) {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        let heading = (self.core_position - position).normalize_or_zero();
        self.enemies.push(Enemy {
            id,
            position,
            velocity: heading * speed,
            radius: self.config.enemy_radius * tier.radius_multiplier(),
            tier,
            speed,
            brain: EnemyBrain::spawned(tier, zigzag),
        });
        self.last_spawn_secs = Some(self.clock_secs);
        out_events.push(Event::EnemySpawned {
            enemy: id,
            tier,
            position,
        });
    }

    fn kill_enemy(&mut self, enemy: EnemyId, bullet: BulletId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemy_index(enemy) else {
            debug!(enemy = enemy.get(), "kill requested for unknown enemy");
            return;
        };
        if self.enemies[index].brain.is_staggering() {
            return;
        }
        let Some(spent) = self.bullets.remove(bullet.slot(), bullet.generation()) else {
            debug!(slot = bullet.slot(), "kill requested with a stale bullet");
            return;
        };

        let stagger_secs = self.config.stagger_secs;
        let target = &mut self.enemies[index];
        target.brain.enter_stagger(stagger_secs);
        target.velocity = Vec2::ZERO;
        let position = target.position;
        let tier = target.tier;

        let score = 100 * u64::from(self.level.get());
        self.telemetry.hits += 1;
        self.telemetry.kills += 1;
        self.telemetry.score += score;
        if let Some(spawned_at) = self.last_spawn_secs.take() {
            self.telemetry.reaction_secs_total += self.clock_secs - spawned_at;
            self.telemetry.reaction_samples += 1;
        }

        self.particles
            .emit(Burst::Impact, spent.position, &mut self.rng);
        self.particles.emit(Burst::Explosion, position, &mut self.rng);

        out_events.push(Event::EnemyKilled {
            enemy,
            tier,
            position,
            score,
        });
    }

    fn resolve_contact(&mut self, enemy: EnemyId, blocked: bool, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };
        if self.enemies[index].brain.is_staggering() {
            return;
        }
        if blocked != self.player.shield_active {
            error!(
                enemy = enemy.get(),
                blocked,
                shield_active = self.player.shield_active,
                "contact resolved against a stale shield state"
            );
            debug_assert!(false, "contact shield state disagrees with the world");
        }
        let _ = self.enemies.remove(index);

        if self.player.shield_active {
            self.particles
                .emit(Burst::ShieldHit, self.core_position, &mut self.rng);
            out_events.push(Event::ShieldBlocked { enemy });
        } else {
            let amount = self.config.contact_damage;
            let defeated = self.player.take_damage(amount);
            self.telemetry.damage_taken += u64::from(amount);
            out_events.push(Event::CoreDamaged {
                enemy,
                amount,
                health: self.player.health,
            });
            if defeated {
                out_events.push(Event::PlayerDefeated);
            }
        }
        out_events.push(Event::EnemyDespawned { enemy });
    }

    fn reset(&mut self) {
        self.player = Player::new(&self.config);
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.next_enemy_id = 0;
        self.telemetry = SessionTelemetry::new();
        self.level = DifficultyLevel::MIN;
        self.wave = 1;
        self.clock_secs = 0.0;
        self.last_spawn_secs = None;
        self.rng = seeded_rng(self.config.seed);
    }
}

fn seeded_rng(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(WORLD_RNG_STREAM);
    rng
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance(dt.as_secs_f32(), out_events);
        }
        Command::AimAt { cursor } => {
            world.player.aim_at(world.core_position, cursor);
        }
        Command::FireBullet => world.fire(out_events),
        Command::ActivateShield => {
            if world.player.raise_shield(&world.config) {
                out_events.push(Event::ShieldActivated);
            }
        }
        Command::SpawnEnemy {
            position,
            tier,
            speed,
            zigzag,
        } => world.spawn_enemy(position, tier, speed, zigzag, out_events),
        Command::SteerEnemy {
            enemy,
            brain,
            velocity,
        } => {
            if let Some(index) = world.enemy_index(enemy) {
                let target = &mut world.enemies[index];
                target.brain = brain;
                target.velocity = velocity;
            }
        }
        Command::DespawnEnemy { enemy } => {
            if let Some(index) = world.enemy_index(enemy) {
                let _ = world.enemies.remove(index);
                out_events.push(Event::EnemyDespawned { enemy });
            }
        }
        Command::KillEnemy { enemy, bullet } => world.kill_enemy(enemy, bullet, out_events),
        Command::EnemyContact { enemy, blocked } => {
            world.resolve_contact(enemy, blocked, out_events);
        }
        Command::SetWave { wave } => {
            if wave != world.wave {
                world.wave = wave;
                world.telemetry.wave = wave;
                out_events.push(Event::WaveAdvanced { wave });
            }
        }
        Command::SetDifficultyLevel { level } => {
            if level != world.level {
                world.level = level;
                world.telemetry.difficulty = level;
                out_events.push(Event::DifficultyChanged { level });
            }
        }
        Command::Reset => {
            world.reset();
            out_events.push(Event::SessionReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use gesture_strike_core::{
        BulletSnapshot, BulletView, BulletId, CoreSnapshot, DifficultyLevel, EnemySnapshot,
        EnemyView, GameConfig, GameState, HudSnapshot, ParticleSnapshot, SessionTelemetry, Vec2,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Describes the defended core.
    #[must_use]
    pub fn core(world: &World) -> CoreSnapshot {
        CoreSnapshot {
            position: world.core_position,
            radius: world.config.core_radius,
            shield_active: world.player.shield_active,
        }
    }

    /// Captures a read-only view of every enemy in id order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                    velocity: enemy.velocity,
                    radius: enemy.radius,
                    tier: enemy.tier,
                    speed: enemy.speed,
                    brain: enemy.brain,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every live bullet in id order.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        let radius = world.config.bullet_radius;
        BulletView::from_snapshots(
            world
                .bullets
                .iter()
                .map(|(slot, generation, bullet)| BulletSnapshot {
                    id: BulletId::new(slot, generation),
                    position: bullet.position,
                    velocity: bullet.velocity,
                    radius,
                })
                .collect(),
        )
    }

    /// Number of occupied bullet slots.
    #[must_use]
    pub fn live_bullets(world: &World) -> usize {
        world.bullets.len()
    }

    /// Snapshots of every live particle.
    #[must_use]
    pub fn particles(world: &World) -> Vec<ParticleSnapshot> {
        world.particles.snapshots()
    }

    /// Cursor the gun is currently aimed at.
    #[must_use]
    pub fn cursor(world: &World) -> Vec2 {
        world.player.cursor
    }

    /// Centre of the orbiting gun and its unit heading.
    #[must_use]
    pub fn gun(world: &World) -> (Vec2, Vec2) {
        (
            world
                .player
                .gun_position(world.core_position, &world.config),
            world.player.heading(),
        )
    }

    /// Reports whether a fire command would currently produce a shot.
    #[must_use]
    pub fn can_shoot(world: &World) -> bool {
        world.player.can_shoot()
    }

    /// Reports whether the core still has health left.
    #[must_use]
    pub fn is_alive(world: &World) -> bool {
        world.player.alive
    }

    /// Wave most recently recorded by the spawning system.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Difficulty level most recently applied.
    #[must_use]
    pub fn difficulty_level(world: &World) -> DifficultyLevel {
        world.level
    }

    /// Cumulative telemetry for the running session.
    #[must_use]
    pub fn telemetry(world: &World) -> &SessionTelemetry {
        &world.telemetry
    }

    /// Assembles the HUD values for the provided session phase and frame rate.
    #[must_use]
    pub fn hud(world: &World, state: GameState, fps: f32) -> HudSnapshot {
        let player = &world.player;
        HudSnapshot {
            state,
            health: player.health,
            max_health: world.config.max_health,
            ammo: player.ammo,
            max_ammo: world.config.max_ammo,
            reloading: player.reloading,
            shield_active: player.shield_active,
            shield_secs: player.shield_secs_left,
            shield_cooldown_secs: player.shield_cooldown_secs,
            wave: world.wave,
            score: world.telemetry.score,
            level: world.level,
            accuracy_pct: world.telemetry.accuracy_pct(),
            fps,
        }
    }
}

#[derive(Clone, Debug)]
struct Bullet {
    position: Vec2,
    velocity: Vec2,
    age_secs: f32,
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    tier: EnemyTier,
    speed: f32,
    brain: EnemyBrain,
}

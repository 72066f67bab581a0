//! Core health, magazine, shield and the orbiting gun.

use gesture_strike_core::{Event, GameConfig, Vec2};

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) health: u32,
    pub(crate) ammo: u32,
    pub(crate) reloading: bool,
    reload_secs_left: f32,
    shoot_cooldown_secs: f32,
    pub(crate) shield_active: bool,
    pub(crate) shield_secs_left: f32,
    pub(crate) shield_cooldown_secs: f32,
    pub(crate) alive: bool,
    pub(crate) cursor: Vec2,
    heading: Vec2,
}

impl Player {
    pub(crate) fn new(config: &GameConfig) -> Self {
        Self {
            health: config.max_health,
            ammo: config.max_ammo,
            reloading: false,
            reload_secs_left: 0.0,
            shoot_cooldown_secs: 0.0,
            shield_active: false,
            shield_secs_left: 0.0,
            shield_cooldown_secs: 0.0,
            alive: true,
            cursor: config.core_position(),
            heading: Vec2::X,
        }
    }

    /// Turns the gun toward the cursor. A cursor on top of the core keeps the old heading.
    pub(crate) fn aim_at(&mut self, core: Vec2, cursor: Vec2) {
        self.cursor = cursor;
        let to_cursor = cursor - core;
        if to_cursor.length_squared() > 1.0 {
            self.heading = to_cursor.normalize();
        }
    }

    pub(crate) fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Centre of the gun on its orbit ring.
    pub(crate) fn gun_position(&self, core: Vec2, config: &GameConfig) -> Vec2 {
        core + self.heading * config.gun_orbit_radius
    }

    pub(crate) fn muzzle(&self, core: Vec2, config: &GameConfig) -> Vec2 {
        self.gun_position(core, config) + self.heading * config.gun_length
    }

    pub(crate) fn can_shoot(&self) -> bool {
        self.alive && self.ammo > 0 && !self.reloading && self.shoot_cooldown_secs <= 0.0
    }

    /// Spends one round. Returns whether the magazine ran dry and a reload began.
    pub(crate) fn consume_round(&mut self, config: &GameConfig) -> bool {
        self.ammo = self.ammo.saturating_sub(1);
        self.shoot_cooldown_secs = config.shoot_cooldown_secs;
        if self.ammo == 0 && !self.reloading {
            self.reloading = true;
            self.reload_secs_left = config.reload_secs;
            return true;
        }
        false
    }

    pub(crate) fn raise_shield(&mut self, config: &GameConfig) -> bool {
        if !self.alive || self.shield_active || self.shield_cooldown_secs > 0.0 {
            return false;
        }
        self.shield_active = true;
        self.shield_secs_left = config.shield_duration_secs;
        true
    }

    /// Applies contact damage. Returns whether this blow destroyed the core.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    pub(crate) fn advance(&mut self, dt: f32, config: &GameConfig, out_events: &mut Vec<Event>) {
        if !self.alive {
            return;
        }

        self.shoot_cooldown_secs = (self.shoot_cooldown_secs - dt).max(0.0);

        if self.reloading {
            self.reload_secs_left -= dt;
            if self.reload_secs_left <= 0.0 {
                self.reloading = false;
                self.reload_secs_left = 0.0;
                self.ammo = config.max_ammo;
                out_events.push(Event::ReloadCompleted);
            }
        }

        if self.shield_active {
            self.shield_secs_left -= dt;
            if self.shield_secs_left <= 0.0 {
                self.shield_active = false;
                self.shield_secs_left = 0.0;
                self.shield_cooldown_secs = config.shield_cooldown_secs;
                out_events.push(Event::ShieldExpired);
            }
        } else {
            self.shield_cooldown_secs = (self.shield_cooldown_secs - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Player;
    use gesture_strike_core::{Event, GameConfig, Vec2};

    #[test]
    fn emptying_the_magazine_starts_a_reload() {
        let config = GameConfig {
            max_ammo: 2,
            ..GameConfig::default()
        };
        let mut player = Player::new(&config);
        let mut events = Vec::new();

        assert!(!player.consume_round(&config));
        player.advance(config.shoot_cooldown_secs, &config, &mut events);
        assert!(player.consume_round(&config));
        assert!(!player.can_shoot());

        player.advance(config.reload_secs, &config, &mut events);
        assert_eq!(events, vec![Event::ReloadCompleted]);
        assert_eq!(player.ammo, 2);
        assert!(player.can_shoot());
    }

    #[test]
    fn shield_enters_cooldown_after_expiring() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let mut events = Vec::new();

        assert!(player.raise_shield(&config));
        assert!(!player.raise_shield(&config));
        player.advance(config.shield_duration_secs, &config, &mut events);
        assert_eq!(events, vec![Event::ShieldExpired]);
        assert!(!player.shield_active);
        assert!(!player.raise_shield(&config));

        player.advance(config.shield_cooldown_secs, &config, &mut events);
        assert!(player.raise_shield(&config));
    }

    #[test]
    fn muzzle_sits_past_the_orbit_ring() {
        let config = GameConfig::default();
        let core = config.core_position();
        let mut player = Player::new(&config);
        player.aim_at(core, core + Vec2::new(0.0, -300.0));

        let muzzle = player.muzzle(core, &config);
        let expected = core + Vec2::new(0.0, -(config.gun_orbit_radius + config.gun_length));
        assert!(muzzle.distance(expected) < 1e-3);
    }
}

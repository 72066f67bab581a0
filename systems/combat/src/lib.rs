#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves bullet hits and enemy contact with the core.

use gesture_strike_core::{BulletView, Command, CoreSnapshot, EnemyView, GameState, Vec2};

/// Reports whether two circles touch or overlap.
#[must_use]
pub fn overlaps(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

/// Combat resolver that queues kill and contact commands for one frame.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
    claimed: Vec<bool>,
    spent: Vec<bool>,
}

impl Combat {
    /// Creates a new combat resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::KillEnemy` and `Command::EnemyContact` entries.
    ///
    /// Bullets are visited in id order. A bullet overlapping exactly one
    /// unclaimed enemy claims it first; every remaining bullet then claims the
    /// nearest unclaimed enemy it overlaps, ties going to the lower enemy id.
    /// This pairing is greedy, not a maximum matching, so a crowded frame can
    /// still leave an overlapped enemy alive. An enemy is killed at most once
    /// and a killed enemy never reaches the core in the same frame. Staggering
    /// enemies are ignored entirely.
    pub fn handle(
        &mut self,
        state: GameState,
        bullets: &BulletView,
        enemies: &EnemyView,
        core: CoreSnapshot,
        out: &mut Vec<Command>,
    ) {
        if state != GameState::Playing || enemies.is_empty() {
            return;
        }

        let targets: Vec<_> = enemies.iter().collect();
        self.claimed.clear();
        self.claimed
            .extend(targets.iter().map(|enemy| enemy.brain.is_staggering()));
        self.scratch.clear();

        let shots: Vec<_> = bullets.iter().collect();
        self.spent.clear();
        self.spent.resize(shots.len(), false);

        // Bullets with a single possible target claim it before any bullet
        // is allowed to choose between several.
        for (shot, bullet) in shots.iter().enumerate() {
            let mut candidates = targets.iter().enumerate().filter(|(index, enemy)| {
                !self.claimed[*index]
                    && overlaps(bullet.position, bullet.radius, enemy.position, enemy.radius)
            });
            let (Some((index, enemy)), None) = (candidates.next(), candidates.next()) else {
                continue;
            };
            self.claimed[index] = true;
            self.spent[shot] = true;
            self.scratch.push(Command::KillEnemy {
                enemy: enemy.id,
                bullet: bullet.id,
            });
        }

        for (shot, bullet) in shots.iter().enumerate() {
            if self.spent[shot] {
                continue;
            }
            let mut nearest: Option<(usize, f32)> = None;
            for (index, enemy) in targets.iter().enumerate() {
                if self.claimed[index]
                    || !overlaps(bullet.position, bullet.radius, enemy.position, enemy.radius)
                {
                    continue;
                }
                let distance = bullet.position.distance_squared(enemy.position);
                if nearest.map_or(true, |(_, best)| distance < best) {
                    nearest = Some((index, distance));
                }
            }
            if let Some((index, _)) = nearest {
                self.claimed[index] = true;
                self.scratch.push(Command::KillEnemy {
                    enemy: targets[index].id,
                    bullet: bullet.id,
                });
            }
        }

        for (index, enemy) in targets.iter().enumerate() {
            if self.claimed[index] {
                continue;
            }
            if overlaps(enemy.position, enemy.radius, core.position, core.radius) {
                self.scratch.push(Command::EnemyContact {
                    enemy: enemy.id,
                    blocked: core.shield_active,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

//! The player's ship

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::geometry::{Circle, Rect};
use super::powerup::PowerUpKind;
use crate::consts::*;

/// Extra speed granted by the speed-up power-up
pub const SPEED_UP_BONUS: f32 = 2.0;
/// Vertical spacing of multi-shot bullets
const MULTI_SHOT_SPREAD: f32 = 10.0;
/// Velocity of diagonal-shot bullets (y sign flipped for the lower one)
const DIAGONAL_SHOT_VEL: Vec2 = Vec2::new(9.0, 4.0);

/// What a damage attempt did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Shield absorbed it; no state change
    Shielded,
    /// Still flashing from a recent hit; no state change
    Invulnerable,
    /// HP dropped, player survives
    Hurt,
    /// HP reached zero
    Killed,
}

impl DamageOutcome {
    pub fn landed(&self) -> bool {
        matches!(self, DamageOutcome::Hurt | DamageOutcome::Killed)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the sprite box
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Current movement speed (raised while speed-up is active)
    pub speed: f32,
    /// Remaining ticks per active power-up
    pub powerups: BTreeMap<PowerUpKind, u32>,
    /// Shield that never expires (debug / attract mode)
    #[serde(default)]
    pub permanent_shield: bool,
    /// Ticks left before the player can be hurt again
    #[serde(default)]
    pub invulnerable_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, SCREEN_HEIGHT / 2.0),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            speed: PLAYER_BASE_SPEED,
            powerups: BTreeMap::new(),
            permanent_shield: false,
            invulnerable_ticks: 0,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    /// Small circle at the ship center; used for everything that hurts
    pub fn hitbox(&self) -> Circle {
        Circle::new(self.rect().center(), PLAYER_HITBOX_RADIUS)
    }

    pub fn is_shielded(&self) -> bool {
        self.permanent_shield || self.remaining(PowerUpKind::Shield) > 0
    }

    pub fn has(&self, kind: PowerUpKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Ticks left on a power-up (0 when inactive)
    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        self.powerups.get(&kind).copied().unwrap_or(0)
    }

    /// Move by the input direction, then count down timers
    pub fn update(&mut self, direction: Vec2) {
        self.pos += direction * self.speed;
        self.pos = self
            .pos
            .clamp(Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) - Self::size());

        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);

        for ticks in self.powerups.values_mut() {
            *ticks = ticks.saturating_sub(1);
        }
        self.powerups.retain(|_, ticks| *ticks > 0);

        if !self.has(PowerUpKind::SpeedUp) {
            self.speed = PLAYER_BASE_SPEED;
        }
    }

    /// Start (or refresh) a power-up
    pub fn apply_powerup(&mut self, kind: PowerUpKind) {
        self.powerups.insert(kind, kind.duration());
        if kind == PowerUpKind::SpeedUp {
            self.speed = PLAYER_BASE_SPEED + SPEED_UP_BONUS;
        }
    }

    /// Bullets for one trigger pull, shaped by active power-ups
    pub fn fire(&self) -> Vec<Bullet> {
        let muzzle = Vec2::new(
            self.pos.x + PLAYER_WIDTH,
            self.pos.y + PLAYER_HEIGHT / 2.0 - BULLET_HEIGHT / 2.0,
        );
        let straight = Vec2::new(PLAYER_BULLET_SPEED, 0.0);

        let mut bullets = vec![Bullet::new(muzzle, straight, BulletOwner::Player)];

        if self.has(PowerUpKind::MultiShot) {
            for dy in [-MULTI_SHOT_SPREAD, MULTI_SHOT_SPREAD] {
                bullets.push(Bullet::new(
                    muzzle + Vec2::new(0.0, dy),
                    straight,
                    BulletOwner::Player,
                ));
            }
        }

        if self.has(PowerUpKind::DiagonalShot) {
            for sign in [-1.0, 1.0] {
                let vel = Vec2::new(DIAGONAL_SHOT_VEL.x, DIAGONAL_SHOT_VEL.y * sign);
                bullets.push(Bullet::new(muzzle, vel, BulletOwner::Player));
            }
        }

        bullets
    }

    /// Apply one hit of `amount` damage
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_shielded() {
            return DamageOutcome::Shielded;
        }
        if self.invulnerable_ticks > 0 {
            return DamageOutcome::Invulnerable;
        }

        self.hp = (self.hp - amount).max(0.0);
        self.invulnerable_ticks = PLAYER_INVULNERABLE_TICKS;

        if self.hp <= 0.0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }
}

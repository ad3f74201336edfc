//! Projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{BULLET_HEIGHT, BULLET_WIDTH};

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
    Boss,
}

/// A linear-motion projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, owner: BulletOwner) -> Self {
        Self { pos, vel, owner }
    }

    pub fn size() -> Vec2 {
        Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)
    }

    /// Advance by one tick
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect().is_off_screen()
    }
}

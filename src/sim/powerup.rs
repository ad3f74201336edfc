//! Power-up pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::RandomSource;
use crate::consts::{POWERUP_SIZE, POWERUP_SPEED};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Two extra parallel bullets per shot
    MultiShot,
    /// Two extra angled bullets per shot
    DiagonalShot,
    /// Faster ship movement
    SpeedUp,
    /// Immune to damage
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::MultiShot,
        PowerUpKind::DiagonalShot,
        PowerUpKind::SpeedUp,
        PowerUpKind::Shield,
    ];

    /// Effect duration in ticks
    pub fn duration(&self) -> u32 {
        match self {
            PowerUpKind::MultiShot | PowerUpKind::DiagonalShot => 500,
            PowerUpKind::SpeedUp => 600,
            PowerUpKind::Shield => 300,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::MultiShot => "multi_shot",
            PowerUpKind::DiagonalShot => "diagonal_shot",
            PowerUpKind::SpeedUp => "speed_up",
            PowerUpKind::Shield => "shield",
        }
    }
}

/// A pickup drifting left across the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self { pos, kind }
    }

    /// Pickup of a uniformly random kind
    pub fn random(pos: Vec2, rng: &mut impl RandomSource) -> Self {
        Self::new(pos, rng.pick(&PowerUpKind::ALL))
    }

    pub fn update(&mut self) {
        self.pos.x -= POWERUP_SPEED;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    /// Drifted past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -POWERUP_SIZE
    }
}

//! Regular enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::geometry::Rect;
use super::rng::RandomSource;
use crate::consts::{ENEMY_BULLET_SPEED, ENEMY_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Ticks between zigzag direction flips
const ZIGZAG_PERIOD: u32 = 20;
/// Keep spawns away from the top and bottom edges
const SPAWN_MARGIN: f32 = 50.0;

/// Enemy movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Fly straight left
    Straight,
    /// Bob around the spawn height as a function of x
    Sine { amplitude: f32, frequency: f32 },
    /// Drift up/down, flipping every `ZIGZAG_PERIOD` ticks
    Zigzag { direction: f32, counter: u32 },
}

/// A regular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub speed: f32,
    pub motion: EnemyMotion,
    /// Spawn height the sine pattern oscillates around
    pub origin_y: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32, motion: EnemyMotion) -> Self {
        Self {
            pos,
            speed,
            motion,
            origin_y: pos.y,
        }
    }

    /// Spawn at the right edge with randomized speed and pattern
    pub fn spawn(rng: &mut impl RandomSource) -> Self {
        let y = rng.range_i32(SPAWN_MARGIN as i32, (SCREEN_HEIGHT - SPAWN_MARGIN) as i32) as f32;
        let speed = rng.range_i32(2, 5) as f32;
        let amplitude = rng.range_i32(20, 50) as f32;
        let frequency = rng.range_f32(0.05, 0.1);

        let motion = match rng.index(3) {
            0 => EnemyMotion::Straight,
            1 => EnemyMotion::Sine {
                amplitude,
                frequency,
            },
            _ => EnemyMotion::Zigzag {
                direction: 1.0,
                counter: 0,
            },
        };

        Self::new(Vec2::new(SCREEN_WIDTH, y), speed, motion)
    }

    pub fn size() -> Vec2 {
        Vec2::splat(ENEMY_SIZE)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;

        match &mut self.motion {
            EnemyMotion::Straight => {}
            EnemyMotion::Sine {
                amplitude,
                frequency,
            } => {
                self.pos.y = self.origin_y + *amplitude * (*frequency * self.pos.x).sin();
            }
            EnemyMotion::Zigzag { direction, counter } => {
                *counter += 1;
                if *counter >= ZIGZAG_PERIOD {
                    *direction = -*direction;
                    *counter = 0;
                }
                self.pos.y += *direction * (self.speed / 2.0);
            }
        }
    }

    /// Flew past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -ENEMY_SIZE
    }

    /// Roll the per-tick fire chance
    pub fn try_shoot(&self, chance: f64, rng: &mut impl RandomSource) -> Option<Bullet> {
        if !rng.chance(chance) {
            return None;
        }
        let muzzle = Vec2::new(self.pos.x, self.pos.y + ENEMY_SIZE / 2.0);
        Some(Bullet::new(
            muzzle,
            Vec2::new(-ENEMY_BULLET_SPEED, 0.0),
            BulletOwner::Enemy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SimRng;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = SimRng::new(3);
        for _ in 0..100 {
            let e = Enemy::spawn(&mut rng);
            assert_eq!(e.pos.x, SCREEN_WIDTH);
            assert!(e.pos.y >= SPAWN_MARGIN && e.pos.y <= SCREEN_HEIGHT - SPAWN_MARGIN);
            assert!((2.0..=5.0).contains(&e.speed));
        }
    }

    #[test]
    fn test_zigzag_flips() {
        let mut e = Enemy::new(
            Vec2::new(400.0, 300.0),
            4.0,
            EnemyMotion::Zigzag {
                direction: 1.0,
                counter: 0,
            },
        );
        for _ in 0..19 {
            e.update();
        }
        assert_eq!(e.pos.y, 300.0 + 19.0 * 2.0);
        e.update();
        assert_eq!(e.pos.y, 300.0 + 18.0 * 2.0);
    }

    #[test]
    fn test_sine_tracks_origin() {
        let mut e = Enemy::new(
            Vec2::new(400.0, 300.0),
            3.0,
            EnemyMotion::Sine {
                amplitude: 30.0,
                frequency: 0.07,
            },
        );
        for _ in 0..50 {
            e.update();
            assert!((e.pos.y - 300.0).abs() <= 30.0 + 1e-3);
        }
    }

    #[test]
    fn test_shoot_chance_bounds() {
        let mut rng = SimRng::new(11);
        let e = Enemy::new(Vec2::new(400.0, 300.0), 3.0, EnemyMotion::Straight);
        assert!(e.try_shoot(0.0, &mut rng).is_none());
        let bullet = e.try_shoot(1.0, &mut rng).unwrap();
        assert_eq!(bullet.owner, BulletOwner::Enemy);
        assert!(bullet.vel.x < 0.0);
    }
}

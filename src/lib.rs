//! Side Shooter - A horizontal arcade shooter with a multi-phase boss
//!
//! Core modules:
//! - `sim`: Deterministic simulation (boss state machine, collisions, session)
//! - `settings`: Difficulty presets and session configuration
//! - `audio`: Named sound triggers handed to an external audio backend

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, DifficultyConfig, DifficultyLevel};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Play area dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HP: f32 = 3.0;
    /// Radius of the forgiving circular hitbox around the ship center
    pub const PLAYER_HITBOX_RADIUS: f32 = 6.0;
    /// Invulnerability window after a landed hit (ticks)
    pub const PLAYER_INVULNERABLE_TICKS: u32 = 60;
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    /// Base damage of any hit on the player (scaled by difficulty)
    pub const PLAYER_HIT_DAMAGE: f32 = 1.0;

    /// Bullets share one fixed size
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 4.0;

    /// Regular enemies
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const ENEMY_MIN_SPAWN_INTERVAL: u32 = 20;
    pub const ENEMY_KILL_SCORE: u64 = 10;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 15.0;
    pub const POWERUP_SPEED: f32 = 2.0;
    /// Chance that a destroyed enemy drops a power-up
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;

    /// Boss encounter
    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_BASE_SPEED: f32 = 3.0;
    pub const BOSS_BASE_HP: f32 = 100.0;
    pub const BOSS_SPAWN_SCORE: u64 = 200;
    pub const BOSS_DEFEAT_BONUS: u64 = 100;
    pub const BOSS_BULLET_DAMAGE: f32 = 10.0;
    /// Score distance from the spawn threshold at which the HUD warns
    pub const BOSS_WARNING_MARGIN: u64 = 50;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + direction_from_angle(theta) * r
}

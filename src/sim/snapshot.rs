//! Read-only view of a session for renderers and HUDs
//!
//! Renderers never touch `GameState` directly; they draw from a snapshot
//! taken after the tick finishes.

use serde::Serialize;

use super::boss::PatternKind;
use super::bullet::BulletOwner;
use super::powerup::PowerUpKind;
use super::state::{GameState, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub sprite: SpriteSnapshot,
    pub hp: f32,
    pub max_hp: f32,
    pub shield_active: bool,
    /// Flashing after a hit
    pub invulnerable: bool,
    /// Active power-ups with remaining ticks
    pub powerups: Vec<(PowerUpKind, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossSnapshot {
    pub sprite: SpriteSnapshot,
    pub hp: f32,
    pub max_hp: f32,
    pub phase: u8,
    pub pattern: PatternKind,
    pub hit_flash: bool,
    pub laser_charging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletSnapshot {
    pub sprite: SpriteSnapshot,
    pub owner: BulletOwner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpSnapshot {
    pub sprite: SpriteSnapshot,
    pub kind: PowerUpKind,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub time_ticks: u64,
    pub phase: SessionPhase,
    pub score: u64,
    pub boss_approaching: bool,
    pub player: PlayerSnapshot,
    pub boss: Option<BossSnapshot>,
    pub enemies: Vec<SpriteSnapshot>,
    pub bullets: Vec<BulletSnapshot>,
    pub powerups: Vec<PowerUpSnapshot>,
}

impl From<super::geometry::Rect> for SpriteSnapshot {
    fn from(rect: super::geometry::Rect) -> Self {
        Self {
            x: rect.pos.x,
            y: rect.pos.y,
            width: rect.size.x,
            height: rect.size.y,
        }
    }
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        let boss = state.boss.as_ref().map(|b| BossSnapshot {
            sprite: b.rect().into(),
            hp: b.hp,
            max_hp: b.max_hp,
            phase: b.phase(),
            pattern: b.pattern_kind(),
            hit_flash: b.hit_flash > 0,
            laser_charging: b.pattern.is_laser_charging(),
        });

        let bullets = state
            .player_bullets
            .iter()
            .chain(&state.enemy_bullets)
            .map(|b| BulletSnapshot {
                sprite: b.rect().into(),
                owner: b.owner,
            })
            .collect();

        Self {
            time_ticks: state.time_ticks,
            phase: state.phase,
            score: state.score,
            boss_approaching: state.boss_approaching(),
            player: PlayerSnapshot {
                sprite: player.rect().into(),
                hp: player.hp,
                max_hp: player.max_hp,
                shield_active: player.is_shielded(),
                invulnerable: player.invulnerable_ticks > 0,
                powerups: player.powerups.iter().map(|(k, t)| (*k, *t)).collect(),
            },
            boss,
            enemies: state.enemies.iter().map(|e| e.rect().into()).collect(),
            bullets,
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpSnapshot {
                    sprite: p.rect().into(),
                    kind: p.kind,
                })
                .collect(),
        }
    }
}

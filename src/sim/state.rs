//! Session state and core simulation types
//!
//! `GameState` owns every entity collection. Only `tick` and the collision
//! passes mutate it.

use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::bullet::Bullet;
use super::enemy::Enemy;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::rng::SimRng;
use crate::consts::{BOSS_SPAWN_SCORE, BOSS_WARNING_MARGIN};
use crate::settings::DifficultyConfig;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Normal play
    Active,
    /// Player destroyed; frozen until reset
    GameOver,
    /// Boss destroyed; frozen until reset
    Cleared,
}

/// Things that happened during a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Shoot,
    EnemyDestroyed,
    PowerUpCollected(PowerUpKind),
    BossAppear,
    BossHit,
    /// Boss entered the given phase
    BossPhaseChanged(u8),
    BossDefeat,
    PlayerHit,
    /// A hit landed on the player's shield
    ShieldBlocked,
    GameOver,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session RNG; the only source of randomness
    pub rng: SimRng,
    /// Difficulty this session was started with
    pub config: DifficultyConfig,
    pub phase: SessionPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub player: Player,
    pub boss: Option<Boss>,
    /// Boss already beaten this session (never respawns)
    pub boss_defeated: bool,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    /// Enemy and boss bullets
    pub enemy_bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    pub enemy_spawn_timer: u32,
    /// Current ticks between enemy spawns (shrinks over time)
    pub enemy_spawn_interval: u32,
    pub powerup_spawn_timer: u32,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed and difficulty
    pub fn new(seed: u64, config: DifficultyConfig) -> Self {
        Self {
            rng: SimRng::new(seed),
            config,
            phase: SessionPhase::Active,
            time_ticks: 0,
            score: 0,
            player: Player::new(),
            boss: None,
            boss_defeated: false,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            enemy_spawn_timer: 0,
            enemy_spawn_interval: config.enemy_spawn_interval,
            powerup_spawn_timer: 0,
            events: Vec::new(),
        }
    }

    /// Start over with the same difficulty. The RNG keeps its stream, so a
    /// restarted session does not replay the previous one.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self {
            rng,
            ..Self::new(self.rng.seed(), self.config)
        };
        log::info!("Session reset");
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// GameOver or Cleared
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Record an event for this tick
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Boss due to spawn on the next qualifying tick
    pub fn boss_ready(&self) -> bool {
        self.score >= BOSS_SPAWN_SCORE && self.boss.is_none() && !self.boss_defeated
    }

    /// Score is close enough to the spawn threshold to warn the player
    pub fn boss_approaching(&self) -> bool {
        self.boss.is_none()
            && !self.boss_defeated
            && self.score < BOSS_SPAWN_SCORE
            && BOSS_SPAWN_SCORE - self.score <= BOSS_WARNING_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::BulletOwner;
    use glam::Vec2;

    #[test]
    fn test_new_session_is_empty() {
        let state = GameState::new(1, DifficultyConfig::default());
        assert_eq!(state.phase, SessionPhase::Active);
        assert!(state.boss.is_none());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.enemy_spawn_interval, 60);
    }

    #[test]
    fn test_reset_clears_everything() {
        let config = crate::DifficultyLevel::Hard.config();
        let mut state = GameState::new(5, config);
        state.score = 250;
        state.phase = SessionPhase::GameOver;
        state.boss_defeated = true;
        state.enemy_spawn_interval = 21;
        state.player_bullets.push(Bullet::new(Vec2::ZERO, Vec2::X, BulletOwner::Player));
        state.enemy_bullets.push(Bullet::new(Vec2::ZERO, Vec2::X, BulletOwner::Boss));
        state.powerups.push(PowerUp::new(Vec2::ZERO, PowerUpKind::Shield));
        state.player.hp = 0.0;

        state.reset();

        assert_eq!(state.phase, SessionPhase::Active);
        assert_eq!(state.score, 0);
        assert!(state.boss.is_none());
        assert!(!state.boss_defeated);
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.powerups.is_empty());
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.config, config);
        assert_eq!(state.enemy_spawn_interval, config.enemy_spawn_interval);
    }

    #[test]
    fn test_boss_warning_window() {
        let mut state = GameState::new(1, DifficultyConfig::default());
        state.score = 140;
        assert!(!state.boss_approaching());
        state.score = 150;
        assert!(state.boss_approaching());
        state.score = 200;
        assert!(!state.boss_approaching());
        assert!(state.boss_ready());
    }
}

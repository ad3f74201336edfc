//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one frame. The order of the
//! steps below is part of the game's behavior; reordering them changes
//! which hits land first.

use glam::Vec2;

use super::boss::Boss;
use super::collision;
use super::enemy::Enemy;
use super::powerup::PowerUp;
use super::rng::RandomSource;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Keep timed power-up spawns away from the top and bottom edges
const POWERUP_SPAWN_MARGIN: f32 = 50.0;

/// Player intent for a single tick (already normalized by the input layer)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal intent in {-1, 0, 1}
    pub dx: i8,
    /// Vertical intent in {-1, 0, 1} (+1 is down)
    pub dy: i8,
    /// Fire requested this tick (edge-triggered by the caller)
    pub fire: bool,
    /// Start a new session once the current one has ended
    pub restart: bool,
}

impl TickInput {
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.dx.signum() as f32, self.dy.signum() as f32)
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.is_terminal() {
        if input.restart {
            state.reset();
        }
        return;
    }

    state.time_ticks += 1;

    step_player(state, input);
    spawn_boss_if_due(state);
    spawn_powerup_on_timer(state);
    spawn_enemy_on_timer(state);

    step_powerups(state);

    step_boss(state);
    if state.is_terminal() {
        return;
    }

    step_enemies(state);
    if state.is_terminal() {
        return;
    }

    step_player_bullets(state);
    if state.is_terminal() {
        return;
    }

    step_hostile_bullets(state);
}

fn step_player(state: &mut GameState, input: &TickInput) {
    state.player.update(input.direction());

    if input.fire {
        let shots = state.player.fire();
        state.player_bullets.extend(shots);
        state.emit(GameEvent::Shoot);
    }
}

fn spawn_boss_if_due(state: &mut GameState) {
    if !state.boss_ready() {
        return;
    }
    state.boss = Some(Boss::new(state.config.boss_hp_multiplier, &mut state.rng));
    state.enemies.clear();
    state.emit(GameEvent::BossAppear);
    log::info!("Boss appeared at score {}", state.score);
}

fn spawn_powerup_on_timer(state: &mut GameState) {
    state.powerup_spawn_timer += 1;
    if state.powerup_spawn_timer < state.config.powerup_spawn_interval {
        return;
    }
    state.powerup_spawn_timer = 0;

    let y = state
        .rng
        .range_f32(POWERUP_SPAWN_MARGIN, SCREEN_HEIGHT - POWERUP_SPAWN_MARGIN);
    let powerup = PowerUp::random(Vec2::new(SCREEN_WIDTH, y), &mut state.rng);
    log::debug!("Spawned {} power-up", powerup.kind.as_str());
    state.powerups.push(powerup);
}

fn spawn_enemy_on_timer(state: &mut GameState) {
    if state.boss.is_some() {
        return;
    }

    state.enemy_spawn_timer += 1;
    if state.enemy_spawn_timer < state.enemy_spawn_interval {
        return;
    }
    state.enemy_spawn_timer = 0;

    let enemy = Enemy::spawn(&mut state.rng);
    state.enemies.push(enemy);

    // Ramp up the pressure
    if state.enemy_spawn_interval > ENEMY_MIN_SPAWN_INTERVAL {
        state.enemy_spawn_interval -= 1;
    }
}

fn step_powerups(state: &mut GameState) {
    for powerup in &mut state.powerups {
        powerup.update();
    }
    collision::resolve_powerups(state);
}

fn step_boss(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    let phase_before = boss.phase();
    boss.update(&mut state.rng);
    let volley = boss.shoot(&mut state.rng);
    let phase_after = boss.phase();

    state.enemy_bullets.extend(volley);
    for phase in (phase_before + 1)..=phase_after {
        state.emit(GameEvent::BossPhaseChanged(phase));
    }

    collision::resolve_boss_contact(state);
}

fn step_enemies(state: &mut GameState) {
    let chance = state.config.enemy_shoot_chance;
    for enemy in &mut state.enemies {
        enemy.update();
    }
    for index in 0..state.enemies.len() {
        if let Some(bullet) = state.enemies[index].try_shoot(chance, &mut state.rng) {
            state.enemy_bullets.push(bullet);
        }
    }
    collision::resolve_enemy_contacts(state);
}

fn step_player_bullets(state: &mut GameState) {
    for bullet in &mut state.player_bullets {
        bullet.update();
    }
    collision::resolve_player_bullets(state);
}

fn step_hostile_bullets(state: &mut GameState) {
    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    collision::resolve_hostile_bullets(state);
}

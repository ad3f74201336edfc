//! Collision detection and damage resolution
//!
//! Every hit is resolved in a fixed order so a tick's outcome never depends
//! on anything but the state going in:
//! - a player bullet touching the boss hits the boss and nothing else
//! - otherwise it destroys the first overlapping enemy in list order
//! - hostile bullets, the boss body and enemy bodies hurt the player through
//!   a small circle at the ship center; each source hurts at most once
//!
//! Entities that left the play area are dropped before any test runs.

use super::boss::Boss;
use super::bullet::Bullet;
use super::enemy::Enemy;
use super::geometry::Rect;
use super::player::{DamageOutcome, Player};
use super::powerup::PowerUp;
use super::rng::RandomSource;
use super::state::{GameEvent, GameState, SessionPhase};
use crate::consts::*;

/// What a player bullet struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletHit {
    Boss,
    /// Index into the enemy list
    Enemy(usize),
}

/// Target of a player bullet, honoring boss-first precedence
pub fn player_bullet_target(bullet: &Bullet, boss: Option<&Boss>, enemies: &[Enemy]) -> Option<BulletHit> {
    let rect = bullet.rect();
    if boss.is_some_and(|b| rect.overlaps(&b.rect())) {
        return Some(BulletHit::Boss);
    }
    enemies
        .iter()
        .position(|e| rect.overlaps(&e.rect()))
        .map(BulletHit::Enemy)
}

/// Does `rect` touch the player's hurt circle?
pub fn touches_player(player: &Player, rect: &Rect) -> bool {
    player.hitbox().intersects(rect)
}

/// Apply one hit to the player, scaled by difficulty
pub fn damage_player(state: &mut GameState) -> DamageOutcome {
    let amount = PLAYER_HIT_DAMAGE * state.config.player_damage_multiplier;
    let outcome = state.player.take_damage(amount);

    if outcome.landed() {
        log::debug!("Player hit, {:.1} HP left", state.player.hp);
        state.emit(GameEvent::PlayerHit);
    }

    match outcome {
        DamageOutcome::Shielded => state.emit(GameEvent::ShieldBlocked),
        DamageOutcome::Killed => {
            log::info!("Player destroyed at score {}", state.score);
            state.emit(GameEvent::GameOver);
            state.phase = SessionPhase::GameOver;
        }
        DamageOutcome::Invulnerable | DamageOutcome::Hurt => {}
    }
    outcome
}

/// Apply `amount` damage to the boss; handles phase events and defeat
pub fn damage_boss(state: &mut GameState, amount: f32) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    let phase_before = boss.phase();
    let defeated = boss.take_damage(amount);
    let phase_after = boss.phase();

    state.emit(GameEvent::BossHit);
    for phase in (phase_before + 1)..=phase_after {
        state.emit(GameEvent::BossPhaseChanged(phase));
    }

    if defeated {
        state.boss = None;
        state.boss_defeated = true;
        state.score += BOSS_DEFEAT_BONUS;
        state.phase = SessionPhase::Cleared;
        state.emit(GameEvent::BossDefeat);
        log::info!("Boss defeated, final score {}", state.score);
    }
}

/// Remove enemy `index`, score it, maybe drop a power-up
pub fn destroy_enemy(state: &mut GameState, index: usize) {
    let enemy = state.enemies.remove(index);
    state.score += ENEMY_KILL_SCORE;
    state.emit(GameEvent::EnemyDestroyed);

    if state.rng.chance(POWERUP_DROP_CHANCE) {
        let drop = PowerUp::random(enemy.pos, &mut state.rng);
        log::debug!("Enemy dropped {}", drop.kind.as_str());
        state.powerups.push(drop);
    }
}

/// Drop off-screen power-ups and apply the ones the player touches
pub fn resolve_powerups(state: &mut GameState) {
    state.powerups.retain(|p| !p.is_off_screen());

    let ship = state.player.rect();
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if ship.overlaps(&p.rect()) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.player.apply_powerup(kind);
        state.emit(GameEvent::PowerUpCollected(kind));
        log::debug!("Collected {}", kind.as_str());
    }
}

/// Boss body against the player
pub fn resolve_boss_contact(state: &mut GameState) {
    let touching = state
        .boss
        .as_ref()
        .is_some_and(|b| touches_player(&state.player, &b.rect()));
    if touching {
        damage_player(state);
    }
}

/// Drop enemies that flew off-screen; enemies that ram the player explode
pub fn resolve_enemy_contacts(state: &mut GameState) {
    state.enemies.retain(|e| !e.is_off_screen());

    let mut index = 0;
    while index < state.enemies.len() {
        if state.is_active() && touches_player(&state.player, &state.enemies[index].rect()) {
            state.enemies.remove(index);
            state.emit(GameEvent::EnemyDestroyed);
            damage_player(state);
        } else {
            index += 1;
        }
    }
}

/// Player bullets against the boss, then enemies
pub fn resolve_player_bullets(state: &mut GameState) {
    let bullets = std::mem::take(&mut state.player_bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        if bullet.is_off_screen() {
            continue;
        }
        if !state.is_active() {
            survivors.push(bullet);
            continue;
        }
        match player_bullet_target(&bullet, state.boss.as_ref(), &state.enemies) {
            Some(BulletHit::Boss) => damage_boss(state, BOSS_BULLET_DAMAGE),
            Some(BulletHit::Enemy(index)) => destroy_enemy(state, index),
            None => survivors.push(bullet),
        }
    }

    state.player_bullets = survivors;
}

/// Enemy and boss bullets against the player
pub fn resolve_hostile_bullets(state: &mut GameState) {
    let bullets = std::mem::take(&mut state.enemy_bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        if bullet.is_off_screen() {
            continue;
        }
        if state.is_active() && touches_player(&state.player, &bullet.rect()) {
            damage_player(state);
            continue;
        }
        survivors.push(bullet);
    }

    state.enemy_bullets = survivors;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DifficultyConfig;
    use crate::sim::bullet::BulletOwner;
    use crate::sim::enemy::EnemyMotion;
    use crate::sim::powerup::PowerUpKind;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(77, DifficultyConfig::default())
    }

    fn with_boss(state: &mut GameState) {
        let mut rng = crate::sim::rng::SimRng::new(1);
        state.boss = Some(Boss::new(1.0, &mut rng));
    }

    fn enemy_at(pos: Vec2) -> Enemy {
        Enemy::new(pos, 3.0, EnemyMotion::Straight)
    }

    fn player_center(state: &GameState) -> Vec2 {
        state.player.rect().center()
    }

    #[test]
    fn test_boss_takes_precedence_over_enemy() {
        let mut state = state();
        with_boss(&mut state);
        let boss_pos = state.boss.as_ref().unwrap().pos();
        state.enemies.push(enemy_at(boss_pos + Vec2::new(10.0, 10.0)));
        state.player_bullets.push(Bullet::new(
            boss_pos + Vec2::new(15.0, 15.0),
            Vec2::new(10.0, 0.0),
            BulletOwner::Player,
        ));

        resolve_player_bullets(&mut state);

        assert!(state.player_bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.boss.as_ref().unwrap().hp, BOSS_BASE_HP - BOSS_BULLET_DAMAGE);
        assert_eq!(state.score, 0);
        assert_eq!(state.events, vec![GameEvent::BossHit]);
    }

    #[test]
    fn test_bullet_kills_first_enemy_only() {
        let mut state = state();
        let pos = Vec2::new(300.0, 300.0);
        state.enemies.push(enemy_at(pos));
        state.enemies.push(enemy_at(pos + Vec2::new(2.0, 0.0)));
        state
            .player_bullets
            .push(Bullet::new(pos + Vec2::new(5.0, 5.0), Vec2::X, BulletOwner::Player));

        resolve_player_bullets(&mut state);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 302.0);
        assert_eq!(state.score, ENEMY_KILL_SCORE);
        assert!(state.player_bullets.is_empty());
    }

    #[test]
    fn test_off_screen_bullet_has_no_effect() {
        let mut state = state();
        // Enemy parked past the right edge, bullet overlapping it
        let pos = Vec2::new(SCREEN_WIDTH + 2.0, 300.0);
        state.enemies.push(enemy_at(pos));
        state
            .player_bullets
            .push(Bullet::new(pos, Vec2::X, BulletOwner::Player));

        resolve_player_bullets(&mut state);

        assert!(state.player_bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_shield_blocks_hostile_bullet() {
        let mut state = state();
        state.player.apply_powerup(PowerUpKind::Shield);
        let hp = state.player.hp;
        state.enemy_bullets.push(Bullet::new(
            player_center(&state) - Vec2::new(4.0, 2.0),
            Vec2::ZERO,
            BulletOwner::Boss,
        ));

        resolve_hostile_bullets(&mut state);

        assert_eq!(state.player.hp, hp);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.events, vec![GameEvent::ShieldBlocked]);
        assert_eq!(state.phase, SessionPhase::Active);
    }

    #[test]
    fn test_hitbox_is_smaller_than_sprite() {
        let mut state = state();
        // Inside the sprite box's corner but far from the center
        let corner = state.player.pos + Vec2::new(1.0, 1.0);
        state
            .enemy_bullets
            .push(Bullet::new(corner, Vec2::ZERO, BulletOwner::Enemy));

        resolve_hostile_bullets(&mut state);

        assert_eq!(state.player.hp, PLAYER_MAX_HP);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_two_bullets_same_tick_hurt_once() {
        let mut state = state();
        let at = player_center(&state) - Vec2::new(4.0, 2.0);
        for _ in 0..2 {
            state
                .enemy_bullets
                .push(Bullet::new(at, Vec2::ZERO, BulletOwner::Enemy));
        }

        resolve_hostile_bullets(&mut state);

        assert_eq!(state.player.hp, PLAYER_MAX_HP - PLAYER_HIT_DAMAGE);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.events, vec![GameEvent::PlayerHit]);
    }

    #[test]
    fn test_fatal_hit_ends_session() {
        let mut state = state();
        state.player.hp = 1.0;
        state.enemy_bullets.push(Bullet::new(
            player_center(&state) - Vec2::new(4.0, 2.0),
            Vec2::ZERO,
            BulletOwner::Enemy,
        ));

        resolve_hostile_bullets(&mut state);

        assert_eq!(state.phase, SessionPhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_damage_multiplier_applies() {
        let mut state = GameState::new(1, crate::DifficultyLevel::Easy.config());
        damage_player(&mut state);
        assert_eq!(state.player.hp, PLAYER_MAX_HP - 0.5);
    }

    #[test]
    fn test_lethal_boss_damage_clears_once() {
        let mut state = state();
        with_boss(&mut state);
        state.score = 230;

        let hp = state.boss.as_ref().unwrap().hp;
        damage_boss(&mut state, hp);
        damage_boss(&mut state, hp);

        assert!(state.boss.is_none());
        assert!(state.boss_defeated);
        assert_eq!(state.phase, SessionPhase::Cleared);
        assert_eq!(state.score, 230 + BOSS_DEFEAT_BONUS);
        assert_eq!(
            state.events,
            vec![
                GameEvent::BossHit,
                GameEvent::BossPhaseChanged(2),
                GameEvent::BossPhaseChanged(3),
                GameEvent::BossPhaseChanged(4),
                GameEvent::BossDefeat,
            ]
        );
    }

    #[test]
    fn test_powerup_pickup_applies_effect() {
        let mut state = state();
        state
            .powerups
            .push(PowerUp::new(state.player.pos, PowerUpKind::MultiShot));
        state
            .powerups
            .push(PowerUp::new(Vec2::new(-40.0, 10.0), PowerUpKind::Shield));

        resolve_powerups(&mut state);

        assert!(state.powerups.is_empty());
        assert!(state.player.has(PowerUpKind::MultiShot));
        assert!(!state.player.is_shielded());
        assert_eq!(state.score, 0);
        assert_eq!(
            state.events,
            vec![GameEvent::PowerUpCollected(PowerUpKind::MultiShot)]
        );
    }

    #[test]
    fn test_ramming_enemy_explodes() {
        let mut state = state();
        state
            .enemies
            .push(enemy_at(player_center(&state) - Vec2::splat(10.0)));
        state.enemies.push(enemy_at(Vec2::new(-30.0, 100.0)));

        resolve_enemy_contacts(&mut state);

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.hp, PLAYER_MAX_HP - PLAYER_HIT_DAMAGE);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_boss_contact_hurts() {
        let mut state = state();
        with_boss(&mut state);
        state.boss.as_mut().unwrap().body.pos = state.player.pos;

        resolve_boss_contact(&mut state);

        assert_eq!(state.player.hp, PLAYER_MAX_HP - PLAYER_HIT_DAMAGE);
        assert_eq!(state.events, vec![GameEvent::PlayerHit]);
    }
}

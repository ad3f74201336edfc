//! Boss encounter state machine
//!
//! The boss advances through four phases as its HP drops past fixed
//! thresholds. Each phase speeds it up and widens the pool of patterns it
//! cycles through. Pattern switches happen on a timer, or early when a
//! pattern finishes its routine or a phase threshold is crossed.

pub mod pattern;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use pattern::{BossBody, Pattern, PatternKind, PatternState, Progress};

use super::bullet::Bullet;
use super::geometry::Rect;
use super::rng::RandomSource;
use crate::consts::*;

/// HP fractions at which the boss enters phases 2, 3 and 4
pub const PHASE_THRESHOLDS: [f32; 3] = [0.7, 0.4, 0.2];
pub const MAX_PHASE: u8 = 4;
/// Speed added per phase transition
pub const PHASE_SPEED_STEP: f32 = 0.5;
/// Ticks a pattern runs before a new one is picked
pub const PATTERN_DURATION: u32 = 300;
/// Timer value that makes the next switch happen within ten ticks
pub const FORCED_SWITCH_TIMER: u32 = 290;
pub const HIT_FLASH_TICKS: u32 = 5;
const BASE_SHOOT_DELAY: u32 = 30;
const MIN_SHOOT_DELAY: u32 = 15;
const SHOOT_DELAY_STEP: u32 = 4;
/// Clearance kept from the right, top and bottom edges
const EDGE_MARGIN: f32 = 20.0;

/// The boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: BossBody,
    pub hp: f32,
    pub max_hp: f32,
    pub pattern: PatternState,
    /// Ticks since the last pattern switch
    pub pattern_timer: u32,
    pub shoot_timer: u32,
    /// Ticks of damage flash left (cosmetic)
    pub hit_flash: u32,
    /// Index of the next unconsumed entry in `PHASE_THRESHOLDS`
    next_threshold: usize,
}

impl Boss {
    /// Spawn on the right side, vertically centered
    pub fn new(hp_multiplier: f32, rng: &mut impl RandomSource) -> Self {
        let max_hp = (BOSS_BASE_HP * hp_multiplier).max(1.0);
        Self {
            body: BossBody {
                pos: Vec2::new(
                    SCREEN_WIDTH - BOSS_SIZE - 50.0,
                    SCREEN_HEIGHT / 2.0 - BOSS_SIZE / 2.0,
                ),
                heading: Vec2::new(rng.sign(), rng.sign()),
                speed: BOSS_BASE_SPEED,
                phase: 1,
            },
            hp: max_hp,
            max_hp,
            pattern: PatternState::default(),
            pattern_timer: 0,
            shoot_timer: 0,
            hit_flash: 0,
            next_threshold: 0,
        }
    }

    pub fn phase(&self) -> u8 {
        self.body.phase
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn speed(&self) -> f32 {
        self.body.speed
    }

    pub fn pattern_kind(&self) -> PatternKind {
        self.pattern.kind()
    }

    pub fn size() -> Vec2 {
        Vec2::splat(BOSS_SIZE)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.body.pos, Self::size())
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= f32::EPSILON {
            return 0.0;
        }
        self.hp / self.max_hp
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0.0
    }

    /// Ticks between regular volleys; shrinks each phase
    pub fn shoot_delay(&self) -> u32 {
        let step = SHOOT_DELAY_STEP * self.phase().saturating_sub(1) as u32;
        BASE_SHOOT_DELAY.saturating_sub(step).max(MIN_SHOOT_DELAY)
    }

    /// Advance movement by one tick
    pub fn update(&mut self, rng: &mut impl RandomSource) {
        self.hit_flash = self.hit_flash.saturating_sub(1);

        self.check_phase();

        self.pattern_timer += 1;
        if self.pattern_timer > PATTERN_DURATION {
            self.switch_pattern(rng);
        }

        if self.pattern.advance(&mut self.body, rng) == Progress::Finished {
            self.force_switch();
        }

        self.clamp_to_screen();
    }

    /// Bullets fired this tick
    pub fn shoot(&mut self, rng: &mut impl RandomSource) -> Vec<Bullet> {
        self.shoot_timer += 1;
        let volley_ready = self.shoot_timer >= self.shoot_delay();
        if volley_ready {
            self.shoot_timer = 0;
        }
        self.pattern.attack(&self.body, volley_ready, rng)
    }

    /// Subtract `amount` HP. Returns true when this leaves the boss defeated.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.hp = (self.hp - amount).clamp(0.0, self.max_hp);
        self.hit_flash = HIT_FLASH_TICKS;
        self.check_phase();
        self.is_defeated()
    }

    /// Consume every threshold the current HP ratio has crossed
    fn check_phase(&mut self) {
        if self.max_hp <= f32::EPSILON {
            return;
        }
        let ratio = self.hp_ratio();
        while let Some(&threshold) = PHASE_THRESHOLDS.get(self.next_threshold) {
            if ratio > threshold {
                break;
            }
            self.next_threshold += 1;
            self.body.phase = (self.body.phase + 1).min(MAX_PHASE);
            self.body.speed += PHASE_SPEED_STEP;
            self.force_switch();
            log::info!(
                "Boss entered phase {} at {:.0}% HP (speed {:.1})",
                self.body.phase,
                ratio * 100.0,
                self.body.speed
            );
        }
    }

    /// Make the next pattern switch imminent
    fn force_switch(&mut self) {
        self.pattern_timer = self.pattern_timer.max(FORCED_SWITCH_TIMER);
    }

    fn switch_pattern(&mut self, rng: &mut impl RandomSource) {
        let kind = rng.pick(PatternKind::pool(self.phase()));
        log::debug!(
            "Boss pattern {} -> {} (phase {})",
            self.pattern.kind().as_str(),
            kind.as_str(),
            self.phase()
        );
        self.pattern = PatternState::fresh(kind);
        self.pattern_timer = 0;
    }

    fn clamp_to_screen(&mut self) {
        let min = Vec2::new(SCREEN_WIDTH / 2.0, EDGE_MARGIN);
        let max = Vec2::new(
            SCREEN_WIDTH - BOSS_SIZE - EDGE_MARGIN,
            SCREEN_HEIGHT - BOSS_SIZE - EDGE_MARGIN,
        );
        self.body.pos = self.body.pos.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SimRng;
    use proptest::prelude::*;

    fn boss() -> (Boss, SimRng) {
        let mut rng = SimRng::new(1234);
        (Boss::new(1.0, &mut rng), rng)
    }

    #[test]
    fn test_spawn_state() {
        let (boss, _) = boss();
        assert_eq!(boss.phase(), 1);
        assert_eq!(boss.hp, BOSS_BASE_HP);
        assert_eq!(boss.pattern_kind(), PatternKind::Normal);
        assert_eq!(boss.pos(), Vec2::new(670.0, 260.0));
    }

    #[test]
    fn test_big_hit_crosses_all_thresholds() {
        let (mut boss, _) = boss();
        let defeated = boss.take_damage(85.0);
        assert!(!defeated);
        assert_eq!(boss.phase(), 4);
        assert_eq!(boss.speed(), BOSS_BASE_SPEED + 3.0 * PHASE_SPEED_STEP);
        assert_eq!(boss.pattern_timer, FORCED_SWITCH_TIMER);
    }

    #[test]
    fn test_thresholds_consumed_once() {
        let (mut boss, mut rng) = boss();
        boss.take_damage(30.0);
        assert_eq!(boss.phase(), 2);
        let speed = boss.speed();

        // Same ratio on later ticks does not re-trigger
        for _ in 0..20 {
            boss.update(&mut rng);
        }
        assert_eq!(boss.phase(), 2);
        assert_eq!(boss.speed(), speed);

        boss.take_damage(1.0);
        assert_eq!(boss.phase(), 2);
        boss.take_damage(29.0);
        assert_eq!(boss.phase(), 3);
    }

    #[test]
    fn test_laser_silent_after_firing_window() {
        let (mut boss, mut rng) = boss();
        boss.body.phase = MAX_PHASE;
        boss.pattern = PatternState::fresh(PatternKind::Laser);
        boss.pattern_timer = 0;

        let mut shots = Vec::new();
        loop {
            boss.update(&mut rng);
            // A fresh pattern (possibly another laser) restarts the timer
            if boss.pattern_timer == 0 {
                break;
            }
            shots.push(boss.shoot(&mut rng).len());
        }

        // 90 charging ticks, 60 firing ticks, then waiting on the forced switch
        assert!(shots.len() > 150);
        assert_eq!(shots[..150].iter().sum::<usize>(), 3 + 15);
        assert_eq!(shots[150..].iter().sum::<usize>(), 0);
    }

    #[test]
    fn test_lethal_damage_reports_defeat() {
        let (mut boss, _) = boss();
        let hp = boss.hp;
        assert!(boss.take_damage(hp));
        assert_eq!(boss.hp, 0.0);
        assert_eq!(boss.hit_flash, HIT_FLASH_TICKS);
    }

    #[test]
    fn test_overkill_clamps_hp() {
        let (mut boss, _) = boss();
        assert!(boss.take_damage(1_000.0));
        assert_eq!(boss.hp, 0.0);
        assert_eq!(boss.phase(), MAX_PHASE);
    }

    #[test]
    fn test_hit_flash_decays() {
        let (mut boss, mut rng) = boss();
        boss.take_damage(1.0);
        for _ in 0..HIT_FLASH_TICKS {
            boss.update(&mut rng);
        }
        assert_eq!(boss.hit_flash, 0);
    }

    #[test]
    fn test_pattern_switches_after_duration() {
        let (mut boss, mut rng) = boss();
        for _ in 0..PATTERN_DURATION {
            boss.update(&mut rng);
        }
        assert_eq!(boss.pattern_timer, PATTERN_DURATION);
        boss.update(&mut rng);
        assert_eq!(boss.pattern_timer, 0);
        assert!(PatternKind::pool(1).contains(&boss.pattern_kind()));
    }

    #[test]
    fn test_phase_forces_switch_within_ten_ticks() {
        let (mut boss, mut rng) = boss();
        boss.take_damage(35.0);
        let mut switched_at = None;
        for t in 1..=11 {
            boss.update(&mut rng);
            if boss.pattern_timer < FORCED_SWITCH_TIMER {
                switched_at = Some(t);
                break;
            }
        }
        assert_eq!(switched_at, Some(11));
        assert!(PatternKind::pool(2).contains(&boss.pattern_kind()));
    }

    #[test]
    fn test_finished_charge_switches_instead_of_looping() {
        let (mut boss, mut rng) = boss();
        boss.pattern = PatternState::Charge(pattern::ChargeMove { move_timer: 200 });
        boss.body.pos.x = SCREEN_WIDTH - 150.0;
        boss.pattern_timer = 100;

        let mut left_charge = false;
        for _ in 0..20 {
            boss.update(&mut rng);
            if boss.pattern_timer == 0 {
                left_charge = true;
                break;
            }
        }
        assert!(left_charge);
    }

    #[test]
    fn test_shoot_delay_by_phase() {
        let (mut boss, _) = boss();
        assert_eq!(boss.shoot_delay(), 30);
        boss.body.phase = 2;
        assert_eq!(boss.shoot_delay(), 26);
        boss.body.phase = 4;
        assert_eq!(boss.shoot_delay(), 18);
    }

    #[test]
    fn test_normal_volley_cadence() {
        let (mut boss, mut rng) = boss();
        let mut volleys = 0;
        for _ in 0..90 {
            if !boss.shoot(&mut rng).is_empty() {
                volleys += 1;
            }
        }
        assert_eq!(volleys, 3);
    }

    #[test]
    fn test_hp_multiplier() {
        let mut rng = SimRng::new(1);
        let tough = Boss::new(1.5, &mut rng);
        assert_eq!(tough.max_hp, 150.0);
        assert_eq!(tough.hp, tough.max_hp);
    }

    proptest! {
        #[test]
        fn prop_hp_bounded_and_phase_monotonic(
            seed in any::<u64>(),
            hits in prop::collection::vec(0.0f32..40.0, 1..40),
        ) {
            let mut rng = SimRng::new(seed);
            let mut boss = Boss::new(1.0, &mut rng);
            let mut last_phase = boss.phase();
            let mut last_speed = boss.speed();

            for dmg in hits {
                for _ in 0..7 {
                    boss.update(&mut rng);
                    let _ = boss.shoot(&mut rng);
                }
                boss.take_damage(dmg);

                prop_assert!(boss.hp >= 0.0 && boss.hp <= boss.max_hp);
                prop_assert!(boss.phase() >= last_phase);
                prop_assert!(boss.phase() <= MAX_PHASE);
                prop_assert!(boss.speed() >= last_speed);
                last_phase = boss.phase();
                last_speed = boss.speed();
            }
        }

        #[test]
        fn prop_stays_inside_arena(seed in any::<u64>(), hp_left in 0.05f32..1.0) {
            let mut rng = SimRng::new(seed);
            let mut boss = Boss::new(1.0, &mut rng);
            boss.take_damage(boss.max_hp * (1.0 - hp_left));

            for _ in 0..1_500 {
                boss.update(&mut rng);
                let pos = boss.pos();
                prop_assert!(pos.x >= SCREEN_WIDTH / 2.0);
                prop_assert!(pos.x <= SCREEN_WIDTH - BOSS_SIZE - EDGE_MARGIN);
                prop_assert!(pos.y >= EDGE_MARGIN);
                prop_assert!(pos.y <= SCREEN_HEIGHT - BOSS_SIZE - EDGE_MARGIN);
            }
        }
    }
}

//! Boss movement and attack patterns
//!
//! Each pattern is its own type carrying only the counters it needs. The
//! boss holds exactly one `PatternState`; switching patterns replaces it
//! wholesale, so no counter survives into the next pattern.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOSS_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::bullet::{Bullet, BulletOwner};
use crate::sim::rng::RandomSource;
use crate::{direction_from_angle, polar_to_cartesian};

/// Ticks between heading changes in normal movement
pub const MOVE_DELAY: u32 = 60;

const CIRCLE_RADIUS: f32 = 100.0;
const CIRCLE_BASE_RATE: f32 = 0.02;
const CIRCLE_RATE_PER_PHASE: f32 = 0.005;

const ZIGZAG_FLIP_TICKS: u32 = 20;
const ZIGZAG_VERTICAL_SCALE: f32 = 1.5;

const CHARGE_PREPARE_TICKS: u32 = 60;
const CHARGE_RUSH_END: u32 = 90;
const CHARGE_FIRE_CHANCE: f64 = 0.3;

const SPIRAL_RATE: f32 = 0.05;

const BURST_CYCLE: u32 = 60;
const BURST_DASH_TICKS: u32 = 10;
const BURST_DASH_SCALE: f32 = 4.0;
const BURST_FIRE_TICKS: [u32; 2] = [10, 40];
/// Shorter random vectors are treated as "no dash this cycle"
const MIN_DIRECTION_LEN: f32 = 1e-3;

const LASER_CHARGE_TICKS: u32 = 90;
const LASER_FIRE_TICKS: u32 = 60;
const LASER_WARNING_EVERY: u32 = 30;
const LASER_SHOT_EVERY: u32 = 4;

fn circle_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH - 150.0, SCREEN_HEIGHT / 2.0)
}

fn spiral_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH - 200.0, SCREEN_HEIGHT / 2.0)
}

/// X past which the charge return leg counts as home
fn home_x() -> f32 {
    SCREEN_WIDTH - 150.0
}

/// Pattern tags, as exposed to renderers and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Normal,
    Circle,
    Zigzag,
    Charge,
    Spiral,
    Burst,
    Laser,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Normal => "normal",
            PatternKind::Circle => "circle",
            PatternKind::Zigzag => "zigzag",
            PatternKind::Charge => "charge",
            PatternKind::Spiral => "spiral",
            PatternKind::Burst => "burst",
            PatternKind::Laser => "laser",
        }
    }

    /// Patterns the boss may pick from in `phase`
    pub fn pool(phase: u8) -> &'static [PatternKind] {
        use PatternKind::*;
        match phase {
            0 | 1 => &[Normal, Circle, Zigzag, Charge],
            2 => &[Normal, Circle, Zigzag, Charge, Spiral],
            3 => &[Circle, Zigzag, Charge, Spiral, Burst],
            _ => &[Zigzag, Charge, Spiral, Burst, Laser],
        }
    }
}

/// The physical part of the boss that patterns steer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossBody {
    /// Top-left corner
    pub pos: Vec2,
    /// Per-axis heading, components in {-1, 0, 1}
    pub heading: Vec2,
    pub speed: f32,
    pub phase: u8,
}

impl BossBody {
    /// Speed multiplier for zigzag/charge: +20% per phase past the first
    pub fn speed_scale(&self) -> f32 {
        1.0 + 0.2 * (self.phase.saturating_sub(1)) as f32
    }

    pub fn scaled_speed(&self) -> f32 {
        self.speed * self.speed_scale()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(BOSS_SIZE / 2.0)
    }

    /// Muzzle on the left face at `fraction` of the height
    fn muzzle(&self, fraction: f32) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + BOSS_SIZE * fraction)
    }
}

/// Whether a pattern wants to keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    /// Pattern completed its routine; the boss should switch soon
    Finished,
}

/// A single movement/attack behavior
pub trait Pattern {
    /// Move the body one tick
    fn advance(&mut self, body: &mut BossBody, rng: &mut impl RandomSource) -> Progress;

    /// Bullets fired this tick. `volley_ready` is true on ticks where the
    /// boss's shoot timer elapsed; patterns with their own cadence ignore it.
    fn attack(&self, body: &BossBody, volley_ready: bool, rng: &mut impl RandomSource) -> Vec<Bullet>;
}

fn boss_bullet(pos: Vec2, vel: Vec2) -> Bullet {
    Bullet::new(pos, vel, BulletOwner::Boss)
}

/// Random wandering with a fresh heading every `MOVE_DELAY` ticks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalMove {
    pub move_timer: u32,
}

impl Pattern for NormalMove {
    fn advance(&mut self, body: &mut BossBody, rng: &mut impl RandomSource) -> Progress {
        self.move_timer += 1;
        if self.move_timer >= MOVE_DELAY {
            self.move_timer = 0;
            body.heading = Vec2::new(
                rng.range_i32(-1, 1) as f32,
                rng.range_i32(-1, 1) as f32,
            );
            // Never stand still
            if body.heading == Vec2::ZERO {
                body.heading.y = rng.sign();
            }
        }
        body.pos += body.heading * body.speed;
        Progress::Running
    }

    fn attack(&self, body: &BossBody, volley_ready: bool, _rng: &mut impl RandomSource) -> Vec<Bullet> {
        if !volley_ready {
            return Vec::new();
        }
        let vel = Vec2::new(-7.0, 0.0);
        if body.phase >= 2 {
            [0.25, 0.5, 0.75]
                .into_iter()
                .map(|f| boss_bullet(body.muzzle(f), vel))
                .collect()
        } else {
            vec![boss_bullet(body.muzzle(0.5), vel)]
        }
    }
}

/// Orbit around a fixed point, faster in later phases
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircleMove {
    pub angle: f32,
}

impl Pattern for CircleMove {
    fn advance(&mut self, body: &mut BossBody, _rng: &mut impl RandomSource) -> Progress {
        let rate = CIRCLE_BASE_RATE + CIRCLE_RATE_PER_PHASE * body.phase.saturating_sub(1) as f32;
        self.angle += rate;
        body.pos = polar_to_cartesian(circle_center(), CIRCLE_RADIUS, self.angle);
        Progress::Running
    }

    fn attack(&self, body: &BossBody, volley_ready: bool, _rng: &mut impl RandomSource) -> Vec<Bullet> {
        if !volley_ready {
            return Vec::new();
        }
        let angles: &[f32] = if body.phase >= 3 {
            &[-0.4, -0.2, 0.0, 0.2, 0.4]
        } else {
            &[-0.2, 0.0, 0.2]
        };
        angles
            .iter()
            .map(|&a| boss_bullet(body.muzzle(0.5), Vec2::new(-7.0 * a.cos(), -7.0 * a.sin())))
            .collect()
    }
}

/// Sweep a horizontal band while bouncing vertically
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZigzagMove {
    pub move_timer: u32,
}

impl Pattern for ZigzagMove {
    fn advance(&mut self, body: &mut BossBody, _rng: &mut impl RandomSource) -> Progress {
        self.move_timer += 1;
        if self.move_timer >= ZIGZAG_FLIP_TICKS {
            self.move_timer = 0;
            body.heading.y = if body.heading.y == 0.0 { 1.0 } else { -body.heading.y };
        }

        if body.pos.x > SCREEN_WIDTH - 150.0 {
            body.heading.x = -1.0;
        } else if body.pos.x < SCREEN_WIDTH - 250.0 {
            body.heading.x = 1.0;
        } else if body.heading.x == 0.0 {
            body.heading.x = -1.0;
        }

        let speed = body.scaled_speed();
        body.pos.x += body.heading.x * speed;
        body.pos.y += body.heading.y * speed * ZIGZAG_VERTICAL_SCALE;
        Progress::Running
    }

    fn attack(&self, body: &BossBody, volley_ready: bool, _rng: &mut impl RandomSource) -> Vec<Bullet> {
        if !volley_ready {
            return Vec::new();
        }
        let mut bullets = vec![
            boss_bullet(body.muzzle(0.25), Vec2::new(-6.0, -2.0)),
            boss_bullet(body.muzzle(0.75), Vec2::new(-6.0, 2.0)),
        ];
        if body.phase >= 3 {
            bullets.push(boss_bullet(body.muzzle(0.5), Vec2::new(-6.0, 0.0)));
        }
        bullets
    }
}

/// Wind up, rush left, then return home
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargeMove {
    pub move_timer: u32,
}

impl ChargeMove {
    pub fn is_rushing(&self) -> bool {
        (CHARGE_PREPARE_TICKS..CHARGE_RUSH_END).contains(&self.move_timer)
    }
}

impl Pattern for ChargeMove {
    fn advance(&mut self, body: &mut BossBody, _rng: &mut impl RandomSource) -> Progress {
        self.move_timer += 1;

        if self.move_timer < CHARGE_PREPARE_TICKS {
            body.pos.y += (self.move_timer as f32 * 0.1).sin() * 2.0;
        } else if self.move_timer < CHARGE_RUSH_END {
            body.pos.x -= body.scaled_speed() * 3.0;
        } else if body.pos.x < home_x() {
            body.pos.x += body.scaled_speed() * 2.0;
        } else {
            return Progress::Finished;
        }
        Progress::Running
    }

    fn attack(&self, body: &BossBody, _volley_ready: bool, rng: &mut impl RandomSource) -> Vec<Bullet> {
        if !self.is_rushing() || !rng.chance(CHARGE_FIRE_CHANCE) {
            return Vec::new();
        }
        let y = body.pos.y + rng.range_f32(0.0, BOSS_SIZE);
        let vel = Vec2::new(-8.0, rng.range_f32(-1.0, 1.0));
        vec![boss_bullet(Vec2::new(body.pos.x, y), vel)]
    }
}

/// Trace a breathing spiral around a fixed point
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpiralMove {
    pub angle: f32,
}

impl SpiralMove {
    pub fn radius(&self) -> f32 {
        50.0 + 30.0 * (0.2 * self.angle).sin()
    }
}

impl Pattern for SpiralMove {
    fn advance(&mut self, body: &mut BossBody, _rng: &mut impl RandomSource) -> Progress {
        self.angle += SPIRAL_RATE;
        body.pos = polar_to_cartesian(spiral_center(), self.radius(), self.angle);
        Progress::Running
    }

    fn attack(&self, body: &BossBody, volley_ready: bool, _rng: &mut impl RandomSource) -> Vec<Bullet> {
        if !volley_ready {
            return Vec::new();
        }
        let arms = body.phase.max(1);
        let step = TAU / arms as f32;
        (0..arms)
            .map(|i| {
                let dir = direction_from_angle(self.angle + step * i as f32);
                boss_bullet(body.center(), dir * 5.0)
            })
            .collect()
    }
}

/// Short dashes in random directions between bouts of wandering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurstMove {
    pub burst_timer: u32,
    /// Unit dash direction for the current cycle
    pub dash: Option<Vec2>,
    pub wander: NormalMove,
}

impl BurstMove {
    /// Tick within the current cycle that the last `advance` played
    fn cycle_tick(&self) -> u32 {
        self.burst_timer.saturating_sub(1) % BURST_CYCLE
    }

    fn pick_dash(rng: &mut impl RandomSource) -> Option<Vec2> {
        let raw = Vec2::new(rng.range_f32(-1.0, 1.0), rng.range_f32(-1.0, 1.0));
        let len = raw.length();
        if len < MIN_DIRECTION_LEN {
            return None;
        }
        Some(raw / len)
    }
}

impl Pattern for BurstMove {
    fn advance(&mut self, body: &mut BossBody, rng: &mut impl RandomSource) -> Progress {
        self.burst_timer += 1;
        let tick = self.cycle_tick();
        if tick == 0 {
            self.dash = Self::pick_dash(rng);
        }

        match self.dash {
            Some(dir) if tick < BURST_DASH_TICKS => {
                body.pos += dir * body.speed * BURST_DASH_SCALE;
            }
            _ => {
                self.wander.advance(body, rng);
            }
        }
        Progress::Running
    }

    fn attack(&self, body: &BossBody, _volley_ready: bool, _rng: &mut impl RandomSource) -> Vec<Bullet> {
        if self.burst_timer == 0 || !BURST_FIRE_TICKS.contains(&self.cycle_tick()) {
            return Vec::new();
        }
        (0..8)
            .map(|k| boss_bullet(body.center(), direction_from_angle(k as f32 * FRAC_PI_4) * 5.0))
            .collect()
    }
}

/// Line up on the center row, then hose the lane
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaserMove {
    pub charging: u32,
    pub firing: u32,
    /// Firing window closed; holds fire until the switch lands
    pub spent: bool,
}

impl Pattern for LaserMove {
    fn advance(&mut self, body: &mut BossBody, rng: &mut impl RandomSource) -> Progress {
        if self.charging < LASER_CHARGE_TICKS {
            self.charging += 1;
            let target_y = SCREEN_HEIGHT / 2.0 - BOSS_SIZE / 2.0;
            body.pos.y += (target_y - body.pos.y).clamp(-body.speed, body.speed);
            body.pos.x += (self.charging as f32 * 0.1).sin() * 1.5;
            Progress::Running
        } else if self.firing < LASER_FIRE_TICKS {
            self.firing += 1;
            body.pos += Vec2::new(rng.range_f32(-1.0, 1.0), rng.range_f32(-1.0, 1.0));
            Progress::Running
        } else {
            self.spent = true;
            Progress::Finished
        }
    }

    fn attack(&self, body: &BossBody, _volley_ready: bool, rng: &mut impl RandomSource) -> Vec<Bullet> {
        if self.spent {
            return Vec::new();
        }
        if self.firing == 0 {
            if self.charging > 0 && self.charging % LASER_WARNING_EVERY == 0 {
                return vec![boss_bullet(body.muzzle(0.5), Vec2::new(-4.0, 0.0))];
            }
            return Vec::new();
        }
        if self.firing % LASER_SHOT_EVERY == 0 {
            let vel = Vec2::new(-12.0, rng.range_f32(-0.5, 0.5));
            return vec![boss_bullet(body.muzzle(0.5), vel)];
        }
        Vec::new()
    }
}

/// The active pattern together with its private counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PatternState {
    Normal(NormalMove),
    Circle(CircleMove),
    Zigzag(ZigzagMove),
    Charge(ChargeMove),
    Spiral(SpiralMove),
    Burst(BurstMove),
    Laser(LaserMove),
}

impl Default for PatternState {
    fn default() -> Self {
        PatternState::Normal(NormalMove::default())
    }
}

impl PatternState {
    /// Fresh state for `kind`, every counter at zero
    pub fn fresh(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Normal => PatternState::Normal(NormalMove::default()),
            PatternKind::Circle => PatternState::Circle(CircleMove::default()),
            PatternKind::Zigzag => PatternState::Zigzag(ZigzagMove::default()),
            PatternKind::Charge => PatternState::Charge(ChargeMove::default()),
            PatternKind::Spiral => PatternState::Spiral(SpiralMove::default()),
            PatternKind::Burst => PatternState::Burst(BurstMove::default()),
            PatternKind::Laser => PatternState::Laser(LaserMove::default()),
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            PatternState::Normal(_) => PatternKind::Normal,
            PatternState::Circle(_) => PatternKind::Circle,
            PatternState::Zigzag(_) => PatternKind::Zigzag,
            PatternState::Charge(_) => PatternKind::Charge,
            PatternState::Spiral(_) => PatternKind::Spiral,
            PatternState::Burst(_) => PatternKind::Burst,
            PatternState::Laser(_) => PatternKind::Laser,
        }
    }

    /// Laser telegraph in progress (renderers draw the warning beam)
    pub fn is_laser_charging(&self) -> bool {
        matches!(self, PatternState::Laser(l) if l.firing == 0 && l.charging > 0)
    }
}

impl Pattern for PatternState {
    fn advance(&mut self, body: &mut BossBody, rng: &mut impl RandomSource) -> Progress {
        match self {
            PatternState::Normal(p) => p.advance(body, rng),
            PatternState::Circle(p) => p.advance(body, rng),
            PatternState::Zigzag(p) => p.advance(body, rng),
            PatternState::Charge(p) => p.advance(body, rng),
            PatternState::Spiral(p) => p.advance(body, rng),
            PatternState::Burst(p) => p.advance(body, rng),
            PatternState::Laser(p) => p.advance(body, rng),
        }
    }

    fn attack(&self, body: &BossBody, volley_ready: bool, rng: &mut impl RandomSource) -> Vec<Bullet> {
        match self {
            PatternState::Normal(p) => p.attack(body, volley_ready, rng),
            PatternState::Circle(p) => p.attack(body, volley_ready, rng),
            PatternState::Zigzag(p) => p.attack(body, volley_ready, rng),
            PatternState::Charge(p) => p.attack(body, volley_ready, rng),
            PatternState::Spiral(p) => p.attack(body, volley_ready, rng),
            PatternState::Burst(p) => p.attack(body, volley_ready, rng),
            PatternState::Laser(p) => p.attack(body, volley_ready, rng),
        }
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (collections are plain vectors in spawn order)
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod player;
pub mod powerup;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use boss::{Boss, PatternKind, PatternState};
pub use bullet::{Bullet, BulletOwner};
pub use collision::BulletHit;
pub use enemy::{Enemy, EnemyMotion};
pub use geometry::{Circle, Rect};
pub use player::{DamageOutcome, Player};
pub use powerup::{PowerUp, PowerUpKind};
pub use rng::{RandomSource, SimRng};
pub use snapshot::RenderSnapshot;
pub use state::{GameEvent, GameState, SessionPhase};
pub use tick::{TickInput, tick};

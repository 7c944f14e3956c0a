//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for enemies, creation order for bullets)
//! - No rendering, audio or platform dependencies (sound cues are emitted as events)

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod mask;
pub mod phase;
pub mod progression;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Kill, enemies_vs_bullets, hero_vs_enemies, hero_vs_supplies};
pub use entity::{
    Background, Bullet, BulletTier, Enemy, EnemyClass, EnemyState, Hero, HeroState, Plane,
    Supply, SupplyKind,
};
pub use geometry::Rect;
pub use mask::{CollisionMask, MaskAtlas, MaskKey};
pub use phase::{Animation, Frame, FrameSet, Phase, PhaseStep};
pub use progression::{Scoreboard, spawn_wave, spawn_waves_up_to};
pub use scheduler::{Scheduler, TimerEvent};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, tick};

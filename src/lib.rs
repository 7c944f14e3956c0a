//! Sky Strike - a vertical scrolling shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, timers, session state)
//! - `renderer`: Draw-list collection and the renderer seam
//! - `audio`: Sound cues and the audio backend seam
//! - `platform`: Input sources and frame pacing
//! - `record`: Best score persistence
//! - `settings`: Game configuration, built once at startup

pub mod audio;
pub mod game;
pub mod hud;
pub mod platform;
pub mod record;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use record::{BestScoreStore, FileRecordStore, MemoryRecordStore};
pub use settings::Settings;

/// Default tuning values. `Settings::default()` is built from these.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Ticks between two animation frame advances
    pub const FRAME_INTERVAL: u32 = 10;

    /// Viewport dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 480;
    pub const SCREEN_HEIGHT: i32 = 700;

    /// Hero defaults
    pub const HERO_HP: i32 = 1000;
    pub const HERO_SPEED: i32 = 5;
    pub const HERO_BOMB_COUNT: u32 = 3;
    /// Distance from the viewport bottom to the hero's spawn midbottom
    pub const HERO_SPAWN_BOTTOM_MARGIN: i32 = 90;

    /// Bullet defaults (negative speed moves up)
    pub const BULLET_SPEED: i32 = -12;
    pub const BULLET_DAMAGE: i32 = 1;
    /// Rows per volley and vertical spacing between rows
    pub const VOLLEY_ROWS: u32 = 3;
    pub const VOLLEY_ROW_SPACING: i32 = 15;
    /// Horizontal offset of the twin bullets in the enhanced tier
    pub const ENHANCED_SPREAD: i32 = 20;

    /// Supply fall speed
    pub const SUPPLY_SPEED: i32 = 5;

    /// Timer periods (milliseconds)
    pub const HERO_FIRE_PERIOD_MS: u64 = 200;
    pub const HERO_INVINCIBLE_MS: u64 = 3000;
    pub const SUPPLY_THROW_PERIOD_MS: u64 = 10_000;
    pub const BULLET_ENHANCE_MS: u64 = 8000;

    /// Scoring
    pub const STARTING_LIVES: u32 = 3;
    pub const REWARD_SCORE: u64 = 100_000;
    pub const LEVEL2_SCORE: u64 = 10_000;
    pub const LEVEL3_SCORE: u64 = 50_000;

    /// Highest difficulty tier
    pub const MAX_LEVEL: u8 = 3;
}

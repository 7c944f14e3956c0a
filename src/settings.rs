//! Game configuration
//!
//! Built once at startup and handed to the simulation by reference. Every
//! field has a default, so a partial JSON file only overrides what it names.

use std::path::Path;

use anyhow::Context;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::entity::EnemyClass;
use crate::sim::geometry::Rect;

/// Hero tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroTuning {
    pub hp: i32,
    pub speed: i32,
    pub bomb_count: u32,
    /// Distance from the viewport bottom to the spawn midbottom
    pub spawn_bottom_margin: i32,
    pub normal_frames: u8,
    pub destroy_frames: u8,
    pub size: IVec2,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            hp: HERO_HP,
            speed: HERO_SPEED,
            bomb_count: HERO_BOMB_COUNT,
            spawn_bottom_margin: HERO_SPAWN_BOTTOM_MARGIN,
            normal_frames: 2,
            destroy_frames: 4,
            size: IVec2::new(102, 126),
        }
    }
}

/// Bullet and volley tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub speed: i32,
    pub damage: i32,
    pub volley_rows: u32,
    pub row_spacing: i32,
    pub enhanced_spread: i32,
    pub size: IVec2,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            damage: BULLET_DAMAGE,
            volley_rows: VOLLEY_ROWS,
            row_spacing: VOLLEY_ROW_SPACING,
            enhanced_spread: ENHANCED_SPREAD,
            size: IVec2::new(5, 11),
        }
    }
}

/// Supply tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyTuning {
    pub speed: i32,
    pub bomb_size: IVec2,
    pub enhance_size: IVec2,
}

impl Default for SupplyTuning {
    fn default() -> Self {
        Self {
            speed: SUPPLY_SPEED,
            bomb_size: IVec2::new(60, 107),
            enhance_size: IVec2::new(58, 88),
        }
    }
}

/// Per-class enemy stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub hp: i32,
    /// Score awarded on kill
    pub value: u64,
    pub normal_frames: u8,
    pub destroy_frames: u8,
    pub size: IVec2,
}

/// Stats for all three enemy classes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    pub small: EnemyTuning,
    pub medium: EnemyTuning,
    pub large: EnemyTuning,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            small: EnemyTuning {
                hp: 1,
                value: 1000,
                normal_frames: 1,
                destroy_frames: 4,
                size: IVec2::new(57, 43),
            },
            medium: EnemyTuning {
                hp: 6,
                value: 6000,
                normal_frames: 1,
                destroy_frames: 4,
                size: IVec2::new(69, 99),
            },
            large: EnemyTuning {
                hp: 15,
                value: 15_000,
                normal_frames: 2,
                destroy_frames: 6,
                size: IVec2::new(169, 258),
            },
        }
    }
}

impl EnemyRoster {
    pub fn get(&self, class: EnemyClass) -> &EnemyTuning {
        match class {
            EnemyClass::Small => &self.small,
            EnemyClass::Medium => &self.medium,
            EnemyClass::Large => &self.large,
        }
    }
}

/// Timer periods in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerTuning {
    pub hero_fire_ms: u64,
    pub hero_invincible_ms: u64,
    pub supply_throw_ms: u64,
    pub bullet_enhance_ms: u64,
}

impl Default for TimerTuning {
    fn default() -> Self {
        Self {
            hero_fire_ms: HERO_FIRE_PERIOD_MS,
            hero_invincible_ms: HERO_INVINCIBLE_MS,
            supply_throw_ms: SUPPLY_THROW_PERIOD_MS,
            bullet_enhance_ms: BULLET_ENHANCE_MS,
        }
    }
}

/// Score thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub starting_lives: u32,
    /// A bonus life is granted every time the score crosses a multiple of this
    pub reward_score: u64,
    pub level2_score: u64,
    pub level3_score: u64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            reward_score: REWARD_SCORE,
            level2_score: LEVEL2_SCORE,
            level3_score: LEVEL3_SCORE,
        }
    }
}

/// Raise the max speed of every live enemy of `class`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedBoost {
    pub class: EnemyClass,
    pub max_speed: i32,
}

/// A batch of identical enemies added by a wave
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveGroup {
    pub class: EnemyClass,
    pub count: usize,
    pub max_speed: i32,
}

/// Enemies added when the session reaches `level`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    pub level: u8,
    /// Live enemy count required before this wave may spawn
    pub expected_alive: usize,
    pub boosts: Vec<SpeedBoost>,
    pub groups: Vec<WaveGroup>,
}

impl Wave {
    /// Live enemy count once this wave has spawned
    pub fn alive_after(&self) -> usize {
        self.expected_alive + self.groups.iter().map(|g| g.count).sum::<usize>()
    }
}

fn default_waves() -> Vec<Wave> {
    use EnemyClass::*;
    vec![
        Wave {
            level: 1,
            expected_alive: 0,
            boosts: vec![],
            groups: vec![WaveGroup { class: Small, count: 16, max_speed: 3 }],
        },
        Wave {
            level: 2,
            expected_alive: 16,
            boosts: vec![SpeedBoost { class: Small, max_speed: 5 }],
            groups: vec![
                WaveGroup { class: Small, count: 8, max_speed: 5 },
                WaveGroup { class: Medium, count: 2, max_speed: 1 },
            ],
        },
        Wave {
            level: 3,
            expected_alive: 26,
            boosts: vec![
                SpeedBoost { class: Small, max_speed: 7 },
                SpeedBoost { class: Medium, max_speed: 3 },
            ],
            groups: vec![
                WaveGroup { class: Small, count: 8, max_speed: 7 },
                WaveGroup { class: Medium, count: 2, max_speed: 3 },
                WaveGroup { class: Large, count: 2, max_speed: 1 },
            ],
        },
    ]
}

/// Audio volumes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.2,
            muted: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width and height
    pub viewport: IVec2,
    pub tick_rate_hz: u32,
    /// Ticks between animation frame advances
    pub frame_interval: u32,
    pub background_size: IVec2,
    pub hero: HeroTuning,
    pub bullets: BulletTuning,
    pub supply: SupplyTuning,
    pub enemies: EnemyRoster,
    pub timers: TimerTuning,
    pub scoring: ScoringRules,
    pub waves: Vec<Wave>,
    pub audio: AudioSettings,
    /// Best score record file
    pub record_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport: IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            tick_rate_hz: TICK_RATE_HZ,
            frame_interval: FRAME_INTERVAL,
            background_size: IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            hero: HeroTuning::default(),
            bullets: BulletTuning::default(),
            supply: SupplyTuning::default(),
            enemies: EnemyRoster::default(),
            timers: TimerTuning::default(),
            scoring: ScoringRules::default(),
            waves: default_waves(),
            audio: AudioSettings::default(),
            record_path: "record.txt".to_string(),
        }
    }
}

impl Settings {
    /// Viewport as a rectangle at the origin
    pub fn viewport_rect(&self) -> Rect {
        Rect::sized(self.viewport)
    }

    /// Simulated time per tick in microseconds
    pub fn tick_micros(&self) -> u64 {
        1_000_000 / u64::from(self.tick_rate_hz.max(1))
    }

    /// Hero spawn point (midbottom)
    pub fn hero_spawn(&self) -> IVec2 {
        IVec2::new(
            self.viewport.x / 2,
            self.viewport.y - self.hero.spawn_bottom_margin,
        )
    }

    /// The wave that brings the session to `level`
    pub fn wave_for(&self, level: u8) -> Option<&Wave> {
        self.waves.iter().find(|w| w.level == level)
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }
}

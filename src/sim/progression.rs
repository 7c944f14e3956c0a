//! Score, lives and level progression
//!
//! The level is a step function of the cumulative score. Reaching a new level
//! spawns that level's wave on top of the enemies already in play.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Enemy;
use crate::consts::MAX_LEVEL;
use crate::settings::{ScoringRules, Settings, Wave};

/// Session counters shown on the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub best_score: u64,
    pub lives: u32,
    /// 1..=3
    pub level: u8,
}

impl Scoreboard {
    pub fn new(best_score: u64, rules: &ScoringRules) -> Self {
        Self {
            score: 0,
            best_score,
            lives: rules.starting_lives,
            level: 1,
        }
    }

    /// Level for a cumulative score
    pub fn level_for(score: u64, rules: &ScoringRules) -> u8 {
        if score < rules.level2_score {
            1
        } else if score < rules.level3_score {
            2
        } else {
            MAX_LEVEL
        }
    }

    /// Add `delta` to the score. Grants one life per reward multiple crossed,
    /// refreshes the best score and the level. Returns whether the level
    /// changed.
    pub fn increase_score(&mut self, delta: u64, rules: &ScoringRules) -> bool {
        let score = self.score.saturating_add(delta);

        if rules.reward_score > 0 {
            let crossed = score / rules.reward_score - self.score / rules.reward_score;
            if crossed > 0 {
                self.lives = self.lives.saturating_add(crossed as u32);
                log::info!("Bonus life! Lives: {}", self.lives);
            }
        }

        self.score = score;
        self.best_score = self.best_score.max(score);

        let level = Self::level_for(score, rules);
        let upgraded = level != self.level;
        self.level = level;
        upgraded
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// New session: score and lives back to their starting values
    pub fn reset(&mut self, rules: &ScoringRules) {
        self.score = 0;
        self.lives = rules.starting_lives;
        self.increase_score(0, rules);
    }
}

/// Add `wave` on top of the live enemies.
///
/// The live count must match the wave's expected pre-upgrade count; a
/// mismatch means a wave was already spawned or skipped. That is a logic
/// error: it asserts in debug builds and is skipped in release builds.
pub fn spawn_wave<R: Rng + ?Sized>(
    enemies: &mut Vec<Enemy>,
    wave: &Wave,
    settings: &Settings,
    rng: &mut R,
) -> bool {
    if enemies.len() != wave.expected_alive {
        debug_assert!(
            false,
            "level {} wave expects {} enemies, found {}",
            wave.level,
            wave.expected_alive,
            enemies.len()
        );
        log::warn!(
            "Skipping level {} wave: expected {} enemies, found {}",
            wave.level,
            wave.expected_alive,
            enemies.len()
        );
        return false;
    }

    for boost in &wave.boosts {
        for enemy in enemies.iter_mut().filter(|e| e.class() == boost.class) {
            enemy.kind.max_speed = boost.max_speed;
        }
    }

    for group in &wave.groups {
        for _ in 0..group.count {
            enemies.push(Enemy::spawn(group.class, group.max_speed, settings, rng));
        }
    }

    log::info!("Level {} wave: {} enemies in play", wave.level, enemies.len());
    true
}

/// Spawn every wave between `from_level` (exclusive) and `to_level`
/// (inclusive), so a score jump across two breakpoints spawns both waves.
/// Returns how many waves spawned.
pub fn spawn_waves_up_to<R: Rng + ?Sized>(
    enemies: &mut Vec<Enemy>,
    from_level: u8,
    to_level: u8,
    settings: &Settings,
    rng: &mut R,
) -> usize {
    let mut spawned = 0;
    for level in from_level.saturating_add(1)..=to_level {
        if let Some(wave) = settings.wave_for(level) {
            if spawn_wave(enemies, wave, settings, rng) {
                spawned += 1;
            }
        }
    }
    spawned
}

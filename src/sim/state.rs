//! Game state and session lifecycle
//!
//! The simulation owns every entity; renderers only borrow the state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Background, Enemy, Hero, Supply, SupplyKind};
use super::mask::MaskAtlas;
use super::progression::{Scoreboard, spawn_waves_up_to};
use super::scheduler::{Scheduler, TimerEvent};
use crate::audio::SoundEffect;
use crate::settings::Settings;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// No session running (initial state, and after the last life)
    GameOver,
}

/// Things that happened during a tick, for the audio and HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Background music should pause (true) or resume (false)
    MusicPaused(bool),
    SessionStarted,
    LevelUp { level: u8 },
    HeroDied { lives_left: u32 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub scoreboard: Scoreboard,
    pub hero: Hero,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    pub supplies: Vec<Supply>,
    pub backgrounds: [Background; 2],
    pub scheduler: Scheduler,
    pub masks: MaskAtlas,
    /// Cycles through 0..frame_interval; animation steps on 0
    pub frame_counter: u32,
    /// Ticks spent in the Playing phase
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build the world in the GameOver phase, waiting for the start input
    pub fn new(seed: u64, settings: Settings, best_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let hero = Hero::new(&settings);
        let mut enemies = Vec::new();
        spawn_waves_up_to(&mut enemies, 0, 1, &settings, &mut rng);
        let supplies = vec![
            Supply::new(SupplyKind::Bomb, &settings),
            Supply::new(SupplyKind::BulletEnhance, &settings),
        ];
        let backgrounds = [
            Background::new(settings.background_size, false),
            Background::new(settings.background_size, true),
        ];

        let mut scheduler = Scheduler::new();
        scheduler.arm_periodic(TimerEvent::HeroFire, settings.timers.hero_fire_ms);
        scheduler.arm_periodic(TimerEvent::ThrowSupply, settings.timers.supply_throw_ms);

        Self {
            scoreboard: Scoreboard::new(best_score, &settings.scoring),
            masks: MaskAtlas::from_settings(&settings),
            seed,
            rng,
            phase: GamePhase::GameOver,
            hero,
            enemies,
            supplies,
            backgrounds,
            scheduler,
            frame_counter: 0,
            time_ticks: 0,
            events: Vec::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start a fresh session: score and lives reset, hero healed and back at
    /// its spawn point, enemies respawned from the first wave, bullets and
    /// supplies cleared.
    pub fn reset(&mut self) {
        let settings = &self.settings;
        self.phase = GamePhase::Playing;
        self.scoreboard.reset(&settings.scoring);
        self.hero.revive(settings);
        self.scheduler.cancel(TimerEvent::BulletEnhanceOff);
        self.scheduler.cancel(TimerEvent::HeroInvincibilityOff);

        let viewport = settings.viewport_rect();
        for supply in &mut self.supplies {
            supply.park(&viewport);
        }

        self.enemies.clear();
        spawn_waves_up_to(&mut self.enemies, 0, 1, settings, &mut self.rng);
        self.frame_counter = 0;

        log::info!("New session started (best score {})", self.scoreboard.best_score);
        self.emit(GameEvent::SessionStarted);
    }

    /// Add score; a level change spawns the new level's waves. Returns
    /// whether the level changed.
    pub fn award(&mut self, delta: u64) -> bool {
        let from = self.scoreboard.level;
        if !self.scoreboard.increase_score(delta, &self.settings.scoring) {
            return false;
        }
        let to = self.scoreboard.level;
        log::info!("Level {from} -> {to} at score {}", self.scoreboard.score);
        self.emit(GameEvent::LevelUp { level: to });
        spawn_waves_up_to(&mut self.enemies, from, to, &self.settings, &mut self.rng);
        true
    }

    /// Hero finished its destroy sequence: reset it, raise hero-dead and
    /// start the invincibility window
    pub(crate) fn on_hero_destroyed(&mut self) {
        self.hero.reset_after_death(&self.settings);
        self.scheduler.post(TimerEvent::HeroDead);
        self.scheduler.arm_once(
            TimerEvent::HeroInvincibilityOff,
            self.settings.timers.hero_invincible_ms,
        );
        log::debug!("Hero reset, invincible for {} ms", self.settings.timers.hero_invincible_ms);
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_for_start() {
        let state = GameState::new(42, Settings::default(), 1234);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.enemies.len(), 16);
        assert_eq!(state.supplies.len(), 2);
        assert_eq!(state.scoreboard.best_score, 1234);
        assert!(state.scheduler.is_armed(TimerEvent::HeroFire));
        assert!(state.scheduler.is_armed(TimerEvent::ThrowSupply));
    }

    #[test]
    fn test_reset_restores_session() {
        let mut state = GameState::new(42, Settings::default(), 0);
        state.reset();
        state.award(20_000);
        assert_eq!(state.enemies.len(), 26);
        state.hero.fire(&Settings::default());
        state.hero.kind.bomb_count = 0;
        state.scoreboard.lives = 0;

        state.reset();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.scoreboard.score, 0);
        assert_eq!(state.scoreboard.lives, 3);
        assert_eq!(state.scoreboard.level, 1);
        assert_eq!(state.scoreboard.best_score, 20_000);
        assert_eq!(state.enemies.len(), 16);
        assert!(state.hero.kind.bullets.is_empty());
        assert_eq!(state.hero.kind.bomb_count, 3);
        assert_eq!(state.hero.rect.bottom(), 610);
    }

    #[test]
    fn test_award_level_up_events() {
        let mut state = GameState::new(42, Settings::default(), 0);
        state.take_events();
        assert!(state.award(10_000));
        let events = state.take_events();
        assert_eq!(events, vec![GameEvent::LevelUp { level: 2 }]);
        assert!(!state.award(1_000));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::new(7, Settings::default(), 0);
        let b = GameState::new(7, Settings::default(), 0);
        let pos_a: Vec<_> = a.enemies.iter().map(|e| (e.rect.pos, e.speed)).collect();
        let pos_b: Vec<_> = b.enemies.iter().map(|e| (e.rect.pos, e.speed)).collect();
        assert_eq!(pos_a, pos_b);
    }
}

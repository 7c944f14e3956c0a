//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame, in this order: lives check,
//! quit/pause input, timer drain, bomb input, collisions, animation and
//! movement. Rendering happens after the tick returns.

use glam::IVec2;
use rand::Rng;

use super::collision::{enemies_vs_bullets, hero_vs_enemies, hero_vs_supplies};
use super::entity::{BulletTier, SupplyKind};
use super::phase::PhaseStep;
use super::scheduler::TimerEvent;
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Leave the game
    pub quit: bool,
    /// Pause/continue toggle; starts a new session from GameOver
    pub pause: bool,
    /// Detonate a bomb
    pub bomb: bool,
    /// -1 left, 0 none, 1 right
    pub horizontal: i32,
    /// -1 up, 0 none, 1 down
    pub vertical: i32,
}

impl TickInput {
    pub fn axis(&self) -> IVec2 {
        IVec2::new(self.horizontal.signum(), self.vertical.signum())
    }
}

/// Whether the loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    // Out of lives ends the session before anything else this tick
    if state.phase != GamePhase::GameOver && state.scoreboard.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over with {} points (best {})",
            state.scoreboard.score,
            state.scoreboard.best_score
        );
        let score = state.scoreboard.score;
        state.emit(GameEvent::GameOver { score });
    }

    if input.quit {
        return TickOutcome::Quit;
    }

    if input.pause {
        match state.phase {
            GamePhase::GameOver => {
                state.reset();
                return TickOutcome::Continue;
            }
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.emit(GameEvent::MusicPaused(true));
                log::debug!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.emit(GameEvent::MusicPaused(false));
                log::debug!("Resumed");
            }
        }
    }

    // The scheduler clock is frozen outside of Playing
    if state.phase != GamePhase::Playing {
        return TickOutcome::Continue;
    }

    state.time_ticks += 1;
    let dt = state.settings.tick_micros();
    state.scheduler.advance(dt);
    for event in state.scheduler.drain() {
        apply_timer_event(state, event);
    }

    if input.bomb {
        detonate_bomb(state);
    }

    resolve_collisions(state);

    let interval = state.settings.frame_interval.max(1);
    state.frame_counter = (state.frame_counter + 1) % interval;
    let animate = state.frame_counter == 0;
    update_entities(state, animate, input.axis());

    TickOutcome::Continue
}

/// Apply one drained timer trigger
pub fn apply_timer_event(state: &mut GameState, event: TimerEvent) {
    match event {
        TimerEvent::HeroFire => {
            // No volleys while the hero plays its destroy sequence
            if state.hero.is_alive() {
                state.hero.fire(&state.settings);
                state.play(SoundEffect::Bullet);
            }
        }
        TimerEvent::HeroInvincibilityOff => {
            state.hero.kind.invincible = false;
            log::debug!("Hero invincibility off");
        }
        TimerEvent::ThrowSupply => throw_supply(state),
        TimerEvent::BulletEnhanceOff => {
            state.hero.kind.bullet_tier = BulletTier::Normal;
        }
        TimerEvent::HeroDead => {
            state.scoreboard.lose_life();
            let lives_left = state.scoreboard.lives;
            log::debug!("Hero lost a life, {lives_left} left");
            state.emit(GameEvent::HeroDied { lives_left });
        }
    }
}

/// Throw a random parked supply; no-op when none is parked
fn throw_supply(state: &mut GameState) {
    let viewport = state.settings.viewport_rect();
    let parked: Vec<usize> = state
        .supplies
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_parked(&viewport))
        .map(|(i, _)| i)
        .collect();
    if parked.is_empty() {
        return;
    }
    let pick = parked[state.rng.random_range(0..parked.len())];
    state.supplies[pick].throw(&viewport, &mut state.rng);
    log::debug!("Threw {:?} supply", state.supplies[pick].kind);
    state.play(SoundEffect::Supply);
}

/// Detonate a bomb if the hero is alive and has one. Returns the score
/// awarded.
pub fn detonate_bomb(state: &mut GameState) -> u64 {
    if !state.hero.is_alive() || state.hero.kind.bomb_count == 0 {
        return 0;
    }
    state.play(SoundEffect::UseBomb);
    let (score, count) = state.hero.blowup(&mut state.enemies);
    if count > 0 {
        state.award(score);
    }
    score
}

/// Run the three collision passes in their fixed order and apply outcomes
pub fn resolve_collisions(state: &mut GameState) {
    // 1. Hero vs enemies
    if hero_vs_enemies(&mut state.hero, &mut state.enemies, &state.masks) > 0 {
        let cue = state.hero.death_sound();
        state.play(cue);
        log::debug!("Hero crashed");
    }

    // 2. Enemies vs bullets
    let kills = enemies_vs_bullets(&mut state.enemies, &mut state.hero.kind.bullets, &state.masks);
    for kill in kills {
        if state.award(kill.value) {
            state.play(SoundEffect::Upgrade);
        }
        let cue = state.enemies[kill.index].death_sound();
        state.play(cue);
    }

    // 3. Hero vs supplies
    let viewport = state.settings.viewport_rect();
    if let Some(kind) = hero_vs_supplies(&state.hero, &mut state.supplies, &state.masks, &viewport)
    {
        state.play(kind.pickup_sound());
        match kind {
            SupplyKind::Bomb => state.hero.kind.bomb_count += 1,
            SupplyKind::BulletEnhance => {
                state.hero.kind.bullet_tier = BulletTier::Enhanced;
                state
                    .scheduler
                    .arm_once(TimerEvent::BulletEnhanceOff, state.settings.timers.bullet_enhance_ms);
            }
        }
    }
}

/// Animate (on frame ticks) and move every entity
fn update_entities(state: &mut GameState, animate: bool, axis: IVec2) {
    let viewport = state.settings.viewport_rect();

    for bg in &mut state.backgrounds {
        bg.step();
    }

    for enemy in &mut state.enemies {
        if animate && enemy.animate() == PhaseStep::Finished {
            enemy.respawn(&viewport, &mut state.rng);
        }
        enemy.step(&viewport, &mut state.rng);
    }

    if animate && state.hero.animate() == PhaseStep::Finished {
        state.on_hero_destroyed();
    }
    state.hero.steer(axis, &viewport);

    for supply in &mut state.supplies {
        supply.step(&viewport);
    }

    state.hero.step_bullets();
}

//! Platform abstraction layer
//!
//! Handles what sits between the machine and the simulation:
//! - Input sources (scripted, autopilot)
//! - Frame pacing

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::sim::{GamePhase, GameState, TickInput};

/// Produces one input snapshot per tick
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Replays a fixed list of inputs, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.inputs.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}

/// Simple autopilot for headless runs: starts a session, lines up under the
/// closest on-screen enemy, keeps clear of anything about to ram it and
/// bombs when the screen gets crowded. Quits after `max_ticks`.
#[derive(Debug, Clone)]
pub struct DemoPilot {
    pub max_ticks: u64,
    /// On-screen enemy count that triggers a bomb
    pub crowd: usize,
    ticks: u64,
    sessions: u32,
    pub max_sessions: u32,
}

impl DemoPilot {
    pub fn new(max_ticks: u64) -> Self {
        Self {
            max_ticks,
            crowd: 8,
            ticks: 0,
            sessions: 0,
            max_sessions: 1,
        }
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}

impl InputSource for DemoPilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        self.ticks += 1;
        if self.ticks > self.max_ticks {
            return TickInput {
                quit: true,
                ..Default::default()
            };
        }

        if state.phase != GamePhase::Playing {
            if state.phase == GamePhase::GameOver && self.sessions >= self.max_sessions {
                return TickInput {
                    quit: true,
                    ..Default::default()
                };
            }
            if state.phase == GamePhase::GameOver {
                self.sessions += 1;
            }
            return TickInput {
                pause: true,
                ..Default::default()
            };
        }

        let viewport = state.settings().viewport_rect();
        let hero = &state.hero.rect;
        let on_screen: Vec<_> = state
            .enemies
            .iter()
            .filter(|e| e.is_alive() && e.rect.bottom() > 0 && e.rect.top() < viewport.bottom())
            .collect();

        let mut input = TickInput {
            bomb: on_screen.len() >= self.crowd,
            ..Default::default()
        };

        // Dodge sideways from anything close above
        let threat = on_screen.iter().find(|e| {
            e.rect.bottom() > hero.top() - 80
                && e.rect.left() < hero.right()
                && e.rect.right() > hero.left()
        });
        if let Some(threat) = threat {
            input.horizontal = if threat.rect.center_x() >= hero.center_x() {
                -1
            } else {
                1
            };
            return input;
        }

        let target = on_screen
            .iter()
            .filter(|e| e.rect.bottom() < hero.top())
            .max_by_key(|e| e.rect.bottom());
        if let Some(target) = target {
            input.horizontal = (target.rect.center_x() - hero.center_x()).signum();
        }
        input
    }
}

/// Sleeps so that ticks run at a fixed rate
#[derive(Debug)]
pub struct FrameLimiter {
    period: Duration,
    next: Instant,
}

impl FrameLimiter {
    pub fn new(rate_hz: u32) -> Self {
        let period = Duration::from_micros(1_000_000 / u64::from(rate_hz.max(1)));
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick is due. A late frame does not try to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

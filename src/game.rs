//! Game driver
//!
//! Owns the simulation and its collaborators. Each step ticks the state,
//! forwards the emitted events to audio and renders the frame. The best
//! score is loaded at construction and saved when the player quits.

use crate::audio::AudioManager;
use crate::platform::{FrameLimiter, InputSource};
use crate::record::BestScoreStore;
use crate::renderer::{Renderer, collect_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};

pub struct Game {
    pub state: GameState,
    audio: AudioManager,
    renderer: Box<dyn Renderer>,
    record: Box<dyn BestScoreStore>,
}

impl Game {
    /// Load the best score, build the world and start the music
    pub fn new(
        seed: u64,
        settings: Settings,
        audio: AudioManager,
        renderer: Box<dyn Renderer>,
        record: Box<dyn BestScoreStore>,
    ) -> Self {
        let best = record.load();
        let mut game = Self {
            state: GameState::new(seed, settings, best),
            audio,
            renderer,
            record,
        };
        game.audio.play_music();
        log::info!("Game ready (seed {seed}, best score {best})");
        game
    }

    /// Run one tick and present it. Returns false when the player quit.
    pub fn step(&mut self, input: &TickInput) -> bool {
        let outcome = tick(&mut self.state, input);

        for event in self.state.take_events() {
            match event {
                GameEvent::Sound(effect) => self.audio.play(effect),
                GameEvent::MusicPaused(paused) => self.audio.pause_music(paused),
                GameEvent::SessionStarted
                | GameEvent::GameOver { .. }
                | GameEvent::LevelUp { .. }
                | GameEvent::HeroDied { .. } => {}
            }
        }

        if outcome == TickOutcome::Quit {
            self.save_best_score();
            return false;
        }

        let frame = collect_frame(&self.state);
        if let Err(e) = self.renderer.draw(&frame) {
            log::warn!("Render error: {e:#}");
        }
        true
    }

    /// Drive the game from `input` until it quits. With a limiter the loop
    /// runs in real time, without one as fast as possible.
    pub fn run(&mut self, input: &mut dyn InputSource, mut limiter: Option<FrameLimiter>) {
        loop {
            let snapshot = input.poll(&self.state);
            if !self.step(&snapshot) {
                break;
            }
            if let Some(limiter) = limiter.as_mut() {
                limiter.wait();
            }
        }
        log::info!(
            "Stopped after {} ticks: score {}, best {}",
            self.state.time_ticks,
            self.state.scoreboard.score,
            self.state.scoreboard.best_score
        );
    }

    fn save_best_score(&mut self) {
        let best = self.state.scoreboard.best_score;
        if let Err(e) = self.record.save(best) {
            log::warn!("Could not save best score: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, SoundEffect};
    use crate::record::MemoryRecordStore;
    use crate::renderer::{DrawCommand, NullRenderer};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl AudioBackend for Log {
        fn play_sound(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.borrow_mut().push(effect.file_name().to_string());
        }
        fn play_music(&mut self, looped: bool, _volume: f32) {
            self.0.borrow_mut().push(format!("music loop={looped}"));
        }
        fn pause_music(&mut self, paused: bool) {
            self.0.borrow_mut().push(format!("music paused={paused}"));
        }
    }

    struct SharedRecord(Rc<RefCell<MemoryRecordStore>>);

    impl BestScoreStore for SharedRecord {
        fn load(&self) -> u64 {
            self.0.borrow().load()
        }
        fn save(&mut self, score: u64) -> anyhow::Result<()> {
            self.0.borrow_mut().save(score)
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn draw(&mut self, _frame: &[DrawCommand]) -> anyhow::Result<()> {
            anyhow::bail!("surface lost")
        }
    }

    fn pause() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    fn game_with(log: &Log, record: &Rc<RefCell<MemoryRecordStore>>) -> Game {
        let settings = Settings::default();
        let audio = AudioManager::new(Box::new(log.clone()), &settings.audio);
        Game::new(
            9,
            settings,
            audio,
            Box::new(NullRenderer::default()),
            Box::new(SharedRecord(Rc::clone(record))),
        )
    }

    #[test]
    fn test_music_and_pause_forwarded() {
        let log = Log::default();
        let record = Rc::new(RefCell::new(MemoryRecordStore::default()));
        let mut game = game_with(&log, &record);
        assert_eq!(log.0.borrow()[0], "music loop=true");

        assert!(game.step(&pause()));
        assert!(game.step(&pause()));
        assert!(log.0.borrow().contains(&"music paused=true".to_string()));
    }

    #[test]
    fn test_quit_saves_best_score() {
        let log = Log::default();
        let record = Rc::new(RefCell::new(MemoryRecordStore {
            score: Some(777),
            saves: 0,
        }));
        let mut game = game_with(&log, &record);
        assert_eq!(game.state.scoreboard.best_score, 777);

        game.step(&pause());
        game.state.award(1_000);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert!(!game.step(&quit));
        assert_eq!(record.borrow().score, Some(1_000));
    }

    #[test]
    fn test_game_over_keeps_best_until_quit() {
        let log = Log::default();
        let record = Rc::new(RefCell::new(MemoryRecordStore::default()));
        let mut game = game_with(&log, &record);
        game.step(&pause());
        game.state.award(3_000);
        game.state.scoreboard.lives = 0;
        game.step(&TickInput::default());
        assert_eq!(record.borrow().saves, 0);

        // A new session keeps the best score in memory
        game.step(&pause());
        assert_eq!(game.state.scoreboard.best_score, 3_000);
        game.step(&TickInput {
            quit: true,
            ..Default::default()
        });
        assert_eq!(record.borrow().score, Some(3_000));
        assert_eq!(record.borrow().saves, 1);
    }

    #[test]
    fn test_render_error_keeps_running() {
        let settings = Settings::default();
        let audio = AudioManager::new(Box::new(Log::default()), &settings.audio);
        let mut game = Game::new(
            9,
            settings,
            audio,
            Box::new(FailingRenderer),
            Box::new(MemoryRecordStore::default()),
        );
        assert!(game.step(&pause()));
        assert!(game.step(&TickInput::default()));
    }

    #[test]
    fn test_run_until_script_ends() {
        use crate::platform::ScriptedInput;
        let log = Log::default();
        let record = Rc::new(RefCell::new(MemoryRecordStore::default()));
        let mut game = game_with(&log, &record);
        let mut script = ScriptedInput::new(
            std::iter::once(pause()).chain(std::iter::repeat_n(TickInput::default(), 30)),
        );
        game.run(&mut script, None);
        assert_eq!(game.state.time_ticks, 30);
        assert!(log.0.borrow().contains(&"bullet.wav".to_string()));
        assert_eq!(record.borrow().saves, 1);
    }
}

//! Sky Strike entry point
//!
//! Runs a headless session driven by the demo autopilot. Presentation
//! backends plug in through the `Renderer` and `AudioBackend` traits.
//!
//! Usage: sky-strike [settings.json] [seed]

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use sky_strike::audio::{AudioManager, LogAudio};
use sky_strike::platform::{DemoPilot, FrameLimiter};
use sky_strike::renderer::NullRenderer;
use sky_strike::{FileRecordStore, Game, Settings};

/// Demo length: two minutes of game time
const DEMO_TICKS: u64 = 120 * 60;

fn main() {
    env_logger::init();
    log::info!("Sky Strike starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let realtime = std::env::var_os("SKY_STRIKE_REALTIME").is_some();
    let limiter = realtime.then(|| FrameLimiter::new(settings.tick_rate_hz));

    let audio = AudioManager::new(Box::new(LogAudio), &settings.audio);
    let record = FileRecordStore::new(settings.record_path.clone());
    let mut game = Game::new(
        seed,
        settings,
        audio,
        Box::new(NullRenderer::default()),
        Box::new(record),
    );

    let mut pilot = DemoPilot::new(DEMO_TICKS);
    game.run(&mut pilot, limiter);
}

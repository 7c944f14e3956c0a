//! Audio cues and playback seam
//!
//! The simulation only names cues; a backend decides how to play them.
//! Playback is fire-and-forget: a backend that cannot play simply drops the
//! request.

use crate::settings::AudioSettings;
use crate::sim::entity::EnemyClass;

/// Background music asset
pub const MUSIC_FILE: &str = "game_music.ogg";

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Hero volley
    Bullet,
    /// A supply was thrown
    Supply,
    /// Bomb detonated
    UseBomb,
    /// Bomb supply collected
    GetBomb,
    /// Bullet-enhance supply collected
    GetBullet,
    /// Level up
    Upgrade,
    /// Enemy destroyed
    EnemyDown(EnemyClass),
    /// Hero destroyed
    HeroDown,
}

impl SoundEffect {
    /// Asset file backing this cue
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Bullet => "bullet.wav",
            SoundEffect::Supply => "supply.wav",
            SoundEffect::UseBomb => "use_bomb.wav",
            SoundEffect::GetBomb => "get_bomb.wav",
            SoundEffect::GetBullet => "get_bullet.wav",
            SoundEffect::Upgrade => "upgrade.wav",
            SoundEffect::EnemyDown(EnemyClass::Small) => "enemy1_down.wav",
            SoundEffect::EnemyDown(EnemyClass::Medium) => "enemy2_down.wav",
            SoundEffect::EnemyDown(EnemyClass::Large) => "enemy3_down.wav",
            SoundEffect::HeroDown => "me_down.wav",
        }
    }
}

/// Playback backend
pub trait AudioBackend {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, looped: bool, volume: f32);
    fn pause_music(&mut self, paused: bool);
}

/// Backend that only logs requests
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("play {} at {volume:.2}", effect.file_name());
    }

    fn play_music(&mut self, looped: bool, volume: f32) {
        log::debug!("music {MUSIC_FILE} (loop: {looped}) at {volume:.2}");
    }

    fn pause_music(&mut self, paused: bool) {
        log::debug!("music paused: {paused}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &AudioSettings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_sound(effect, vol);
    }

    /// Start the looping background track
    pub fn play_music(&mut self) {
        let vol = self.effective_volume(self.music_volume);
        self.backend.play_music(true, vol);
    }

    pub fn pause_music(&mut self, paused: bool) {
        self.backend.pause_music(paused);
    }
}

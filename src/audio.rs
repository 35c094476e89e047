//! Audio manager
//!
//! Maps game sound cues to clip files and drives an [`AudioBackend`].
//! Clips load lazily on first use; a clip that fails to load is logged once
//! and that cue stays silent for the rest of the run.

use std::collections::HashMap;

use crate::platform::{AudioBackend, ClipHandle, VoiceId};
use crate::settings::AudioSettings;

/// Background music track
pub const MUSIC_PATH: &str = "assets/audio/bgm.ogg";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired a projectile
    Shoot,
    /// Player took damage
    Hurt,
    /// An enemy died
    EnemyDown,
    /// The player died
    PlayerDown,
}

impl SoundEffect {
    pub fn clip_path(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "assets/audio/gun.wav",
            SoundEffect::Hurt => "assets/audio/hurt.wav",
            SoundEffect::EnemyDown | SoundEffect::PlayerDown => "assets/audio/die.ogg",
        }
    }
}

/// Clip cache entry; `None` means loading failed
type Slot = Option<ClipHandle>;

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    clips: HashMap<&'static str, Slot>,
    voices: Vec<VoiceId>,
    music: Option<VoiceId>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &AudioSettings) -> Self {
        let mut manager = Self {
            backend,
            clips: HashMap::new(),
            voices: Vec::new(),
            music: None,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &AudioSettings) {
        self.set_master_volume(settings.master_volume);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music_volume();
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn sync_music_volume(&mut self) {
        if let Some(voice) = self.music {
            let level = self.music_level();
            self.backend.set_volume(voice, level);
        }
    }

    fn clip(&mut self, path: &'static str) -> Slot {
        if let Some(slot) = self.clips.get(path) {
            return *slot;
        }
        let slot = match self.backend.load_clip(path) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("Sound disabled: {}", e);
                None
            }
        };
        self.clips.insert(path, slot);
        slot
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }
        let Some(clip) = self.clip(effect.clip_path()) else {
            return;
        };
        let voice = self.backend.play(clip, vol, false);
        self.voices.push(voice);
    }

    /// Start the looping background track (restarts it if already playing)
    pub fn play_music(&mut self) {
        self.stop_music();
        let Some(clip) = self.clip(MUSIC_PATH) else {
            return;
        };
        let level = self.music_level();
        self.music = Some(self.backend.play(clip, level, true));
    }

    pub fn stop_music(&mut self) {
        if let Some(voice) = self.music.take() {
            self.backend.stop(voice);
        }
    }

    /// Forget one-shot voices that have finished. Call once per frame.
    pub fn update(&mut self) {
        let backend = &self.backend;
        self.voices.retain(|v| backend.is_playing(*v));
    }

    /// Stop every one-shot voice
    pub fn clear(&mut self) {
        for voice in self.voices.drain(..) {
            self.backend.stop(voice);
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NullAudio;

    fn manager(backend: NullAudio) -> AudioManager<NullAudio> {
        AudioManager::new(backend, &AudioSettings::default())
    }

    #[test]
    fn test_finished_voices_are_pruned() {
        let mut audio = manager(NullAudio::new());
        audio.play(SoundEffect::Shoot);
        audio.play(SoundEffect::Hurt);
        audio.update();
        assert_eq!(audio.active_voices(), 2);

        audio.backend_mut().finish_one_shots();
        audio.update();
        assert_eq!(audio.active_voices(), 0);
    }

    #[test]
    fn test_missing_clip_is_skipped_and_not_retried() {
        let backend = NullAudio::new().with_missing(SoundEffect::Shoot.clip_path());
        let mut audio = manager(backend);
        audio.play(SoundEffect::Shoot);
        audio.play(SoundEffect::Shoot);
        audio.play(SoundEffect::Hurt);

        assert_eq!(audio.backend().played.len(), 1);
        assert_eq!(audio.active_voices(), 1);
    }

    #[test]
    fn test_clips_load_once() {
        let mut audio = manager(NullAudio::new());
        audio.play(SoundEffect::EnemyDown);
        audio.play(SoundEffect::PlayerDown);
        let played = &audio.backend().played;
        assert_eq!(played.len(), 2);
        assert_eq!(played[0], played[1]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = manager(NullAudio::new());
        audio.set_muted(true);
        audio.play(SoundEffect::Shoot);
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_music_survives_pruning() {
        let mut audio = manager(NullAudio::new());
        audio.play_music();
        audio.play(SoundEffect::Shoot);
        audio.backend_mut().finish_one_shots();
        audio.update();
        assert_eq!(audio.backend().playing_count(), 1);

        audio.stop_music();
        assert_eq!(audio.backend().playing_count(), 0);
    }
}

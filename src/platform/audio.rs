//! Audio playback backend

use std::collections::{HashMap, HashSet};

use super::AssetError;

/// Opaque handle to a loaded clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u32);

/// One playing instance of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// Plays clips; knows nothing about the game's cues
pub trait AudioBackend {
    fn load_clip(&mut self, path: &str) -> Result<ClipHandle, AssetError>;
    /// Start a voice at `volume` (0..1)
    fn play(&mut self, clip: ClipHandle, volume: f32, looping: bool) -> VoiceId;
    fn is_playing(&self, voice: VoiceId) -> bool;
    fn stop(&mut self, voice: VoiceId);
    fn set_volume(&mut self, voice: VoiceId, volume: f32);
}

/// Silent backend that remembers what it was asked to do.
///
/// One-shot voices keep "playing" until [`finish_one_shots`](Self::finish_one_shots).
#[derive(Debug, Default)]
pub struct NullAudio {
    clips: HashMap<String, ClipHandle>,
    missing: HashSet<String>,
    looping: HashSet<VoiceId>,
    playing: HashSet<VoiceId>,
    next_voice: u64,
    /// Every clip started, in order
    pub played: Vec<ClipHandle>,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_owned());
        self
    }

    /// Every non-looping voice ends
    pub fn finish_one_shots(&mut self) {
        let looping = &self.looping;
        self.playing.retain(|v| looping.contains(v));
    }

    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }

    /// Handle assigned to `path`, if it was ever loaded
    pub fn clip(&self, path: &str) -> Option<ClipHandle> {
        self.clips.get(path).copied()
    }
}

impl AudioBackend for NullAudio {
    fn load_clip(&mut self, path: &str) -> Result<ClipHandle, AssetError> {
        if self.missing.contains(path) {
            return Err(AssetError::NotFound(path.to_owned()));
        }
        let next = ClipHandle(self.clips.len() as u32);
        Ok(*self.clips.entry(path.to_owned()).or_insert(next))
    }

    fn play(&mut self, clip: ClipHandle, _volume: f32, looping: bool) -> VoiceId {
        let voice = VoiceId(self.next_voice);
        self.next_voice += 1;
        self.played.push(clip);
        self.playing.insert(voice);
        if looping {
            self.looping.insert(voice);
        }
        voice
    }

    fn is_playing(&self, voice: VoiceId) -> bool {
        self.playing.contains(&voice)
    }

    fn stop(&mut self, voice: VoiceId) {
        self.playing.remove(&voice);
        self.looping.remove(&voice);
    }

    fn set_volume(&mut self, _voice: VoiceId, _volume: f32) {}
}

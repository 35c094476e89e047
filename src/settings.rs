//! Game settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;
use crate::sim::{Aabb, StepConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
        }
    }
}

impl ArenaSettings {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(Vec2::new(self.width, self.height))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

/// Balance knobs. Speeds are pixels per second, times are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub projectile_speed: f32,
    /// Invincibility window after taking a hit
    pub hit_cooldown: f32,
    /// Minimum time between shots
    pub fire_interval: f32,
    /// Surviving this long wins the run
    pub time_limit: f32,
    pub wave_interval: f32,
    pub initial_wave_size: u32,
    pub player_health: i32,
    pub enemy_health: i32,
    pub projectile_damage: i32,
    pub seed: u64,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            player_speed: 300.0,
            enemy_speed: 100.0,
            projectile_speed: 275.0,
            hit_cooldown: 0.45,
            fire_interval: 0.2,
            time_limit: 180.0,
            wave_interval: 10.0,
            initial_wave_size: 5,
            player_health: 3,
            enemy_health: 1,
            projectile_damage: 1,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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
            sfx_volume: 0.4,
            music_volume: 0.45,
            muted: false,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timestep: StepConfig,
    pub arena: ArenaSettings,
    pub gameplay: GameplaySettings,
    pub audio: AudioSettings,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys only
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

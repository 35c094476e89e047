//! Polygon Survivors - a top-down survival shooter
//!
//! Core modules:
//! - `ecs`: Entity-capability runtime (capabilities, entities, registry, groups)
//! - `sim`: Headless simulation (bodies, collision pass, events, fixed-step driver)
//! - `game`: Game content and the session state machine
//! - `platform`: Render/input/audio/clock interfaces with headless implementations
//! - `audio`: Sound cue playback over the audio backend
//! - `settings`: JSON configuration

pub mod audio;
pub mod ecs;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz)
    pub const FIXED_STEP: f32 = 0.02;
    /// Maximum fixed steps per frame before slice time is dropped
    pub const MAX_CATCH_UP_STEPS: u32 = 200;

    /// Arena dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Collider half extents at scale 1
    pub const PLAYER_HALF_EXTENT: f32 = 16.0;
    pub const ENEMY_HALF_EXTENT: f32 = 16.0;
    pub const OBSTACLE_HALF_EXTENT: f32 = 24.0;
    /// Projectiles reuse the player image at this scale
    pub const PROJECTILE_SCALE: f32 = 0.25;

    /// Avoiders hold this distance from the player
    pub const AVOID_RADIUS: f32 = 150.0;
    /// New enemies never spawn closer than this to the player on both axes
    pub const DANGER_RADIUS: f32 = 120.0;
    /// Fraction of the remaining heading change applied per second
    pub const TURN_RATE: f32 = 8.0;
}

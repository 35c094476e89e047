//! Platform abstraction layer
//!
//! The simulation only talks to the outside world through these traits:
//! - Input state polling
//! - Draw calls (images and text)
//! - Image and clip loading
//! - Audio playback
//! - Frame time
//!
//! Each trait has a headless implementation used by the binary and tests.

pub mod audio;
pub mod input;
pub mod render;
pub mod time;

pub use audio::{AudioBackend, ClipHandle, NullAudio, VoiceId};
pub use input::{Action, InputSnapshot, InputState, NullInput, ScriptedInput};
pub use render::{
    Color, DrawImage, HeadlessImages, ImageHandle, ImageSource, NullTarget, RecordingTarget,
    RenderTarget,
};
pub use time::{FrameClock, InstantClock, SystemClock};

use thiserror::Error;

/// An external asset could not be provided
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

//! Draw-call sink and image loading

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::AssetError;

/// Linear RGBA tint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Opaque handle to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Fire-and-forget draw calls
pub trait RenderTarget {
    fn draw_image(&mut self, image: ImageHandle, position: Vec2, rotation: f32, scale: Vec2, tint: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, size: u32);
}

/// Drops every draw call
#[derive(Debug, Default)]
pub struct NullTarget;

impl RenderTarget for NullTarget {
    fn draw_image(&mut self, _image: ImageHandle, _position: Vec2, _rotation: f32, _scale: Vec2, _tint: Color) {}
    fn draw_text(&mut self, _text: &str, _position: Vec2, _size: u32) {}
}

/// One recorded `draw_image` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawImage {
    pub image: ImageHandle,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub tint: Color,
}

/// Keeps every draw call for inspection
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub images: Vec<DrawImage>,
    pub texts: Vec<String>,
}

impl RecordingTarget {
    pub fn clear(&mut self) {
        self.images.clear();
        self.texts.clear();
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl RenderTarget for RecordingTarget {
    fn draw_image(&mut self, image: ImageHandle, position: Vec2, rotation: f32, scale: Vec2, tint: Color) {
        self.images.push(DrawImage {
            image,
            position,
            rotation,
            scale,
            tint,
        });
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, _size: u32) {
        self.texts.push(text.to_owned());
    }
}

/// Loads images by path
pub trait ImageSource {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, AssetError>;
}

/// Hands out handles for any path except the ones marked missing.
///
/// The same path always yields the same handle.
#[derive(Debug, Default)]
pub struct HeadlessImages {
    loaded: HashMap<String, ImageHandle>,
    missing: HashSet<String>,
}

impl HeadlessImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_owned());
        self
    }
}

impl ImageSource for HeadlessImages {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, AssetError> {
        if self.missing.contains(path) {
            return Err(AssetError::NotFound(path.to_owned()));
        }
        let next = ImageHandle(self.loaded.len() as u32);
        Ok(*self.loaded.entry(path.to_owned()).or_insert(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_images_are_stable_per_path() {
        let mut images = HeadlessImages::new().with_missing("gone.png");
        let a = images.load_image("a.png").unwrap();
        let b = images.load_image("b.png").unwrap();
        assert_ne!(a, b);
        assert_eq!(images.load_image("a.png").unwrap(), a);
        assert_eq!(
            images.load_image("gone.png"),
            Err(AssetError::NotFound("gone.png".into()))
        );
    }
}

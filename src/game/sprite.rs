//! Drawable image bound to the entity's transform

use crate::ecs::{Capability, Entity};
use crate::platform::{Color, ImageHandle, RenderTarget};
use crate::sim::Transform;

/// Image drawn at the entity's transform.
///
/// `image` is `None` when the asset failed to load; the entity keeps
/// simulating and simply draws nothing.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub image: Option<ImageHandle>,
    pub tint: Color,
    pub visible: bool,
}

impl Sprite {
    pub fn new(image: Option<ImageHandle>) -> Self {
        Self {
            image,
            tint: Color::WHITE,
            visible: true,
        }
    }
}

impl Capability for Sprite {
    fn on_attach(&mut self, owner: &mut Entity) {
        let _ = owner.get::<Transform>();
    }

    fn on_render(&self, owner: &Entity, target: &mut dyn RenderTarget) {
        let Some(image) = self.image else { return };
        if !self.visible {
            return;
        }
        let transform = owner.get::<Transform>();
        target.draw_image(
            image,
            transform.position,
            transform.rotation,
            transform.scale,
            self.tint,
        );
    }
}

//! Projectile flight

use glam::Vec2;

use crate::ecs::{Capability, Entity, StepContext};
use crate::sim::Body;

/// Straight-line shot that dies once it leaves the arena. Requires [`Body`]
/// with bounds.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub speed: f32,
    pub direction: Vec2,
    pub damage: i32,
}

impl Projectile {
    pub fn new(speed: f32, direction: Vec2, damage: i32) -> Self {
        Self {
            speed,
            direction,
            damage,
        }
    }
}

impl Capability for Projectile {
    fn on_attach(&mut self, owner: &mut Entity) {
        owner.get_mut::<Body>().velocity = self.direction * self.speed;
    }

    fn on_update(&mut self, owner: &mut Entity, _ctx: &mut StepContext<'_>) {
        if owner.get::<Body>().is_out_of_bounds() {
            owner.get_mut::<Body>().velocity = Vec2::ZERO;
            owner.destroy();
            return;
        }
        owner.get_mut::<Body>().velocity = self.direction * self.speed;
    }
}

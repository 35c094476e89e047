//! Physical capabilities shared by every simulated entity
//!
//! [`Transform`] is pure data. [`Body`] integrates velocity into the
//! transform and reports arena-edge crossings; the collision pass reads both.

use glam::Vec2;

use super::aabb::Aabb;
use crate::ecs::{Capability, Entity, StepContext};

/// Position, rotation (degrees) and draw scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Capability for Transform {}

/// Velocity-driven box collider. Requires [`Transform`].
#[derive(Debug, Clone)]
pub struct Body {
    pub velocity: Vec2,
    pub half_extent: Vec2,
    /// Arena the body should stay inside; `None` disables edge reporting
    pub bounds: Option<Aabb>,
    /// Edges crossed during the last step (see [`Aabb::exit_sides`])
    exit: Vec2,
}

impl Body {
    pub fn new(half_extent: Vec2) -> Self {
        Self {
            velocity: Vec2::ZERO,
            half_extent,
            bounds: None,
            exit: Vec2::ZERO,
        }
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// World-space box at the given transform
    pub fn aabb(&self, transform: &Transform) -> Aabb {
        Aabb::from_center(transform.position, self.half_extent * transform.scale.abs())
    }

    /// Edges crossed during the last step; zero when fully inside
    pub fn exit(&self) -> Vec2 {
        self.exit
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.exit != Vec2::ZERO
    }

    /// Move `position` back inside `bounds` on every crossed axis and zero
    /// the velocity on those axes.
    pub fn clamp_inside(&mut self, transform: &mut Transform) {
        let Some(bounds) = self.bounds else { return };
        let half = self.half_extent * transform.scale.abs();
        if self.exit.x > 0.0 {
            transform.position.x = bounds.left() + half.x;
            self.velocity.x = 0.0;
        } else if self.exit.x < 0.0 {
            transform.position.x = bounds.right() - half.x;
            self.velocity.x = 0.0;
        }
        if self.exit.y > 0.0 {
            transform.position.y = bounds.top() + half.y;
            self.velocity.y = 0.0;
        } else if self.exit.y < 0.0 {
            transform.position.y = bounds.bottom() - half.y;
            self.velocity.y = 0.0;
        }
    }
}

/// Box of an entity carrying both [`Transform`] and [`Body`]. Panics otherwise.
pub fn entity_aabb(entity: &Entity) -> Aabb {
    entity.get::<Body>().aabb(entity.get::<Transform>())
}

impl Capability for Body {
    fn on_attach(&mut self, owner: &mut Entity) {
        // Body is meaningless without a position.
        let _ = owner.get::<Transform>();
    }

    fn on_update(&mut self, owner: &mut Entity, ctx: &mut StepContext<'_>) {
        let transform = owner.get_mut::<Transform>();
        transform.position += self.velocity * ctx.dt;

        self.exit = match self.bounds {
            Some(bounds) => self.aabb(transform).exit_sides(&bounds),
            None => Vec2::ZERO,
        };
    }
}

//! Player movement and position sharing

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use crate::ecs::{Capability, Entity, StepContext};
use crate::platform::Action;
use crate::sim::{Body, Transform};

/// A position published by one entity and read by others
pub type SharedPosition = Rc<Cell<Vec2>>;

/// Keyboard movement. Requires [`Body`]; add it after the body so edge
/// crossings from this step are handled before new input is read.
#[derive(Debug, Clone)]
pub struct PlayerControl {
    pub speed: f32,
}

impl PlayerControl {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Capability for PlayerControl {
    fn on_attach(&mut self, owner: &mut Entity) {
        let _ = owner.get::<Body>();
    }

    fn on_update(&mut self, owner: &mut Entity, ctx: &mut StepContext<'_>) {
        let mut transform = *owner.get::<Transform>();
        let body = owner.get_mut::<Body>();
        if body.is_out_of_bounds() {
            body.clamp_inside(&mut transform);
        }

        body.velocity = if ctx.halted {
            Vec2::ZERO
        } else {
            let input = ctx.input;
            let axis = |neg: Action, pos: Action| {
                if input.is_held(neg) {
                    -1.0
                } else if input.is_held(pos) {
                    1.0
                } else {
                    0.0
                }
            };
            // +y is down
            Vec2::new(
                axis(Action::MoveLeft, Action::MoveRight),
                axis(Action::MoveUp, Action::MoveDown),
            ) * self.speed
        };

        *owner.get_mut::<Transform>() = transform;
    }
}

/// Publishes the owner's position every step
#[derive(Debug, Clone)]
pub struct Beacon {
    target: SharedPosition,
}

impl Beacon {
    pub fn new(target: SharedPosition) -> Self {
        Self { target }
    }
}

impl Capability for Beacon {
    fn on_attach(&mut self, owner: &mut Entity) {
        self.target.set(owner.get::<Transform>().position);
    }

    fn on_update(&mut self, owner: &mut Entity, _ctx: &mut StepContext<'_>) {
        self.target.set(owner.get::<Transform>().position);
    }
}

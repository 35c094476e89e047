//! Enemy movement AI

use glam::Vec2;

use super::control::SharedPosition;
use crate::consts::{AVOID_RADIUS, TURN_RATE};
use crate::ecs::{Capability, Entity, StepContext};
use crate::sim::{Body, Transform};

/// How an enemy moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStyle {
    /// Run straight at the target
    Chase,
    /// Hold [`AVOID_RADIUS`] from the target
    Avoid,
    /// Diagonal bounce between arena edges, ignoring the target
    PingPong,
}

/// Steers the sibling [`Body`]. Requires a body with arena bounds for
/// edge handling.
#[derive(Debug, Clone)]
pub struct EnemyControl {
    pub style: MoveStyle,
    pub speed: f32,
    target: SharedPosition,
    blocked: bool,
}

impl EnemyControl {
    pub fn new(style: MoveStyle, speed: f32, target: SharedPosition) -> Self {
        Self {
            style,
            speed,
            target,
            blocked: false,
        }
    }

    /// Stop Chase/Avoid movement until the next collision pass says otherwise
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    fn steer(&self, position: Vec2, body: &Body, transform: &Transform) -> Vec2 {
        let to_target = self.target.get() - position;
        let distance = to_target.length();
        let direction = to_target.normalize_or_zero();

        match self.style {
            MoveStyle::Chase => direction * self.speed,
            MoveStyle::Avoid => {
                if (AVOID_RADIUS - distance).abs() < 0.1 {
                    Vec2::ZERO
                } else if distance < AVOID_RADIUS {
                    -direction * self.speed
                } else {
                    direction * self.speed * 0.5
                }
            }
            MoveStyle::PingPong => {
                let mut velocity = body.velocity;
                let Some(bounds) = body.bounds else {
                    return velocity;
                };
                let aabb = body.aabb(transform);
                if aabb.left() <= bounds.left() + 0.1 {
                    velocity.x = self.speed;
                } else if aabb.right() >= bounds.right() - 0.1 {
                    velocity.x = -self.speed;
                }
                if aabb.top() <= bounds.top() + 0.1 {
                    velocity.y = self.speed;
                } else if aabb.bottom() >= bounds.bottom() - 0.1 {
                    velocity.y = -self.speed;
                }
                velocity
            }
        }
    }
}

/// Heading in degrees for a sprite whose nose points up
fn heading(direction: Vec2) -> f32 {
    let mut angle = direction.y.atan2(direction.x).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    angle + 90.0
}

impl Capability for EnemyControl {
    fn on_attach(&mut self, owner: &mut Entity) {
        let body = owner.get_mut::<Body>();
        if self.style == MoveStyle::PingPong {
            body.velocity = Vec2::splat(self.speed);
        }
    }

    fn on_update(&mut self, owner: &mut Entity, ctx: &mut StepContext<'_>) {
        let mut transform = *owner.get::<Transform>();
        let body = owner.get_mut::<Body>();

        if ctx.halted {
            body.velocity = Vec2::ZERO;
            return;
        }
        if self.style != MoveStyle::PingPong && body.is_out_of_bounds() {
            body.clamp_inside(&mut transform);
        }

        let to_target = self.target.get() - transform.position;
        if to_target != Vec2::ZERO {
            let goal = heading(to_target);
            let t = (TURN_RATE * ctx.dt).min(1.0);
            transform.rotation += (goal - transform.rotation) * t;
            if (goal - transform.rotation).abs() <= 1.0 {
                transform.rotation = goal;
            }
        }

        body.velocity = if self.blocked && self.style != MoveStyle::PingPong {
            Vec2::ZERO
        } else {
            self.steer(transform.position, body, &transform)
        };

        *owner.get_mut::<Transform>() = transform;
    }
}

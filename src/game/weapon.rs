//! Player gun

use glam::Vec2;

use super::factory::EntityFactory;
use crate::audio::SoundEffect;
use crate::ecs::{Capability, Entity, StepContext};
use crate::platform::Action;
use crate::sim::{GameEvent, Transform};

/// Fires toward the aim point while fire is held, at most once per
/// `interval`. Projectiles are spawned at the step boundary.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub interval: f32,
    cooldown: f32,
    factory: EntityFactory,
}

impl Weapon {
    pub fn new(interval: f32, factory: EntityFactory) -> Self {
        Self {
            interval,
            cooldown: 0.0,
            factory,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

impl Capability for Weapon {
    fn on_update(&mut self, owner: &mut Entity, ctx: &mut StepContext<'_>) {
        if ctx.halted {
            return;
        }
        self.cooldown = (self.cooldown - ctx.dt).max(0.0);
        if !self.is_ready() || !ctx.input.is_held(Action::Fire) {
            return;
        }

        let origin = owner.get::<Transform>().position;
        let mut direction = (ctx.input.aim() - origin).normalize_or_zero();
        if direction == Vec2::ZERO {
            direction = Vec2::NEG_Y;
        }

        let factory = self.factory;
        ctx.commands.push(move |registry| {
            factory.spawn_projectile(registry, origin, direction);
        });
        ctx.events.push(GameEvent::Sound(SoundEffect::Shoot));
        self.cooldown = self.interval;
    }
}

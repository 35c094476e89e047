//! Health and hit protection

use super::sprite::Sprite;
use crate::ecs::{Capability, Entity, StepContext};
use crate::platform::Color;

/// Result of [`Stats::hit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Dead or still protected from the last hit
    Ignored,
    /// Damage applied, still alive
    Hurt,
    /// Damage applied and health reached zero
    Fatal,
}

/// Character health.
///
/// When `protectable`, a landed hit opens an invincibility window of
/// `hit_cooldown` seconds. Tints a sibling [`Sprite`] if there is one.
#[derive(Debug, Clone)]
pub struct Stats {
    pub health: i32,
    hit_cooldown: f32,
    hit_timer: f32,
    protected: bool,
    protectable: bool,
    dead: bool,
}

impl Stats {
    pub fn new(health: i32, hit_cooldown: f32) -> Self {
        Self {
            health,
            hit_cooldown,
            hit_timer: 0.0,
            protected: false,
            protectable: true,
            dead: health <= 0,
        }
    }

    /// Every hit lands; no invincibility window
    pub fn unprotected(health: i32) -> Self {
        Self {
            protectable: false,
            ..Self::new(health, 0.0)
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn hit(&mut self, damage: i32) -> HitResult {
        if self.dead || self.protected {
            return HitResult::Ignored;
        }
        self.health -= damage;
        if self.protectable {
            self.protected = true;
            self.hit_timer = 0.0;
        }
        if self.health <= 0 {
            self.health = 0;
            self.dead = true;
            return HitResult::Fatal;
        }
        HitResult::Hurt
    }

    fn tint(&self) -> Color {
        if self.dead {
            Color::RED
        } else if self.protected {
            Color::GREEN
        } else {
            Color::WHITE
        }
    }
}

impl Capability for Stats {
    fn on_update(&mut self, owner: &mut Entity, ctx: &mut StepContext<'_>) {
        if self.protected && !self.dead {
            self.hit_timer += ctx.dt;
            if self.hit_timer >= self.hit_cooldown {
                self.hit_timer = 0.0;
                self.protected = false;
            }
        }

        if self.protectable {
            if let Some(sprite) = owner.try_get_mut::<Sprite>() {
                sprite.tint = self.tint();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Commands, Registry};
    use crate::platform::NullInput;
    use crate::sim::{EventQueue, Transform};

    fn step(registry: &mut Registry, dt: f32) {
        let mut events = EventQueue::new();
        let mut commands = Commands::new();
        registry.update(&mut StepContext {
            dt,
            input: &NullInput,
            events: &mut events,
            commands: &mut commands,
            halted: false,
        });
    }

    #[test]
    fn test_hit_protection_window() {
        let mut stats = Stats::new(3, 0.45);
        assert_eq!(stats.hit(1), HitResult::Hurt);
        assert_eq!(stats.hit(1), HitResult::Ignored);
        assert_eq!(stats.health, 2);
    }

    #[test]
    fn test_fatal_hit_clamps_and_sticks() {
        let mut stats = Stats::unprotected(2);
        assert_eq!(stats.hit(1), HitResult::Hurt);
        assert_eq!(stats.hit(5), HitResult::Fatal);
        assert_eq!(stats.health, 0);
        assert!(stats.is_dead());
        assert_eq!(stats.hit(1), HitResult::Ignored);
    }

    #[test]
    fn test_protection_expires_and_tints_sprite() {
        let mut registry = Registry::new();
        let id = {
            let mut e = registry.add_entity();
            e.add(Transform::default());
            e.add(Sprite::new(None));
            e.add(Stats::new(3, 0.5)).hit(1);
            e.id()
        };

        step(&mut registry, 0.25);
        let entity = registry.get(id).unwrap();
        assert!(entity.get::<Stats>().is_protected());
        assert_eq!(entity.get::<Sprite>().tint, Color::GREEN);

        step(&mut registry, 0.25);
        let entity = registry.get(id).unwrap();
        assert!(!entity.get::<Stats>().is_protected());
        assert_eq!(entity.get::<Sprite>().tint, Color::WHITE);

        registry.get_mut(id).unwrap().get_mut::<Stats>().hit(10);
        step(&mut registry, 0.01);
        assert_eq!(registry.get(id).unwrap().get::<Sprite>().tint, Color::RED);
    }
}

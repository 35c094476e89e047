//! Simulation world: the registry plus everything a step needs around it

use super::collision::{CollisionPass, CollisionRule, PassStats};
use super::events::{EventQueue, GameEvent};
use crate::ecs::{Commands, Registry, StepContext};
use crate::platform::{InputState, RenderTarget};

/// Registry, collision rules and the per-step queues
#[derive(Default)]
pub struct World {
    pub registry: Registry,
    pub collisions: CollisionPass,
    pub events: EventQueue,
    pub commands: Commands,
    /// Terminal state reached; collision, AI, weapons and controls stand down
    pub halted: bool,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: impl CollisionRule + 'static) {
        self.collisions.add_rule(rule);
    }

    pub fn refresh(&mut self) -> usize {
        self.registry.refresh()
    }

    pub fn collide(&mut self) -> PassStats {
        self.collisions
            .run(&mut self.registry, &mut self.events, self.halted)
    }

    pub fn update(&mut self, dt: f32, input: &dyn InputState) {
        let mut ctx = StepContext {
            dt,
            input,
            events: &mut self.events,
            commands: &mut self.commands,
            halted: self.halted,
        };
        self.registry.update(&mut ctx);
    }

    /// Apply deferred commands; new entities become visible to the next step
    pub fn apply_commands(&mut self) -> usize {
        self.commands.apply(&mut self.registry)
    }

    /// Take every event raised since the last drain
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        self.registry.render(target);
    }
}

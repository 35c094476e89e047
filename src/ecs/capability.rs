//! Capabilities: attachable units of per-entity behavior
//!
//! A capability is owned by exactly one [`Entity`] for its whole life. The
//! owner calls the lifecycle hooks:
//! - `on_attach` once, right after insertion (siblings added earlier are visible)
//! - `on_update` once per simulation step with that step's simulated dt
//! - `on_render` once per presented frame, read-only

use std::any::Any;

use super::commands::Commands;
use super::entity::Entity;
use crate::platform::{InputState, RenderTarget};
use crate::sim::events::EventQueue;

/// Object-safe access to [`Any`] for downcasting boxed capabilities.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-step context handed to [`Capability::on_update`].
///
/// Capabilities never see the [`Registry`](super::Registry) directly: new
/// entities go through `commands` and cross-system notifications go through
/// `events`, both drained at the step boundary.
pub struct StepContext<'a> {
    /// Simulated time for this step (fixed step, or frame time in variable mode)
    pub dt: f32,
    /// Polled input state
    pub input: &'a dyn InputState,
    /// Typed events drained once per step
    pub events: &'a mut EventQueue,
    /// Deferred registry mutations applied after the update pass
    pub commands: &'a mut Commands,
    /// Set after a terminal state; AI, weapons and controls stand down
    pub halted: bool,
}

/// A polymorphic unit of entity behavior. All hooks default to no-ops.
///
/// While a hook runs, the capability is detached from its owner, so the
/// `owner` argument gives full access to every *other* capability.
/// Looking up the running capability itself through `owner` panics.
pub trait Capability: AsAny + 'static {
    /// Called once after insertion. Dependencies must already be attached.
    fn on_attach(&mut self, _owner: &mut Entity) {}

    /// Called once per simulation step.
    fn on_update(&mut self, _owner: &mut Entity, _ctx: &mut StepContext<'_>) {}

    /// Called once per presented frame. Must not mutate simulation state.
    fn on_render(&self, _owner: &Entity, _target: &mut dyn RenderTarget) {}
}

/// Downcast a type-erased capability reference.
#[inline]
pub(crate) fn downcast_ref<T: Capability>(capability: &dyn Capability) -> Option<&T> {
    capability.as_any().downcast_ref::<T>()
}

/// Downcast a type-erased mutable capability reference.
#[inline]
pub(crate) fn downcast_mut<T: Capability>(capability: &mut dyn Capability) -> Option<&mut T> {
    capability.as_any_mut().downcast_mut::<T>()
}

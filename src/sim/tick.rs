//! Fixed timestep driver
//!
//! Wall-clock frame time accumulates into a slice. Each whole step in the
//! slice runs one simulation step (refresh, collide, update, end of step),
//! up to a catch-up cap per frame. Render runs once per frame afterwards.
//!
//! In [`UpdateMode::Variable`] the fixed loop keeps refresh and collision on
//! the fixed cadence but skips the update; one extra update runs with the raw
//! frame time instead. The two modes never both update in the same frame.

use serde::{Deserialize, Serialize};

use crate::platform::RenderTarget;

/// Which pass advances capability updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Catch-up loop drives updates with the fixed step
    #[default]
    Fixed,
    /// One update per rendered frame with the measured frame time
    Variable,
}

/// Driver tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Seconds per fixed step
    pub step: f32,
    /// Most fixed steps run in one frame
    pub max_steps: u32,
    pub mode: UpdateMode,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            step: crate::consts::FIXED_STEP,
            max_steps: crate::consts::MAX_CATCH_UP_STEPS,
            mode: UpdateMode::Fixed,
        }
    }
}

/// The stepped world as seen by the driver
pub trait Simulation {
    /// Compact dead entities and stale group entries
    fn refresh(&mut self);
    /// Run the collision pass
    fn collide(&mut self);
    /// Run every capability's update with `dt`
    fn update(&mut self, dt: f32);
    /// Step boundary: apply deferred commands and drain events
    fn end_step(&mut self) {}
    /// Draw the current state
    fn render(&self, target: &mut dyn RenderTarget);
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Fixed steps run
    pub steps: u32,
    /// Slice time thrown away because the cap was hit
    pub dropped: f32,
}

/// Accumulator-based fixed-step loop
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    config: StepConfig,
    slice: f32,
}

impl FixedStepDriver {
    pub fn new(config: StepConfig) -> Self {
        assert!(config.step > 0.0, "fixed step must be positive");
        assert!(config.max_steps > 0, "catch-up cap must be at least one step");
        Self { config, slice: 0.0 }
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    /// Unconsumed time carried into the next frame
    pub fn slice(&self) -> f32 {
        self.slice
    }

    /// Forget accumulated time (after a pause or a long load)
    pub fn reset(&mut self) {
        self.slice = 0.0;
    }

    /// Advance `sim` by `frame_time` seconds of wall clock and render once.
    pub fn frame(
        &mut self,
        sim: &mut impl Simulation,
        frame_time: f32,
        target: &mut dyn RenderTarget,
    ) -> FrameReport {
        let StepConfig {
            step,
            max_steps,
            mode,
        } = self.config;
        let mut report = FrameReport::default();

        self.slice += frame_time.max(0.0);
        while self.slice >= step && report.steps < max_steps {
            sim.refresh();
            sim.collide();
            if mode == UpdateMode::Fixed {
                sim.update(step);
            }
            sim.end_step();
            self.slice -= step;
            report.steps += 1;
        }

        if self.slice >= step {
            report.dropped = self.slice;
            log::warn!(
                "Simulation fell behind: ran {} steps, dropping {:.3}s",
                report.steps,
                self.slice
            );
            self.slice = 0.0;
        }

        if mode == UpdateMode::Variable {
            sim.refresh();
            sim.update(frame_time);
            sim.end_step();
        }

        sim.render(target);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Commands, Group, Registry, StepContext};
    use crate::platform::{NullInput, NullTarget};
    use crate::sim::components::{Body, Transform};
    use crate::sim::events::EventQueue;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Counts driver calls in order
    #[derive(Default)]
    struct Trace {
        calls: Vec<&'static str>,
        updated: f32,
        renders: std::cell::Cell<u32>,
    }

    impl Simulation for Trace {
        fn refresh(&mut self) {
            self.calls.push("refresh");
        }
        fn collide(&mut self) {
            self.calls.push("collide");
        }
        fn update(&mut self, dt: f32) {
            self.calls.push("update");
            self.updated += dt;
        }
        fn end_step(&mut self) {
            self.calls.push("end");
        }
        fn render(&self, _target: &mut dyn RenderTarget) {
            self.renders.set(self.renders.get() + 1);
        }
    }

    /// Registry of velocity-integrating bodies
    struct Moving {
        registry: Registry,
    }

    impl Simulation for Moving {
        fn refresh(&mut self) {
            self.registry.refresh();
        }
        fn collide(&mut self) {}
        fn update(&mut self, dt: f32) {
            let input = NullInput;
            let mut events = EventQueue::new();
            let mut commands = Commands::new();
            self.registry.update(&mut StepContext {
                dt,
                input: &input,
                events: &mut events,
                commands: &mut commands,
                halted: false,
            });
        }
        fn render(&self, target: &mut dyn RenderTarget) {
            self.registry.render(target);
        }
    }

    fn moving(velocity: Vec2) -> Moving {
        let mut registry = Registry::new();
        let mut e = registry.add_entity();
        e.add(Transform::default());
        e.add(Body::new(Vec2::ONE).with_velocity(velocity));
        drop(e);
        Moving { registry }
    }

    fn position(sim: &Moving) -> Vec2 {
        sim.registry.iter().next().unwrap().get::<Transform>().position
    }

    fn driver(step: f32, max_steps: u32, mode: UpdateMode) -> FixedStepDriver {
        FixedStepDriver::new(StepConfig {
            step,
            max_steps,
            mode,
        })
    }

    #[test]
    fn test_fixed_step_order() {
        let mut sim = Trace::default();
        let mut d = driver(0.5, 10, UpdateMode::Fixed);
        let report = d.frame(&mut sim, 1.0, &mut NullTarget);

        assert_eq!(report.steps, 2);
        assert_eq!(
            sim.calls,
            vec![
                "refresh", "collide", "update", "end", "refresh", "collide", "update", "end"
            ]
        );
        assert_eq!(sim.renders.get(), 1);
    }

    #[test]
    fn test_remainder_carries_to_next_frame() {
        let mut sim = Trace::default();
        let mut d = driver(0.25, 10, UpdateMode::Fixed);

        assert_eq!(d.frame(&mut sim, 0.125, &mut NullTarget).steps, 0);
        assert_eq!(d.slice(), 0.125);
        assert_eq!(d.frame(&mut sim, 0.125, &mut NullTarget).steps, 1);
        assert_eq!(d.slice(), 0.0);
        // Render still happens on frames without a step
        assert_eq!(sim.renders.get(), 2);
    }

    #[test]
    fn test_catch_up_cap_discards_leftover() {
        let mut sim = Trace::default();
        let mut d = driver(0.25, 3, UpdateMode::Fixed);

        let report = d.frame(&mut sim, 2.0, &mut NullTarget);
        assert_eq!(report.steps, 3);
        assert_eq!(report.dropped, 1.25);
        assert_eq!(d.slice(), 0.0);

        let next = d.frame(&mut sim, 0.25, &mut NullTarget);
        assert_eq!(next.steps, 1);
    }

    #[test]
    fn test_variable_mode_updates_once_with_frame_time() {
        let mut sim = Trace::default();
        let mut d = driver(0.25, 10, UpdateMode::Variable);
        let report = d.frame(&mut sim, 0.5, &mut NullTarget);

        assert_eq!(report.steps, 2);
        assert_eq!(sim.updated, 0.5);
        assert_eq!(sim.calls.iter().filter(|c| **c == "update").count(), 1);
        assert_eq!(sim.calls.iter().filter(|c| **c == "collide").count(), 2);
    }

    #[test]
    fn test_single_unit_step_scenario() {
        let mut registry = Registry::new();
        let enemy = Group::new(0);
        let player = Group::new(1);
        let ids: Vec<_> = [Vec2::new(1.0, 0.0), Vec2::ZERO]
            .into_iter()
            .map(|velocity| {
                let mut e = registry.add_entity();
                e.add(Transform::default());
                e.add(Body::new(Vec2::ONE).with_velocity(velocity));
                e.add_group(enemy).add_group(player);
                e.id()
            })
            .collect();
        let mut sim = Moving { registry };

        let report = driver(1.0, 10, UpdateMode::Fixed).frame(&mut sim, 1.0, &mut NullTarget);
        assert_eq!(report.steps, 1);

        let x = |i: usize| sim.registry.get(ids[i]).unwrap().get::<Transform>().position.x;
        assert_eq!(x(0), 1.0);
        assert_eq!(x(1), 0.0);
    }

    proptest! {
        #[test]
        fn prop_step_count_independent_of_frame_split(
            n in 1u32..40,
            cuts in proptest::collection::vec(0u32..40, 0..8),
        ) {
            // Quarter steps are exact in binary floating point
            let step = 0.25f32;
            let total = n;
            let mut bounds: Vec<u32> = cuts.into_iter().map(|c| c % (total + 1)).collect();
            bounds.push(0);
            bounds.push(total);
            bounds.sort_unstable();

            let mut split = moving(Vec2::new(4.0, -2.0));
            let mut d = driver(step, 1000, UpdateMode::Fixed);
            let mut steps = 0;
            for pair in bounds.windows(2) {
                let frame = (pair[1] - pair[0]) as f32 * step;
                steps += d.frame(&mut split, frame, &mut NullTarget).steps;
            }

            let mut whole = moving(Vec2::new(4.0, -2.0));
            let whole_steps = driver(step, 1000, UpdateMode::Fixed)
                .frame(&mut whole, total as f32 * step, &mut NullTarget)
                .steps;

            prop_assert_eq!(steps, n);
            prop_assert_eq!(whole_steps, n);
            prop_assert_eq!(position(&split), position(&whole));
        }

        #[test]
        fn prop_cap_bounds_steps(frames in 1u32..500, cap in 1u32..50) {
            let mut sim = Trace::default();
            let mut d = driver(0.25, cap, UpdateMode::Fixed);
            let report = d.frame(&mut sim, frames as f32 * 0.25, &mut NullTarget);
            prop_assert_eq!(report.steps, frames.min(cap));
            prop_assert!(d.slice() < 0.25);
        }
    }
}

//! Group-pair collision pass
//!
//! Each rule names two groups. Every tick, every (a, b) pair from the cross
//! product of the two member lists is tested once with a closed AABB overlap
//! and handed to the rule together with the boolean result, always in
//! (group A member, group B member) order.
//!
//! The pass is memoryless: there is no enter/exit tracking. A rule that wants
//! hysteresis re-derives it from the per-tick boolean.
//!
//! Cost is O(|A| x |B|) per rule per tick. Group sizes are tens of entities;
//! there is no broad phase.

use std::any::type_name;

use super::components::entity_aabb;
use super::events::EventQueue;
use crate::ecs::{Entity, EntityId, Group, Registry};

/// Reaction for one pair of groups
pub trait CollisionRule {
    /// (group of `a`, group of `b`) as passed to [`react`](Self::react)
    fn groups(&self) -> (Group, Group);

    /// Called for every tested pair. Both entities are alive at call time.
    fn react(&mut self, a: &mut Entity, b: &mut Entity, overlapping: bool, events: &mut EventQueue);

    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Counters for one run of the pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Pairs handed to a rule
    pub tested: usize,
    /// Of those, pairs that overlapped
    pub contacts: usize,
}

/// Ordered set of collision rules
#[derive(Default)]
pub struct CollisionPass {
    rules: Vec<Box<dyn CollisionRule>>,
    // Reused member snapshots so reactions may mutate the registry's entities
    members_a: Vec<EntityId>,
    members_b: Vec<EntityId>,
}

impl CollisionPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: impl CollisionRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Test every rule's group pair. Does nothing when `halted`.
    ///
    /// Run after [`Registry::refresh`]; entities destroyed by an earlier
    /// reaction in the same pass are skipped for the remaining pairs.
    pub fn run(&mut self, registry: &mut Registry, events: &mut EventQueue, halted: bool) -> PassStats {
        let mut stats = PassStats::default();
        if halted {
            return stats;
        }

        for rule in &mut self.rules {
            let (group_a, group_b) = rule.groups();
            self.members_a.clear();
            self.members_a.extend_from_slice(registry.by_group(group_a));
            self.members_b.clear();
            self.members_b.extend_from_slice(registry.by_group(group_b));

            for &a in &self.members_a {
                for &b in &self.members_b {
                    let Some((entity_a, entity_b)) = registry.pair_mut(a, b) else {
                        continue;
                    };
                    if !entity_a.is_alive() || !entity_b.is_alive() {
                        continue;
                    }

                    let overlapping = entity_aabb(entity_a).intersects(&entity_aabb(entity_b));
                    stats.tested += 1;
                    if overlapping {
                        stats.contacts += 1;
                        log::trace!("{}: {} touches {}", rule.name(), a, b);
                    }
                    rule.react(entity_a, entity_b, overlapping, events);
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::components::{Body, Transform};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    const LEFT: Group = Group::new(0);
    const RIGHT: Group = Group::new(1);

    type Calls = Rc<RefCell<Vec<(EntityId, EntityId, bool)>>>;

    struct Recorder {
        calls: Calls,
        destroy_b_on_contact: bool,
    }

    impl CollisionRule for Recorder {
        fn groups(&self) -> (Group, Group) {
            (LEFT, RIGHT)
        }

        fn react(&mut self, a: &mut Entity, b: &mut Entity, overlapping: bool, _events: &mut EventQueue) {
            self.calls.borrow_mut().push((a.id(), b.id(), overlapping));
            if overlapping && self.destroy_b_on_contact {
                b.destroy();
            }
        }
    }

    fn boxed(registry: &mut Registry, x: f32, group: Group) -> EntityId {
        let mut e = registry.add_entity();
        e.add(Transform::at(Vec2::new(x, 0.0)));
        e.add(Body::new(Vec2::splat(1.0)));
        e.add_group(group);
        e.id()
    }

    fn pass(destroy: bool) -> (CollisionPass, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let mut pass = CollisionPass::new();
        pass.add_rule(Recorder {
            calls: calls.clone(),
            destroy_b_on_contact: destroy,
        });
        (pass, calls)
    }

    #[test]
    fn test_every_pair_once_in_rule_order() {
        let mut registry = Registry::new();
        let l0 = boxed(&mut registry, 0.0, LEFT);
        let l1 = boxed(&mut registry, 50.0, LEFT);
        let r0 = boxed(&mut registry, 2.0, RIGHT); // touches l0 exactly
        let r1 = boxed(&mut registry, 100.0, RIGHT);

        let (mut pass, calls) = pass(false);
        let stats = pass.run(&mut registry, &mut EventQueue::new(), false);

        assert_eq!(stats, PassStats { tested: 4, contacts: 1 });
        assert_eq!(
            *calls.borrow(),
            vec![
                (l0, r0, true),
                (l0, r1, false),
                (l1, r0, false),
                (l1, r1, false)
            ]
        );
    }

    #[test]
    fn test_halted_pass_does_nothing() {
        let mut registry = Registry::new();
        boxed(&mut registry, 0.0, LEFT);
        boxed(&mut registry, 0.0, RIGHT);

        let (mut pass, calls) = pass(false);
        let stats = pass.run(&mut registry, &mut EventQueue::new(), true);
        assert_eq!(stats, PassStats::default());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_destroyed_mid_pass_is_skipped() {
        let mut registry = Registry::new();
        let l0 = boxed(&mut registry, 0.0, LEFT);
        let l1 = boxed(&mut registry, 0.5, LEFT);
        let r0 = boxed(&mut registry, 1.0, RIGHT);

        let (mut pass, calls) = pass(true);
        pass.run(&mut registry, &mut EventQueue::new(), false);

        // r0 died on the first contact, so l1 never sees it
        assert_eq!(*calls.borrow(), vec![(l0, r0, true)]);
        assert!(calls.borrow().iter().all(|(a, _, _)| *a != l1));
    }

    #[test]
    fn test_entity_in_both_groups_skips_self_pair() {
        let mut registry = Registry::new();
        let both = {
            let mut e = registry.add_entity();
            e.add(Transform::default());
            e.add(Body::new(Vec2::ONE));
            e.add_group(LEFT).add_group(RIGHT);
            e.id()
        };
        let other = boxed(&mut registry, 0.0, RIGHT);

        let (mut pass, calls) = pass(false);
        pass.run(&mut registry, &mut EventQueue::new(), false);
        assert_eq!(*calls.borrow(), vec![(both, other, true)]);
    }

    #[test]
    fn test_unrefreshed_dead_entity_is_ignored() {
        let mut registry = Registry::new();
        let l0 = boxed(&mut registry, 0.0, LEFT);
        let r0 = boxed(&mut registry, 0.0, RIGHT);
        registry.get_mut(l0).unwrap().destroy();

        let (mut pass, calls) = pass(false);
        let stats = pass.run(&mut registry, &mut EventQueue::new(), false);
        assert_eq!(stats.tested, 0);
        assert!(calls.borrow().is_empty());
        assert!(registry.get(r0).unwrap().is_alive());
    }
}

//! Registry: owner and group index of all entities
//!
//! Entities live in insertion order, each boxed so growth never moves them.
//! Per-group lists hold ids only and are pruned lazily: between refreshes a
//! list may still name dead entities or entities that left the group.

use std::ops::{Deref, DerefMut};

use super::capability::{Capability, StepContext};
use super::entity::{Entity, EntityId, Group, MAX_GROUPS};
use crate::platform::RenderTarget;

/// Owns every entity of a session
pub struct Registry {
    entities: Vec<Box<Entity>>,
    groups: [Vec<EntityId>; MAX_GROUPS],
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            groups: std::array::from_fn(|_| Vec::new()),
            next_id: 0,
        }
    }

    /// Create a new live entity and return a handle for building it
    pub fn add_entity(&mut self) -> EntityMut<'_> {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.push(Box::new(Entity::new(id)));
        log::trace!("{} created", id);
        let index = self.entities.len() - 1;
        EntityMut {
            registry: self,
            index,
        }
    }

    /// Set the group bit on the entity and append it to the group list.
    ///
    /// Does not deduplicate: adding twice leaves two entries in the list.
    pub fn add_to_group(&mut self, id: EntityId, group: Group) {
        let Some(index) = self.position(id) else {
            panic!("{} is not owned by this registry", id);
        };
        self.entities[index].set_group(group);
        self.groups[group.index()].push(id);
    }

    /// Drop stale group entries, then release dead entities.
    ///
    /// Returns the number of entities released.
    pub fn refresh(&mut self) -> usize {
        for (index, members) in self.groups.iter_mut().enumerate() {
            let group = Group::new(index as u8);
            let entities = &self.entities;
            members.retain(|id| {
                lookup(entities, *id).is_some_and(|e| e.is_alive() && e.in_group(group))
            });
        }

        let before = self.entities.len();
        self.entities.retain(|e| e.is_alive());
        let released = before - self.entities.len();
        if released > 0 {
            log::trace!("refresh released {} entities", released);
        }
        released
    }

    /// Run `on_update` on every entity in insertion order.
    ///
    /// Dead-but-unrefreshed entities are updated too; call
    /// [`refresh`](Self::refresh) first for a consistent view.
    pub fn update(&mut self, ctx: &mut StepContext<'_>) {
        for entity in &mut self.entities {
            entity.update(ctx);
        }
    }

    /// Run `on_render` on every entity in insertion order.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        for entity in &self.entities {
            entity.render(target);
        }
    }

    /// Current (possibly stale) member list of a group
    pub fn by_group(&self, group: Group) -> &[EntityId] {
        &self.groups[group.index()]
    }

    /// Members of a group that are alive and still claim membership
    pub fn live_in_group(&self, group: Group) -> impl Iterator<Item = &Entity> + '_ {
        self.groups[group.index()]
            .iter()
            .filter_map(|id| self.get(*id))
            .filter(move |e| e.is_alive() && e.in_group(group))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        lookup(&self.entities, id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = self.position(id)?;
        Some(self.entities[index].as_mut())
    }

    /// Building handle for an existing entity
    pub fn entity_mut(&mut self, id: EntityId) -> Option<EntityMut<'_>> {
        let index = self.position(id)?;
        Some(EntityMut {
            registry: self,
            index,
        })
    }

    /// Two distinct entities borrowed mutably at once
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        if a == b {
            return None;
        }
        let ia = self.position(a)?;
        let ib = self.position(b)?;
        if ia < ib {
            let (low, high) = self.entities.split_at_mut(ib);
            Some((low[ia].as_mut(), high[0].as_mut()))
        } else {
            let (low, high) = self.entities.split_at_mut(ia);
            Some((high[0].as_mut(), low[ib].as_mut()))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().map(|e| e.as_ref())
    }

    /// Number of stored entities, including dead ones awaiting refresh
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids are assigned in increasing order and removal keeps order,
    /// so storage stays sorted by id.
    fn position(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id()).ok()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(entities: &[Box<Entity>], id: EntityId) -> Option<&Entity> {
    entities
        .binary_search_by_key(&id, |e| e.id())
        .ok()
        .map(|index| entities[index].as_ref())
}

/// Mutable handle to one entity that can also update the registry's group index
pub struct EntityMut<'r> {
    registry: &'r mut Registry,
    index: usize,
}

impl EntityMut<'_> {
    /// Attach a capability (see [`Entity::add`])
    pub fn add<T: Capability>(&mut self, capability: T) -> &mut T {
        self.registry.entities[self.index].add(capability)
    }

    /// Join a group: sets the bit and registers in the group list
    pub fn add_group(&mut self, group: Group) -> &mut Self {
        let id = self.registry.entities[self.index].id();
        self.registry.entities[self.index].set_group(group);
        self.registry.groups[group.index()].push(id);
        self
    }
}

impl Deref for EntityMut<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.registry.entities[self.index]
    }
}

impl DerefMut for EntityMut<'_> {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self.registry.entities[self.index]
    }
}

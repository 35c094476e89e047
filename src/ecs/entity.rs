//! Entities: containers of capabilities
//!
//! An entity owns its capabilities (insertion order = attach order), keeps a
//! type-indexed lookup table over them, a liveness flag and a group bitset.
//! Destruction is a flag flip; storage is released by
//! [`Registry::refresh`](super::Registry::refresh).

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use super::capability::{Capability, StepContext, downcast_mut, downcast_ref};
use crate::platform::RenderTarget;

/// Maximum number of distinct groups
pub const MAX_GROUPS: usize = 32;

/// Unique identifier for an entity. Monotonic within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn new(raw: u64) -> Self {
        EntityId(raw)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// A group id in `0..MAX_GROUPS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group(u8);

impl Group {
    /// Panics if `id` is out of range.
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < MAX_GROUPS, "group id out of range");
        Group(id)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Group membership bitset (one bit per group)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSet(u32);

impl GroupSet {
    #[inline]
    pub fn contains(&self, group: Group) -> bool {
        self.0 & (1 << group.0) != 0
    }

    #[inline]
    pub fn insert(&mut self, group: Group) {
        self.0 |= 1 << group.0;
    }

    #[inline]
    pub fn remove(&mut self, group: Group) {
        self.0 &= !(1 << group.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// One game object: an ordered, type-unique set of capabilities.
pub struct Entity {
    id: EntityId,
    alive: bool,
    /// `None` only while that capability's own hook is running
    slots: Vec<Option<Box<dyn Capability>>>,
    /// type -> slot index
    lookup: HashMap<TypeId, usize>,
    groups: GroupSet,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            alive: true,
            slots: Vec::new(),
            lookup: HashMap::new(),
            groups: GroupSet::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the entity dead. Idempotent; storage is released on the next refresh.
    pub fn destroy(&mut self) {
        if self.alive {
            log::trace!("{} marked dead", self.id);
        }
        self.alive = false;
    }

    /// Number of attached capabilities
    pub fn capability_count(&self) -> usize {
        self.slots.len()
    }

    /// Attach a capability and run its `on_attach` hook.
    ///
    /// Panics if a capability of type `T` is already attached.
    pub fn add<T: Capability>(&mut self, capability: T) -> &mut T {
        let type_id = TypeId::of::<T>();
        assert!(
            !self.lookup.contains_key(&type_id),
            "{} already has capability {}",
            self.id,
            type_name::<T>()
        );

        let index = self.slots.len();
        self.slots.push(None);
        self.lookup.insert(type_id, index);

        let mut boxed: Box<dyn Capability> = Box::new(capability);
        boxed.on_attach(self);
        self.slots[index] = Some(boxed);

        self.get_mut::<T>()
    }

    #[inline]
    pub fn has<T: Capability>(&self) -> bool {
        self.lookup.contains_key(&TypeId::of::<T>())
    }

    /// Typed lookup. Panics if `T` is absent; check [`has`](Self::has) first.
    pub fn get<T: Capability>(&self) -> &T {
        match self.try_get::<T>() {
            Some(capability) => capability,
            None => self.missing::<T>(),
        }
    }

    /// Mutable typed lookup. Panics if `T` is absent.
    pub fn get_mut<T: Capability>(&mut self) -> &mut T {
        if self.try_get::<T>().is_none() {
            self.missing::<T>();
        }
        let index = self.lookup[&TypeId::of::<T>()];
        self.slots[index]
            .as_deref_mut()
            .and_then(downcast_mut::<T>)
            .unwrap_or_else(|| unreachable!())
    }

    /// Typed lookup that tolerates absence.
    pub fn try_get<T: Capability>(&self) -> Option<&T> {
        let index = *self.lookup.get(&TypeId::of::<T>())?;
        self.slots[index].as_deref().and_then(downcast_ref::<T>)
    }

    /// Mutable typed lookup that tolerates absence.
    pub fn try_get_mut<T: Capability>(&mut self) -> Option<&mut T> {
        let index = *self.lookup.get(&TypeId::of::<T>())?;
        self.slots[index].as_deref_mut().and_then(downcast_mut::<T>)
    }

    fn missing<T: Capability>(&self) -> ! {
        if self.has::<T>() {
            panic!(
                "{}: capability {} looked up from inside its own hook",
                self.id,
                type_name::<T>()
            );
        }
        panic!("{} has no capability {}", self.id, type_name::<T>());
    }

    pub fn in_group(&self, group: Group) -> bool {
        self.groups.contains(group)
    }

    /// Clear the membership bit only. The registry prunes its list on refresh.
    pub fn remove_group(&mut self, group: Group) {
        self.groups.remove(group);
    }

    pub fn groups(&self) -> GroupSet {
        self.groups
    }

    pub(crate) fn set_group(&mut self, group: Group) {
        self.groups.insert(group);
    }

    /// Run `on_update` on every capability in attach order.
    pub(crate) fn update(&mut self, ctx: &mut StepContext<'_>) {
        for index in 0..self.slots.len() {
            let Some(mut capability) = self.slots[index].take() else {
                continue;
            };
            capability.on_update(self, ctx);
            self.slots[index] = Some(capability);
        }
    }

    /// Run `on_render` on every capability in attach order.
    pub(crate) fn render(&self, target: &mut dyn RenderTarget) {
        for capability in self.slots.iter().flatten() {
            capability.on_render(self, target);
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("alive", &self.alive)
            .field("capabilities", &self.slots.len())
            .field("groups", &self.groups)
            .finish()
    }
}

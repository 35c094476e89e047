//! Entity-capability runtime
//!
//! - [`Capability`]: polymorphic behavior unit with attach/update/render hooks
//! - [`Entity`]: owns a type-unique set of capabilities plus group membership
//! - [`Registry`]: owns all entities, indexes them by group, compacts dead ones
//! - [`Commands`]: deferred registry mutations queued from inside hooks
//!
//! Destruction is two-phase: `Entity::destroy` marks, `Registry::refresh`
//! compacts. Between the two, group lists may name dead entities; readers
//! either run after a refresh or filter on `is_alive`.

mod capability;
mod commands;
mod entity;
mod registry;

pub use capability::{AsAny, Capability, StepContext};
pub use commands::Commands;
pub use entity::{Entity, EntityId, Group, GroupSet, MAX_GROUPS};
pub use registry::{EntityMut, Registry};

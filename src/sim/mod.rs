//! Simulation layer
//!
//! Everything here is headless and deterministic for a given seed and a
//! given sequence of frame times:
//! - Physical capabilities and box geometry
//! - Group-pair collision pass
//! - Typed event queue
//! - Fixed timestep driver

pub mod aabb;
pub mod collision;
pub mod components;
pub mod events;
pub mod tick;
pub mod world;

pub use aabb::Aabb;
pub use collision::{CollisionPass, CollisionRule, PassStats};
pub use components::{Body, Transform, entity_aabb};
pub use events::{EventQueue, GameEvent};
pub use tick::{FixedStepDriver, FrameReport, Simulation, StepConfig, UpdateMode};
pub use world::World;

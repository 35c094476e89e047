//! Game content
//!
//! Concrete capabilities, collision rules, wave spawning and the session
//! state machine that plugs into the fixed-step driver.

pub mod clock;
pub mod control;
pub mod enemy;
pub mod factory;
pub mod hud;
pub mod projectile;
pub mod rules;
pub mod session;
pub mod spawner;
pub mod sprite;
pub mod state;
pub mod stats;
pub mod weapon;

pub use clock::RunClock;
pub use control::{Beacon, PlayerControl, SharedPosition};
pub use enemy::{EnemyControl, MoveStyle};
pub use factory::{EntityFactory, Images};
pub use hud::Hud;
pub use projectile::Projectile;
pub use rules::{EnemyContact, ObstacleBlock, ProjectileHit};
pub use session::Session;
pub use spawner::{Difficulty, EnemySpawner, Wave};
pub use sprite::Sprite;
pub use state::{GamePhase, Outcome};
pub use stats::{HitResult, Stats};
pub use weapon::Weapon;

use crate::ecs::Group;

/// Entity groups
pub mod groups {
    use super::Group;

    pub const PLAYER: Group = Group::new(0);
    pub const ENEMY: Group = Group::new(1);
    pub const OBSTACLE: Group = Group::new(2);
    pub const PROJECTILE: Group = Group::new(3);
}

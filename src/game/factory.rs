//! Entity construction
//!
//! Capabilities are added in dependency order: transform, sprite, body, then
//! behaviors that read the body.

use glam::Vec2;

use super::control::{Beacon, PlayerControl, SharedPosition};
use super::enemy::{EnemyControl, MoveStyle};
use super::groups;
use super::projectile::Projectile;
use super::sprite::Sprite;
use super::stats::Stats;
use super::weapon::Weapon;
use crate::consts::{ENEMY_HALF_EXTENT, OBSTACLE_HALF_EXTENT, PLAYER_HALF_EXTENT, PROJECTILE_SCALE};
use crate::ecs::{EntityId, Registry};
use crate::platform::{ImageHandle, ImageSource};
use crate::settings::{GameplaySettings, Settings};
use crate::sim::{Aabb, Body, Transform};

pub const PLAYER_IMAGE: &str = "assets/textures/player.png";
pub const CHASER_IMAGE: &str = "assets/textures/chaser.png";
pub const AVOIDER_IMAGE: &str = "assets/textures/coward.png";
pub const PINGER_IMAGE: &str = "assets/textures/pong.png";
pub const ROCK_IMAGE: &str = "assets/textures/rock.png";

/// Loaded sprite images; `None` where loading failed
#[derive(Debug, Clone, Copy, Default)]
pub struct Images {
    pub player: Option<ImageHandle>,
    pub chaser: Option<ImageHandle>,
    pub avoider: Option<ImageHandle>,
    pub pinger: Option<ImageHandle>,
    pub rock: Option<ImageHandle>,
}

impl Images {
    /// Load every image; failures are logged and leave that slot empty.
    pub fn load(source: &mut dyn ImageSource) -> Self {
        let mut load = |path: &str| match source.load_image(path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Sprite disabled: {}", e);
                None
            }
        };
        Self {
            player: load(PLAYER_IMAGE),
            chaser: load(CHASER_IMAGE),
            avoider: load(AVOIDER_IMAGE),
            pinger: load(PINGER_IMAGE),
            rock: load(ROCK_IMAGE),
        }
    }
}

/// Builds every kind of game entity
#[derive(Debug, Clone, Copy)]
pub struct EntityFactory {
    images: Images,
    bounds: Aabb,
    gameplay: GameplaySettings,
}

impl EntityFactory {
    pub fn new(images: Images, settings: &Settings) -> Self {
        Self {
            images,
            bounds: settings.arena.bounds(),
            gameplay: settings.gameplay,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn spawn_player(&self, registry: &mut Registry, position: Vec2, beacon: &SharedPosition) -> EntityId {
        let g = &self.gameplay;
        let mut player = registry.add_entity();
        player.add(Transform::at(position));
        player.add(Sprite::new(self.images.player));
        player.add(Body::new(Vec2::splat(PLAYER_HALF_EXTENT)).with_bounds(self.bounds));
        player.add(PlayerControl::new(g.player_speed));
        player.add(Stats::new(g.player_health, g.hit_cooldown));
        player.add(Beacon::new(beacon.clone()));
        player.add(Weapon::new(g.fire_interval, *self));
        player.add_group(groups::PLAYER);
        log::trace!("spawned player {}", player.id());
        player.id()
    }

    /// Speed and health scale with the style: avoiders are quick, ping-pongers tough.
    pub fn spawn_enemy(
        &self,
        registry: &mut Registry,
        position: Vec2,
        style: MoveStyle,
        target: &SharedPosition,
    ) -> EntityId {
        let g = &self.gameplay;
        let (image, speed_mod, health_mod) = match style {
            MoveStyle::Chase => (self.images.chaser, 0.8, 1),
            MoveStyle::Avoid => (self.images.avoider, 1.5, 2),
            MoveStyle::PingPong => (self.images.pinger, 0.55, 3),
        };

        let mut enemy = registry.add_entity();
        enemy.add(Transform::at(position));
        enemy.add(Sprite::new(image));
        enemy.add(Body::new(Vec2::splat(ENEMY_HALF_EXTENT)).with_bounds(self.bounds));
        enemy.add(EnemyControl::new(style, g.enemy_speed * speed_mod, target.clone()));
        enemy.add(Stats::unprotected(g.enemy_health * health_mod));
        enemy.add_group(groups::ENEMY);
        log::trace!("spawned {:?} enemy {}", style, enemy.id());
        enemy.id()
    }

    pub fn spawn_projectile(&self, registry: &mut Registry, position: Vec2, direction: Vec2) -> EntityId {
        let g = &self.gameplay;
        let mut projectile = registry.add_entity();
        projectile.add(Transform {
            position,
            rotation: 0.0,
            scale: Vec2::splat(PROJECTILE_SCALE),
        });
        projectile.add(Sprite::new(self.images.player));
        projectile.add(Body::new(Vec2::splat(PLAYER_HALF_EXTENT)).with_bounds(self.bounds));
        projectile.add(Projectile::new(g.projectile_speed, direction, g.projectile_damage));
        projectile.add_group(groups::PROJECTILE);
        projectile.id()
    }

    pub fn spawn_obstacle(&self, registry: &mut Registry, position: Vec2) -> EntityId {
        let mut rock = registry.add_entity();
        rock.add(Transform::at(position));
        rock.add(Sprite::new(self.images.rock));
        rock.add(Body::new(Vec2::splat(OBSTACLE_HALF_EXTENT)));
        rock.add_group(groups::OBSTACLE);
        rock.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessImages;
    use crate::sim::entity_aabb;

    #[test]
    fn test_missing_image_leaves_slot_empty() {
        let mut source = HeadlessImages::new().with_missing(ROCK_IMAGE);
        let images = Images::load(&mut source);
        assert!(images.player.is_some());
        assert!(images.rock.is_none());
    }

    #[test]
    fn test_entities_join_their_groups() {
        let factory = EntityFactory::new(Images::default(), &Settings::default());
        let beacon = SharedPosition::default();
        let mut registry = Registry::new();

        let player = factory.spawn_player(&mut registry, Vec2::new(400.0, 300.0), &beacon);
        let enemy = factory.spawn_enemy(&mut registry, Vec2::ZERO, MoveStyle::PingPong, &beacon);
        let rock = factory.spawn_obstacle(&mut registry, Vec2::ZERO);
        let shot = factory.spawn_projectile(&mut registry, Vec2::ZERO, Vec2::X);

        assert_eq!(registry.by_group(groups::PLAYER), &[player]);
        assert_eq!(registry.by_group(groups::ENEMY), &[enemy]);
        assert_eq!(registry.by_group(groups::OBSTACLE), &[rock]);
        assert_eq!(registry.by_group(groups::PROJECTILE), &[shot]);
        assert_eq!(beacon.get(), Vec2::new(400.0, 300.0));

        let enemy_stats = registry.get(enemy).unwrap().get::<Stats>();
        assert_eq!(enemy_stats.health, 3);

        let shot_box = entity_aabb(registry.get(shot).unwrap());
        assert_eq!(shot_box.size(), Vec2::splat(PLAYER_HALF_EXTENT * 2.0 * PROJECTILE_SCALE));
    }
}

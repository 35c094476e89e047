//! Collision reactions between game groups

use super::enemy::EnemyControl;
use super::groups;
use super::projectile::Projectile;
use super::stats::{HitResult, Stats};
use crate::audio::SoundEffect;
use crate::ecs::{Entity, Group};
use crate::sim::{CollisionRule, EventQueue, GameEvent, Transform, entity_aabb};

/// Enemies stop while touching the player and hurt it for one point
#[derive(Debug, Default)]
pub struct EnemyContact;

impl CollisionRule for EnemyContact {
    fn groups(&self) -> (Group, Group) {
        (groups::ENEMY, groups::PLAYER)
    }

    fn react(&mut self, enemy: &mut Entity, player: &mut Entity, overlapping: bool, events: &mut EventQueue) {
        // Holds until the next pass, however many updates run in between
        enemy.get_mut::<EnemyControl>().set_blocked(overlapping);
        if !overlapping {
            return;
        }

        let Some(stats) = player.try_get_mut::<Stats>() else {
            return;
        };
        match stats.hit(1) {
            HitResult::Ignored => {}
            HitResult::Hurt => {
                events.push(GameEvent::PlayerHealthChanged(-1));
                events.push(GameEvent::Sound(SoundEffect::Hurt));
            }
            HitResult::Fatal => {
                events.push(GameEvent::PlayerHealthChanged(-1));
                events.push(GameEvent::PlayerDown);
                events.push(GameEvent::Sound(SoundEffect::PlayerDown));
            }
        }
    }
}

/// Players cannot walk through obstacles
#[derive(Debug, Default)]
pub struct ObstacleBlock;

impl CollisionRule for ObstacleBlock {
    fn groups(&self) -> (Group, Group) {
        (groups::PLAYER, groups::OBSTACLE)
    }

    fn react(&mut self, player: &mut Entity, obstacle: &mut Entity, overlapping: bool, _events: &mut EventQueue) {
        if !overlapping {
            return;
        }
        if let Some(push) = entity_aabb(player).push_out(&entity_aabb(obstacle)) {
            player.get_mut::<Transform>().position += push;
        }
    }
}

/// Projectiles damage enemies and are used up; a kill scores a point
#[derive(Debug, Default)]
pub struct ProjectileHit;

impl CollisionRule for ProjectileHit {
    fn groups(&self) -> (Group, Group) {
        (groups::PROJECTILE, groups::ENEMY)
    }

    fn react(&mut self, projectile: &mut Entity, enemy: &mut Entity, overlapping: bool, events: &mut EventQueue) {
        if !overlapping {
            return;
        }
        let damage = projectile.get::<Projectile>().damage;
        projectile.destroy();

        if enemy.get_mut::<Stats>().hit(damage) == HitResult::Fatal {
            enemy.destroy();
            events.push(GameEvent::ScoreChanged(1));
            events.push(GameEvent::EnemyDown(enemy.id()));
            events.push(GameEvent::Sound(SoundEffect::EnemyDown));
        }
    }
}

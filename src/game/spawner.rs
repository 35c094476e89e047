//! Enemy wave spawning
//!
//! Waves arrive every `wave_interval` seconds of run time, starting at zero.
//! Difficulty climbs every two waves and each wave is one enemy larger per
//! style than the last.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::control::SharedPosition;
use super::enemy::MoveStyle;
use super::factory::EntityFactory;
use crate::consts::{DANGER_RADIUS, ENEMY_HALF_EXTENT};
use crate::ecs::Registry;
use crate::settings::GameplaySettings;

/// Waves per difficulty level
const WAVES_PER_LEVEL: u32 = 2;
/// Closest a spawn offset component may be
const MIN_OFFSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    /// Chasers only
    Easy,
    /// Chasers and avoiders
    Normal,
    /// Chasers, avoiders and ping-pongers
    Hard,
}

impl Difficulty {
    pub fn for_wave(index: u32) -> Self {
        match index / WAVES_PER_LEVEL {
            0 => Difficulty::Easy,
            1 => Difficulty::Normal,
            _ => Difficulty::Hard,
        }
    }

    pub fn styles(self) -> &'static [MoveStyle] {
        match self {
            Difficulty::Easy => &[MoveStyle::Chase],
            Difficulty::Normal => &[MoveStyle::Chase, MoveStyle::Avoid],
            Difficulty::Hard => &[MoveStyle::Chase, MoveStyle::Avoid, MoveStyle::PingPong],
        }
    }
}

/// A wave that is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wave {
    pub index: u32,
    pub difficulty: Difficulty,
    /// Enemies per style
    pub size: u32,
}

/// Seeded wave scheduler
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    rng: Pcg32,
    interval: f32,
    initial_size: u32,
    next_index: u32,
    next_at: f32,
}

impl EnemySpawner {
    pub fn new(gameplay: &GameplaySettings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(gameplay.seed),
            interval: gameplay.wave_interval.max(f32::EPSILON),
            initial_size: gameplay.initial_wave_size,
            next_index: 0,
            next_at: 0.0,
        }
    }

    /// Waves spawned so far
    pub fn waves(&self) -> u32 {
        self.next_index
    }

    /// Run time at which the next wave is due
    pub fn next_at(&self) -> f32 {
        self.next_at
    }

    /// Next wave if `elapsed` has reached its time. At most one per call.
    pub fn poll(&mut self, elapsed: f32) -> Option<Wave> {
        if elapsed < self.next_at {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        self.next_at += self.interval;
        Some(Wave {
            index,
            difficulty: Difficulty::for_wave(index),
            size: self.initial_size + index,
        })
    }

    /// Spawn every enemy of `wave` around the arena centre, clear of the
    /// player at `target`
    pub fn spawn(
        &mut self,
        wave: Wave,
        registry: &mut Registry,
        factory: &EntityFactory,
        target: &SharedPosition,
    ) -> usize {
        let player = target.get();
        let bounds = factory.bounds();
        let center = bounds.center();
        let spread = bounds.size() * 0.5 - Vec2::splat(ENEMY_HALF_EXTENT);
        let inset = Vec2::splat(ENEMY_HALF_EXTENT);

        let mut spawned = 0;
        for &style in wave.difficulty.styles() {
            for _ in 0..wave.size {
                let offset = self.offset(spread);
                let position = keep_clear(center + offset, player, bounds.min + inset, bounds.max - inset);
                factory.spawn_enemy(registry, position, style, target);
                spawned += 1;
            }
        }
        log::info!(
            "Wave {} ({:?}): {} enemies",
            wave.index + 1,
            wave.difficulty,
            spawned
        );
        spawned
    }

    /// Random offset outside the danger square around the player
    fn offset(&mut self, spread: Vec2) -> Vec2 {
        let mut x = self.rng.random_range(MIN_OFFSET..=spread.x.max(MIN_OFFSET));
        let mut y = self.rng.random_range(MIN_OFFSET..=spread.y.max(MIN_OFFSET));
        if x < DANGER_RADIUS && y < DANGER_RADIUS {
            if self.rng.random_bool(0.5) {
                x = DANGER_RADIUS;
            } else {
                y = DANGER_RADIUS;
            }
        }
        let sign = |rng: &mut Pcg32| if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Vec2::new(x * sign(&mut self.rng), y * sign(&mut self.rng))
    }
}

/// Clamp `position` into `min..=max`, then move it out of the danger square
/// around `player` along the axis with less to travel. Flips to the far side
/// of the player when the near side is off the arena.
fn keep_clear(position: Vec2, player: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    let mut position = position.clamp(min, max);
    let away = position - player;
    if away.x.abs() >= DANGER_RADIUS || away.y.abs() >= DANGER_RADIUS {
        return position;
    }

    let axis = if away.x.abs() >= away.y.abs() { 0 } else { 1 };
    let sign = if away[axis] < 0.0 { -1.0 } else { 1.0 };
    position[axis] = player[axis] + DANGER_RADIUS * sign;
    if position[axis] < min[axis] || position[axis] > max[axis] {
        position[axis] = player[axis] - DANGER_RADIUS * sign;
    }
    position.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::factory::Images;
    use crate::game::groups;
    use crate::settings::Settings;
    use crate::sim::Transform;

    #[test]
    fn test_difficulty_climbs_every_two_waves() {
        assert_eq!(Difficulty::for_wave(0), Difficulty::Easy);
        assert_eq!(Difficulty::for_wave(1), Difficulty::Easy);
        assert_eq!(Difficulty::for_wave(2), Difficulty::Normal);
        assert_eq!(Difficulty::for_wave(4), Difficulty::Hard);
        assert_eq!(Difficulty::for_wave(40), Difficulty::Hard);
    }

    #[test]
    fn test_waves_follow_interval_and_grow() {
        let mut spawner = EnemySpawner::new(&GameplaySettings::default());
        let first = spawner.poll(0.0).unwrap();
        assert_eq!((first.index, first.size), (0, 5));
        assert!(spawner.poll(9.9).is_none());

        let second = spawner.poll(10.0).unwrap();
        assert_eq!((second.index, second.size), (1, 6));
        assert_eq!(spawner.next_at(), 20.0);
    }

    #[test]
    fn test_spawns_outside_danger_zone_inside_arena() {
        let settings = Settings::default();
        let factory = EntityFactory::new(Images::default(), &settings);
        let target = SharedPosition::new(settings.arena.center().into());
        let mut registry = Registry::new();
        let mut spawner = EnemySpawner::new(&settings.gameplay);

        let wave = Wave {
            index: 4,
            difficulty: Difficulty::Hard,
            size: 4,
        };
        assert_eq!(spawner.spawn(wave, &mut registry, &factory, &target), 12);

        let bounds = settings.arena.bounds();
        for enemy in registry.live_in_group(groups::ENEMY) {
            let p = enemy.get::<Transform>().position;
            assert!(p.x >= bounds.left() && p.x <= bounds.right());
            assert!(p.y >= bounds.top() && p.y <= bounds.bottom());
            let d = (p - target.get()).abs();
            assert!(d.x >= DANGER_RADIUS || d.y >= DANGER_RADIUS);
        }
    }

    #[test]
    fn test_waves_centre_on_arena_and_avoid_cornered_player() {
        let settings = Settings::default();
        let factory = EntityFactory::new(Images::default(), &settings);
        let player = Vec2::new(60.0, 60.0);
        let target = SharedPosition::new(player.into());
        let mut registry = Registry::new();
        let mut spawner = EnemySpawner::new(&settings.gameplay);

        let wave = Wave {
            index: 4,
            difficulty: Difficulty::Hard,
            size: 10,
        };
        spawner.spawn(wave, &mut registry, &factory, &target);

        let bounds = settings.arena.bounds();
        let mut sum = Vec2::ZERO;
        for enemy in registry.live_in_group(groups::ENEMY) {
            let p = enemy.get::<Transform>().position;
            assert!(p.x >= bounds.left() && p.x <= bounds.right());
            assert!(p.y >= bounds.top() && p.y <= bounds.bottom());
            let d = (p - player).abs();
            assert!(d.x >= DANGER_RADIUS || d.y >= DANGER_RADIUS);
            sum += p;
        }
        // Spread around the centre, not around the cornered player
        let mean = sum / 30.0;
        assert!(mean.distance(settings.arena.center()) < mean.distance(player));
    }

    #[test]
    fn test_keep_clear_flips_when_edge_blocks() {
        let min = Vec2::splat(16.0);
        let max = Vec2::new(784.0, 584.0);
        let player = Vec2::new(60.0, 300.0);
        let moved = keep_clear(Vec2::new(40.0, 310.0), player, min, max);
        assert_eq!(moved, Vec2::new(180.0, 310.0));
    }

    #[test]
    fn test_same_seed_same_positions() {
        let settings = Settings::default();
        let factory = EntityFactory::new(Images::default(), &settings);
        let target = SharedPosition::new(settings.arena.center().into());

        let positions = || {
            let mut registry = Registry::new();
            let mut spawner = EnemySpawner::new(&settings.gameplay);
            let wave = spawner.poll(0.0).unwrap();
            spawner.spawn(wave, &mut registry, &factory, &target);
            registry
                .iter()
                .map(|e| e.get::<Transform>().position)
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(), positions());
    }
}

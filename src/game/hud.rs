//! Score and health readout

use glam::Vec2;

use super::clock::RunClock;
use super::state::{GamePhase, Outcome};
use crate::platform::RenderTarget;
use crate::sim::GameEvent;

const TEXT_SIZE: u32 = 24;
const BANNER_SIZE: u32 = 80;

/// HUD state fed from drained game events
#[derive(Debug, Clone, Default)]
pub struct Hud {
    score: i32,
    health: i32,
}

impl Hud {
    pub fn new(health: i32) -> Self {
        Self { score: 0, health }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreChanged(delta) => self.score = (self.score + delta).max(0),
            GameEvent::PlayerHealthChanged(delta) => self.health = (self.health + delta).max(0),
            GameEvent::PlayerDown => self.health = 0,
            GameEvent::EnemyDown(_) | GameEvent::Sound(_) => {}
        }
    }

    pub fn render(
        &self,
        target: &mut dyn RenderTarget,
        phase: GamePhase,
        clock: &RunClock,
        arena: Vec2,
    ) {
        match phase {
            GamePhase::Menu => {
                let minutes = (clock.remaining() / 60.0).round() as u32;
                target.draw_text(
                    "Press Enter to Start",
                    Vec2::new(arena.x * 0.5 - 150.0, arena.y / 20.0),
                    TEXT_SIZE,
                );
                target.draw_text(
                    &format!("Survive for {} Mins", minutes),
                    Vec2::new(arena.x * 0.5 - 130.0, arena.y / 20.0 + 30.0),
                    TEXT_SIZE,
                );
            }
            GamePhase::Stage => {
                target.draw_text(&clock.display(), Vec2::new(arena.x * 0.5 - 40.0, arena.y / 20.0), TEXT_SIZE);
                self.render_counters(target);
            }
            GamePhase::Result => {
                let banner = clock.outcome().unwrap_or(Outcome::Lose).banner();
                target.draw_text(banner, Vec2::new(arena.x / 3.5, arena.y / 4.0), BANNER_SIZE);
                self.render_counters(target);
            }
        }
    }

    fn render_counters(&self, target: &mut dyn RenderTarget) {
        target.draw_text(&format!("Score: {}", self.score), Vec2::new(10.0, 10.0), TEXT_SIZE);
        target.draw_text(&format!("Health: {}", self.health), Vec2::new(10.0, 40.0), TEXT_SIZE);
    }
}

//! Typed game events
//!
//! Capabilities and collision reactions push events; the session drains the
//! queue once per simulation step, after the update pass. Nothing is
//! dispatched re-entrantly from inside a hook.

use std::collections::VecDeque;

use crate::audio::SoundEffect;
use crate::ecs::EntityId;

/// Cross-system notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score delta (HUD clamps the total at zero)
    ScoreChanged(i32),
    /// Player health delta
    PlayerHealthChanged(i32),
    /// Player health reached zero
    PlayerDown,
    /// An enemy was killed
    EnemyDown(EntityId),
    /// One-shot sound cue
    Sound(SoundEffect),
}

/// FIFO event queue
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and yield every queued event in push order
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

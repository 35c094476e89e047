//! Polled input state

use glam::Vec2;

/// Logical buttons the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    Confirm,
}

impl Action {
    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Current input state, polled from inside update hooks
pub trait InputState {
    /// Whether the button is held right now
    fn is_held(&self, action: Action) -> bool;
    /// Aim point in arena coordinates
    fn aim(&self) -> Vec2;
}

/// Nothing held, aiming at the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl InputState for NullInput {
    fn is_held(&self, _action: Action) -> bool {
        false
    }

    fn aim(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// A frozen copy of the input state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    held: u8,
    pub aim: Vec2,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.press(action);
        self
    }

    pub fn aiming_at(mut self, aim: Vec2) -> Self {
        self.aim = aim;
        self
    }

    pub fn press(&mut self, action: Action) {
        self.held |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.held &= !action.bit();
    }
}

impl InputState for InputSnapshot {
    fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    fn aim(&self) -> Vec2 {
        self.aim
    }
}

/// Timeline of input snapshots keyed by elapsed seconds
///
/// `at(t)` returns the last snapshot whose start time is `<= t`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: Vec<(f32, InputSnapshot)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `snapshot` from `time` onwards. Keys may be added in any order.
    pub fn then_at(mut self, time: f32, snapshot: InputSnapshot) -> Self {
        let index = self.keys.partition_point(|(t, _)| *t <= time);
        self.keys.insert(index, (time, snapshot));
        self
    }

    pub fn at(&self, time: f32) -> InputSnapshot {
        let index = self.keys.partition_point(|(t, _)| *t <= time);
        match index {
            0 => InputSnapshot::default(),
            i => self.keys[i - 1].1,
        }
    }
}

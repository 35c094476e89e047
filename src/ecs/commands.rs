//! Deferred registry mutations
//!
//! Capabilities run while the registry is being walked, so they cannot add
//! entities directly. They queue closures here instead; the queue is applied
//! in FIFO order at the step boundary.

use std::collections::VecDeque;

use super::registry::Registry;

type Command = Box<dyn FnOnce(&mut Registry)>;

/// FIFO buffer of pending registry mutations
#[derive(Default)]
pub struct Commands {
    queue: VecDeque<Command>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a mutation (typically an entity spawn)
    pub fn push(&mut self, command: impl FnOnce(&mut Registry) + 'static) {
        self.queue.push_back(Box::new(command));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Apply every queued command in order, returning how many ran.
    pub fn apply(&mut self, registry: &mut Registry) -> usize {
        let mut applied = 0;
        while let Some(command) = self.queue.pop_front() {
            command(registry);
            applied += 1;
        }
        applied
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

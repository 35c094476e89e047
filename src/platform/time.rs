//! Frame time sources

use std::time::Instant;

/// Reports wall-clock seconds elapsed since the previous call
pub trait FrameClock {
    fn frame_time(&mut self) -> f32;
}

/// Real clock
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn frame_time(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        elapsed
    }
}

/// Every frame takes exactly the same time
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    pub frame: f32,
}

impl InstantClock {
    pub fn new(frame: f32) -> Self {
        Self { frame }
    }
}

impl FrameClock for InstantClock {
    fn frame_time(&mut self) -> f32 {
        self.frame
    }
}

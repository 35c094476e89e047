//! Run timer and win/lose decision

use super::state::Outcome;

/// Counts simulated run time toward the survival limit
#[derive(Debug, Clone)]
pub struct RunClock {
    elapsed: f32,
    limit: f32,
    running: bool,
    outcome: Option<Outcome>,
}

impl RunClock {
    pub fn new(limit: f32) -> Self {
        Self {
            elapsed: 0.0,
            limit,
            running: false,
            outcome: None,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
        self.outcome = None;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn remaining(&self) -> f32 {
        (self.limit - self.elapsed).max(0.0)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Advance by `dt`. Returns the outcome on the tick the limit is reached.
    pub fn tick(&mut self, dt: f32) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed >= self.limit {
            self.elapsed = self.limit;
            return self.finish(Outcome::Win);
        }
        None
    }

    /// The player died. Returns the outcome unless the run had already ended.
    pub fn player_down(&mut self) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        self.finish(Outcome::Lose)
    }

    fn finish(&mut self, outcome: Outcome) -> Option<Outcome> {
        self.running = false;
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Elapsed time as `MM:SS`
    pub fn display(&self) -> String {
        format_mm_ss(self.elapsed)
    }
}

pub fn format_mm_ss(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

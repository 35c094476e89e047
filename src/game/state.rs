//! Session phases

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for confirm
    #[default]
    Menu,
    /// Run in progress
    Stage,
    /// Run over; confirm restarts
    Result,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Survived until the time limit
    Win,
    /// Player health reached zero
    Lose,
}

impl Outcome {
    pub fn banner(self) -> &'static str {
        match self {
            Outcome::Win => "You Win!",
            Outcome::Lose => "You Lose!",
        }
    }
}

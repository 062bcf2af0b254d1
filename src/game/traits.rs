use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Invalid input received
    InvalidInput(String),
    /// Game is not in a valid state for the operation
    InvalidState(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            GameError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

#[derive(Debug, Default)]
pub struct TickResult {
    /// Encoded event every client should hear about, if anything happened
    pub broadcast: Option<Vec<u8>>,
}

/// A tick-driven simulation a host can clock, steer and observe.
pub trait Game: Send + Sync {
    fn tick(&mut self) -> TickResult;
    fn handle_input(&mut self, input: &[u8]) -> Result<(), GameError>;
    fn reset(&mut self);
    fn encode_state(&self) -> Vec<u8>;
    fn tick_rate(&self) -> Duration;
    fn is_game_over(&self) -> bool {
        false
    }
}

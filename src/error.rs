//! Errors reported to the referee.
//!
//! The `Display` text of each variant is the exact message sent in `{"error": ...}` replies.

use thiserror::Error;

/// A request that was understood but could not be played.
///
/// The session is left as it was before the request whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The opening is not the center, or the center is already taken
    #[error("First move must be at center (15,15)")]
    OpeningNotCenter,
    /// Out of the board, occupied, or missing coordinates
    #[error("Invalid opponent move")]
    InvalidOpponentMove,
    /// `command` is not one of `start`, `move`, `reset`
    #[error("Unknown command")]
    UnknownCommand,
    /// Handling took longer than the configured move timeout
    #[error("Move timeout")]
    MoveTimeout,
    /// No empty cell left for the agent
    #[error("Board is full")]
    BoardFull,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_messages() {
        assert_eq!(
            GameError::OpeningNotCenter.to_string(),
            "First move must be at center (15,15)"
        );
        assert_eq!(GameError::InvalidOpponentMove.to_string(), "Invalid opponent move");
        assert_eq!(GameError::UnknownCommand.to_string(), "Unknown command");
        assert_eq!(GameError::MoveTimeout.to_string(), "Move timeout");
        assert_eq!(GameError::BoardFull.to_string(), "Board is full");
    }
}
